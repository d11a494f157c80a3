//! Doubly-linked list stored in an index arena.
//!
//! Slot 0 and slot 1 are the head and tail sentinels, so every real node
//! always has both neighbours and insertion/removal never special-case the
//! ends. Freed slots are recycled before the arena grows.

use super::List;
use mkit_core::{MkitError, Result};
use std::fmt;

const HEAD: usize = 0;
const TAIL: usize = 1;

#[derive(Clone)]
struct Node<T> {
    /// `None` only for the sentinels and for free slots.
    value: Option<T>,
    prev: usize,
    next: usize,
}

#[derive(Clone)]
pub struct LinkedList<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        let sentinel = |prev, next| Node {
            value: None,
            prev,
            next,
        };
        Self {
            nodes: vec![sentinel(TAIL, TAIL), sentinel(HEAD, HEAD)],
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn from_vec(values: Vec<T>) -> Self {
        let mut list = Self::new();
        list.append(values);
        list
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].next,
            remaining: self.len,
        }
    }

    pub fn front(&self) -> Option<&T> {
        self.nodes[self.nodes[HEAD].next].value.as_ref()
    }

    pub fn back(&self) -> Option<&T> {
        self.nodes[self.nodes[TAIL].prev].value.as_ref()
    }

    /// Slot of the node at `index`, walking from whichever end is closer.
    ///
    /// `index` must be below `len`.
    fn locate(&self, index: usize) -> usize {
        if index < self.len / 2 {
            let mut slot = self.nodes[HEAD].next;
            for _ in 0..index {
                slot = self.nodes[slot].next;
            }
            slot
        } else {
            let mut slot = self.nodes[TAIL].prev;
            for _ in index + 1..self.len {
                slot = self.nodes[slot].prev;
            }
            slot
        }
    }

    fn locate_checked(&self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(MkitError::index_out_of_range(self.len, index));
        }
        Ok(self.locate(index))
    }

    /// Link a new node carrying `value` directly in front of slot `next`.
    fn link_before(&mut self, next: usize, value: T) {
        let prev = self.nodes[next].prev;
        let node = Node {
            value: Some(value),
            prev,
            next,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.nodes[prev].next = slot;
        self.nodes[next].prev = slot;
        self.len += 1;
    }

    fn unlink(&mut self, slot: usize) -> Option<T> {
        let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free.push(slot);
        self.len -= 1;
        self.nodes[slot].value.take()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.append(iter);
        list
    }
}

impl<T> List<T> for LinkedList<T> {
    fn get(&self, index: usize) -> Result<&T> {
        let slot = self.locate_checked(index)?;
        self.nodes[slot]
            .value
            .as_ref()
            .ok_or_else(|| MkitError::index_out_of_range(self.len, index))
    }

    fn append<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.link_before(TAIL, value);
        }
    }

    fn add(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(MkitError::index_out_of_range(self.len, index));
        }
        let next = if index == self.len {
            TAIL
        } else {
            self.locate(index)
        };
        self.link_before(next, value);
        Ok(())
    }

    fn set(&mut self, index: usize, value: T) -> Result<()> {
        let slot = self.locate_checked(index)?;
        self.nodes[slot].value = Some(value);
        Ok(())
    }

    fn delete(&mut self, index: usize) -> Result<T> {
        let slot = self.locate_checked(index)?;
        self.unlink(slot)
            .ok_or_else(|| MkitError::index_out_of_range(self.len, index))
    }

    fn len(&self) -> usize {
        self.len
    }

    fn cap(&self) -> usize {
        self.len
    }

    fn range<E, F>(&self, mut f: F) -> std::result::Result<(), E>
    where
        F: FnMut(usize, &T) -> std::result::Result<(), E>,
    {
        self.iter().enumerate().try_for_each(|(i, v)| f(i, v))
    }

    fn as_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    cursor: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.cursor];
        self.cursor = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
