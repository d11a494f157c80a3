use super::List;
use crate::slice::{delete_at, insert_at, shrink};
use mkit_core::{MkitError, Result};

/// A `Vec`-backed list that gives memory back as it empties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayList<T> {
    elems: Vec<T>,
}

impl<T> ArrayList<T> {
    pub fn new() -> Self {
        Self { elems: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elems: Vec::with_capacity(capacity),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elems.iter()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.elems.len() {
            return Err(MkitError::index_out_of_range(self.elems.len(), index));
        }
        Ok(())
    }
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ArrayList<T> {
    fn from(elems: Vec<T>) -> Self {
        Self { elems }
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elems: iter.into_iter().collect(),
        }
    }
}

impl<T> List<T> for ArrayList<T> {
    fn get(&self, index: usize) -> Result<&T> {
        self.elems
            .get(index)
            .ok_or_else(|| MkitError::index_out_of_range(self.elems.len(), index))
    }

    fn append<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.elems.extend(values);
    }

    fn add(&mut self, index: usize, value: T) -> Result<()> {
        insert_at(&mut self.elems, index, value)
    }

    fn set(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        self.elems[index] = value;
        Ok(())
    }

    fn delete(&mut self, index: usize) -> Result<T> {
        let removed = delete_at(&mut self.elems, index)?;
        self.elems = shrink(std::mem::take(&mut self.elems));
        Ok(removed)
    }

    fn len(&self) -> usize {
        self.elems.len()
    }

    fn cap(&self) -> usize {
        self.elems.capacity()
    }

    fn range<E, F>(&self, mut f: F) -> std::result::Result<(), E>
    where
        F: FnMut(usize, &T) -> std::result::Result<(), E>,
    {
        self.elems.iter().enumerate().try_for_each(|(i, v)| f(i, v))
    }

    fn as_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.elems.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_vec_is_a_copy() {
        let mut list: ArrayList<i32> = vec![1, 2, 3].into();
        let mut copy = list.as_vec();
        copy[0] = 100;
        list.set(1, 200).unwrap();

        assert_eq!(copy, [100, 2, 3]);
        assert_eq!(list.as_vec(), [1, 200, 3]);
    }

    #[test]
    fn test_delete_shrinks_sparse_storage() {
        let mut list = ArrayList::with_capacity(1024);
        list.append(0..200);
        let before = list.cap();

        while list.len() > 10 {
            list.delete(list.len() - 1).unwrap();
        }
        assert!(list.cap() < before);
        assert_eq!(list.as_vec(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_small_list_keeps_capacity() {
        let mut list = ArrayList::with_capacity(16);
        list.append(["a", "b", "c"]);
        let before = list.cap();
        list.delete(0).unwrap();
        assert_eq!(list.cap(), before);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn test_collect_and_range_visits_all() {
        let list: ArrayList<u8> = (1..=5).collect();
        let mut total = 0u32;
        list.range::<(), _>(|i, v| {
            assert_eq!(usize::from(*v), i + 1);
            total += u32::from(*v);
            Ok(())
        })
        .unwrap();
        assert_eq!(total, 15);
    }
}
