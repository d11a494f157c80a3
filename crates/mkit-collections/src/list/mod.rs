//! Index-addressed lists.

mod array_list;
mod linked_list;

pub use array_list::ArrayList;
pub use linked_list::{Iter, LinkedList};

use mkit_core::Result;

/// An ordered sequence addressed by position.
///
/// Indices run from `0` to `len() - 1`; `add` additionally accepts `len()`
/// to append. Out-of-range positions yield
/// [`MkitError::IndexOutOfRange`](mkit_core::MkitError::IndexOutOfRange).
pub trait List<T> {
    fn get(&self, index: usize) -> Result<&T>;

    /// Push every value onto the back, in iteration order.
    fn append<I: IntoIterator<Item = T>>(&mut self, values: I);

    /// Insert `value` at `index`, shifting later elements back.
    fn add(&mut self, index: usize, value: T) -> Result<()>;

    /// Replace the element at `index`.
    fn set(&mut self, index: usize, value: T) -> Result<()>;

    /// Remove and return the element at `index`.
    fn delete(&mut self, index: usize) -> Result<T>;

    fn len(&self) -> usize;

    /// Slots available before the backing storage has to grow.
    fn cap(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `f` with each position and element in order, stopping at the first error.
    fn range<E, F>(&self, f: F) -> std::result::Result<(), E>
    where
        F: FnMut(usize, &T) -> std::result::Result<(), E>;

    /// Copy the elements out into a fresh `Vec`.
    fn as_vec(&self) -> Vec<T>
    where
        T: Clone;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mkit_core::MkitError;

    fn exercise<L: List<i32>>(mut list: L) {
        assert!(list.is_empty());
        assert_eq!(list.get(0), Err(MkitError::index_out_of_range(0, 0)));

        list.append([1, 2, 3]);
        list.add(0, 0).unwrap();
        list.add(4, 4).unwrap();
        list.add(2, 10).unwrap();
        assert_eq!(list.as_vec(), [0, 1, 10, 2, 3, 4]);
        assert_eq!(list.len(), 6);
        assert!(list.cap() >= list.len());

        list.set(2, 20).unwrap();
        assert_eq!(list.get(2), Ok(&20));
        assert_eq!(list.delete(2), Ok(20));
        assert_eq!(list.delete(0), Ok(0));
        assert_eq!(list.as_vec(), [1, 2, 3, 4]);

        assert_eq!(list.add(5, 9), Err(MkitError::index_out_of_range(4, 5)));
        assert_eq!(list.set(4, 9), Err(MkitError::index_out_of_range(4, 4)));
        assert_eq!(list.delete(4), Err(MkitError::index_out_of_range(4, 4)));

        let mut seen = Vec::new();
        let stopped: std::result::Result<(), usize> = list.range(|i, v| {
            if *v == 3 {
                return Err(i);
            }
            seen.push(*v);
            Ok(())
        });
        assert_eq!(stopped, Err(2));
        assert_eq!(seen, [1, 2]);

        for _ in 0..4 {
            list.delete(0).unwrap();
        }
        assert!(list.is_empty());
    }

    #[test]
    fn test_array_list_contract() {
        exercise(ArrayList::new());
    }

    #[test]
    fn test_linked_list_contract() {
        exercise(LinkedList::new());
    }
}
