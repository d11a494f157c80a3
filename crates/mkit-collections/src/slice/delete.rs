use mkit_core::{MkitError, Result};

/// Remove and return the element at `index`, shifting later elements left.
pub fn delete_at<T>(src: &mut Vec<T>, index: usize) -> Result<T> {
    if index >= src.len() {
        return Err(MkitError::index_out_of_range(src.len(), index));
    }
    Ok(src.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_keeps_order() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        assert_eq!(delete_at(&mut v, 1).unwrap(), 'b');
        assert_eq!(delete_at(&mut v, 2).unwrap(), 'd');
        assert_eq!(delete_at(&mut v, 0).unwrap(), 'a');
        assert_eq!(v, ['c']);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut v = vec![1];
        assert_eq!(
            delete_at(&mut v, 1),
            Err(MkitError::IndexOutOfRange { length: 1, index: 1 })
        );

        let mut empty: Vec<i32> = Vec::new();
        assert!(delete_at(&mut empty, 0).is_err());
    }
}
