use mkit_core::{MkitError, Result};

/// Insert `elem` so that it ends up at `index`, shifting later elements right.
///
/// `index == src.len()` appends.
pub fn insert_at<T>(src: &mut Vec<T>, index: usize, elem: T) -> Result<()> {
    if index > src.len() {
        return Err(MkitError::index_out_of_range(src.len(), index));
    }
    src.insert(index, elem);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_front_middle_back() {
        let mut v = vec![2, 4];
        insert_at(&mut v, 0, 1).unwrap();
        insert_at(&mut v, 2, 3).unwrap();
        insert_at(&mut v, 4, 5).unwrap();
        assert_eq!(v, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_insert_into_empty() {
        let mut v: Vec<&str> = Vec::new();
        insert_at(&mut v, 0, "a").unwrap();
        assert_eq!(v, ["a"]);
    }

    #[test]
    fn test_insert_past_end_is_rejected() {
        let mut v = vec![1, 2, 3];
        let err = insert_at(&mut v, 4, 9).unwrap_err();
        assert_eq!(err, MkitError::IndexOutOfRange { length: 3, index: 4 });
        assert_eq!(v, [1, 2, 3]);
    }
}
