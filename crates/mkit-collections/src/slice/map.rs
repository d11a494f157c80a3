pub fn map<T, U, F>(src: &[T], f: F) -> Vec<U>
where
    F: FnMut(&T) -> U,
{
    src.iter().map(f).collect()
}

/// Like [`map`], with the element's position passed first.
pub fn map_with_index<T, U, F>(src: &[T], mut f: F) -> Vec<U>
where
    F: FnMut(usize, &T) -> U,
{
    src.iter().enumerate().map(|(i, v)| f(i, v)).collect()
}
