/// Left fold over `src` starting from `initial`.
pub fn reduce<T, U, F>(src: &[T], initial: U, f: F) -> U
where
    F: FnMut(U, &T) -> U,
{
    src.iter().fold(initial, f)
}

pub fn reduce_with_index<T, U, F>(src: &[T], initial: U, mut f: F) -> U
where
    F: FnMut(U, usize, &T) -> U,
{
    src.iter()
        .enumerate()
        .fold(initial, |acc, (i, v)| f(acc, i, v))
}
