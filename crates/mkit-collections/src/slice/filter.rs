/// Clone out the elements that satisfy `pred`, preserving order.
pub fn filter<T, F>(src: &[T], mut pred: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    src.iter().filter(|v| pred(v)).cloned().collect()
}
