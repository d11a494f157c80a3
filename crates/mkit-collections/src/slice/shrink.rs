/// Capacities at or below this are never shrunk.
const MIN_SHRINK_CAPACITY: usize = 64;
/// Above this, a half-empty buffer is cut to five eighths of its capacity.
const LARGE_CAPACITY: usize = 2048;

/// Decide whether a buffer with `capacity` holding `len` elements should shrink.
///
/// Returns the new capacity and `true` when it should, or `(capacity, false)`.
pub fn calc_capacity(capacity: usize, len: usize) -> (usize, bool) {
    if capacity <= MIN_SHRINK_CAPACITY || len == 0 {
        return (capacity, false);
    }

    let ratio = capacity / len;
    if capacity > LARGE_CAPACITY && ratio >= 2 {
        return ((capacity as f64 * 0.625) as usize, true);
    }
    if capacity <= LARGE_CAPACITY && ratio >= 4 {
        return (capacity / 2, true);
    }
    (capacity, false)
}

/// Move `src` into a smaller buffer when [`calc_capacity`] says it is mostly unused.
pub fn shrink<T>(src: Vec<T>) -> Vec<T> {
    if src.is_empty() {
        return src;
    }

    match calc_capacity(src.capacity(), src.len()) {
        (capacity, true) => {
            let mut dst = Vec::with_capacity(capacity);
            dst.extend(src);
            dst
        }
        _ => src,
    }
}
