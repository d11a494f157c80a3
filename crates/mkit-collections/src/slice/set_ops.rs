//! Set algebra over slices.
//!
//! Results hold each distinct element once, in the order it was first seen
//! (left operand before right).

use hashbrown::HashSet;
use rustc_hash::FxHasher;
use std::hash::{BuildHasherDefault, Hash};

type FxHashSet<T> = HashSet<T, BuildHasherDefault<FxHasher>>;

fn to_set<T: Eq + Hash>(src: &[T]) -> FxHashSet<&T> {
    src.iter().collect()
}

/// Clone the elements of `items` accepted by `keep`, skipping repeats.
fn collect_distinct<'a, T, I, F>(items: I, mut keep: F) -> Vec<T>
where
    T: Eq + Hash + Clone + 'a,
    I: Iterator<Item = &'a T>,
    F: FnMut(&T) -> bool,
{
    let mut emitted = FxHashSet::default();
    items
        .filter(|v| keep(v) && emitted.insert(*v))
        .cloned()
        .collect()
}

/// Elements present in both `a` and `b`.
pub fn intersection<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let in_b = to_set(b);
    collect_distinct(a.iter(), |v| in_b.contains(v))
}

/// Elements present in either `a` or `b`.
pub fn union<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    collect_distinct(a.iter().chain(b), |_| true)
}

/// Elements of `a` that are not in `b`.
pub fn difference<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let in_b = to_set(b);
    collect_distinct(a.iter(), |v| !in_b.contains(v))
}

/// Elements in exactly one of `a` and `b`.
pub fn symmetric_difference<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let (in_a, in_b) = (to_set(a), to_set(b));
    collect_distinct(a.iter().chain(b), |v| in_a.contains(v) != in_b.contains(v))
}
