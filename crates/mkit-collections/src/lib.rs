//! Sequential collection helpers
//!
//! - `slice`: index-based insert/delete, capacity shrinking, map/filter/reduce, set algebra
//! - `list`: the `List` trait with array-backed and doubly-linked implementations

pub mod list;
pub mod slice;

pub use list::{ArrayList, LinkedList, List};
