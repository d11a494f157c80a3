mod add;
mod delete;
mod filter;
mod map;
mod reduce;
mod set_ops;
mod shrink;

pub use add::insert_at;
pub use delete::delete_at;
pub use filter::filter;
pub use map::{map, map_with_index};
pub use reduce::{reduce, reduce_with_index};
pub use set_ops::{difference, intersection, symmetric_difference, union};
pub use shrink::{calc_capacity, shrink};
