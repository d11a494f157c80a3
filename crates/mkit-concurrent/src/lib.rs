//! Lock-free concurrent data structures for mkit
//!
//! - `linked_queue`: Unbounded lock-free multi-producer multi-consumer FIFO queue
//!   with epoch-based reclamation
//! - `stress`: Multi-producer/multi-consumer harness that checks the queue's guarantees

pub mod linked_queue;
pub mod stress;

pub use linked_queue::{ConcurrentLinkedQueue, QueueError};
pub use stress::{StressError, StressReport, StressRunner};
