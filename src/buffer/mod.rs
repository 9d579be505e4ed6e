//! Buffer pool management.
//!
//! The buffer pool is the in-memory cache layer between the record layer
//! and the page file. It manages a fixed set of frames, each holding one
//! page, under a replacement policy chosen at pool init.
//!
//! # Components
//! - [`BufferPool`] - the page cache: pin/unpin/mark-dirty/force/flush
//! - [`Frame`] - a slot holding one page plus its bookkeeping
//! - [`PageHandle`] - transient handle returned by pin
//! - [`PoolStats`] - I/O and hit counters
//! - [`replacer`] - the four eviction policies

mod frame;
mod pool;
pub mod replacer;
mod stats;

pub use frame::Frame;
pub use pool::{BufferPool, PageHandle};
pub use replacer::ReplacementPolicy;
pub use stats::PoolStats;
