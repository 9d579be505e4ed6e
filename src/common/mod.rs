//! Common types shared across pagestore.
//!
//! Fundamental primitives used by both the storage layer and the buffer pool:
//! - Configuration constants
//! - The crate-wide error type
//! - Identifiers (PageId, FrameId)

pub mod config;
pub mod error;
mod frame_id;
mod page_id;

pub use error::{Error, Result};
pub use frame_id::FrameId;
pub use page_id::PageId;
