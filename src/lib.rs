//! pagestore - fixed-page file storage with a buffer pool and
//! interchangeable eviction policies.
//!
//! # Architecture
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │             Record layer (external, not here)            │
//! │     interprets page bytes as slotted tuples/schemas      │
//! └──────────────────────────────────────────────────────────┘
//!                            ↓
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Buffer Pool (buffer/)                   │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │  Eviction Policies: FIFO | LRU | LFU | CLOCK       │  │
//! │  │            (chosen at pool init)                   │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │          BufferPool + Frame + PoolStats                  │
//! └──────────────────────────────────────────────────────────┘
//!                            ↓
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Storage Layer (storage/)                 │
//! │                    PageFile + Page                       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The storage layer does raw whole-page I/O against a headerless file of
//! 4KB pages. The buffer pool caches those pages in a fixed set of frames
//! with pin-based reference counting and dirty write-back; on a capacity
//! miss the active replacement policy picks the frame to overwrite.
//!
//! Everything is single-threaded and fully synchronous: one pool, one
//! owner, one bound open file.
//!
//! # Quick Start
//! ```no_run
//! use pagestore::{BufferPool, PageFile, PageId, ReplacementPolicy};
//!
//! PageFile::create("table.pf").unwrap();
//! let file = PageFile::open("table.pf").unwrap();
//!
//! let mut pool = BufferPool::new(file, 16, ReplacementPolicy::Lru);
//!
//! let handle = pool.pin(PageId::new(0)).unwrap();
//! pool.page_data_mut(&handle).unwrap()[0] = 0xAB;
//! pool.mark_dirty(PageId::new(0)).unwrap();
//! pool.unpin(PageId::new(0)).unwrap();
//!
//! pool.shutdown().unwrap();
//! ```

pub mod buffer;
pub mod common;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::PAGE_SIZE;
pub use common::{Error, FrameId, PageId, Result};

pub use buffer::{BufferPool, Frame, PageHandle, PoolStats, ReplacementPolicy};
pub use storage::{Page, PageFile};
