//! Error types for pagestore.
//!
//! One crate-wide [`Error`] enum keeps error handling consistent across the
//! storage layer and the buffer pool. Every public operation returns
//! [`Result`]; pure accessors return their value directly.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagestore.
///
/// The variants fall into three categories:
/// - resource not found: [`Error::FileNotFound`], [`Error::NonExistentPage`],
///   [`Error::PageNotResident`]
/// - handle/state misuse: [`Error::HandleNotInitialized`],
///   [`Error::PageNotPinned`], [`Error::PoolPinned`],
///   [`Error::NoEvictableFrame`]
/// - I/O failure: [`Error::WriteFailed`], [`Error::Io`]
///
/// Nothing is retried internally; every failure is surfaced immediately.
#[derive(Debug, Error)]
pub enum Error {
    /// The named page file does not exist on disk.
    #[error("page file not found: {0}")]
    FileNotFound(PathBuf),

    /// Operation on a handle that has been closed (or was never opened).
    #[error("file handle not initialized")]
    HandleNotInitialized,

    /// A page could not be written in full. Pages are all-or-nothing; a
    /// short write never leaves a partial page visible to callers.
    #[error("page write failed: {0}")]
    WriteFailed(#[source] io::Error),

    /// The page number lies outside `[0, total_pages)`, or a read came up
    /// short of a full page.
    #[error("page {0} does not exist")]
    NonExistentPage(u32),

    /// The page is not resident in any buffer frame.
    #[error("page {0} is not resident in the buffer pool")]
    PageNotResident(u32),

    /// Attempted to unpin a page whose pin count is already zero.
    ///
    /// This indicates a bug in the caller - unpins must match pins.
    #[error("page {0} is not pinned")]
    PageNotPinned(u32),

    /// Shutdown attempted while frames are still pinned. The pool is left
    /// fully intact; callers must unpin everything first.
    #[error("cannot shut down: {0} frame(s) still pinned")]
    PoolPinned(usize),

    /// A page load needed a victim frame but every frame is pinned.
    #[error("no evictable frame: all {0} frames are pinned")]
    NoEvictableFrame(usize),

    /// Any other I/O error from the underlying file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
