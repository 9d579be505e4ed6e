//! Storage layer - raw fixed-page file I/O.
//!
//! - [`Page`] - the fixed-size unit of I/O
//! - [`PageFile`] - an open page file: whole-page reads and writes, append,
//!   ensure-capacity, and cursor-relative access

mod page;
mod page_file;

pub use page::Page;
pub use page_file::PageFile;
