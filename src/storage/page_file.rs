//! PageFile - low-level file I/O for fixed-size pages.
//!
//! A page file is a raw, headerless sequence of [`Page`]s. [`PageFile`] is
//! the open handle: it tracks the total page count (file length divided by
//! page size) and a cursor used by the relative read operations.
//!
//! # File Layout
//! ```text
//! ┌─────────┬─────────┬─────────┬─────────┬─────────┐
//! │ Page 0  │ Page 1  │ Page 2  │  ...    │ Page N  │
//! │ (4KB)   │ (4KB)   │ (4KB)   │         │ (4KB)   │
//! └─────────┴─────────┴─────────┴─────────┴─────────┘
//! Offset:  0      4096     8192    ...    N×4096
//! ```
//!
//! One handle represents one open file. Concurrent writers to the same file
//! are unguarded and out of scope.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::common::config::PAGE_SIZE;
use crate::common::{Error, PageId, Result};
use crate::storage::page::Page;

/// An open page file.
///
/// The handle keeps `file` in an `Option` so a closed handle stays
/// representable: operations after [`PageFile::close`] fail with
/// [`Error::HandleNotInitialized`] instead of being unreachable.
pub struct PageFile {
    path: PathBuf,
    file: Option<File>,
    /// Number of pages in the file. Only ever grows.
    total_pages: u32,
    /// Current page position, updated by reads, writes and appends.
    cursor: u32,
}

impl PageFile {
    // ========================================================================
    // File lifecycle
    // ========================================================================

    /// Create a page file containing exactly one zero-filled page.
    ///
    /// Truncates and overwrites if a file with this name already exists.
    ///
    /// # Errors
    /// [`Error::WriteFailed`] if the file cannot be created or the first
    /// page cannot be fully written.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(Error::WriteFailed)?;

        let first = Page::new();
        file.write_all(first.as_slice()).map_err(Error::WriteFailed)?;
        file.sync_all().map_err(Error::WriteFailed)?;

        Ok(())
    }

    /// Open an existing page file.
    ///
    /// The total page count is derived from the file length; the cursor
    /// starts at page 0.
    ///
    /// # Errors
    /// [`Error::FileNotFound`] if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::FileNotFound(path));
            }
            Err(e) => return Err(e.into()),
        };

        let len = file.metadata()?.len();
        let total_pages = (len / PAGE_SIZE as u64) as u32;

        Ok(Self {
            path,
            file: Some(file),
            total_pages,
            cursor: 0,
        })
    }

    /// Close the file handle.
    ///
    /// # Errors
    /// [`Error::HandleNotInitialized`] if the handle is already closed.
    pub fn close(&mut self) -> Result<()> {
        match self.file.take() {
            Some(file) => {
                file.sync_all()?;
                Ok(())
            }
            None => Err(Error::HandleNotInitialized),
        }
    }

    /// Delete a page file from disk.
    ///
    /// # Errors
    /// [`Error::FileNotFound`] if the file does not exist.
    pub fn destroy<P: AsRef<Path>>(path: P) -> Result<()> {
        match fs::remove_file(path.as_ref()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Error::FileNotFound(path.as_ref().to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }

    // ========================================================================
    // Absolute reads and writes
    // ========================================================================

    /// Read page `page_num` into `buf`.
    ///
    /// Reads are all-or-nothing: a short read is reported as
    /// [`Error::NonExistentPage`], never as a partial page. On success the
    /// cursor moves to `page_num`.
    ///
    /// # Errors
    /// - [`Error::NonExistentPage`] if `page_num` is outside
    ///   `[0, total_pages)` or the read comes up short
    /// - [`Error::HandleNotInitialized`] if the handle is closed
    pub fn read_block(&mut self, page_num: PageId, buf: &mut Page) -> Result<()> {
        if page_num.0 >= self.total_pages {
            return Err(Error::NonExistentPage(page_num.0));
        }
        let file = self.file.as_mut().ok_or(Error::HandleNotInitialized)?;

        let offset = page_num.0 as u64 * PAGE_SIZE as u64;
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(buf.as_mut_slice())
            .map_err(|_| Error::NonExistentPage(page_num.0))?;

        self.cursor = page_num.0;
        Ok(())
    }

    /// Write `buf` to page `page_num`.
    ///
    /// Writes are all-or-nothing and followed by `fsync`. On success the
    /// cursor moves to `page_num`.
    ///
    /// # Errors
    /// - [`Error::NonExistentPage`] if `page_num` is outside
    ///   `[0, total_pages)`
    /// - [`Error::HandleNotInitialized`] if the handle is closed
    /// - [`Error::WriteFailed`] if the page cannot be fully written
    pub fn write_block(&mut self, page_num: PageId, buf: &Page) -> Result<()> {
        if page_num.0 >= self.total_pages {
            return Err(Error::NonExistentPage(page_num.0));
        }
        let file = self.file.as_mut().ok_or(Error::HandleNotInitialized)?;

        let offset = page_num.0 as u64 * PAGE_SIZE as u64;
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(buf.as_slice()).map_err(Error::WriteFailed)?;
        file.sync_all().map_err(Error::WriteFailed)?;

        self.cursor = page_num.0;
        Ok(())
    }

    /// Write `buf` to the page at the cursor, then advance the cursor.
    ///
    /// # Errors
    /// Same as [`PageFile::write_block`].
    pub fn write_current_block(&mut self, buf: &Page) -> Result<()> {
        let pos = self.cursor;
        self.write_block(PageId::new(pos), buf)?;
        self.cursor = pos + 1;
        Ok(())
    }

    // ========================================================================
    // Growing the file
    // ========================================================================

    /// Append one zero-filled page, incrementing total count and cursor.
    ///
    /// # Errors
    /// - [`Error::HandleNotInitialized`] if the handle is closed
    /// - [`Error::WriteFailed`] if the page cannot be fully written
    pub fn append_empty_block(&mut self) -> Result<()> {
        let file = self.file.as_mut().ok_or(Error::HandleNotInitialized)?;

        let offset = self.total_pages as u64 * PAGE_SIZE as u64;
        file.seek(SeekFrom::Start(offset))?;

        let empty = Page::new();
        file.write_all(empty.as_slice()).map_err(Error::WriteFailed)?;
        file.sync_all().map_err(Error::WriteFailed)?;

        self.total_pages += 1;
        self.cursor += 1;
        Ok(())
    }

    /// Append zero-filled pages until the file holds at least `num_pages`.
    ///
    /// No-op if the file is already large enough. The cursor is unchanged.
    ///
    /// # Errors
    /// - [`Error::HandleNotInitialized`] if the handle is closed
    /// - [`Error::WriteFailed`] if a page cannot be fully written
    pub fn ensure_capacity(&mut self, num_pages: u32) -> Result<()> {
        if num_pages <= self.total_pages {
            return Ok(());
        }
        let file = self.file.as_mut().ok_or(Error::HandleNotInitialized)?;

        file.seek(SeekFrom::End(0))?;

        let empty = Page::new();
        for _ in self.total_pages..num_pages {
            file.write_all(empty.as_slice()).map_err(Error::WriteFailed)?;
        }
        file.sync_all().map_err(Error::WriteFailed)?;

        self.total_pages = num_pages;
        Ok(())
    }

    // ========================================================================
    // Cursor-relative reads
    // ========================================================================

    /// Read page 0.
    pub fn read_first_block(&mut self, buf: &mut Page) -> Result<()> {
        self.read_block(PageId::new(0), buf)
    }

    /// Read the page before the cursor.
    ///
    /// # Errors
    /// [`Error::NonExistentPage`] if the cursor is at page 0.
    pub fn read_previous_block(&mut self, buf: &mut Page) -> Result<()> {
        let Some(prev) = self.cursor.checked_sub(1) else {
            return Err(Error::NonExistentPage(0));
        };
        self.read_block(PageId::new(prev), buf)
    }

    /// Read the page at the cursor.
    pub fn read_current_block(&mut self, buf: &mut Page) -> Result<()> {
        self.read_block(PageId::new(self.cursor), buf)
    }

    /// Read the page after the cursor.
    pub fn read_next_block(&mut self, buf: &mut Page) -> Result<()> {
        self.read_block(PageId::new(self.cursor + 1), buf)
    }

    /// Read the last page of the file.
    pub fn read_last_block(&mut self, buf: &mut Page) -> Result<()> {
        let Some(last) = self.total_pages.checked_sub(1) else {
            return Err(Error::NonExistentPage(0));
        };
        self.read_block(PageId::new(last), buf)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current cursor position (page number).
    #[inline]
    pub fn block_pos(&self) -> u32 {
        self.cursor
    }

    /// Total number of pages in the file.
    #[inline]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Path this handle was opened from.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
