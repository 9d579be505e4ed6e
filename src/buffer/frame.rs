//! Frame - a slot in the buffer pool.
//!
//! A [`Frame`] holds a [`Page`] plus the metadata buffer management needs:
//! which page is loaded, the pin count, the dirty flag, and the per-policy
//! bookkeeping fields (recency stamp, use count, reference bit).
//!
//! The pool is the frame's single owner, so everything is a plain field
//! behind `&mut` access - no interior mutability.

use crate::common::PageId;
use crate::storage::Page;

/// A frame in the buffer pool.
///
/// Frames are the "slots" in the buffer pool; the pool allocates a fixed
/// number of them at init and they live for the pool's whole session.
pub struct Frame {
    /// The page bytes.
    page: Page,

    /// Which page is currently loaded, or None if the frame is empty.
    page_num: Option<PageId>,

    /// Whether the page has been modified since loading.
    dirty: bool,

    /// Number of active pins. The frame is evictable only at 0.
    pin_count: u32,

    /// Recency stamp: the pool tick of the last pin (LRU).
    stamp: u64,

    /// How many times the resident page has been re-pinned (LFU).
    uses: u64,

    /// Second-chance bit (CLOCK).
    referenced: bool,
}

impl Frame {
    /// Create a new empty frame.
    pub fn new() -> Self {
        Self {
            page: Page::new(),
            page_num: None,
            dirty: false,
            pin_count: 0,
            stamp: 0,
            uses: 0,
            referenced: false,
        }
    }

    // ========================================================================
    // Page access
    // ========================================================================

    /// The page bytes.
    #[inline]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The page bytes, mutably.
    #[inline]
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Page number of the loaded page, or None for an empty frame.
    #[inline]
    pub fn page_num(&self) -> Option<PageId> {
        self.page_num
    }

    /// Check if the frame is empty (no page loaded).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.page_num.is_none()
    }

    // ========================================================================
    // Pin count
    // ========================================================================

    /// Increment the pin count. Returns the new count.
    #[inline]
    pub fn pin(&mut self) -> u32 {
        self.pin_count += 1;
        self.pin_count
    }

    /// Decrement the pin count. Returns the new count.
    ///
    /// # Panics
    /// Panics if the pin count is already 0. The pool checks before calling.
    #[inline]
    pub fn unpin(&mut self) -> u32 {
        assert!(self.pin_count > 0, "pin count underflow");
        self.pin_count -= 1;
        self.pin_count
    }

    /// Current pin count.
    #[inline]
    pub fn pin_count(&self) -> u32 {
        self.pin_count
    }

    /// Check if the frame is currently pinned.
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pin_count > 0
    }

    // ========================================================================
    // Dirty flag
    // ========================================================================

    /// Mark the frame as modified.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the dirty flag.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Check if the frame is dirty.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ========================================================================
    // Policy bookkeeping
    // ========================================================================

    #[inline]
    pub(crate) fn stamp(&self) -> u64 {
        self.stamp
    }

    #[inline]
    pub(crate) fn set_stamp(&mut self, stamp: u64) {
        self.stamp = stamp;
    }

    #[inline]
    pub(crate) fn uses(&self) -> u64 {
        self.uses
    }

    #[inline]
    pub(crate) fn bump_uses(&mut self) {
        self.uses += 1;
    }

    #[inline]
    pub(crate) fn referenced(&self) -> bool {
        self.referenced
    }

    #[inline]
    pub(crate) fn set_referenced(&mut self, referenced: bool) {
        self.referenced = referenced;
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Take ownership of a newly read page: pin count 1, clean, a fresh
    /// frequency baseline. Recency stamp and reference bit are set by the
    /// active policy's `on_load`.
    pub(crate) fn load(&mut self, page_num: PageId) {
        self.page_num = Some(page_num);
        self.pin_count = 1;
        self.dirty = false;
        self.uses = 0;
    }

    /// Return the frame to the empty state. Called after eviction, before
    /// the replacement page is read in.
    pub(crate) fn clear(&mut self) {
        self.page_num = None;
        self.pin_count = 0;
        self.dirty = false;
        self.stamp = 0;
        self.uses = 0;
        self.referenced = false;
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
