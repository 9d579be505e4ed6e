//! Buffer pool - the core page caching layer.
//!
//! The [`BufferPool`] provides:
//! - Page caching between one open page file and memory
//! - Pin-based reference counting
//! - Dirty page write-back before overwrite and at shutdown
//! - Four interchangeable eviction policies
//!
//! # Architecture
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        BufferPool                          │
//! │  ┌──────────────┐  ┌──────────────────────────────────┐    │
//! │  │ page_table   │  │        frames: Vec<Frame>        │    │
//! │  │PageId → Fid  │─▶│  [Frame0] [Frame1] [Frame2] ...  │    │
//! │  └──────────────┘  └──────────────────────────────────┘    │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐      │
//! │  │  free_list   │  │   replacer   │  │  file        │      │
//! │  │ Vec<FrameId> │  │ Box<dyn ...> │  │  PageFile    │      │
//! │  └──────────────┘  └──────────────┘  └──────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Ownership
//! The pool has exactly one logical owner and runs fully synchronously, so
//! every method takes `&mut self` and there are no locks. A [`PageHandle`]
//! borrows nothing: page bytes are reached through
//! [`BufferPool::page_data`] / [`BufferPool::page_data_mut`], which
//! re-validate residency. The pool is the sole writer of pin counts, dirty
//! flags and policy bookkeeping; callers go through
//! `mark_dirty`/`force_page`/`unpin`.

use std::collections::HashMap;

use crate::buffer::replacer::{ReplacementPolicy, Replacer};
use crate::buffer::{Frame, PoolStats};
use crate::common::{Error, FrameId, PageId, Result};
use crate::storage::PageFile;

/// A transient handle returned by [`BufferPool::pin`].
///
/// Valid only until the matching unpin; callers must not use the handle to
/// reach the page bytes after unpinning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHandle {
    page_num: PageId,
    frame_id: FrameId,
}

impl PageHandle {
    /// The pinned page's number.
    #[inline]
    pub fn page_num(&self) -> PageId {
        self.page_num
    }

    /// The frame holding the page.
    #[inline]
    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }
}

/// Manages a fixed pool of frames caching pages from one open page file.
pub struct BufferPool {
    /// Fixed pool of frames allocated at init.
    frames: Vec<Frame>,

    /// Maps resident page numbers to frame ids. At most one frame per page.
    page_table: HashMap<PageId, FrameId>,

    /// Empty frames, popped lowest index first so frames fill in order.
    free_list: Vec<FrameId>,

    /// Eviction policy bound at init for the pool's lifetime.
    replacer: Box<dyn Replacer>,

    /// Which policy `replacer` is, for reporting.
    policy: ReplacementPolicy,

    /// The one open page file this pool is bound to.
    file: PageFile,

    /// I/O and hit counters, per pool instance.
    stats: PoolStats,

    /// Monotonically increasing pin counter; drives LRU recency stamps.
    tick: u64,

    /// Number of frames (immutable after construction).
    capacity: usize,
}

impl BufferPool {
    /// Create a buffer pool of `capacity` empty frames bound to `file`.
    ///
    /// All counters start at zero; the policy's cursor state is fresh and
    /// private to this pool.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(file: PageFile, capacity: usize, policy: ReplacementPolicy) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        let frames: Vec<Frame> = (0..capacity).map(|_| Frame::new()).collect();

        // Reversed so pop() hands out frame 0 first
        let free_list: Vec<FrameId> = (0..capacity).rev().map(FrameId::new).collect();

        Self {
            frames,
            page_table: HashMap::new(),
            free_list,
            replacer: policy.build(capacity),
            policy,
            file,
            stats: PoolStats::new(),
            tick: 0,
            capacity,
        }
    }

    // ========================================================================
    // Public API: pin and unpin
    // ========================================================================

    /// Pin a page, loading it from the file if it is not resident.
    ///
    /// On a hit the pin count is bumped and the policy's bookkeeping is
    /// updated. On a miss the page is read into a free frame, or into a
    /// victim chosen by the policy once no free frame remains - writing the
    /// victim back first if it is dirty. Pinning a page past the end of the
    /// file grows the file to cover it.
    ///
    /// # Errors
    /// - [`Error::NoEvictableFrame`] if every frame is pinned
    /// - I/O errors from the storage layer
    pub fn pin(&mut self, page_num: PageId) -> Result<PageHandle> {
        self.tick += 1;

        // Resident: bump the pin count and the policy's bookkeeping
        if let Some(&fid) = self.page_table.get(&page_num) {
            self.stats.hits += 1;
            let tick = self.tick;
            let frame = &mut self.frames[fid.0];
            frame.pin();
            self.replacer.on_hit(frame, tick);
            return Ok(PageHandle {
                page_num,
                frame_id: fid,
            });
        }

        self.stats.misses += 1;

        let fid = match self.free_list.pop() {
            Some(fid) => fid,
            None => self.evict_frame()?,
        };

        // The record layer extends a table by pinning fresh pages, so grow
        // the file to cover the request before reading.
        self.file.ensure_capacity(page_num.0 + 1)?;

        let tick = self.tick;
        let frame = &mut self.frames[fid.0];
        if let Err(e) = self.file.read_block(page_num, frame.page_mut()) {
            // Hand the frame back so the pool stays consistent
            self.free_list.push(fid);
            return Err(e);
        }
        self.stats.reads += 1;

        frame.load(page_num);
        self.replacer.on_load(frame, tick);
        self.page_table.insert(page_num, fid);

        Ok(PageHandle {
            page_num,
            frame_id: fid,
        })
    }

    /// Release one pin on a resident page.
    ///
    /// # Errors
    /// - [`Error::PageNotResident`] if the page is not in the pool
    /// - [`Error::PageNotPinned`] if its pin count is already 0
    pub fn unpin(&mut self, page_num: PageId) -> Result<()> {
        let fid = self.resident_frame(page_num)?;
        let frame = &mut self.frames[fid.0];
        if !frame.is_pinned() {
            return Err(Error::PageNotPinned(page_num.0));
        }
        frame.unpin();
        Ok(())
    }

    // ========================================================================
    // Public API: dirty tracking and write-back
    // ========================================================================

    /// Mark a resident page as modified.
    ///
    /// # Errors
    /// [`Error::PageNotResident`] if the page is not in the pool.
    pub fn mark_dirty(&mut self, page_num: PageId) -> Result<()> {
        let fid = self.resident_frame(page_num)?;
        self.frames[fid.0].mark_dirty();
        Ok(())
    }

    /// Write a resident page to the file immediately, regardless of its
    /// dirty state, and clear its dirty flag. Forcing is orthogonal to
    /// pinning: a pinned page can be forced and keeps its pin count.
    /// Forcing a page that is not resident is a no-op.
    ///
    /// # Errors
    /// I/O errors from the storage layer.
    pub fn force_page(&mut self, page_num: PageId) -> Result<()> {
        let Some(&fid) = self.page_table.get(&page_num) else {
            return Ok(());
        };
        let frame = &mut self.frames[fid.0];
        self.file.write_block(page_num, frame.page())?;
        frame.clear_dirty();
        self.stats.writes += 1;
        Ok(())
    }

    /// Write every frame that is both dirty and unpinned, clearing each
    /// flushed frame's dirty flag.
    ///
    /// Dirty pinned frames are left untouched - they cannot be safely
    /// reused yet and stay dirty for a later flush.
    ///
    /// # Errors
    /// I/O errors from the storage layer.
    pub fn flush_all(&mut self) -> Result<()> {
        for idx in 0..self.frames.len() {
            let frame = &mut self.frames[idx];
            if !frame.is_dirty() || frame.is_pinned() {
                continue;
            }
            if let Some(page_num) = frame.page_num() {
                self.file.write_block(page_num, frame.page())?;
                frame.clear_dirty();
                self.stats.writes += 1;
            }
        }
        Ok(())
    }

    /// Shut the pool down: flush all dirty unpinned frames, then release
    /// frame storage and close the file.
    ///
    /// # Errors
    /// [`Error::PoolPinned`] if any frame is still pinned; the pool is left
    /// fully intact (apart from the flushes already performed).
    pub fn shutdown(&mut self) -> Result<()> {
        self.flush_all()?;

        let pinned = self.frames.iter().filter(|f| f.is_pinned()).count();
        if pinned > 0 {
            return Err(Error::PoolPinned(pinned));
        }

        self.frames = Vec::new();
        self.page_table.clear();
        self.free_list.clear();
        self.file.close()?;
        Ok(())
    }

    // ========================================================================
    // Public API: page bytes
    // ========================================================================

    /// The pinned page's bytes.
    ///
    /// # Errors
    /// [`Error::PageNotResident`] if the handle's page is no longer in the
    /// pool (the handle outlived its unpin).
    pub fn page_data(&self, handle: &PageHandle) -> Result<&[u8]> {
        let fid = self.resident_frame(handle.page_num)?;
        Ok(self.frames[fid.0].page().as_slice())
    }

    /// The pinned page's bytes, mutably. The caller must still
    /// [`BufferPool::mark_dirty`] the page for the change to be written
    /// back.
    ///
    /// # Errors
    /// [`Error::PageNotResident`] if the handle's page is no longer in the
    /// pool.
    pub fn page_data_mut(&mut self, handle: &PageHandle) -> Result<&mut [u8]> {
        let fid = self.resident_frame(handle.page_num)?;
        Ok(self.frames[fid.0].page_mut().as_mut_slice())
    }

    // ========================================================================
    // Public API: statistics
    // ========================================================================

    /// Resident page number per frame, in frame order; `None` marks an
    /// empty frame.
    pub fn frame_contents(&self) -> Vec<Option<PageId>> {
        self.frames.iter().map(Frame::page_num).collect()
    }

    /// Dirty flag per frame, parallel to [`BufferPool::frame_contents`].
    pub fn dirty_flags(&self) -> Vec<bool> {
        self.frames.iter().map(Frame::is_dirty).collect()
    }

    /// Pin count per frame, parallel to [`BufferPool::frame_contents`].
    pub fn fix_counts(&self) -> Vec<u32> {
        self.frames.iter().map(Frame::pin_count).collect()
    }

    /// Pages read from the file since pool init.
    pub fn num_read_io(&self) -> u64 {
        self.stats.reads
    }

    /// Pages written to the file since pool init.
    pub fn num_write_io(&self) -> u64 {
        self.stats.writes
    }

    /// All counters at once.
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Number of frames in the pool.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The policy this pool was initialized with.
    pub fn policy(&self) -> ReplacementPolicy {
        self.policy
    }

    /// Number of frames never yet filled.
    pub fn free_frame_count(&self) -> usize {
        self.free_list.len()
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Frame id of a resident page, or `PageNotResident`.
    fn resident_frame(&self, page_num: PageId) -> Result<FrameId> {
        match self.page_table.get(&page_num) {
            Some(&fid) => Ok(fid),
            None => Err(Error::PageNotResident(page_num.0)),
        }
    }

    /// Ask the policy for a victim, write it back if dirty, and detach it
    /// from the page table. The returned frame is empty and unpinned.
    fn evict_frame(&mut self) -> Result<FrameId> {
        let fid = self
            .replacer
            .select_victim(&mut self.frames)
            .ok_or(Error::NoEvictableFrame(self.capacity))?;

        let frame = &mut self.frames[fid.0];
        debug_assert!(!frame.is_pinned(), "policy selected a pinned frame");

        if let Some(old) = frame.page_num() {
            if frame.is_dirty() {
                self.file.write_block(old, frame.page())?;
                self.stats.writes += 1;
            }
            self.page_table.remove(&old);
        }
        frame.clear();

        self.stats.evictions += 1;
        Ok(fid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Helper to create a pool over a fresh page file.
    fn create_pool(
        capacity: usize,
        policy: ReplacementPolicy,
    ) -> (BufferPool, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.pf");
        PageFile::create(&path).unwrap();
        let file = PageFile::open(&path).unwrap();
        (BufferPool::new(file, capacity, policy), dir)
    }

    #[test]
    fn test_pin_miss_then_hit() {
        let (mut pool, _dir) = create_pool(4, ReplacementPolicy::Lru);

        let h = pool.pin(PageId::new(0)).unwrap();
        assert_eq!(h.page_num(), PageId::new(0));
        assert_eq!(pool.stats().misses, 1);
        assert_eq!(pool.num_read_io(), 1);

        let h2 = pool.pin(PageId::new(0)).unwrap();
        assert_eq!(h2.frame_id(), h.frame_id());
        assert_eq!(pool.stats().hits, 1);
        // Second pin did not touch the disk
        assert_eq!(pool.num_read_io(), 1);

        assert_eq!(pool.fix_counts()[h.frame_id().0], 2);

        pool.unpin(PageId::new(0)).unwrap();
        pool.unpin(PageId::new(0)).unwrap();
        assert_eq!(pool.fix_counts()[h.frame_id().0], 0);
    }

    #[test]
    fn test_frames_fill_in_order() {
        let (mut pool, _dir) = create_pool(3, ReplacementPolicy::Fifo);

        for i in 0..3 {
            pool.pin(PageId::new(i)).unwrap();
            pool.unpin(PageId::new(i)).unwrap();
        }

        assert_eq!(
            pool.frame_contents(),
            vec![
                Some(PageId::new(0)),
                Some(PageId::new(1)),
                Some(PageId::new(2))
            ]
        );
        assert_eq!(pool.free_frame_count(), 0);
    }

    #[test]
    fn test_pin_grows_file() {
        let (mut pool, _dir) = create_pool(4, ReplacementPolicy::Lru);

        // The file was created with a single page
        pool.pin(PageId::new(5)).unwrap();
        pool.unpin(PageId::new(5)).unwrap();

        // Freshly grown pages come back zeroed
        let h = pool.pin(PageId::new(5)).unwrap();
        assert!(pool.page_data(&h).unwrap().iter().all(|&b| b == 0));
        pool.unpin(PageId::new(5)).unwrap();
    }

    #[test]
    fn test_dirty_page_written_back_on_eviction() {
        let (mut pool, _dir) = create_pool(1, ReplacementPolicy::Fifo);

        let h = pool.pin(PageId::new(0)).unwrap();
        pool.page_data_mut(&h).unwrap()[0] = 0x42;
        pool.mark_dirty(PageId::new(0)).unwrap();
        pool.unpin(PageId::new(0)).unwrap();

        // Evicts page 0, which must hit the disk first
        pool.pin(PageId::new(1)).unwrap();
        pool.unpin(PageId::new(1)).unwrap();
        assert_eq!(pool.num_write_io(), 1);
        assert_eq!(pool.stats().evictions, 1);

        // Reload page 0 and find the byte
        let h = pool.pin(PageId::new(0)).unwrap();
        assert_eq!(pool.page_data(&h).unwrap()[0], 0x42);
        assert!(!pool.dirty_flags()[0]);
        pool.unpin(PageId::new(0)).unwrap();
    }

    #[test]
    fn test_clean_page_not_written_on_eviction() {
        let (mut pool, _dir) = create_pool(1, ReplacementPolicy::Fifo);

        pool.pin(PageId::new(0)).unwrap();
        pool.unpin(PageId::new(0)).unwrap();

        pool.pin(PageId::new(1)).unwrap();
        pool.unpin(PageId::new(1)).unwrap();

        assert_eq!(pool.num_write_io(), 0);
    }

    #[test]
    fn test_force_page_counts_one_write() {
        let (mut pool, _dir) = create_pool(2, ReplacementPolicy::Lru);

        let h = pool.pin(PageId::new(0)).unwrap();
        pool.page_data_mut(&h).unwrap()[0] = 0x07;
        pool.mark_dirty(PageId::new(0)).unwrap();
        assert!(pool.dirty_flags()[0]);

        pool.force_page(PageId::new(0)).unwrap();
        assert!(!pool.dirty_flags()[0]);
        assert_eq!(pool.num_write_io(), 1);

        // Forcing left the pin count alone
        assert_eq!(pool.fix_counts()[0], 1);
        pool.unpin(PageId::new(0)).unwrap();
    }

    #[test]
    fn test_force_page_not_resident_is_noop() {
        let (mut pool, _dir) = create_pool(2, ReplacementPolicy::Lru);

        pool.force_page(PageId::new(9)).unwrap();
        assert_eq!(pool.num_write_io(), 0);
    }

    #[test]
    fn test_unpin_errors() {
        let (mut pool, _dir) = create_pool(2, ReplacementPolicy::Lru);

        assert!(matches!(
            pool.unpin(PageId::new(0)),
            Err(Error::PageNotResident(0))
        ));

        pool.pin(PageId::new(0)).unwrap();
        pool.unpin(PageId::new(0)).unwrap();
        assert!(matches!(
            pool.unpin(PageId::new(0)),
            Err(Error::PageNotPinned(0))
        ));
    }

    #[test]
    fn test_mark_dirty_not_resident() {
        let (mut pool, _dir) = create_pool(2, ReplacementPolicy::Lru);

        assert!(matches!(
            pool.mark_dirty(PageId::new(3)),
            Err(Error::PageNotResident(3))
        ));
    }

    #[test]
    fn test_all_frames_pinned() {
        let (mut pool, _dir) = create_pool(2, ReplacementPolicy::Clock);

        pool.pin(PageId::new(0)).unwrap();
        pool.pin(PageId::new(1)).unwrap();

        assert!(matches!(
            pool.pin(PageId::new(2)),
            Err(Error::NoEvictableFrame(2))
        ));
    }

    #[test]
    fn test_flush_all_skips_pinned_dirty() {
        let (mut pool, _dir) = create_pool(2, ReplacementPolicy::Lru);

        pool.pin(PageId::new(0)).unwrap();
        pool.mark_dirty(PageId::new(0)).unwrap();

        pool.pin(PageId::new(1)).unwrap();
        pool.mark_dirty(PageId::new(1)).unwrap();
        pool.unpin(PageId::new(1)).unwrap();

        pool.flush_all().unwrap();

        // Only the unpinned dirty frame went out; page 0 stays dirty
        assert_eq!(pool.num_write_io(), 1);
        assert_eq!(pool.dirty_flags(), vec![true, false]);

        pool.unpin(PageId::new(0)).unwrap();
    }

    #[test]
    fn test_shutdown_refuses_while_pinned() {
        let (mut pool, _dir) = create_pool(2, ReplacementPolicy::Lru);

        pool.pin(PageId::new(0)).unwrap();
        pool.mark_dirty(PageId::new(0)).unwrap();

        assert!(matches!(pool.shutdown(), Err(Error::PoolPinned(1))));

        // Pool still fully usable
        let h = pool.pin(PageId::new(0)).unwrap();
        assert_eq!(pool.fix_counts()[h.frame_id().0], 2);
        pool.unpin(PageId::new(0)).unwrap();
        pool.unpin(PageId::new(0)).unwrap();

        pool.shutdown().unwrap();
    }

    #[test]
    fn test_shutdown_flushes_dirty_unpinned() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.pf");
        PageFile::create(&path).unwrap();

        {
            let file = PageFile::open(&path).unwrap();
            let mut pool = BufferPool::new(file, 2, ReplacementPolicy::Lru);

            let h = pool.pin(PageId::new(0)).unwrap();
            pool.page_data_mut(&h).unwrap()[10] = 0x99;
            pool.mark_dirty(PageId::new(0)).unwrap();
            pool.unpin(PageId::new(0)).unwrap();

            pool.shutdown().unwrap();
        }

        // The byte survived the shutdown flush
        let mut file = PageFile::open(&path).unwrap();
        let mut buf = crate::storage::Page::new();
        file.read_block(PageId::new(0), &mut buf).unwrap();
        assert_eq!(buf.as_slice()[10], 0x99);
    }

    #[test]
    fn test_stale_handle_rejected() {
        let (mut pool, _dir) = create_pool(1, ReplacementPolicy::Fifo);

        let h = pool.pin(PageId::new(0)).unwrap();
        pool.unpin(PageId::new(0)).unwrap();

        // Evict page 0
        pool.pin(PageId::new(1)).unwrap();

        assert!(matches!(
            pool.page_data(&h),
            Err(Error::PageNotResident(0))
        ));
        pool.unpin(PageId::new(1)).unwrap();
    }

    #[test]
    fn test_stats_display_and_hit_rate() {
        let (mut pool, _dir) = create_pool(2, ReplacementPolicy::Lru);

        pool.pin(PageId::new(0)).unwrap();
        pool.pin(PageId::new(0)).unwrap();
        pool.unpin(PageId::new(0)).unwrap();
        pool.unpin(PageId::new(0)).unwrap();

        let stats = pool.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }
}
