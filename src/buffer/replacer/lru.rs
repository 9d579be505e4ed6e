//! LRU replacement policy.
//!
//! Every pin stamps the frame with the pool's monotonic tick; the victim is
//! the unpinned frame with the smallest stamp, ties going to the lowest
//! frame index.

use crate::buffer::replacer::Replacer;
use crate::buffer::Frame;
use crate::common::FrameId;

/// LRU policy. All state lives in the frames' recency stamps.
pub struct LruReplacer;

impl LruReplacer {
    /// Create an LRU replacer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LruReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Replacer for LruReplacer {
    fn on_hit(&mut self, frame: &mut Frame, tick: u64) {
        frame.set_stamp(tick);
    }

    fn on_load(&mut self, frame: &mut Frame, tick: u64) {
        frame.set_stamp(tick);
    }

    fn select_victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        let mut victim: Option<usize> = None;
        let mut min_stamp = 0u64;

        for (idx, frame) in frames.iter().enumerate() {
            if frame.is_pinned() {
                continue;
            }
            // Strict < keeps the lowest index on ties
            if victim.is_none() || frame.stamp() < min_stamp {
                victim = Some(idx);
                min_stamp = frame.stamp();
            }
        }

        victim.map(FrameId::new)
    }
}
