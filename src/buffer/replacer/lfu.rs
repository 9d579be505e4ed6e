//! LFU replacement policy.
//!
//! The victim is the unpinned frame with the smallest use count, found by
//! scanning circularly from the frame after the last victim. Keeping the
//! first minimum seen makes the result depend on the scan start, not on a
//! strict global minimum - that scan-position behavior is deliberate.

use crate::buffer::replacer::Replacer;
use crate::buffer::Frame;
use crate::common::FrameId;

/// LFU policy state: the rotating scan cursor (one past the last victim).
pub struct LfuReplacer {
    cursor: usize,
    capacity: usize,
}

impl LfuReplacer {
    /// Create an LFU replacer for a pool of `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self { cursor: 0, capacity }
    }
}

impl Replacer for LfuReplacer {
    fn on_hit(&mut self, frame: &mut Frame, _tick: u64) {
        frame.bump_uses();
    }

    fn on_load(&mut self, _frame: &mut Frame, _tick: u64) {
        // Frame::load already starts the use count at 0.
    }

    fn select_victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        let mut victim: Option<usize> = None;
        let mut min_uses = 0u64;

        let mut idx = self.cursor % frames.len();
        for _ in 0..frames.len() {
            let frame = &frames[idx];
            // Strict < keeps the first minimum in scan order
            if !frame.is_pinned() && (victim.is_none() || frame.uses() < min_uses) {
                victim = Some(idx);
                min_uses = frame.uses();
            }
            idx = (idx + 1) % frames.len();
        }

        let victim = victim?;
        self.cursor = (victim + 1) % self.capacity;
        Some(FrameId::new(victim))
    }
}
