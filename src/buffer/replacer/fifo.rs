//! FIFO replacement policy.
//!
//! Not textbook insertion-order FIFO: the victim is the first unpinned
//! frame found scanning circularly from a cursor that advances once per
//! miss. The cursor therefore equals pages-read-so-far modulo capacity,
//! which makes eviction order predictable from the miss count alone.

use crate::buffer::replacer::Replacer;
use crate::buffer::Frame;
use crate::common::FrameId;

/// FIFO policy state: the rotating scan cursor.
pub struct FifoReplacer {
    cursor: usize,
    capacity: usize,
}

impl FifoReplacer {
    /// Create a FIFO replacer for a pool of `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self { cursor: 0, capacity }
    }
}

impl Replacer for FifoReplacer {
    fn on_hit(&mut self, _frame: &mut Frame, _tick: u64) {
        // Re-access never reorders anything under FIFO.
    }

    fn on_load(&mut self, _frame: &mut Frame, _tick: u64) {
        // One step per miss, whether the load filled a free frame or a
        // victim.
        self.cursor = (self.cursor + 1) % self.capacity;
    }

    fn select_victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        let mut idx = self.cursor;
        for _ in 0..frames.len() {
            if !frames[idx].is_pinned() {
                return Some(FrameId::new(idx));
            }
            idx = (idx + 1) % frames.len();
        }
        None
    }
}
