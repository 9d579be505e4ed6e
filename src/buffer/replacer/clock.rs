//! CLOCK (second-chance) replacement policy.
//!
//! A persistent hand walks the frame table. A frame whose reference bit is
//! set gets a second chance: the bit is cleared and the hand moves on. The
//! first unpinned frame found with a clear bit is the victim; the hand then
//! advances past it. Every pin sets the bit again.

use crate::buffer::replacer::Replacer;
use crate::buffer::Frame;
use crate::common::FrameId;

/// CLOCK policy state: the hand position, persistent across calls.
pub struct ClockReplacer {
    hand: usize,
    capacity: usize,
}

impl ClockReplacer {
    /// Create a CLOCK replacer for a pool of `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self { hand: 0, capacity }
    }

    #[inline]
    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.capacity;
    }
}

impl Replacer for ClockReplacer {
    fn on_hit(&mut self, frame: &mut Frame, _tick: u64) {
        frame.set_referenced(true);
    }

    fn on_load(&mut self, frame: &mut Frame, _tick: u64) {
        frame.set_referenced(true);
    }

    fn select_victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        // Two full sweeps always suffice when an unpinned frame exists: the
        // first clears reference bits, the second must find one clear.
        for _ in 0..2 * frames.len() {
            let frame = &mut frames[self.hand];

            if frame.is_pinned() {
                self.advance();
            } else if frame.referenced() {
                frame.set_referenced(false);
                self.advance();
            } else {
                let victim = self.hand;
                self.advance();
                return Some(FrameId::new(victim));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PageId;

    fn frames_with_bits(bits: &[bool]) -> Vec<Frame> {
        bits.iter()
            .enumerate()
            .map(|(i, &bit)| {
                let mut f = Frame::new();
                f.load(PageId::new(i as u32));
                f.unpin();
                f.set_referenced(bit);
                f
            })
            .collect()
    }

    #[test]
    fn test_clock_second_chance() {
        let mut replacer = ClockReplacer::new(2);
        let mut frames = frames_with_bits(&[true, true]);

        // Both bits cleared on the first sweep; frame 0 is the victim on
        // the second
        assert_eq!(replacer.select_victim(&mut frames), Some(FrameId::new(0)));
        assert!(!frames[1].referenced());
    }

    #[test]
    fn test_clock_takes_clear_bit_immediately() {
        let mut replacer = ClockReplacer::new(3);
        let mut frames = frames_with_bits(&[true, false, true]);

        assert_eq!(replacer.select_victim(&mut frames), Some(FrameId::new(1)));
        // Frame 0 lost its bit on the way past
        assert!(!frames[0].referenced());
        // The hand never reached frame 2
        assert!(frames[2].referenced());
    }

    #[test]
    fn test_clock_hand_persists_across_calls() {
        let mut replacer = ClockReplacer::new(3);
        let mut frames = frames_with_bits(&[false, false, false]);

        assert_eq!(replacer.select_victim(&mut frames), Some(FrameId::new(0)));
        assert_eq!(replacer.select_victim(&mut frames), Some(FrameId::new(1)));
        assert_eq!(replacer.select_victim(&mut frames), Some(FrameId::new(2)));
        assert_eq!(replacer.select_victim(&mut frames), Some(FrameId::new(0)));
    }

    #[test]
    fn test_clock_skips_pinned() {
        let mut replacer = ClockReplacer::new(2);
        let mut frames = frames_with_bits(&[false, false]);
        frames[0].pin();

        assert_eq!(replacer.select_victim(&mut frames), Some(FrameId::new(1)));
        // Pinned frames keep their bit untouched
        assert!(!frames[0].referenced());
    }

    #[test]
    fn test_clock_all_pinned() {
        let mut replacer = ClockReplacer::new(2);
        let mut frames = frames_with_bits(&[true, false]);
        frames[0].pin();
        frames[1].pin();

        assert_eq!(replacer.select_victim(&mut frames), None);
    }
}
