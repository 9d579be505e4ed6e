//! Eviction policy implementations (replacers).
//!
//! Exactly one policy is active per pool instance, chosen at init via
//! [`ReplacementPolicy`]. Each replacer owns its own cursor state (nothing
//! is shared between pools) and sees the frame table as a plain slice,
//! scanning it with explicit index arithmetic.
//!
//! The common contract: [`Replacer::select_victim`] returns exactly one
//! frame with pin count 0, or `None` only when every frame is pinned.

mod clock;
mod fifo;
mod lfu;
mod lru;

pub use clock::ClockReplacer;
pub use fifo::FifoReplacer;
pub use lfu::LfuReplacer;
pub use lru::LruReplacer;

use crate::buffer::Frame;
use crate::common::FrameId;

/// Which replacement policy a buffer pool runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementPolicy {
    /// Circular scan from a cursor advanced once per miss; first unpinned
    /// frame wins.
    Fifo,
    /// Smallest recency stamp among unpinned frames; ties go to the lowest
    /// frame index.
    Lru,
    /// Smallest use count, scanning from the frame after the last victim.
    Lfu,
    /// Second-chance hand over the frame table.
    Clock,
}

impl ReplacementPolicy {
    /// Build the replacer instance for a pool of `capacity` frames.
    pub(crate) fn build(self, capacity: usize) -> Box<dyn Replacer> {
        match self {
            ReplacementPolicy::Fifo => Box::new(FifoReplacer::new(capacity)),
            ReplacementPolicy::Lru => Box::new(LruReplacer::new()),
            ReplacementPolicy::Lfu => Box::new(LfuReplacer::new(capacity)),
            ReplacementPolicy::Clock => Box::new(ClockReplacer::new(capacity)),
        }
    }
}

/// Victim selection plus per-access bookkeeping for one pool.
///
/// The pool calls `on_hit` when a resident page is pinned again, `on_load`
/// every time a page is read into a frame (free frame or victim), and
/// `select_victim` on a capacity miss. `tick` is the pool's monotonically
/// increasing pin counter.
pub(crate) trait Replacer {
    /// Bookkeeping when a resident page is pinned again.
    fn on_hit(&mut self, frame: &mut Frame, tick: u64);

    /// Bookkeeping when a page is loaded into a frame.
    fn on_load(&mut self, frame: &mut Frame, tick: u64);

    /// Pick exactly one unpinned frame to overwrite. `None` only if every
    /// frame is pinned.
    fn select_victim(&mut self, frames: &mut [Frame]) -> Option<FrameId>;
}
