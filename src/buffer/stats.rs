//! Buffer pool statistics.

use std::fmt;

/// Counters tracked by one buffer pool instance.
///
/// All counters are per-pool fields reset at init, never process-wide
/// globals, so independent pools can coexist. The pool is single-threaded,
/// so these are plain integers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Pins that found the page already resident.
    pub hits: u64,

    /// Pins that had to load the page from the file.
    pub misses: u64,

    /// Frames overwritten by a replacement policy.
    pub evictions: u64,

    /// Pages read from the file since pool init.
    pub reads: u64,

    /// Pages written to the file since pool init.
    pub writes: u64,
}

impl PoolStats {
    /// Create a stats record with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl fmt::Display for PoolStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ hits: {}, misses: {}, evictions: {}, reads: {}, writes: {}, hit_rate: {:.2}% }}",
            self.hits,
            self.misses,
            self.evictions,
            self.reads,
            self.writes,
            self.hit_rate() * 100.0
        )
    }
}
