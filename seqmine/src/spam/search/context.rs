/// Counters accumulated during one mining run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MiningStats {
    /// Extensions for which a bitmap was computed.
    pub bitmaps_built: usize,
    /// Extensions rejected by the co-occurrence map without bitmap work.
    pub cmap_pruned: usize,
    /// Frequent extensions handed to the result policy.
    pub candidates: usize,
    /// Deepest pattern length (in items) reached by the search.
    pub max_depth: usize,
    /// Patterns reported at the end of the run.
    pub patterns_retained: usize,
}

/// Mutable state threaded through the search.
///
/// The minimum support only ever rises during a run.
#[derive(Debug, Clone)]
pub struct MiningContext {
    min_support: usize,
    sequence_count: usize,
    pub stats: MiningStats,
}

impl MiningContext {
    pub fn new(min_support: usize, sequence_count: usize) -> Self {
        Self {
            min_support: min_support.max(1),
            sequence_count,
            stats: MiningStats::default(),
        }
    }

    #[inline]
    pub fn min_support(&self) -> usize {
        self.min_support
    }

    /// Support of the empty pattern.
    #[inline]
    pub fn sequence_count(&self) -> usize {
        self.sequence_count
    }

    /// Raise the threshold to `support` if that is higher.
    ///
    /// Returns `true` when the threshold moved, meaning queued candidates
    /// below the new value can be dropped.
    pub fn raise_min_support(&mut self, support: usize) -> bool {
        if support > self.min_support {
            tracing::debug!(from = self.min_support, to = support, "minimum support raised");
            self.min_support = support;
            true
        } else {
            false
        }
    }

    #[inline]
    pub(crate) fn reached_depth(&mut self, depth: usize) {
        self.stats.max_depth = self.stats.max_depth.max(depth);
    }
}
