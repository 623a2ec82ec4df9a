use super::prefix::Prefix;
use super::search::MiningStats;
use super::vertical::{Bitmap, SequenceLayout};

/// A pattern retained by a result policy, with the bitmap it was found with.
#[derive(Debug, Clone)]
pub struct PatternRecord {
    pub prefix: Prefix,
    pub bitmap: Bitmap,
}

impl PatternRecord {
    pub fn new(prefix: Prefix, bitmap: Bitmap) -> Self {
        Self { prefix, bitmap }
    }

    #[inline]
    pub fn support(&self) -> usize {
        self.bitmap.support()
    }

    #[inline]
    pub fn sidsum(&self) -> u64 {
        self.bitmap.sidsum()
    }

    pub fn into_pattern(self, layout: &SequenceLayout, with_sequence_ids: bool) -> Pattern {
        let sequence_ids = with_sequence_ids.then(|| self.bitmap.sequence_ids(layout));
        Pattern {
            support: self.bitmap.support(),
            prefix: self.prefix,
            sequence_ids,
        }
    }
}

/// A mined pattern as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub prefix: Prefix,
    pub support: usize,
    /// Supporting sequence ids, when requested in the configuration.
    pub sequence_ids: Option<Vec<usize>>,
}

impl Pattern {
    pub fn new(prefix: Prefix, support: usize) -> Self {
        Self {
            prefix,
            support,
            sequence_ids: None,
        }
    }

    #[inline]
    pub fn itemsets(&self) -> &[Vec<u32>] {
        self.prefix.itemsets()
    }
}

/// Output of one mining run.
#[derive(Debug, Clone)]
pub struct MiningResult {
    /// Patterns ordered by length, then itemsets lexicographically.
    pub patterns: Vec<Pattern>,
    /// Absolute minimum support at the end of the run. For top-k mining this
    /// is the support of the k-th best pattern.
    pub min_support: usize,
    pub sequence_count: usize,
    pub stats: MiningStats,
}

impl MiningResult {
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }
}

pub(crate) fn sort_patterns(patterns: &mut [Pattern]) {
    patterns.sort_by(|a, b| {
        a.prefix
            .item_count()
            .cmp(&b.prefix.item_count())
            .then_with(|| a.prefix.itemsets().cmp(b.prefix.itemsets()))
    });
}
