use crate::error::{Error, Result};

/// Order in which top-k mining visits candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Expand the pending candidate with the highest support first.
    #[default]
    BestFirst,
    /// Plain depth-first expansion.
    DepthFirst,
}

/// Knobs shared by every mining entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinerConfig {
    /// Patterns with fewer items are not reported. 0 reports the empty
    /// generator in generator mining.
    pub min_pattern_length: usize,
    /// Patterns with more items are not explored.
    pub max_pattern_length: Option<usize>,
    /// Maximum itemset distance between consecutive itemsets of a pattern
    /// occurrence; 1 means adjacent itemsets.
    pub max_gap: Option<usize>,
    /// Attach supporting sequence ids to every reported pattern.
    pub output_sequence_ids: bool,
    /// Skip the subtree of a non-generator whose equal-support sub-pattern
    /// ends at exactly the same itemsets.
    pub backward_pruning: bool,
    pub traversal: Traversal,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            min_pattern_length: 0,
            max_pattern_length: None,
            max_gap: None,
            output_sequence_ids: false,
            backward_pruning: false,
            traversal: Traversal::default(),
        }
    }
}

impl MinerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_pattern_length(mut self, length: usize) -> Self {
        self.min_pattern_length = length;
        self
    }

    pub fn with_max_pattern_length(mut self, length: usize) -> Self {
        self.max_pattern_length = Some(length);
        self
    }

    pub fn with_max_gap(mut self, gap: usize) -> Self {
        self.max_gap = Some(gap);
        self
    }

    pub fn with_sequence_ids(mut self, enabled: bool) -> Self {
        self.output_sequence_ids = enabled;
        self
    }

    pub fn with_backward_pruning(mut self, enabled: bool) -> Self {
        self.backward_pruning = enabled;
        self
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_pattern_length {
            if max == 0 {
                return Err(Error::invalid_config("max_pattern_length must be at least 1"));
            }
            if max < self.min_pattern_length {
                return Err(Error::invalid_config(format!(
                    "max_pattern_length {} is below min_pattern_length {}",
                    max, self.min_pattern_length
                )));
            }
        }
        if self.max_gap == Some(0) {
            return Err(Error::invalid_config("max_gap must be at least 1"));
        }
        Ok(())
    }

    /// Whether a pattern of `length` items may still be extended.
    #[inline]
    pub(crate) fn can_extend(&self, length: usize) -> bool {
        self.max_pattern_length.map_or(true, |max| length < max)
    }

    #[inline]
    pub(crate) fn reports(&self, length: usize) -> bool {
        length >= self.min_pattern_length
    }
}

/// Minimum support, either relative to the database size or absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinSupport {
    Relative(f64),
    Count(usize),
}

impl MinSupport {
    /// Absolute support count for a database of `sequence_count` sequences:
    /// `ceil(relative * n)`, never below 1.
    pub fn to_count(self, sequence_count: usize) -> Result<usize> {
        match self {
            MinSupport::Relative(relative) => {
                if !(relative > 0.0 && relative <= 1.0) {
                    return Err(Error::InvalidSupport(relative));
                }
                let count = (relative * sequence_count as f64).ceil() as usize;
                Ok(count.max(1))
            }
            MinSupport::Count(count) => Ok(count.max(1)),
        }
    }
}

impl From<f64> for MinSupport {
    fn from(relative: f64) -> Self {
        MinSupport::Relative(relative)
    }
}

impl From<usize> for MinSupport {
    fn from(count: usize) -> Self {
        MinSupport::Count(count)
    }
}
