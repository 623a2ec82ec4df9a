//! Result policies decide which candidates the search keeps.
//!
//! Every policy is driven by the same search; they differ only in what they
//! retain and in whether they cut the search short.

pub mod closed;
pub mod frequent;
pub mod generator;
pub mod maximal;
pub mod top_k;

pub use closed::ClosedPolicy;
pub use frequent::FrequentPolicy;
pub use generator::GeneratorPolicy;
pub use maximal::MaximalPolicy;
pub use top_k::TopKPolicy;

use super::pattern::PatternRecord;
use super::prefix::Prefix;
use super::search::MiningContext;
use super::vertical::Bitmap;

/// Outcome of handing a frequent candidate to a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Retained; extensions are explored.
    Keep,
    /// Not retained, but extensions may still be of interest.
    Discard,
    /// Retained; no extension can be non-redundant.
    KeepButStopRecursion,
    /// Neither the candidate nor any extension is of interest.
    Prune,
}

impl Decision {
    #[inline]
    pub fn explores(self) -> bool {
        matches!(self, Decision::Keep | Decision::Discard)
    }
}

pub trait ResultPolicy {
    /// Called for every frequent candidate before its extensions are searched.
    /// `depth` is the candidate's item count.
    fn on_candidate_accepted(
        &mut self,
        prefix: &Prefix,
        bitmap: &Bitmap,
        depth: usize,
        ctx: &mut MiningContext,
    ) -> Decision;

    /// Called after the extensions of an explored candidate have been
    /// searched, with whether any of them was frequent.
    fn on_subtree_explored(
        &mut self,
        _prefix: &Prefix,
        _bitmap: &Bitmap,
        _has_frequent_extension: bool,
        _ctx: &mut MiningContext,
    ) {
    }

    /// Patterns retained at the end of the run.
    fn into_records(self) -> Vec<PatternRecord>;
}

/// Retained patterns bucketed by item count, then by sidsum.
///
/// A sub-pattern with the same support as its super-pattern occurs in the
/// same sequences, so equal-support subsumption only needs one bucket.
#[derive(Debug, Default)]
pub(crate) struct SidsumIndex {
    levels: Vec<std::collections::HashMap<u64, Vec<PatternRecord>>>,
}

impl SidsumIndex {
    pub(crate) fn insert(&mut self, record: PatternRecord) {
        let length = record.prefix.item_count();
        while self.levels.len() <= length {
            self.levels.push(Default::default());
        }
        self.levels[length].entry(record.sidsum()).or_default().push(record);
    }

    /// Records of exactly `length` items sharing `sidsum`.
    pub(crate) fn bucket(&self, length: usize, sidsum: u64) -> &[PatternRecord] {
        self.levels
            .get(length)
            .and_then(|level| level.get(&sidsum))
            .map_or(&[], Vec::as_slice)
    }

    pub(crate) fn bucket_mut(&mut self, length: usize, sidsum: u64) -> Option<&mut Vec<PatternRecord>> {
        self.levels.get_mut(length).and_then(|level| level.get_mut(&sidsum))
    }

    pub(crate) fn max_length(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    pub(crate) fn into_records(self) -> Vec<PatternRecord> {
        self.levels
            .into_iter()
            .flat_map(|level| level.into_values().flatten())
            .collect()
    }
}
