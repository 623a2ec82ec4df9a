use super::{Decision, ResultPolicy};
use crate::spam::pattern::PatternRecord;
use crate::spam::prefix::{contains, may_contain, Prefix};
use crate::spam::search::MiningContext;
use crate::spam::vertical::Bitmap;
use std::collections::BTreeMap;

/// Keeps maximal patterns: no frequent proper super-pattern exists.
///
/// A pattern is only considered once its subtree is explored and none of its
/// extensions was frequent. Retained patterns are partitioned by item count
/// and ordered by total item sum, since a super-pattern never has a smaller
/// sum than its sub-patterns.
#[derive(Debug, Default)]
pub struct MaximalPolicy {
    levels: Vec<BTreeMap<u64, Vec<PatternRecord>>>,
}

impl MaximalPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_subsumed(&self, prefix: &Prefix) -> bool {
        let length = prefix.item_count();
        let sum = prefix.total_sum();
        for level in self.levels.iter().skip(length + 1).rev() {
            for (_, bucket) in level.range(sum..).rev() {
                if bucket
                    .iter()
                    .any(|longer| may_contain(&longer.prefix, prefix) && contains(&longer.prefix, prefix))
                {
                    return true;
                }
            }
        }
        false
    }

    fn remove_subsumed_by(&mut self, prefix: &Prefix) {
        let length = prefix.item_count();
        let sum = prefix.total_sum();
        for level in self.levels.iter_mut().take(length) {
            for (_, bucket) in level.range_mut(..=sum) {
                bucket.retain(|shorter| !(may_contain(prefix, &shorter.prefix) && contains(prefix, &shorter.prefix)));
            }
            level.retain(|_, bucket| !bucket.is_empty());
        }
    }
}

impl ResultPolicy for MaximalPolicy {
    fn on_candidate_accepted(
        &mut self,
        _prefix: &Prefix,
        _bitmap: &Bitmap,
        _depth: usize,
        _ctx: &mut MiningContext,
    ) -> Decision {
        Decision::Keep
    }

    fn on_subtree_explored(
        &mut self,
        prefix: &Prefix,
        bitmap: &Bitmap,
        has_frequent_extension: bool,
        _ctx: &mut MiningContext,
    ) {
        if has_frequent_extension || self.is_subsumed(prefix) {
            return;
        }
        self.remove_subsumed_by(prefix);

        let length = prefix.item_count();
        while self.levels.len() <= length {
            self.levels.push(BTreeMap::new());
        }
        self.levels[length]
            .entry(prefix.total_sum())
            .or_default()
            .push(PatternRecord::new(prefix.clone(), bitmap.clone()));
    }

    fn into_records(self) -> Vec<PatternRecord> {
        self.levels
            .into_iter()
            .flat_map(|level| level.into_values().flatten())
            .collect()
    }
}
