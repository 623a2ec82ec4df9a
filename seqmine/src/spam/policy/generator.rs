use super::{Decision, ResultPolicy, SidsumIndex};
use crate::spam::pattern::PatternRecord;
use crate::spam::prefix::{contains, contains_itemsets, is_subset, may_contain, Prefix};
use crate::spam::search::MiningContext;
use crate::spam::vertical::Bitmap;

/// Keeps sequential generators: patterns with no proper sub-pattern of equal
/// support.
///
/// A candidate is compared with shorter retained patterns (is it redundant?)
/// and with longer ones (does it make them redundant?). Only patterns with
/// the same sidsum can have equal support and be related by containment.
#[derive(Debug, Default)]
pub struct GeneratorPolicy {
    index: SidsumIndex,
    backward_pruning: bool,
}

impl GeneratorPolicy {
    pub fn new(backward_pruning: bool) -> Self {
        Self {
            index: SidsumIndex::default(),
            backward_pruning,
        }
    }
}

/// `inner` ends inside the last itemset of `outer` and the rest of `inner`
/// is contained in the rest of `outer`. With identical bitmaps, every end
/// extension of `outer` then has an equal-support sub-pattern.
fn ends_alike(outer: &Prefix, inner: &Prefix) -> bool {
    match (outer.itemsets().split_last(), inner.itemsets().split_last()) {
        (Some((outer_last, outer_rest)), Some((inner_last, inner_rest))) => {
            is_subset(inner_last, outer_last) && contains_itemsets(outer_rest, inner_rest)
        }
        _ => false,
    }
}

impl ResultPolicy for GeneratorPolicy {
    fn on_candidate_accepted(
        &mut self,
        prefix: &Prefix,
        bitmap: &Bitmap,
        depth: usize,
        ctx: &mut MiningContext,
    ) -> Decision {
        let support = bitmap.support();
        // the empty pattern is a sub-pattern with the same support
        if support == ctx.sequence_count() {
            return Decision::Discard;
        }

        let sidsum = bitmap.sidsum();
        let mut redundant = false;
        'shorter: for length in 1..depth {
            for shorter in self.index.bucket(length, sidsum) {
                if shorter.support() != support
                    || !may_contain(prefix, &shorter.prefix)
                    || !contains(prefix, &shorter.prefix)
                {
                    continue;
                }
                if self.backward_pruning && shorter.bitmap.same_bits(bitmap) && ends_alike(prefix, &shorter.prefix) {
                    return Decision::Prune;
                }
                redundant = true;
                if !self.backward_pruning {
                    break 'shorter;
                }
            }
        }
        if redundant {
            return Decision::Discard;
        }

        for length in depth + 1..=self.index.max_length() {
            if let Some(bucket) = self.index.bucket_mut(length, sidsum) {
                bucket.retain(|longer| {
                    !(longer.support() == support
                        && may_contain(&longer.prefix, prefix)
                        && contains(&longer.prefix, prefix))
                });
            }
        }
        self.index.insert(PatternRecord::new(prefix.clone(), bitmap.clone()));
        Decision::Keep
    }

    fn into_records(self) -> Vec<PatternRecord> {
        self.index.into_records()
    }
}
