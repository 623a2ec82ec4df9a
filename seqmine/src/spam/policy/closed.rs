use super::{Decision, ResultPolicy, SidsumIndex};
use crate::spam::pattern::PatternRecord;
use crate::spam::prefix::{contains, may_contain, Prefix};
use crate::spam::search::MiningContext;
use crate::spam::vertical::Bitmap;

/// Keeps closed patterns: no proper super-pattern has the same support.
#[derive(Debug, Default)]
pub struct ClosedPolicy {
    index: SidsumIndex,
}

impl ClosedPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultPolicy for ClosedPolicy {
    fn on_candidate_accepted(
        &mut self,
        prefix: &Prefix,
        bitmap: &Bitmap,
        depth: usize,
        _ctx: &mut MiningContext,
    ) -> Decision {
        let support = bitmap.support();
        let sidsum = bitmap.sidsum();

        for length in depth + 1..=self.index.max_length() {
            let absorbed = self.index.bucket(length, sidsum).iter().any(|longer| {
                longer.support() == support && may_contain(&longer.prefix, prefix) && contains(&longer.prefix, prefix)
            });
            if absorbed {
                // extensions of a non-closed pattern can still be closed
                return Decision::Discard;
            }
        }

        for length in 1..depth {
            if let Some(bucket) = self.index.bucket_mut(length, sidsum) {
                bucket.retain(|shorter| {
                    !(shorter.support() == support
                        && may_contain(prefix, &shorter.prefix)
                        && contains(prefix, &shorter.prefix))
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
