use super::{Decision, ResultPolicy};
use crate::spam::pattern::PatternRecord;
use crate::spam::prefix::Prefix;
use crate::spam::search::MiningContext;
use crate::spam::vertical::Bitmap;

/// Keeps every frequent pattern.
#[derive(Debug, Default)]
pub struct FrequentPolicy {
    min_length: usize,
    records: Vec<PatternRecord>,
}

impl FrequentPolicy {
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            records: Vec::new(),
        }
    }
}

impl ResultPolicy for FrequentPolicy {
    fn on_candidate_accepted(
        &mut self,
        prefix: &Prefix,
        bitmap: &Bitmap,
        depth: usize,
        _ctx: &mut MiningContext,
    ) -> Decision {
        if depth >= self.min_length {
            self.records.push(PatternRecord::new(prefix.clone(), bitmap.clone()));
        }
        Decision::Keep
    }

    fn into_records(self) -> Vec<PatternRecord> {
        self.records
    }
}
