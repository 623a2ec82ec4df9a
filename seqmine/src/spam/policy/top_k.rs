use super::{Decision, ResultPolicy};
use crate::spam::pattern::PatternRecord;
use crate::spam::prefix::Prefix;
use crate::spam::search::MiningContext;
use crate::spam::vertical::Bitmap;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Keeps the k most frequent patterns, plus every pattern tied with the k-th.
///
/// Once k patterns are held, the working minimum support is raised to the
/// smallest retained support so the search prunes more aggressively.
#[derive(Debug)]
pub struct TopKPolicy {
    k: usize,
    min_length: usize,
    inserted: u64,
    heap: BinaryHeap<Reverse<Ranked>>,
}

#[derive(Debug)]
struct Ranked {
    support: usize,
    order: u64,
    record: PatternRecord,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.support
            .cmp(&other.support)
            .then_with(|| self.order.cmp(&other.order))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl TopKPolicy {
    pub fn new(k: usize, min_length: usize) -> Self {
        Self {
            k,
            min_length,
            inserted: 0,
            heap: BinaryHeap::new(),
        }
    }

    fn lowest_support(&self) -> Option<usize> {
        self.heap.peek().map(|Reverse(ranked)| ranked.support)
    }

    /// Drop the lowest-support group while at least k patterns would remain.
    fn evict(&mut self) {
        while self.heap.len() > self.k {
            let Some(lowest) = self.lowest_support() else {
                return;
            };
            let tied = self
                .heap
                .iter()
                .filter(|Reverse(ranked)| ranked.support == lowest)
                .count();
            if self.heap.len() - tied < self.k {
                return;
            }
            while self.lowest_support() == Some(lowest) {
                self.heap.pop();
            }
        }
    }
}

impl ResultPolicy for TopKPolicy {
    fn on_candidate_accepted(
        &mut self,
        prefix: &Prefix,
        bitmap: &Bitmap,
        depth: usize,
        ctx: &mut MiningContext,
    ) -> Decision {
        if depth < self.min_length || bitmap.support() < ctx.min_support() {
            return Decision::Keep;
        }

        self.inserted += 1;
        self.heap.push(Reverse(Ranked {
            support: bitmap.support(),
            order: self.inserted,
            record: PatternRecord::new(prefix.clone(), bitmap.clone()),
        }));
        self.evict();

        if self.heap.len() >= self.k {
            if let Some(lowest) = self.lowest_support() {
                ctx.raise_min_support(lowest);
            }
        }
        Decision::Keep
    }

    fn into_records(self) -> Vec<PatternRecord> {
        self.heap
            .into_vec()
            .into_iter()
            .map(|Reverse(ranked)| ranked.record)
            .collect()
    }
}
