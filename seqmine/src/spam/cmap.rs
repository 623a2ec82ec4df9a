use super::database::{Item, SequenceDatabase};
use super::vertical::VerticalDatabase;
use std::collections::{HashMap, HashSet};

/// Co-occurrence map used to prune extensions before any bitmap work.
///
/// `after[i][j]` counts sequences where `j` occurs in an itemset strictly
/// after one containing `i`; `equals[i][j]` counts sequences where `j`
/// follows `i` inside one itemset. Each pair counts at most once per
/// sequence, so both are upper bounds on the support of the 2-item pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoocMap {
    after: HashMap<Item, HashMap<Item, usize>>,
    equals: HashMap<Item, HashMap<Item, usize>>,
}

impl CoocMap {
    /// Count co-occurrences between items whose support reaches `min_support`.
    pub fn build(db: &SequenceDatabase, vertical: &VerticalDatabase, min_support: usize) -> Self {
        let is_frequent = |item: Item| vertical.support(item) >= min_support;
        let mut cmap = CoocMap::default();

        for sequence in db.sequences() {
            let mut after_done: HashSet<Item> = HashSet::new();
            let mut equals_done: HashMap<Item, HashSet<Item>> = HashMap::new();

            for (pos, itemset) in sequence.iter().enumerate() {
                for (k, &item_i) in itemset.iter().enumerate() {
                    if !is_frequent(item_i) {
                        continue;
                    }

                    let counted = equals_done.entry(item_i).or_default();
                    for &item_j in &itemset[k + 1..] {
                        if is_frequent(item_j) && counted.insert(item_j) {
                            *cmap.equals.entry(item_i).or_default().entry(item_j).or_insert(0) += 1;
                        }
                    }

                    // the first occurrence of i sees every later item
                    if !after_done.insert(item_i) {
                        continue;
                    }
                    let mut counted_after: HashSet<Item> = HashSet::new();
                    for later in &sequence[pos + 1..] {
                        for &item_j in later {
                            if is_frequent(item_j) && counted_after.insert(item_j) {
                                *cmap.after.entry(item_i).or_default().entry(item_j).or_insert(0) += 1;
                            }
                        }
                    }
                }
            }
        }

        tracing::debug!(
            after_rows = cmap.after.len(),
            equals_rows = cmap.equals.len(),
            min_support,
            "co-occurrence map built"
        );
        cmap
    }

    #[inline]
    pub fn after_count(&self, first: Item, then: Item) -> usize {
        self.after.get(&first).and_then(|row| row.get(&then)).copied().unwrap_or(0)
    }

    #[inline]
    pub fn equals_count(&self, first: Item, with: Item) -> usize {
        self.equals.get(&first).and_then(|row| row.get(&with)).copied().unwrap_or(0)
    }

    /// Whether appending `item` as a new itemset after `last` can be frequent.
    #[inline]
    pub fn allows_sequence_extension(&self, last: Item, item: Item, min_support: usize) -> bool {
        self.after_count(last, item) >= min_support
    }

    /// Whether adding `item` to the itemset ending with `last` can be frequent.
    #[inline]
    pub fn allows_itemset_extension(&self, last: Item, item: Item, min_support: usize) -> bool {
        self.equals_count(last, item) >= min_support
    }
}
