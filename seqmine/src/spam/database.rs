pub type Item = u32;
pub type Itemset = Vec<Item>;
pub type Sequence = Vec<Itemset>;

/// Horizontal sequence database: one entry per input sequence.
///
/// Itemsets are kept sorted ascending without duplicates, and empty itemsets
/// are dropped, so every stored itemset owns exactly one bit of the vertical
/// representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceDatabase {
    sequences: Vec<Sequence>,
}

impl SequenceDatabase {
    pub fn new(sequences: Vec<Sequence>) -> Self {
        let sequences = sequences
            .into_iter()
            .map(|sequence| {
                sequence
                    .into_iter()
                    .filter_map(|mut itemset| {
                        itemset.sort_unstable();
                        itemset.dedup();
                        (!itemset.is_empty()).then_some(itemset)
                    })
                    .collect()
            })
            .collect();
        Self { sequences }
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Number of sequences, the support of the empty pattern.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn itemset_count(&self) -> usize {
        self.sequences.iter().map(Vec::len).sum()
    }
}

impl FromIterator<Sequence> for SequenceDatabase {
    fn from_iter<T: IntoIterator<Item = Sequence>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
