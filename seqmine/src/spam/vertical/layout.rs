/// Offset table mapping every itemset of the database to one global bit.
///
/// `starts[sid]` is the bit index of the first itemset of sequence `sid`.
/// An empty sequence shares its start with the following sequence, so
/// `sid_of` resolves a bit to the last sequence whose start is not after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceLayout {
    starts: Vec<usize>,
    num_bits: usize,
}

impl SequenceLayout {
    /// Build the layout from the number of itemsets of each sequence.
    pub fn from_lengths<I>(lengths: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut starts = Vec::new();
        let mut next = 0;
        for len in lengths {
            starts.push(next);
            next += len;
        }
        Self {
            starts,
            num_bits: next,
        }
    }

    /// Number of sequences (including empty ones).
    #[inline]
    pub fn sequence_count(&self) -> usize {
        self.starts.len()
    }

    /// Total number of itemsets, i.e. the bitset width.
    #[inline]
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Highest valid bit index, `None` for a database without itemsets.
    #[inline]
    pub fn last_bit_index(&self) -> Option<usize> {
        self.num_bits.checked_sub(1)
    }

    #[inline]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    #[inline]
    pub fn first_bit_of(&self, sid: usize) -> usize {
        self.starts[sid]
    }

    /// Last bit owned by `sid`. Only meaningful for non-empty sequences.
    #[inline]
    pub fn last_bit_of(&self, sid: usize) -> usize {
        match self.starts.get(sid + 1) {
            Some(&next) => next - 1,
            None => self.num_bits - 1,
        }
    }

    #[inline]
    pub fn sid_of(&self, bit: usize) -> usize {
        assert!(bit < self.num_bits, "bit {} outside database (width {})", bit, self.num_bits);
        self.starts.partition_point(|&start| start <= bit) - 1
    }

    #[inline]
    pub fn bit_of(&self, sid: usize, itemset: usize) -> usize {
        let bit = self.starts[sid] + itemset;
        assert!(
            bit < self.num_bits && (sid + 1 == self.starts.len() || bit < self.starts[sid + 1]),
            "itemset {} outside sequence {}",
            itemset,
            sid
        );
        bit
    }
}
