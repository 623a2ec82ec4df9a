use super::bitset::BitSet;
use super::layout::SequenceLayout;

/// Vertical representation of one item or pattern: a bit per itemset of the
/// database, set where the pattern ends.
///
/// `support` and `sidsum` are accumulated while bits are written in
/// increasing order; they are never recomputed from the bitset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    bits: BitSet,
    support: usize,
    last_sid: Option<usize>,
    sidsum: u64,
    first_itemset: Option<usize>,
}

impl Bitmap {
    pub fn new(layout: &SequenceLayout) -> Self {
        Self::with_width(layout.num_bits())
    }

    fn with_width(num_bits: usize) -> Self {
        Self {
            bits: BitSet::new(num_bits),
            support: 0,
            last_sid: None,
            sidsum: 0,
            first_itemset: None,
        }
    }

    /// Record an occurrence at itemset `itemset` of sequence `sid`.
    ///
    /// Calls must arrive in non-decreasing `(sid, itemset)` order.
    pub fn register_bit(&mut self, sid: usize, itemset: usize, layout: &SequenceLayout) {
        debug_assert!(self.last_sid.map_or(true, |last| last <= sid), "bits registered out of order");
        let bit = layout.bit_of(sid, itemset);
        self.bits.set(bit);
        self.note_itemset(itemset);
        self.note_sid(sid);
    }

    #[inline]
    fn note_sid(&mut self, sid: usize) {
        if self.last_sid != Some(sid) {
            self.support += 1;
            self.sidsum += sid as u64;
        }
        self.last_sid = Some(sid);
    }

    #[inline]
    fn note_itemset(&mut self, itemset: usize) {
        if self.first_itemset.map_or(true, |first| itemset < first) {
            self.first_itemset = Some(itemset);
        }
    }

    /// S-step: occurrences of `item` in an itemset strictly after an
    /// occurrence of `self`, within the same sequence.
    ///
    /// Without a gap only the first bit of each sequence is expanded, since
    /// it reaches every later bit. With `max_gap` every bit is expanded and
    /// the item must occur at most `max_gap` itemsets later.
    pub fn sequence_extension(
        &self,
        item: &Bitmap,
        layout: &SequenceLayout,
        max_gap: Option<usize>,
    ) -> Bitmap {
        let mut extended = Bitmap::with_width(self.bits.len());
        let mut cursor = self.bits.next_set_bit(0);

        while let Some(bit_k) = cursor {
            let sid = layout.sid_of(bit_k);
            let last_bit = layout.last_bit_of(sid);
            let limit = match max_gap {
                Some(gap) => last_bit.min(bit_k.saturating_add(gap)),
                None => last_bit,
            };

            let mut matched = false;
            let mut next = item.bits.next_set_bit(bit_k + 1);
            while let Some(bit) = next {
                if bit > limit {
                    break;
                }
                extended.bits.set(bit);
                extended.note_itemset(bit - layout.first_bit_of(sid));
                matched = true;
                next = item.bits.next_set_bit(bit + 1);
            }
            if matched {
                extended.note_sid(sid);
            }

            cursor = match max_gap {
                Some(_) => self.bits.next_set_bit(bit_k + 1),
                None => self.bits.next_set_bit(last_bit + 1),
            };
        }
        extended
    }

    /// I-step: occurrences of `item` in the very itemset where `self` ends.
    pub fn itemset_extension(&self, item: &Bitmap, layout: &SequenceLayout) -> Bitmap {
        let bits = self.bits.intersect(&item.bits);
        let mut extended = Bitmap::with_width(bits.len());
        for bit in bits.ones() {
            let sid = layout.sid_of(bit);
            extended.note_itemset(bit - layout.first_bit_of(sid));
            extended.note_sid(sid);
        }
        extended.bits = bits;
        extended
    }

    #[inline]
    pub fn support(&self) -> usize {
        self.support
    }

    #[inline]
    pub fn sidsum(&self) -> u64 {
        self.sidsum
    }

    #[inline]
    pub fn last_sid(&self) -> Option<usize> {
        self.last_sid
    }

    /// Smallest itemset position (within its sequence) of any set bit.
    #[inline]
    pub fn first_itemset(&self) -> Option<usize> {
        self.first_itemset
    }

    /// Set bits in increasing order.
    pub fn bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }

    /// Whether both bitmaps end at exactly the same itemsets.
    #[inline]
    pub fn same_bits(&self, other: &Bitmap) -> bool {
        self.bits == other.bits
    }

    /// Distinct sequence ids with at least one set bit, ascending.
    pub fn sequence_ids(&self, layout: &SequenceLayout) -> Vec<usize> {
        let mut sids = Vec::with_capacity(self.support);
        let mut cursor = self.bits.next_set_bit(0);
        while let Some(bit) = cursor {
            let sid = layout.sid_of(bit);
            sids.push(sid);
            cursor = self.bits.next_set_bit(layout.last_bit_of(sid) + 1);
        }
        sids
    }
}
