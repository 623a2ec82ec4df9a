/// Fixed-size bitset backed by `Vec<u64>`.
///
/// Bits beyond `len` are never set, so word-level operations can ignore the
/// tail of the last block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSet {
    blocks: Vec<u64>,
    len: usize,
}

impl BitSet {
    pub fn new(num_bits: usize) -> Self {
        let num_blocks = (num_bits + 63) / 64;
        BitSet {
            blocks: vec![0; num_blocks],
            len: num_bits,
        }
    }

    /// Number of addressable bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|&b| b == 0)
    }

    #[inline]
    pub fn set(&mut self, bit: usize) {
        assert!(bit < self.len, "bit {} out of range (len {})", bit, self.len);
        self.blocks[bit / 64] |= 1 << (bit % 64);
    }

    #[inline]
    pub fn get(&self, bit: usize) -> bool {
        bit < self.len && self.blocks[bit / 64] & (1 << (bit % 64)) != 0
    }

    #[inline]
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// First set bit at or after `from`.
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        if from >= self.len {
            return None;
        }
        let mut block_idx = from / 64;
        let mut word = self.blocks[block_idx] & (!0u64 << (from % 64));
        loop {
            if word != 0 {
                return Some(block_idx * 64 + word.trailing_zeros() as usize);
            }
            block_idx += 1;
            if block_idx >= self.blocks.len() {
                return None;
            }
            word = self.blocks[block_idx];
        }
    }

    #[inline]
    pub fn intersect(&self, other: &BitSet) -> BitSet {
        assert_eq!(self.len, other.len, "bitsets address different ranges");
        let blocks = self
            .blocks
            .iter()
            .zip(other.blocks.iter())
            .map(|(a, b)| a & b)
            .collect();
        BitSet {
            blocks,
            len: self.len,
        }
    }

    /// Iterate set bits in increasing order.
    pub fn ones(&self) -> Ones<'_> {
        Ones {
            set: self,
            next: self.next_set_bit(0),
        }
    }
}

pub struct Ones<'a> {
    set: &'a BitSet,
    next: Option<usize>,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = self.set.next_set_bit(current + 1);
        Some(current)
    }
}
