pub mod bitmap;
pub mod bitset;
pub mod layout;

pub use bitmap::Bitmap;
pub use bitset::BitSet;
pub use layout::SequenceLayout;

use super::database::{Item, SequenceDatabase};
use std::collections::BTreeMap;

/// One bitmap per item plus the shared bit layout.
#[derive(Debug, Clone)]
pub struct VerticalDatabase {
    layout: SequenceLayout,
    bitmaps: BTreeMap<Item, Bitmap>,
}

impl VerticalDatabase {
    pub fn build(db: &SequenceDatabase) -> Self {
        let layout = SequenceLayout::from_lengths(db.sequences().iter().map(Vec::len));
        let mut bitmaps: BTreeMap<Item, Bitmap> = BTreeMap::new();

        for (sid, sequence) in db.sequences().iter().enumerate() {
            for (tid, itemset) in sequence.iter().enumerate() {
                for &item in itemset {
                    bitmaps
                        .entry(item)
                        .or_insert_with(|| Bitmap::new(&layout))
                        .register_bit(sid, tid, &layout);
                }
            }
        }

        tracing::debug!(
            sequences = layout.sequence_count(),
            itemsets = layout.num_bits(),
            items = bitmaps.len(),
            "vertical database built"
        );

        Self { layout, bitmaps }
    }

    #[inline]
    pub fn layout(&self) -> &SequenceLayout {
        &self.layout
    }

    #[inline]
    pub fn bitmap(&self, item: Item) -> Option<&Bitmap> {
        self.bitmaps.get(&item)
    }

    #[inline]
    pub fn support(&self, item: Item) -> usize {
        self.bitmaps.get(&item).map_or(0, Bitmap::support)
    }

    pub fn items(&self) -> impl Iterator<Item = (Item, &Bitmap)> + '_ {
        self.bitmaps.iter().map(|(&item, bitmap)| (item, bitmap))
    }

    /// Items with support of at least `min_support`, ascending by id.
    pub fn frequent_items(&self, min_support: usize) -> Vec<Item> {
        self.bitmaps
            .iter()
            .filter(|(_, bitmap)| bitmap.support() >= min_support)
            .map(|(&item, _)| item)
            .collect()
    }
}
