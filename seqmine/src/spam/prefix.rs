use super::database::{Item, Itemset};

/// A sequential pattern under construction.
///
/// The parity sums are exact linear invariants of the item multiset and give
/// a cheap necessary condition for containment (see [`may_contain`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Prefix {
    itemsets: Vec<Itemset>,
    item_count: usize,
    sum_even: u64,
    sum_odd: u64,
}

impl Prefix {
    /// The empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a prefix from itemsets, normalized like database sequences:
    /// items are sorted and deduplicated, empty itemsets dropped.
    pub fn from_itemsets(itemsets: Vec<Itemset>) -> Self {
        let mut prefix = Prefix::new();
        for mut itemset in itemsets {
            itemset.sort_unstable();
            itemset.dedup();
            if itemset.is_empty() {
                continue;
            }
            for &item in &itemset {
                prefix.add_to_sums(item);
            }
            prefix.item_count += itemset.len();
            prefix.itemsets.push(itemset);
        }
        prefix
    }

    pub fn single(item: Item) -> Self {
        Self::new().sequence_extension(item)
    }

    #[inline]
    fn add_to_sums(&mut self, item: Item) {
        if item % 2 == 0 {
            self.sum_even += item as u64;
        } else {
            self.sum_odd += item as u64;
        }
    }

    /// Copy of this prefix with `{item}` appended as a new itemset.
    pub fn sequence_extension(&self, item: Item) -> Prefix {
        let mut extended = self.clone();
        extended.itemsets.push(vec![item]);
        extended.item_count += 1;
        extended.add_to_sums(item);
        extended
    }

    /// Copy of this prefix with `item` added to its last itemset.
    ///
    /// `item` must be greater than every item already in that itemset.
    pub fn itemset_extension(&self, item: Item) -> Prefix {
        let mut extended = self.clone();
        let Some(last) = extended.itemsets.last_mut() else {
            panic!("itemset extension of the empty pattern");
        };
        assert!(
            last.last().map_or(true, |&greatest| greatest < item),
            "itemset extension by {} breaks item order",
            item
        );
        last.push(item);
        extended.item_count += 1;
        extended.add_to_sums(item);
        extended
    }

    #[inline]
    pub fn itemsets(&self) -> &[Itemset] {
        &self.itemsets
    }

    /// Number of itemsets.
    #[inline]
    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    /// Number of items over all itemsets; the pattern "length" used for
    /// length constraints and result-policy partitions.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Greatest item of the last itemset, the last item appended.
    #[inline]
    pub fn last_item(&self) -> Option<Item> {
        self.itemsets.last().and_then(|itemset| itemset.last().copied())
    }

    #[inline]
    pub fn sum_even(&self) -> u64 {
        self.sum_even
    }

    #[inline]
    pub fn sum_odd(&self) -> u64 {
        self.sum_odd
    }

    #[inline]
    pub fn total_sum(&self) -> u64 {
        self.sum_even + self.sum_odd
    }
}

/// Necessary condition for `outer` to contain `inner`. Never sufficient.
#[inline]
pub fn may_contain(outer: &Prefix, inner: &Prefix) -> bool {
    outer.sum_even >= inner.sum_even && outer.sum_odd >= inner.sum_odd
}

/// Exact sequential containment: every itemset of `inner` is a subset of a
/// distinct itemset of `outer`, in order.
pub fn contains(outer: &Prefix, inner: &Prefix) -> bool {
    inner.item_count <= outer.item_count && contains_itemsets(&outer.itemsets, &inner.itemsets)
}

/// Containment where `outer` has strictly more items than `inner`.
pub fn strictly_contains(outer: &Prefix, inner: &Prefix) -> bool {
    outer.item_count > inner.item_count && contains_itemsets(&outer.itemsets, &inner.itemsets)
}

pub(crate) fn contains_itemsets(outer: &[Itemset], inner: &[Itemset]) -> bool {
    let mut j = 0;
    for (i, needle) in inner.iter().enumerate() {
        loop {
            if outer.len() - j < inner.len() - i {
                return false;
            }
            j += 1;
            if is_subset(needle, &outer[j - 1]) {
                break;
            }
        }
    }
    true
}

/// Subset test on two ascending itemsets.
pub(crate) fn is_subset(small: &[Item], big: &[Item]) -> bool {
    if small.len() > big.len() {
        return false;
    }
    let mut big_iter = big.iter();
    'outer: for item in small {
        for candidate in big_iter.by_ref() {
            if candidate == item {
                continue 'outer;
            }
            if candidate > item {
                return false;
            }
        }
        return false;
    }
    true
}
