use super::context::MiningContext;
use crate::spam::cmap::CoocMap;
use crate::spam::config::MinerConfig;
use crate::spam::database::Item;
use crate::spam::policy::ResultPolicy;
use crate::spam::prefix::Prefix;
use crate::spam::vertical::{Bitmap, VerticalDatabase};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

/// A frequent single-item extension and the bitmap it produced.
#[derive(Debug, Clone)]
pub struct Extension {
    pub item: Item,
    pub bitmap: Bitmap,
}

/// Everything the search reads but never modifies.
pub struct SearchSpace<'a> {
    vertical: &'a VerticalDatabase,
    cmap: &'a CoocMap,
    config: &'a MinerConfig,
    /// Every item of the database, the candidate list under a gap.
    all_items: Rc<[Item]>,
}

impl<'a> SearchSpace<'a> {
    pub fn new(vertical: &'a VerticalDatabase, cmap: &'a CoocMap, config: &'a MinerConfig) -> Self {
        Self {
            vertical,
            cmap,
            config,
            all_items: vertical.items().map(|(item, _)| item).collect(),
        }
    }

    /// Candidate lists handed to the children of a node: the items of its
    /// frequent S- and I-extensions. A gap breaks anti-monotonicity for
    /// general subsequences (`{a}{b}{c}` can satisfy it while `{a}{c}` does
    /// not), so under a gap every child gets the full item list and only the
    /// co-occurrence bound and the support check prune.
    fn child_candidates(&self, s_extensions: &[Extension], i_extensions: &[Extension]) -> (Rc<[Item]>, Rc<[Item]>) {
        if self.config.max_gap.is_some() {
            return (Rc::clone(&self.all_items), Rc::clone(&self.all_items));
        }
        (
            s_extensions.iter().map(|e| e.item).collect(),
            i_extensions.iter().map(|e| e.item).collect(),
        )
    }

    /// Frequent S-extensions of `bitmap` among `candidates`.
    pub fn sequence_extensions(
        &self,
        bitmap: &Bitmap,
        candidates: &[Item],
        last_item: Item,
        ctx: &mut MiningContext,
    ) -> Vec<Extension> {
        let mut extensions = Vec::new();
        for &item in candidates {
            if !self.cmap.allows_sequence_extension(last_item, item, ctx.min_support()) {
                ctx.stats.cmap_pruned += 1;
                tracing::trace!(last_item, item, "s-extension pruned by co-occurrence");
                continue;
            }
            let Some(item_bitmap) = self.vertical.bitmap(item) else {
                continue;
            };
            let extended = bitmap.sequence_extension(item_bitmap, self.vertical.layout(), self.config.max_gap);
            ctx.stats.bitmaps_built += 1;
            if extended.support() >= ctx.min_support() {
                extensions.push(Extension { item, bitmap: extended });
            }
        }
        extensions
    }

    /// Frequent I-extensions of `bitmap` among `candidates` greater than
    /// `last_item`, the greatest item of the current last itemset.
    pub fn itemset_extensions(
        &self,
        bitmap: &Bitmap,
        candidates: &[Item],
        last_item: Item,
        ctx: &mut MiningContext,
    ) -> Vec<Extension> {
        let mut extensions = Vec::new();
        for &item in candidates.iter().filter(|&&item| item > last_item) {
            if !self.cmap.allows_itemset_extension(last_item, item, ctx.min_support()) {
                ctx.stats.cmap_pruned += 1;
                tracing::trace!(last_item, item, "i-extension pruned by co-occurrence");
                continue;
            }
            let Some(item_bitmap) = self.vertical.bitmap(item) else {
                continue;
            };
            let extended = bitmap.itemset_extension(item_bitmap, self.vertical.layout());
            ctx.stats.bitmaps_built += 1;
            if extended.support() >= ctx.min_support() {
                extensions.push(Extension { item, bitmap: extended });
            }
        }
        extensions
    }

    /// Depth-first search from every frequent single item.
    pub fn depth_first<P: ResultPolicy>(&self, policy: &mut P, ctx: &mut MiningContext) {
        let items = self.vertical.frequent_items(ctx.min_support());
        for &item in &items {
            let Some(bitmap) = self.vertical.bitmap(item) else {
                continue;
            };
            if bitmap.support() < ctx.min_support() {
                continue;
            }
            self.visit(Prefix::single(item), bitmap, &items, &items, item, policy, ctx);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn visit<P: ResultPolicy>(
        &self,
        prefix: Prefix,
        bitmap: &Bitmap,
        sn: &[Item],
        in_: &[Item],
        last_item: Item,
        policy: &mut P,
        ctx: &mut MiningContext,
    ) {
        let depth = prefix.item_count();
        ctx.stats.candidates += 1;
        ctx.reached_depth(depth);

        let decision = policy.on_candidate_accepted(&prefix, bitmap, depth, ctx);
        if !decision.explores() {
            return;
        }
        let has_frequent_extension =
            self.config.can_extend(depth) && self.dfs_pruning(&prefix, bitmap, sn, in_, last_item, policy, ctx);
        policy.on_subtree_explored(&prefix, bitmap, has_frequent_extension, ctx);
    }

    /// Expand `prefix` by every frequent extension and recurse into each.
    /// Returns whether any frequent extension was found.
    #[allow(clippy::too_many_arguments)]
    fn dfs_pruning<P: ResultPolicy>(
        &self,
        prefix: &Prefix,
        bitmap: &Bitmap,
        sn: &[Item],
        in_: &[Item],
        last_item: Item,
        policy: &mut P,
        ctx: &mut MiningContext,
    ) -> bool {
        let s_extensions = self.sequence_extensions(bitmap, sn, last_item, ctx);
        let i_extensions = self.itemset_extensions(bitmap, in_, last_item, ctx);
        if s_extensions.is_empty() && i_extensions.is_empty() {
            return false;
        }

        let (s_items, i_items) = self.child_candidates(&s_extensions, &i_extensions);

        for extension in s_extensions {
            // top-k may have raised the threshold since the extension was built
            if extension.bitmap.support() < ctx.min_support() {
                continue;
            }
            let child = prefix.sequence_extension(extension.item);
            self.visit(child, &extension.bitmap, &s_items, &s_items, extension.item, policy, ctx);
        }
        for extension in i_extensions {
            if extension.bitmap.support() < ctx.min_support() {
                continue;
            }
            let child = prefix.itemset_extension(extension.item);
            self.visit(child, &extension.bitmap, &s_items, &i_items, extension.item, policy, ctx);
        }
        true
    }

    /// Best-first search: always expand the pending candidate with the
    /// highest support. Pending candidates are dropped once the threshold
    /// rises above them. `on_subtree_explored` is never called.
    pub fn best_first<P: ResultPolicy>(&self, policy: &mut P, ctx: &mut MiningContext) {
        let items: Rc<[Item]> = self.vertical.frequent_items(ctx.min_support()).into();
        let mut frontier: BinaryHeap<Pending> = BinaryHeap::new();

        for &item in items.iter() {
            let Some(bitmap) = self.vertical.bitmap(item) else {
                continue;
            };
            if bitmap.support() < ctx.min_support() {
                continue;
            }
            let pending = Pending {
                prefix: Prefix::single(item),
                bitmap: bitmap.clone(),
                sn: Rc::clone(&items),
                in_: Rc::clone(&items),
                last_item: item,
            };
            self.offer(pending, policy, ctx, &mut frontier);
        }

        while let Some(node) = frontier.pop() {
            if node.bitmap.support() < ctx.min_support() {
                break;
            }
            let s_extensions = self.sequence_extensions(&node.bitmap, &node.sn, node.last_item, ctx);
            let i_extensions = self.itemset_extensions(&node.bitmap, &node.in_, node.last_item, ctx);
            let (s_items, i_items) = self.child_candidates(&s_extensions, &i_extensions);

            for extension in s_extensions {
                if extension.bitmap.support() < ctx.min_support() {
                    continue;
                }
                let pending = Pending {
                    prefix: node.prefix.sequence_extension(extension.item),
                    bitmap: extension.bitmap,
                    sn: Rc::clone(&s_items),
                    in_: Rc::clone(&s_items),
                    last_item: extension.item,
                };
                self.offer(pending, policy, ctx, &mut frontier);
            }
            for extension in i_extensions {
                if extension.bitmap.support() < ctx.min_support() {
                    continue;
                }
                let pending = Pending {
                    prefix: node.prefix.itemset_extension(extension.item),
                    bitmap: extension.bitmap,
                    sn: Rc::clone(&s_items),
                    in_: Rc::clone(&i_items),
                    last_item: extension.item,
                };
                self.offer(pending, policy, ctx, &mut frontier);
            }
        }
    }

    fn offer<P: ResultPolicy>(
        &self,
        pending: Pending,
        policy: &mut P,
        ctx: &mut MiningContext,
        frontier: &mut BinaryHeap<Pending>,
    ) {
        let depth = pending.prefix.item_count();
        ctx.stats.candidates += 1;
        ctx.reached_depth(depth);

        let before = ctx.min_support();
        let decision = policy.on_candidate_accepted(&pending.prefix, &pending.bitmap, depth, ctx);
        if ctx.min_support() > before {
            let min_support = ctx.min_support();
            frontier.retain(|queued| queued.bitmap.support() >= min_support);
        }
        if decision.explores() && self.config.can_extend(depth) {
            frontier.push(pending);
        }
    }
}

/// A candidate waiting for expansion in the best-first search.
struct Pending {
    prefix: Prefix,
    bitmap: Bitmap,
    sn: Rc<[Item]>,
    in_: Rc<[Item]>,
    last_item: Item,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bitmap
            .support()
            .cmp(&other.bitmap.support())
            .then_with(|| other.prefix.item_count().cmp(&self.prefix.item_count()))
            .then_with(|| other.prefix.itemsets().cmp(self.prefix.itemsets()))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}
