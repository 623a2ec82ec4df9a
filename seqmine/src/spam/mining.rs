use super::cmap::CoocMap;
use super::config::{MinSupport, MinerConfig, Traversal};
use super::database::SequenceDatabase;
use super::pattern::{sort_patterns, MiningResult, Pattern};
use super::policy::{ClosedPolicy, FrequentPolicy, GeneratorPolicy, MaximalPolicy, ResultPolicy, TopKPolicy};
use super::prefix::Prefix;
use super::search::{MiningContext, SearchSpace};
use super::vertical::VerticalDatabase;
use crate::error::{Error, Result};

/// All frequent sequential patterns.
pub fn mine_frequent(
    db: &SequenceDatabase,
    min_support: impl Into<MinSupport>,
    config: &MinerConfig,
) -> Result<MiningResult> {
    let prepared = Prepared::new(db, min_support.into(), config)?;
    let policy = FrequentPolicy::new(config.min_pattern_length);
    Ok(prepared.run("cm-spam", policy, Traversal::DepthFirst))
}

/// Frequent patterns without a proper super-pattern of equal support.
pub fn mine_closed(
    db: &SequenceDatabase,
    min_support: impl Into<MinSupport>,
    config: &MinerConfig,
) -> Result<MiningResult> {
    let prepared = Prepared::new(db, min_support.into(), config)?;
    Ok(prepared.run("cm-clasp", ClosedPolicy::new(), Traversal::DepthFirst))
}

/// Frequent patterns without a frequent proper super-pattern.
pub fn mine_maximal(
    db: &SequenceDatabase,
    min_support: impl Into<MinSupport>,
    config: &MinerConfig,
) -> Result<MiningResult> {
    let prepared = Prepared::new(db, min_support.into(), config)?;
    Ok(prepared.run("vmsp", MaximalPolicy::new(), Traversal::DepthFirst))
}

/// Frequent patterns without a proper sub-pattern of equal support.
///
/// The empty pattern is a generator of every non-empty database; it is
/// reported (with the sequence count as support) when
/// `min_pattern_length` is 0.
pub fn mine_generators(
    db: &SequenceDatabase,
    min_support: impl Into<MinSupport>,
    config: &MinerConfig,
) -> Result<MiningResult> {
    let prepared = Prepared::new(db, min_support.into(), config)?;
    let min_count = prepared.min_support;
    let policy = GeneratorPolicy::new(config.backward_pruning);
    let mut result = prepared.run("vgen", policy, Traversal::DepthFirst);

    let sequence_count = db.len();
    if config.min_pattern_length == 0 && sequence_count > 0 && sequence_count >= min_count {
        let mut empty = Pattern::new(Prefix::new(), sequence_count);
        if config.output_sequence_ids {
            empty.sequence_ids = Some((0..sequence_count).collect());
        }
        result.patterns.insert(0, empty);
        result.stats.patterns_retained += 1;
    }
    Ok(result)
}

/// The `k` patterns with the highest support, plus every pattern tied with
/// the k-th. `MiningResult::min_support` holds the support of the k-th.
///
/// Patterns are ordered by descending support.
pub fn mine_top_k(db: &SequenceDatabase, k: usize, config: &MinerConfig) -> Result<MiningResult> {
    if k == 0 {
        return Err(Error::InvalidTopK(k));
    }
    let prepared = Prepared::new(db, MinSupport::Count(1), config)?;
    let policy = TopKPolicy::new(k, config.min_pattern_length);
    let mut result = prepared.run("tks", policy, config.traversal);
    result.patterns.sort_by(|a, b| b.support.cmp(&a.support));
    Ok(result)
}

/// Structures shared by every run: bitmaps, co-occurrence map, threshold.
struct Prepared<'a> {
    config: &'a MinerConfig,
    sequence_count: usize,
    min_support: usize,
    vertical: VerticalDatabase,
    cmap: CoocMap,
}

impl<'a> Prepared<'a> {
    fn new(db: &SequenceDatabase, min_support: MinSupport, config: &'a MinerConfig) -> Result<Self> {
        config.validate()?;
        let min_support = min_support.to_count(db.len())?;
        let vertical = VerticalDatabase::build(db);
        let cmap = CoocMap::build(db, &vertical, min_support);
        Ok(Self {
            config,
            sequence_count: db.len(),
            min_support,
            vertical,
            cmap,
        })
    }

    fn run<P: ResultPolicy>(self, algorithm: &'static str, mut policy: P, traversal: Traversal) -> MiningResult {
        tracing::info!(
            algorithm,
            sequences = self.sequence_count,
            min_support = self.min_support,
            "mining started"
        );

        let mut ctx = MiningContext::new(self.min_support, self.sequence_count);
        let space = SearchSpace::new(&self.vertical, &self.cmap, self.config);
        match traversal {
            Traversal::DepthFirst => space.depth_first(&mut policy, &mut ctx),
            Traversal::BestFirst => space.best_first(&mut policy, &mut ctx),
        }

        let layout = self.vertical.layout();
        let mut patterns: Vec<Pattern> = policy
            .into_records()
            .into_iter()
            .filter(|record| self.config.reports(record.prefix.item_count()))
            .map(|record| record.into_pattern(layout, self.config.output_sequence_ids))
            .collect();
        sort_patterns(&mut patterns);
        ctx.stats.patterns_retained = patterns.len();

        tracing::info!(
            algorithm,
            patterns = patterns.len(),
            min_support = ctx.min_support(),
            candidates = ctx.stats.candidates,
            bitmaps_built = ctx.stats.bitmaps_built,
            cmap_pruned = ctx.stats.cmap_pruned,
            max_depth = ctx.stats.max_depth,
            "mining finished"
        );

        MiningResult {
            patterns,
            min_support: ctx.min_support(),
            sequence_count: self.sequence_count,
            stats: ctx.stats,
        }
    }
}
