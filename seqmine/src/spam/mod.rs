pub mod cmap;
pub mod config;
pub mod database;
pub mod io;
pub mod mining;
pub mod pattern;
pub mod policy;
pub mod prefix;
pub mod search;
pub mod vertical;

pub use cmap::CoocMap;
pub use config::{MinSupport, MinerConfig, Traversal};
pub use database::{Item, Itemset, Sequence, SequenceDatabase};
pub use mining::{mine_closed, mine_frequent, mine_generators, mine_maximal, mine_top_k};
pub use pattern::{MiningResult, Pattern, PatternRecord};
pub use policy::{Decision, ResultPolicy};
pub use prefix::{contains, may_contain, strictly_contains, Prefix};
pub use search::{MiningContext, MiningStats, SearchSpace};
pub use vertical::{Bitmap, SequenceLayout, VerticalDatabase};
