pub mod context;
pub mod driver;

pub use context::{MiningContext, MiningStats};
pub use driver::{Extension, SearchSpace};
