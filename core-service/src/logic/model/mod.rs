//! Model Module - regression model and training
//!
//! Training is separated from inference so the persisted artifact only
//! carries plain data (trees, background rows, metrics).

pub mod tree;
pub mod forest;
pub mod split;
pub mod metrics;
pub mod background;
pub mod trainer;


// Re-export common types
pub use forest::{ForestParams, RandomForest};
pub use tree::{Node, RegressionTree, TreeParams};
pub use metrics::Metrics;
pub use background::BackgroundSample;
pub use trainer::{train, TrainingConfig, MIN_TRAINING_ROWS};
