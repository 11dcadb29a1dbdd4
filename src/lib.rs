//! Rust implementation of a Multinomial Naive Bayes classifier
//!
//! Training turns labeled sparse count vectors into Lidstone-smoothed log
//! class priors and log feature conditionals; prediction sums them per class
//! and picks the best-scoring label.

pub mod api;
pub mod core;
pub mod data;
pub mod model;
pub mod persistence;
pub mod predictor;
pub mod trainer;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{EvaluationMetrics, NaiveBayes};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{NBError, Result};
pub use crate::data::LibSVMDataset;
pub use crate::model::NaiveBayesModel;
pub use crate::predictor::{predict, PredictionReport};
pub use crate::trainer::{train, ClassStatistics, NaiveBayesTrainer};
pub use crate::utils::SparseVectorStats;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
