//! Multinomial Naive Bayes training
//!
//! Training is a single counting pass followed by smoothing. There is no
//! iterative optimization: the same data and alpha always produce the same
//! model.

pub mod statistics;

pub use self::statistics::ClassStatistics;

use crate::core::{Dataset, Result, Sample, TrainerConfig};
use crate::model::NaiveBayesModel;
use log::debug;

/// Trainer that turns labeled sparse documents into a `NaiveBayesModel`
#[derive(Debug, Clone, Default)]
pub struct NaiveBayesTrainer {
    config: TrainerConfig,
}

impl NaiveBayesTrainer {
    /// Create a new trainer with the given configuration
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Create a new trainer with the given smoothing constant
    pub fn with_alpha(alpha: f64) -> Self {
        Self::new(TrainerConfig { alpha })
    }

    /// Train a model on the given dataset
    pub fn train<D: Dataset + ?Sized>(&self, dataset: &D) -> Result<NaiveBayesModel> {
        self.fit((0..dataset.len()).map(|i| dataset.get_sample(i)))
    }

    /// Train a model on a slice of samples
    pub fn train_samples(&self, samples: &[Sample]) -> Result<NaiveBayesModel> {
        self.fit(samples)
    }

    /// Get the trainer configuration
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    fn fit<'a, I>(&self, samples: I) -> Result<NaiveBayesModel>
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        self.config.validate()?;

        let mut stats = ClassStatistics::new();
        for sample in samples {
            stats.accumulate(sample)?;
        }

        debug!(
            "Accumulated {} documents, {} classes, {} features",
            stats.n_documents(),
            stats.n_classes(),
            stats.n_features()
        );

        stats.into_model(self.config.alpha)
    }
}

/// Train a model with smoothing constant `alpha`
pub fn train<D: Dataset + ?Sized>(dataset: &D, alpha: f64) -> Result<NaiveBayesModel> {
    NaiveBayesTrainer::with_alpha(alpha).train(dataset)
}
