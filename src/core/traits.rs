//! Core traits for the Naive Bayes implementation

use crate::core::{Label, Prediction, Sample};

/// Dataset abstraction for indexed, read-only access to labeled documents
pub trait Dataset: Send + Sync {
    /// Number of samples in the dataset
    fn len(&self) -> usize;

    /// Largest feature id plus one
    fn dim(&self) -> usize;

    /// Get a single sample by index
    ///
    /// # Panics
    /// Panics if index >= len()
    fn get_sample(&self, i: usize) -> &Sample;

    /// Get all labels in document order
    fn get_labels(&self) -> Vec<Label> {
        (0..self.len()).map(|i| self.get_sample(i).label).collect()
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trained classifier
pub trait Classifier: Send + Sync {
    /// Predict a single sample
    fn predict(&self, sample: &Sample) -> Prediction;

    /// Predict multiple samples, preserving input order
    fn predict_batch(&self, samples: &[Sample]) -> Vec<Prediction> {
        samples.iter().map(|s| self.predict(s)).collect()
    }

    /// Class labels in the order used by `Prediction::scores`
    fn classes(&self) -> Vec<Label>;

    /// Number of distinct features known to the model
    fn n_features(&self) -> usize;
}

impl Dataset for [Sample] {
    fn len(&self) -> usize {
        <[Sample]>::len(self)
    }

    fn dim(&self) -> usize {
        self.iter()
            .filter_map(|s| s.features.indices.last())
            .max()
            .map_or(0, |&max| max + 1)
    }

    fn get_sample(&self, i: usize) -> &Sample {
        &self[i]
    }
}
