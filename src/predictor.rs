//! Batch prediction with accuracy against known labels

use crate::core::{Classifier, Dataset, Label, NBError, Result};
use crate::utils::validation;
use log::debug;

/// Output of a batch prediction, aligned with the input document order
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionReport {
    /// Column order of every score row (ascending labels)
    pub classes: Vec<Label>,
    /// Predicted label per document
    pub labels: Vec<Label>,
    /// Percentage of documents whose prediction matches the true label
    pub accuracy: f64,
    /// Log-likelihood per class, one row per document
    pub scores: Vec<Vec<f64>>,
    /// Number of correctly predicted documents
    pub n_correct: usize,
}

impl PredictionReport {
    /// Number of predicted documents
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Predict every document of `dataset` and score the result against its labels.
///
/// The whole dataset is checked before any scoring, so a malformed document
/// fails the call without partial output.
pub fn predict<D, M>(dataset: &D, model: &M) -> Result<PredictionReport>
where
    D: Dataset + ?Sized,
    M: Classifier + ?Sized,
{
    if dataset.is_empty() {
        return Err(NBError::EmptyDataset);
    }

    validation::validate_weights(dataset)?;

    let mut labels = Vec::with_capacity(dataset.len());
    let mut scores = Vec::with_capacity(dataset.len());
    let mut n_correct = 0;

    for i in 0..dataset.len() {
        let sample = dataset.get_sample(i);
        let prediction = model.predict(sample);
        if prediction.label == sample.label {
            n_correct += 1;
        }
        labels.push(prediction.label);
        scores.push(prediction.scores);
    }

    let accuracy = 100.0 * n_correct as f64 / dataset.len() as f64;
    debug!(
        "Predicted {} documents, {} correct ({:.4}%)",
        dataset.len(),
        n_correct,
        accuracy
    );

    Ok(PredictionReport {
        classes: model.classes(),
        labels,
        accuracy,
        scores,
        n_correct,
    })
}
