//! High-level API for Multinomial Naive Bayes
//!
//! This module provides a user-friendly interface for common tasks,
//! including training, prediction, and model evaluation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rmnb::api::NaiveBayes;
//! use rmnb::LibSVMDataset;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Train a model on data
//! let model = NaiveBayes::new()
//!     .with_alpha(0.5)
//!     .train_from_file("train.libsvm")?;
//!
//! // Predict and score against the known labels
//! let test = LibSVMDataset::from_file("test.libsvm")?;
//! let report = rmnb::predict(&test, &model)?;
//! println!("Accuracy {:8.4}%", report.accuracy);
//! # Ok(())
//! # }
//! ```

use crate::core::{Dataset, Label, NBError, Result, Sample, TrainerConfig};
use crate::data::LibSVMDataset;
use crate::model::NaiveBayesModel;
use crate::predictor::{predict, PredictionReport};
use crate::trainer::NaiveBayesTrainer;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// High-level Naive Bayes interface with builder pattern
#[derive(Debug, Clone, Default)]
pub struct NaiveBayes {
    config: TrainerConfig,
}

impl NaiveBayes {
    /// Create a new classifier builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smoothing constant
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train on a dataset
    pub fn train<D: Dataset + ?Sized>(self, dataset: &D) -> Result<NaiveBayesModel> {
        NaiveBayesTrainer::new(self.config).train(dataset)
    }

    /// Train on samples
    pub fn train_samples(self, samples: &[Sample]) -> Result<NaiveBayesModel> {
        NaiveBayesTrainer::new(self.config).train_samples(samples)
    }

    /// Train from LibSVM format file
    pub fn train_from_file<P: AsRef<Path>>(self, path: P) -> Result<NaiveBayesModel> {
        let dataset = LibSVMDataset::from_file(path)?;
        self.train(&dataset)
    }
}

/// Predict a dataset and build the confusion counts
pub fn evaluate_detailed<D: Dataset + ?Sized>(
    model: &NaiveBayesModel,
    dataset: &D,
) -> Result<EvaluationMetrics> {
    let report = predict(dataset, model)?;
    Ok(EvaluationMetrics::from_report(&dataset.get_labels(), &report))
}

/// Multiclass evaluation metrics built from (actual, predicted) pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationMetrics {
    /// Counts keyed by (actual, predicted)
    confusion: BTreeMap<(Label, Label), usize>,
    classes: BTreeSet<Label>,
    total: usize,
}

impl EvaluationMetrics {
    /// Count (actual, predicted) label pairs
    pub fn from_pairs<I: IntoIterator<Item = (Label, Label)>>(pairs: I) -> Self {
        let mut metrics = Self::default();
        for (actual, predicted) in pairs {
            *metrics.confusion.entry((actual, predicted)).or_insert(0) += 1;
            metrics.classes.insert(actual);
            metrics.classes.insert(predicted);
            metrics.total += 1;
        }
        metrics
    }

    /// Pair a report's predictions with the true labels
    pub fn from_report(actual: &[Label], report: &PredictionReport) -> Self {
        Self::from_pairs(actual.iter().copied().zip(report.labels.iter().copied()))
    }

    /// Every label seen as actual or predicted, ascending
    pub fn classes(&self) -> Vec<Label> {
        self.classes.iter().copied().collect()
    }

    /// Number of documents with true label `actual` predicted as `predicted`
    pub fn count(&self, actual: Label, predicted: Label) -> usize {
        self.confusion
            .get(&(actual, predicted))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentage of correct predictions
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let correct: usize = self.classes.iter().map(|&c| self.count(c, c)).sum();
        100.0 * correct as f64 / self.total as f64
    }

    pub fn true_positives(&self, label: Label) -> usize {
        self.count(label, label)
    }

    /// Documents predicted as `label` that belong elsewhere
    pub fn false_positives(&self, label: Label) -> usize {
        self.confusion
            .iter()
            .filter(|((actual, predicted), _)| *predicted == label && *actual != label)
            .map(|(_, &n)| n)
            .sum()
    }

    /// Documents of `label` predicted as something else
    pub fn false_negatives(&self, label: Label) -> usize {
        self.confusion
            .iter()
            .filter(|((actual, predicted), _)| *actual == label && *predicted != label)
            .map(|(_, &n)| n)
            .sum()
    }

    /// Calculate precision: TP / (TP + FP)
    pub fn precision(&self, label: Label) -> f64 {
        let tp = self.true_positives(label);
        let denominator = tp + self.false_positives(label);
        if denominator == 0 {
            0.0
        } else {
            tp as f64 / denominator as f64
        }
    }

    /// Calculate recall: TP / (TP + FN)
    pub fn recall(&self, label: Label) -> f64 {
        let tp = self.true_positives(label);
        let denominator = tp + self.false_negatives(label);
        if denominator == 0 {
            0.0
        } else {
            tp as f64 / denominator as f64
        }
    }

    /// Calculate F1 score: 2 * (precision * recall) / (precision + recall)
    pub fn f1_score(&self, label: Label) -> f64 {
        let p = self.precision(label);
        let r = self.recall(label);
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * (p * r) / (p + r)
        }
    }

    /// Unweighted mean of per-class F1 scores
    pub fn macro_f1(&self) -> f64 {
        if self.classes.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.classes.iter().map(|&c| self.f1_score(c)).sum();
        sum / self.classes.len() as f64
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;

    /// Train on LibSVM data with default parameters
    pub fn train_libsvm<P: AsRef<Path>>(path: P) -> Result<NaiveBayesModel> {
        NaiveBayes::new().train_from_file(path)
    }

    /// Train with custom smoothing constant
    pub fn train_libsvm_with_alpha<P: AsRef<Path>>(
        path: P,
        alpha: f64,
    ) -> Result<NaiveBayesModel> {
        NaiveBayes::new().with_alpha(alpha).train_from_file(path)
    }

    /// Quick evaluation: train on training file, return percent accuracy on test file
    pub fn evaluate_split<P1: AsRef<Path>, P2: AsRef<Path>>(
        train_path: P1,
        test_path: P2,
    ) -> Result<f64> {
        let model = train_libsvm(train_path)?;
        let test = LibSVMDataset::from_file(test_path)?;
        Ok(predict(&test, &model)?.accuracy)
    }

    /// Hold-out validation with a sequential split (not randomized for reproducibility)
    pub fn simple_validation<D: Dataset + ?Sized>(
        dataset: &D,
        train_ratio: f64,
        alpha: f64,
    ) -> Result<f64> {
        if train_ratio <= 0.0 || train_ratio >= 1.0 {
            return Err(NBError::InvalidParameter(format!(
                "Train ratio must be between 0 and 1, got: {train_ratio}"
            )));
        }

        let n = dataset.len();
        let train_size = (n as f64 * train_ratio) as usize;
        if train_size == 0 || train_size == n {
            return Err(NBError::InvalidParameter(format!(
                "Train ratio {train_ratio} leaves an empty split for {n} samples"
            )));
        }

        let train_samples: Vec<Sample> = (0..train_size)
            .map(|i| dataset.get_sample(i).clone())
            .collect();
        let test_samples: Vec<Sample> = (train_size..n)
            .map(|i| dataset.get_sample(i).clone())
            .collect();

        let model = NaiveBayes::new()
            .with_alpha(alpha)
            .train_samples(&train_samples)?;

        Ok(predict(test_samples.as_slice(), &model)?.accuracy)
    }
}
