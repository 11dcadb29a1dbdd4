//! Count accumulation for Multinomial Naive Bayes training
//!
//! One pass over the training documents collects, per class, the number of
//! documents, the total feature mass and the mass of every individual feature.
//! Everything the model needs is derived from these three tables.

use crate::core::{FeatureId, Label, NBError, Result, Sample};
use crate::model::NaiveBayesModel;
use std::collections::BTreeMap;

/// Per-class counts gathered from a training set
#[derive(Debug, Clone, Default)]
pub struct ClassStatistics {
    /// Documents per class
    doc_count: BTreeMap<Label, usize>,
    /// Sum of all feature weights per class
    total_weight: BTreeMap<Label, f64>,
    /// Sum of each feature's weight per class
    feature_weight: BTreeMap<FeatureId, BTreeMap<Label, f64>>,
    n_documents: usize,
}

impl ClassStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one labeled document to the counts
    pub fn accumulate(&mut self, sample: &Sample) -> Result<()> {
        sample.features.validate()?;

        *self.doc_count.entry(sample.label).or_insert(0) += 1;
        self.n_documents += 1;

        for (feature, weight) in sample.features.iter() {
            *self.total_weight.entry(sample.label).or_insert(0.0) += weight;
            *self
                .feature_weight
                .entry(feature)
                .or_default()
                .entry(sample.label)
                .or_insert(0.0) += weight;
        }

        Ok(())
    }

    /// Total number of documents seen (N)
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Number of distinct labels seen (C)
    pub fn n_classes(&self) -> usize {
        self.doc_count.len()
    }

    /// Number of distinct features seen (W)
    pub fn n_features(&self) -> usize {
        self.feature_weight.len()
    }

    /// Documents carrying `label`
    pub fn doc_count(&self, label: Label) -> usize {
        self.doc_count.get(&label).copied().unwrap_or(0)
    }

    /// Feature mass of all documents carrying `label`
    pub fn total_weight(&self, label: Label) -> f64 {
        self.total_weight.get(&label).copied().unwrap_or(0.0)
    }

    /// Mass of `feature` within documents carrying `label`
    pub fn feature_weight(&self, feature: FeatureId, label: Label) -> f64 {
        self.feature_weight
            .get(&feature)
            .and_then(|per_class| per_class.get(&label))
            .copied()
            .unwrap_or(0.0)
    }

    /// Turn the counts into Lidstone-smoothed log-probabilities.
    ///
    /// Priors are smoothed over the full label set and conditionals over the
    /// full vocabulary, so every (feature, label) pair gets a value even when
    /// the pair never occurred.
    pub fn into_model(self, alpha: f64) -> Result<NaiveBayesModel> {
        if self.n_documents == 0 {
            return Err(NBError::EmptyDataset);
        }

        let n = self.n_documents as f64;
        let c = self.n_classes() as f64;
        let w = self.n_features() as f64;

        let prior_norm = (n + c * alpha).ln();
        let class_priors: BTreeMap<Label, f64> = self
            .doc_count
            .iter()
            .map(|(&label, &count)| (label, (count as f64 + alpha).ln() - prior_norm))
            .collect();

        let mut feature_norms = BTreeMap::new();
        for &label in self.doc_count.keys() {
            let total = self.total_weight(label);
            if !total.is_finite() {
                return Err(NBError::MalformedVector(format!(
                    "feature weights of class {label} sum to {total}"
                )));
            }
            feature_norms.insert(label, (total + w * alpha).ln());
        }

        let mut feature_log_probs = BTreeMap::new();
        for (&feature, per_class) in &self.feature_weight {
            let mut log_probs = BTreeMap::new();
            for (&label, &norm) in &feature_norms {
                let count = per_class.get(&label).copied().unwrap_or(0.0);
                let log_prob = (count + alpha).ln() - norm;
                if log_prob.is_nan() {
                    return Err(NBError::InvalidParameter(format!(
                        "alpha = {alpha} leaves P(feature {feature} | class {label}) undefined"
                    )));
                }
                log_probs.insert(label, log_prob);
            }
            feature_log_probs.insert(feature, log_probs);
        }

        NaiveBayesModel::from_parts(class_priors, feature_log_probs)
    }
}
