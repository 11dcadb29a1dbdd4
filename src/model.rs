//! Trained Multinomial Naive Bayes model
//!
//! The model is a pair of tables: log class priors and, for every feature
//! seen during training, the log conditional probability of that feature
//! under every class. Both tables are ordered by key, so classes are always
//! visited in ascending label order.

use crate::core::{Classifier, FeatureId, Label, NBError, Prediction, Result, Sample, SparseVector};
use std::collections::BTreeMap;

/// Immutable trained model.
///
/// Every conditional row covers exactly the labels of the prior table.
/// The constructor checks this, so a value of this type never needs
/// re-validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NaiveBayesModel {
    class_priors: BTreeMap<Label, f64>,
    feature_log_probs: BTreeMap<FeatureId, BTreeMap<Label, f64>>,
}

impl NaiveBayesModel {
    /// Assemble a model from its two tables
    pub fn from_parts(
        class_priors: BTreeMap<Label, f64>,
        feature_log_probs: BTreeMap<FeatureId, BTreeMap<Label, f64>>,
    ) -> Result<Self> {
        if class_priors.is_empty() {
            return Err(NBError::InvalidModel("no class priors".to_string()));
        }

        for (label, prior) in &class_priors {
            if !prior.is_finite() {
                return Err(NBError::InvalidModel(format!(
                    "class {label} has non-finite prior {prior}"
                )));
            }
        }

        for (feature, per_class) in &feature_log_probs {
            if per_class.len() != class_priors.len()
                || per_class.keys().any(|label| !class_priors.contains_key(label))
            {
                return Err(NBError::InvalidModel(format!(
                    "feature {feature} has labels {:?}, expected {:?}",
                    per_class.keys().collect::<Vec<_>>(),
                    class_priors.keys().collect::<Vec<_>>()
                )));
            }
            if let Some((label, _)) = per_class.iter().find(|(_, p)| p.is_nan()) {
                return Err(NBError::InvalidModel(format!(
                    "feature {feature} has undefined log-probability for class {label}"
                )));
            }
        }

        Ok(Self {
            class_priors,
            feature_log_probs,
        })
    }

    /// Log prior per class
    pub fn class_priors(&self) -> &BTreeMap<Label, f64> {
        &self.class_priors
    }

    /// Log conditional probability per feature and class
    pub fn feature_log_probs(&self) -> &BTreeMap<FeatureId, BTreeMap<Label, f64>> {
        &self.feature_log_probs
    }

    pub fn class_prior(&self, label: Label) -> Option<f64> {
        self.class_priors.get(&label).copied()
    }

    /// log P(feature | label), `None` for unknown features or labels
    pub fn log_prob(&self, feature: FeatureId, label: Label) -> Option<f64> {
        self.feature_log_probs
            .get(&feature)
            .and_then(|per_class| per_class.get(&label))
            .copied()
    }

    /// Class labels in ascending order
    pub fn classes(&self) -> Vec<Label> {
        self.class_priors.keys().copied().collect()
    }

    pub fn n_classes(&self) -> usize {
        self.class_priors.len()
    }

    /// Vocabulary size
    pub fn n_features(&self) -> usize {
        self.feature_log_probs.len()
    }

    /// Log-likelihood of `features` under each class, in ascending label order.
    ///
    /// Features unknown to the model and zero weights contribute nothing.
    pub fn scores(&self, features: &SparseVector) -> Vec<f64> {
        self.class_priors
            .iter()
            .map(|(label, &prior)| {
                features
                    .iter()
                    .filter(|&(_, weight)| weight != 0.0)
                    .filter_map(|(feature, weight)| {
                        self.feature_log_probs
                            .get(&feature)
                            .and_then(|per_class| per_class.get(label))
                            .map(|&log_prob| weight * log_prob)
                    })
                    .fold(prior, |score, term| score + term)
            })
            .collect()
    }

    /// Classify a feature vector.
    ///
    /// Only a strictly greater score replaces the current best, so ties go to
    /// the lowest label.
    pub fn predict_vector(&self, features: &SparseVector) -> Prediction {
        let scores = self.scores(features);

        let mut best_label = self.class_priors.keys().next().copied().unwrap_or_default();
        let mut best_score = f64::NEG_INFINITY;
        for (&label, &score) in self.class_priors.keys().zip(&scores) {
            if score > best_score {
                best_score = score;
                best_label = label;
            }
        }

        Prediction::new(best_label, scores)
    }
}

impl Classifier for NaiveBayesModel {
    fn predict(&self, sample: &Sample) -> Prediction {
        self.predict_vector(&sample.features)
    }

    fn classes(&self) -> Vec<Label> {
        NaiveBayesModel::classes(self)
    }

    fn n_features(&self) -> usize {
        NaiveBayesModel::n_features(self)
    }
}
