//! Core type definitions for Multinomial Naive Bayes

use crate::core::{NBError, Result};

/// Class label (any integer, no ordering semantics beyond tie-breaking)
pub type Label = i64;

/// Feature identifier as written in the input data
pub type FeatureId = usize;

/// Prediction result for a single document
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Predicted class label
    pub label: Label,
    /// Log-likelihood score per class, in ascending label order
    pub scores: Vec<f64>,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: Label, scores: Vec<f64>) -> Self {
        Self { label, scores }
    }
}

/// Sparse vector representation with sorted indices
#[derive(Clone, Debug, PartialEq)]
pub struct SparseVector {
    /// Sorted, unique feature ids
    pub indices: Vec<FeatureId>,
    /// Weights corresponding to indices
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Create a new sparse vector, ensuring indices are sorted and unique.
    ///
    /// When an id appears more than once the last value wins.
    pub fn new(indices: Vec<FeatureId>, values: Vec<f64>) -> Self {
        assert_eq!(
            indices.len(),
            values.len(),
            "Indices and values must have same length"
        );

        // Stable sort keeps the input order among duplicates
        let mut pairs: Vec<_> = indices.into_iter().zip(values).collect();
        pairs.sort_by_key(|&(idx, _)| idx);

        let mut indices: Vec<FeatureId> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (idx, value) in pairs {
            if indices.last() == Some(&idx) {
                if let Some(last) = values.last_mut() {
                    *last = value;
                }
            } else {
                indices.push(idx);
                values.push(value);
            }
        }

        Self { indices, values }
    }

    /// Build a sparse vector from `(id, weight)` pairs
    pub fn from_pairs<I: IntoIterator<Item = (FeatureId, f64)>>(pairs: I) -> Self {
        let (indices, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::new(indices, values)
    }

    /// Create an empty sparse vector
    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Get the weight of a feature (0 if not present)
    pub fn get(&self, index: FeatureId) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Iterate over `(id, weight)` pairs in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Sum of all weights (the document length for count vectors)
    pub fn total_weight(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Check multinomial count semantics: every weight finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for (index, value) in self.iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(NBError::MalformedVector(format!(
                    "feature {index} has weight {value}, expected a finite non-negative value"
                )));
            }
        }
        Ok(())
    }

    /// Number of stored elements
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Check if vector is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Labeled document
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Feature vector (sparse representation)
    pub features: SparseVector,
    /// Class label
    pub label: Label,
}

impl Sample {
    /// Create a new sample
    pub fn new(features: SparseVector, label: Label) -> Self {
        Self { features, label }
    }
}

/// Configuration for training
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Lidstone smoothing constant added to every count
    pub alpha: f64,
}

impl TrainerConfig {
    /// Reject smoothing constants that cannot give well-formed log-probabilities
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(NBError::InvalidParameter(format!(
                "alpha must be a finite non-negative number, got: {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}
