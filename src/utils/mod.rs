//! Utility functions for dataset inspection

use crate::core::{Dataset, Sample};

/// Validation and preprocessing utilities
pub mod validation {
    use super::*;
    use crate::core::{Label, NBError, Result};
    use std::collections::BTreeMap;

    /// Count documents per label
    pub fn class_distribution<D: Dataset + ?Sized>(dataset: &D) -> BTreeMap<Label, usize> {
        let mut counts = BTreeMap::new();
        for label in dataset.get_labels() {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    /// Check every document for negative or non-finite weights.
    ///
    /// Errors name the offending document by its 1-based position.
    pub fn validate_weights<D: Dataset + ?Sized>(dataset: &D) -> Result<()> {
        for i in 0..dataset.len() {
            dataset
                .get_sample(i)
                .features
                .validate()
                .map_err(|e| match e {
                    NBError::MalformedVector(reason) => {
                        NBError::MalformedVector(format!("document {}: {reason}", i + 1))
                    }
                    other => other,
                })?;
        }
        Ok(())
    }
}

/// Dataset statistics
pub mod stats {
    use super::*;
    use crate::core::FeatureId;
    use std::collections::HashMap;

    /// Calculate basic statistics for sparse vectors in a dataset
    pub fn sparse_vector_stats(samples: &[Sample]) -> SparseVectorStats {
        if samples.is_empty() {
            return SparseVectorStats::default();
        }

        let nnz_values: Vec<usize> = samples.iter().map(|s| s.features.nnz()).collect();

        let total_nnz: usize = nnz_values.iter().sum();
        let mean_nnz = total_nnz as f64 / samples.len() as f64;

        let max_nnz = *nnz_values.iter().max().unwrap_or(&0);
        let min_nnz = *nnz_values.iter().min().unwrap_or(&0);

        let total_weight: f64 = samples.iter().map(|s| s.features.total_weight()).sum();

        SparseVectorStats {
            mean_nnz,
            min_nnz,
            max_nnz,
            mean_weight: total_weight / samples.len() as f64,
            total_samples: samples.len(),
        }
    }

    /// Number of documents each feature appears in
    pub fn feature_frequency(samples: &[Sample]) -> HashMap<FeatureId, usize> {
        let mut frequency = HashMap::new();
        for sample in samples {
            for &index in &sample.features.indices {
                *frequency.entry(index).or_insert(0) += 1;
            }
        }
        frequency
    }
}

/// Statistics for sparse vector analysis
#[derive(Debug, Clone, Default)]
pub struct SparseVectorStats {
    pub mean_nnz: f64,
    pub min_nnz: usize,
    pub max_nnz: usize,
    /// Mean document length (sum of weights)
    pub mean_weight: f64,
    pub total_samples: usize,
}
