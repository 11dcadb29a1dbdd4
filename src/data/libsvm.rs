//! LibSVM format dataset implementation
//!
//! Supports loading datasets in the libsvm format:
//! label index:value index:value ...
//!
//! Example:
//! 1 1:2 3:1 7:4
//! 3 2:1 5:2.5
//!
//! Labels are integers and feature ids are kept exactly as written, so a
//! model trained on a file refers to the same ids as the file. Ids must be
//! non-negative integers (`0` included); a negative id such as `-2:1` is a
//! `ParseError`, following the LibSVM convention.

use crate::core::{Dataset, FeatureId, Label, NBError, Result, Sample, SparseVector};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Dataset implementation for LibSVM format files
#[derive(Debug, Clone)]
pub struct LibSVMDataset {
    samples: Vec<Sample>,
    dimensions: usize,
}

impl LibSVMDataset {
    /// Load a dataset from a LibSVM format file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(NBError::IoError)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Load a dataset from a reader (for testing and flexibility)
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut samples = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(NBError::IoError)?;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let sample = Self::parse_line(line).map_err(|e| match e {
                NBError::MalformedVector(msg) => {
                    NBError::MalformedVector(format!("line {}: {}", line_num + 1, msg))
                }
                NBError::ParseError(msg) => NBError::ParseError(format!(
                    "Error parsing line {}: {}",
                    line_num + 1,
                    msg
                )),
                other => other,
            })?;
            samples.push(sample);
        }

        Self::from_samples(samples)
    }

    /// Wrap already parsed samples
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(NBError::EmptyDataset);
        }

        let dimensions = samples.as_slice().dim();
        Ok(LibSVMDataset {
            samples,
            dimensions,
        })
    }

    /// All samples in file order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Parse a single line in libsvm format
    fn parse_line(line: &str) -> Result<Sample> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        let Some((label_str, feature_strs)) = parts.split_first() else {
            return Err(NBError::ParseError("Empty line".to_string()));
        };

        if label_str.contains(':') {
            return Err(NBError::MalformedVector(format!(
                "missing label before {label_str}"
            )));
        }

        let label = label_str
            .parse::<Label>()
            .map_err(|_| NBError::ParseError(format!("Invalid label: {label_str}")))?;

        // Parse feature:value pairs
        let mut indices = Vec::with_capacity(feature_strs.len());
        let mut values = Vec::with_capacity(feature_strs.len());

        for feature_str in feature_strs {
            let Some((index_str, value_str)) = feature_str.split_once(':') else {
                return Err(NBError::ParseError(format!(
                    "Invalid feature format: {feature_str}"
                )));
            };

            let index = index_str.parse::<FeatureId>().map_err(|_| {
                NBError::ParseError(format!("Invalid feature index: {index_str}"))
            })?;

            let value = value_str.parse::<f64>().map_err(|_| {
                NBError::ParseError(format!("Invalid feature value: {value_str}"))
            })?;

            if !value.is_finite() || value < 0.0 {
                return Err(NBError::MalformedVector(format!(
                    "feature {index} has weight {value}, expected a finite non-negative value"
                )));
            }

            indices.push(index);
            values.push(value);
        }

        Ok(Sample::new(SparseVector::new(indices, values), label))
    }
}

impl Dataset for LibSVMDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn get_sample(&self, i: usize) -> &Sample {
        &self.samples[i]
    }
}
