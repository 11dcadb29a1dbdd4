//! Model serialization and persistence
//!
//! Models are stored as JSON. The two probability tables keep the `p_c` /
//! `q_wc` keys of the classic model file layout, so files written by other
//! tools with that layout load here as long as their keys are integers.
//! JSON object keys are text on the wire; serde_json turns them back into
//! `Label` and `FeatureId` on load.
//!
//! JSON numbers cannot be infinite, yet a model trained with `alpha = 0` holds
//! `-inf` for every (feature, class) pair that never co-occurred. Such values
//! are written as the strings `"-Infinity"` / `"Infinity"`. Loading accepts
//! those strings and also the bare `-Infinity` / `Infinity` / `NaN` tokens
//! that Python's `json` module emits.

use crate::core::{FeatureId, Label, NBError, Result};
use crate::model::NaiveBayesModel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializable representation of a trained model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableModel {
    /// Log prior per class
    #[serde(rename = "p_c", with = "log_prob_table::priors")]
    pub class_priors: BTreeMap<Label, f64>,
    /// Log conditional probability per feature and class
    #[serde(rename = "q_wc", with = "log_prob_table::conditionals")]
    pub feature_log_probs: BTreeMap<FeatureId, BTreeMap<Label, f64>>,
    /// Model metadata, absent in files from other producers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
}

/// Model metadata for tracking and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Library version used to create the model
    pub library_version: String,
    pub n_classes: usize,
    pub n_features: usize,
    /// Training parameters used
    pub training_params: TrainingParams,
    /// Creation timestamp
    pub created_at: String,
}

/// Training parameters for reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    pub alpha: f64,
    pub n_documents: usize,
}

impl SerializableModel {
    /// Create a serializable model from a trained model
    pub fn from_model(model: &NaiveBayesModel, params: TrainingParams) -> Self {
        Self {
            class_priors: model.class_priors().clone(),
            feature_log_probs: model.feature_log_probs().clone(),
            metadata: Some(ModelMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                n_classes: model.n_classes(),
                n_features: model.n_features(),
                training_params: params,
                created_at: chrono::Utc::now().to_rfc3339(),
            }),
        }
    }

    /// Save model to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(NBError::IoError)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| NBError::SerializationError(e.to_string()))?;
        writer.flush().map_err(NBError::IoError)?;
        Ok(())
    }

    /// Load model from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(NBError::IoError)?;
        Self::from_json(&text)
    }

    /// Parse a model from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(&quote_non_finite(text))
            .map_err(|e| NBError::SerializationError(e.to_string()))
    }

    /// Convert back to a validated model
    pub fn to_model(&self) -> Result<NaiveBayesModel> {
        NaiveBayesModel::from_parts(self.class_priors.clone(), self.feature_log_probs.clone())
    }

    /// Consume into a validated model without copying the tables
    pub fn into_model(self) -> Result<NaiveBayesModel> {
        NaiveBayesModel::from_parts(self.class_priors, self.feature_log_probs)
    }

    /// Print model summary
    pub fn print_summary(&self) {
        println!("=== Multinomial Naive Bayes Model Summary ===");
        println!("Classes: {}", self.class_priors.len());
        println!("Features: {}", self.feature_log_probs.len());

        if let Some(metadata) = &self.metadata {
            println!("Library Version: {}", metadata.library_version);
            println!("Created: {}", metadata.created_at);
            println!("Training Parameters:");
            println!("  Alpha: {}", metadata.training_params.alpha);
            println!("  Documents: {}", metadata.training_params.n_documents);
        }

        println!("Class Priors:");
        for (label, log_prior) in &self.class_priors {
            println!("  {label:>6}: log {log_prior:.6} (p = {:.4})", log_prior.exp());
        }
    }
}

/// Wrap bare non-finite number tokens outside of strings in quotes
fn quote_non_finite(text: &str) -> Cow<'_, str> {
    const TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

    let mut out = String::new();
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
            continue;
        }
        // A token match can only start after the previous one ended
        if i < copied {
            continue;
        }
        if let Some(token) = TOKENS.iter().find(|token| text[i..].starts_with(*token)) {
            out.push_str(&text[copied..i]);
            out.push('"');
            out.push_str(token);
            out.push('"');
            copied = i + token.len();
        }
    }

    if copied == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[copied..]);
    Cow::Owned(out)
}

/// Log-probability tables with non-finite values stored as strings
mod log_prob_table {
    use crate::core::{FeatureId, Label};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Number(f64),
        Text(String),
    }

    impl From<f64> for Stored {
        fn from(value: f64) -> Self {
            if value.is_finite() {
                Stored::Number(value)
            } else if value.is_nan() {
                Stored::Text("NaN".to_string())
            } else if value > 0.0 {
                Stored::Text("Infinity".to_string())
            } else {
                Stored::Text("-Infinity".to_string())
            }
        }
    }

    impl Stored {
        fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
            match self {
                Stored::Number(value) => Ok(value),
                Stored::Text(text) => match text.as_str() {
                    "-Infinity" => Ok(f64::NEG_INFINITY),
                    "Infinity" => Ok(f64::INFINITY),
                    "NaN" => Ok(f64::NAN),
                    other => Err(E::custom(format!("invalid log-probability {other:?}"))),
                },
            }
        }
    }

    fn store_row(row: &BTreeMap<Label, f64>) -> BTreeMap<Label, Stored> {
        row.iter().map(|(&label, &value)| (label, value.into())).collect()
    }

    fn restore_row<E: serde::de::Error>(
        row: BTreeMap<Label, Stored>,
    ) -> Result<BTreeMap<Label, f64>, E> {
        row.into_iter()
            .map(|(label, stored)| Ok((label, stored.into_f64::<E>()?)))
            .collect()
    }

    pub mod priors {
        use super::*;

        pub fn serialize<S: Serializer>(
            table: &BTreeMap<Label, f64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            store_row(table).serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<BTreeMap<Label, f64>, D::Error> {
            restore_row(BTreeMap::deserialize(deserializer)?)
        }
    }

    pub mod conditionals {
        use super::*;

        pub fn serialize<S: Serializer>(
            table: &BTreeMap<FeatureId, BTreeMap<Label, f64>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let stored: BTreeMap<FeatureId, BTreeMap<Label, Stored>> = table
                .iter()
                .map(|(&feature, row)| (feature, store_row(row)))
                .collect();
            stored.serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<BTreeMap<FeatureId, BTreeMap<Label, f64>>, D::Error> {
            let stored: BTreeMap<FeatureId, BTreeMap<Label, Stored>> =
                BTreeMap::deserialize(deserializer)?;
            stored
                .into_iter()
                .map(|(feature, row)| Ok((feature, restore_row::<D::Error>(row)?)))
                .collect()
        }
    }
}
