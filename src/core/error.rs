//! Error types for the Naive Bayes implementation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NBError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Malformed vector: {0}")]
    MalformedVector(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, NBError>;
