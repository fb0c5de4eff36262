use thiserror::Error;

/// Errors raised while training or querying a classifier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("Model has no training examples")]
    EmptyModel,

    #[error("Training batch is empty")]
    EmptyBatch,

    #[error("Expected {expected} features but got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Feature {index} is not a finite number: {value}")]
    NonFiniteFeature { index: usize, value: f64 },

    #[error("Invalid classifier configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while reading or writing the persisted model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("I/O error on model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode model: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported model format version {found} (expected {expected})")]
    UnsupportedVersion { expected: u32, found: u32 },

    #[error("Failed to replace model file {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
