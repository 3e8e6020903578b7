// src/error.rs
use thiserror::Error;

/// Errors local to a single classifier call. No variant leaves the store
/// with counters violating the sum-consistency invariants; a failing
/// operation either fully applied or fully no-oped.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// `classify` was called before any training happened.
    #[error("cannot classify with zero categories or zero trained examples")]
    InsufficientTrainingData,

    /// Prune thresholds are accepted as signed so the negative case is
    /// representable and rejected here.
    #[error("prune threshold must be non-negative, got {0}")]
    InvalidThreshold(i64),

    /// A raw score of exactly zero cannot survive the ratio normalization.
    #[error("raw score for category `{category}` is zero; refusing to divide by it")]
    DegenerateNormalization { category: String },

    #[error("failed to access the model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode the model: {0}")]
    Encode(#[from] bincode::Error),

    #[error("failed to serialize or deserialize the model: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
