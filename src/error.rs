//! Error types for the Polarity library.
//!
//! All errors are represented by the [`PolarityError`] enum. Configuration
//! and arithmetic failures are fatal for the operation in progress and are
//! returned to the caller immediately; out-of-vocabulary tokens are never
//! reported as errors.
//!
//! # Examples
//!
//! ```
//! use polarity::error::{PolarityError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PolarityError::invalid_config("alpha must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Polarity operations.
#[derive(Error, Debug)]
pub enum PolarityError {
    /// I/O errors (reading corpora, writing results)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A class label that is not part of the configured class list
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// Invalid classifier or corpus configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No training documents were recorded, so class priors are undefined
    #[error("Empty training data: no documents were recorded for any class")]
    EmptyTrainingData,

    /// An evaluation group without documents, so its accuracy is undefined
    #[error("Empty evaluation group: {0}")]
    EmptyEvaluationGroup(String),

    /// Analysis-related errors (tokenization, filtering, pattern compilation)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Corpus layout errors (missing class directory, unnumbered file, ...)
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PolarityError.
pub type Result<T> = std::result::Result<T, PolarityError>;

impl PolarityError {
    /// Create a new unknown class error.
    pub fn unknown_class<S: Into<String>>(class: S) -> Self {
        PolarityError::UnknownClass(class.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        PolarityError::InvalidConfig(msg.into())
    }

    /// Create a new empty evaluation group error.
    pub fn empty_group<S: Into<String>>(group: S) -> Self {
        PolarityError::EmptyEvaluationGroup(group.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PolarityError::Analysis(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        PolarityError::Corpus(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PolarityError::Other(msg.into())
    }
}
