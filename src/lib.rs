//! # Polarity
//!
//! Bag-of-words Naive Bayes text classification for Rust.
//!
//! ## Features
//!
//! - Whitespace tokenization with lowercasing and punctuation removal
//! - Laplace-smoothed multinomial Naive Bayes with log-space scoring
//! - Two-phase training: a mutable trainer finishes into an immutable model
//! - Optional parallel training and prediction on a rayon thread pool
//! - Labeled evaluation with per-class accuracy, or plain batch prediction
//! - Corpus loading and result export for class-per-directory corpora
//! - A rule-based sentence splitter and a bigram language model
//!
//! ## Example
//!
//! ```
//! use polarity::prelude::*;
//!
//! let groups = DocumentGroups::new()
//!     .with_group("positive", vec![Document::new("1", "a good film")])
//!     .with_group("negative", vec![Document::new("2", "a bad film")]);
//!
//! let model = NaiveBayesTrainer::train(ClassifierConfig::default(), &groups).unwrap();
//! assert_eq!(model.predict("good").unwrap().label, "positive");
//! ```

pub mod analysis;
pub mod classification;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod language_model;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, BagOfWordsAnalyzer};
    pub use crate::classification::{
        ClassifierConfig, Document, DocumentGroups, EvaluationReport, Evaluator,
        NaiveBayesModel, NaiveBayesTrainer, Prediction, TestOutcome,
    };
    pub use crate::error::{PolarityError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
