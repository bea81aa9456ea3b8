//! Multinomial Naive Bayes text classification.
//!
//! Training and prediction are split across two types. Documents are fed to a
//! [`NaiveBayesTrainer`], which only accumulates counts; finishing the
//! trainer estimates Laplace-smoothed probabilities once and yields an
//! immutable [`NaiveBayesModel`]. An [`Evaluator`] then runs the model over
//! labeled groups (accuracy report) or unlabeled batches (predictions only).

pub mod config;
pub mod counts;
pub mod document;
pub mod estimator;
pub mod evaluator;
pub mod model;

pub use config::ClassifierConfig;
pub use document::{Document, DocumentGroup, DocumentGroups};
pub use evaluator::{
    BatchPredictions, ClassAccuracy, DocumentOutcome, EvaluationReport, Evaluator, TestOutcome,
};
pub use model::{ClassScore, ClassScores, NaiveBayesModel, NaiveBayesTrainer, Prediction};
