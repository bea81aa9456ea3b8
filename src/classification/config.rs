//! Configuration for the Naive Bayes classifier.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};

/// Default smoothing parameter (Laplace smoothing).
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Configuration for a Naive Bayes classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Class labels. The order decides score ties and report order.
    pub classes: Vec<String>,

    /// Additive smoothing parameter applied to every class/word count.
    pub alpha: f64,

    /// Whether training and prediction fan out over a rayon thread pool.
    pub parallel: bool,

    /// Thread pool size for parallel processing.
    /// If None, uses the number of CPU cores.
    pub threads: Option<usize>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            classes: vec!["positive".to_string(), "negative".to_string()],
            alpha: DEFAULT_ALPHA,
            parallel: false,
            threads: None,
        }
    }
}

impl ClassifierConfig {
    /// Create a configuration for the given classes with default settings.
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the smoothing parameter.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the thread pool size used when parallel processing is enabled.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Number of worker threads for parallel processing.
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }

    /// Check the configuration.
    ///
    /// Classes must be non-empty, unique and non-blank; alpha must be a
    /// finite positive number; an explicit thread count must be positive.
    pub fn validate(&self) -> Result<()> {
        validate_classes(&self.classes)?;

        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(PolarityError::invalid_config(format!(
                "alpha must be a finite positive number, got {}",
                self.alpha
            )));
        }

        if self.threads == Some(0) {
            return Err(PolarityError::invalid_config(
                "threads must be greater than zero",
            ));
        }

        Ok(())
    }
}

/// Check that a class list is non-empty, unique and has no blank labels.
pub(crate) fn validate_classes(classes: &[String]) -> Result<()> {
    if classes.is_empty() {
        return Err(PolarityError::invalid_config(
            "at least one class is required",
        ));
    }

    let mut seen = HashSet::with_capacity(classes.len());
    for class in classes {
        if class.trim().is_empty() {
            return Err(PolarityError::invalid_config("class labels must not be blank"));
        }
        if !seen.insert(class.as_str()) {
            return Err(PolarityError::invalid_config(format!(
                "duplicate class label: {class}"
            )));
        }
    }

    Ok(())
}
