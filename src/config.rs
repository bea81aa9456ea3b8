//! File-based configuration for the `polarity` binary.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::classification::config::ClassifierConfig;
use crate::corpus::loader::CorpusConfig;
use crate::error::Result;

/// Top-level configuration, usually read from a JSON file.
///
/// ```json
/// {
///   "classifier": { "classes": ["positive", "negative"], "alpha": 0.9 },
///   "corpus": { "root": "review_polarity/txt_sentoken", "split_index": 900 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarityConfig {
    pub classifier: ClassifierConfig,
    pub corpus: CorpusConfig,
}

impl PolarityConfig {
    /// Load and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: PolarityConfig = serde_json::from_str(&content)?;
        config.classifier.validate()?;
        Ok(config)
    }
}
