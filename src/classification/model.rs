//! Naive Bayes training and prediction.
//!
//! Training and querying are two different types. A [`NaiveBayesTrainer`]
//! owns the mutable counts; [`NaiveBayesTrainer::finish`] consumes it, runs
//! the estimator exactly once, and returns an immutable
//! [`NaiveBayesModel`]. A model therefore cannot be queried before training
//! completes, and its probabilities cannot be re-estimated.
//!
//! # Examples
//!
//! ```
//! use polarity::classification::config::ClassifierConfig;
//! use polarity::classification::model::NaiveBayesTrainer;
//!
//! let config = ClassifierConfig::new(["pos", "neg"]).with_alpha(1.0);
//! let mut trainer = NaiveBayesTrainer::new(config).unwrap();
//! trainer.record_document("pos", "good movie good").unwrap();
//! trainer.record_document("neg", "bad movie bad").unwrap();
//!
//! let model = trainer.finish().unwrap();
//! let prediction = model.predict("good good").unwrap();
//! assert_eq!(prediction.label, "pos");
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info};
use rayon::ThreadPool;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, BagOfWordsAnalyzer};
use crate::classification::config::ClassifierConfig;
use crate::classification::counts::CountsStore;
use crate::classification::document::{Document, DocumentGroups};
use crate::classification::estimator::ProbabilityTable;
use crate::error::{PolarityError, Result};

/// Score of one class for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    /// Class label.
    pub class: String,
    /// `ln prior(c) + Σ ln P(w | c)` over in-vocabulary tokens.
    pub score: f64,
}

/// Per-class scores of a document, in configured class order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScores(Vec<ClassScore>);

impl ClassScores {
    /// Score of `class`, if it is a configured class.
    pub fn get(&self, class: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|entry| entry.class == class)
            .map(|entry| entry.score)
    }

    /// Iterate over the scores in class order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClassScore> {
        self.0.iter()
    }

    /// Number of scored classes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no class was scored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Snapshot of the scores, class → score.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.0
            .iter()
            .map(|entry| (entry.class.clone(), entry.score))
            .collect()
    }
}

/// The decision for one document together with the full score vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class label.
    pub label: String,
    /// Scores of every class.
    pub scores: ClassScores,
}

/// Accumulates training documents for a Naive Bayes model.
pub struct NaiveBayesTrainer {
    config: ClassifierConfig,
    analyzer: Arc<dyn Analyzer>,
    counts: CountsStore,
    pool: Option<Arc<ThreadPool>>,
}

impl NaiveBayesTrainer {
    /// Create a trainer using the bag-of-words analyzer.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        Self::with_analyzer(config, Arc::new(BagOfWordsAnalyzer::new()))
    }

    /// Create a trainer with a custom analyzer.
    ///
    /// The same analyzer is handed to the resulting model, so training and
    /// prediction always tokenize identically.
    pub fn with_analyzer(config: ClassifierConfig, analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        config.validate()?;

        let counts = CountsStore::new(&config.classes)?;
        let pool = if config.parallel {
            let threads = config.effective_threads();
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| PolarityError::other(format!("Failed to build thread pool: {e}")))?;
            debug!("Using a thread pool of {threads} threads");
            Some(Arc::new(pool))
        } else {
            None
        };

        Ok(NaiveBayesTrainer {
            config,
            analyzer,
            counts,
            pool,
        })
    }

    /// Train on `groups` (class label → documents) and return the model.
    pub fn train(config: ClassifierConfig, groups: &DocumentGroups) -> Result<NaiveBayesModel> {
        let mut trainer = Self::new(config)?;
        trainer.record_groups(groups)?;
        trainer.finish()
    }

    /// Record one training document.
    pub fn record_document(&mut self, class: &str, text: &str) -> Result<()> {
        let terms = self.analyzer.terms(text)?;
        self.counts.record(class, terms)
    }

    /// Record one already tokenized training document.
    pub fn record_tokens<I, S>(&mut self, class: &str, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.counts.record(class, tokens)
    }

    /// Record every document of every group; the group key is the class.
    ///
    /// With parallel processing enabled each worker fills a partial table
    /// and the partials are merged before anything is added to the trainer,
    /// so a failure leaves the recorded counts untouched.
    pub fn record_groups(&mut self, groups: &DocumentGroups) -> Result<()> {
        for key in groups.keys() {
            if self.counts.class_index(key).is_none() {
                return Err(PolarityError::unknown_class(key));
            }
        }

        info!(
            "Recording {} training documents in {} groups",
            groups.total_documents(),
            groups.len()
        );

        match self.pool.clone() {
            Some(pool) => {
                let documents: Vec<(&str, &Document)> = groups.documents().collect();
                let analyzer = &self.analyzer;
                let empty = self.counts.empty_like();

                let partial = pool.install(|| {
                    documents
                        .par_iter()
                        .try_fold(
                            || empty.empty_like(),
                            |mut store, (class, document)| {
                                store.record(class, analyzer.terms(&document.text)?)?;
                                Ok::<_, PolarityError>(store)
                            },
                        )
                        .try_reduce(
                            || empty.empty_like(),
                            |mut left, right| {
                                left.merge(right)?;
                                Ok(left)
                            },
                        )
                })?;

                self.counts.merge(partial)
            }
            None => {
                for (class, document) in groups.documents() {
                    self.record_document(class, &document.text)?;
                }
                Ok(())
            }
        }
    }

    /// Counts recorded so far.
    pub fn counts(&self) -> &CountsStore {
        &self.counts
    }

    /// Finish training: estimate probabilities and freeze the model.
    pub fn finish(self) -> Result<NaiveBayesModel> {
        let table = ProbabilityTable::estimate(self.counts, self.config.alpha)?;

        Ok(NaiveBayesModel {
            config: self.config,
            analyzer: self.analyzer,
            table,
            pool: self.pool,
        })
    }
}

impl std::fmt::Debug for NaiveBayesTrainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaiveBayesTrainer")
            .field("config", &self.config)
            .field("analyzer", &self.analyzer.name())
            .field("documents", &self.counts.total_documents())
            .field("vocabulary_size", &self.counts.vocabulary_size())
            .finish()
    }
}

/// A trained, immutable Naive Bayes model.
///
/// All queries take `&self`; the model can be shared across threads.
pub struct NaiveBayesModel {
    config: ClassifierConfig,
    analyzer: Arc<dyn Analyzer>,
    table: ProbabilityTable,
    pool: Option<Arc<ThreadPool>>,
}

impl NaiveBayesModel {
    /// Configured classes in order.
    pub fn classes(&self) -> &[String] {
        self.table.classes()
    }

    /// The configuration the model was trained with.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// The frozen probability table.
    pub fn table(&self) -> &ProbabilityTable {
        &self.table
    }

    /// Classify a raw document.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let terms = self.analyzer.terms(text)?;
        Ok(self.predict_tokens(&terms))
    }

    /// Classify an already tokenized document.
    ///
    /// Each class scores `ln prior(c) + Σ ln P(w | c)` over the tokens that
    /// are in the vocabulary. Tokens never seen in training are skipped:
    /// they add nothing to any class, they are not smoothed. The highest
    /// score wins; on a tie the class listed first wins.
    pub fn predict_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Prediction {
        let mut scores = self.table.log_priors().to_vec();

        for token in tokens {
            if let Some(word_idx) = self.table.word_index(token.as_ref()) {
                for (class_idx, score) in scores.iter_mut().enumerate() {
                    *score += self.table.log_probability_at(class_idx, word_idx);
                }
            }
        }

        let mut best = 0;
        for (idx, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = idx;
            }
        }

        let classes = self.table.classes();
        Prediction {
            label: classes[best].clone(),
            scores: ClassScores(
                classes
                    .iter()
                    .cloned()
                    .zip(scores)
                    .map(|(class, score)| ClassScore { class, score })
                    .collect(),
            ),
        }
    }

    /// Classify many documents, preserving their order.
    pub fn predict_documents(&self, documents: &[&Document]) -> Result<Vec<Prediction>> {
        match &self.pool {
            Some(pool) => pool.install(|| {
                documents
                    .par_iter()
                    .map(|document| self.predict(&document.text))
                    .collect()
            }),
            None => documents
                .iter()
                .map(|document| self.predict(&document.text))
                .collect(),
        }
    }

    /// Snapshot of the class priors for export.
    pub fn priors(&self) -> BTreeMap<String, f64> {
        self.table.priors_snapshot()
    }

    /// Snapshot of the linear word probabilities for export.
    pub fn probabilities(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.table.probabilities_snapshot()
    }

    /// Snapshot of the log word probabilities for export.
    pub fn log_probabilities(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.table.log_probabilities_snapshot()
    }
}

impl std::fmt::Debug for NaiveBayesModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaiveBayesModel")
            .field("classes", &self.table.classes())
            .field("alpha", &self.table.alpha())
            .field("analyzer", &self.analyzer.name())
            .field("vocabulary_size", &self.table.vocabulary_size())
            .field("parallel", &self.pool.is_some())
            .finish()
    }
}
