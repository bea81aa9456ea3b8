//! Probability estimation from recorded counts.
//!
//! [`ProbabilityTable::estimate`] turns a finished [`CountsStore`] into
//! class priors and Laplace-smoothed conditional word probabilities:
//!
//! ```text
//! prior(c)  = docs(c) / Σ docs
//! P(w | c)  = (count(c, w) + α) / (total_words(c) + α · |V|)
//! ```
//!
//! Every vocabulary word gets a probability in every class, including words
//! the class never produced. Both the linear and the natural-log form are
//! kept: the linear one for inspection and export, the log one for scoring.

use std::collections::BTreeMap;

use ahash::AHashMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::classification::counts::CountsStore;
use crate::error::{PolarityError, Result};

/// Smoothed probability of a word given a class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordProbability {
    /// `P(w | c)`
    pub probability: f64,
    /// `ln P(w | c)`
    pub log_probability: f64,
}

/// Frozen class priors and conditional word probabilities.
#[derive(Debug, Clone)]
pub struct ProbabilityTable {
    classes: Vec<String>,
    alpha: f64,
    /// Vocabulary in sorted order; positions index the per-class tables.
    vocabulary: Vec<String>,
    word_index: AHashMap<String, usize>,
    doc_counts: Vec<u64>,
    total_words: Vec<u64>,
    priors: Vec<f64>,
    log_priors: Vec<f64>,
    word_probabilities: Vec<Vec<WordProbability>>,
}

impl ProbabilityTable {
    /// Estimate probabilities from the final counts.
    ///
    /// Fails with [`PolarityError::EmptyTrainingData`] when no document was
    /// recorded, and with [`PolarityError::InvalidConfig`] for a non-positive
    /// or non-finite `alpha`.
    pub fn estimate(counts: CountsStore, alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(PolarityError::invalid_config(format!(
                "alpha must be a finite positive number, got {alpha}"
            )));
        }

        let total_documents = counts.total_documents();
        if total_documents == 0 {
            return Err(PolarityError::EmptyTrainingData);
        }

        let mut vocabulary: Vec<String> = counts.vocabulary().iter().cloned().collect();
        vocabulary.sort_unstable();
        let word_index: AHashMap<String, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(idx, word)| (word.clone(), idx))
            .collect();
        let vocabulary_size = vocabulary.len() as f64;

        let classes = counts.classes().to_vec();
        let mut doc_counts = Vec::with_capacity(classes.len());
        let mut total_words = Vec::with_capacity(classes.len());
        let mut priors = Vec::with_capacity(classes.len());
        let mut log_priors = Vec::with_capacity(classes.len());
        let mut word_probabilities = Vec::with_capacity(classes.len());

        for (idx, class) in classes.iter().enumerate() {
            let class_counts = counts.word_counts_at(idx);
            let docs = counts.doc_count_at(idx);
            let words: u64 = class_counts.values().sum();

            if docs == 0 {
                warn!("Class '{class}' has no training documents; its prior is zero");
            }

            let prior = docs as f64 / total_documents as f64;
            let denominator = words as f64 + alpha * vocabulary_size;

            let table = vocabulary
                .iter()
                .map(|word| {
                    let count = class_counts.get(word).copied().unwrap_or(0);
                    let probability = (count as f64 + alpha) / denominator;
                    WordProbability {
                        probability,
                        log_probability: probability.ln(),
                    }
                })
                .collect();

            debug!(
                "Class '{class}': {docs} documents, {words} words, prior {prior:.6}"
            );

            doc_counts.push(docs);
            total_words.push(words);
            priors.push(prior);
            log_priors.push(prior.ln());
            word_probabilities.push(table);
        }

        info!(
            "Estimated probabilities for {} classes over {} words from {} documents",
            classes.len(),
            vocabulary.len(),
            total_documents
        );

        Ok(ProbabilityTable {
            classes,
            alpha,
            vocabulary,
            word_index,
            doc_counts,
            total_words,
            priors,
            log_priors,
            word_probabilities,
        })
    }

    /// Classes in configured order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The smoothing parameter used for estimation.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Vocabulary in sorted order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of distinct vocabulary words.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Whether `word` was seen in any training document.
    pub fn contains(&self, word: &str) -> bool {
        self.word_index.contains_key(word)
    }

    /// Position of `word` in the vocabulary.
    pub fn word_index(&self, word: &str) -> Option<usize> {
        self.word_index.get(word).copied()
    }

    /// Position of `class` in the class list.
    pub fn class_index(&self, class: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == class)
    }

    /// Prior probability of `class`.
    pub fn prior(&self, class: &str) -> Option<f64> {
        self.class_index(class).map(|idx| self.priors[idx])
    }

    /// Training documents recorded for `class`.
    pub fn doc_count(&self, class: &str) -> Option<u64> {
        self.class_index(class).map(|idx| self.doc_counts[idx])
    }

    /// Total word occurrences recorded for `class`.
    pub fn total_words(&self, class: &str) -> Option<u64> {
        self.class_index(class).map(|idx| self.total_words[idx])
    }

    /// Log priors in class order.
    pub fn log_priors(&self) -> &[f64] {
        &self.log_priors
    }

    /// Smoothed probability of `word` in `class`, if both are known.
    pub fn word_probability(&self, class: &str, word: &str) -> Option<WordProbability> {
        let class_idx = self.class_index(class)?;
        let word_idx = self.word_index(word)?;
        Some(self.word_probabilities[class_idx][word_idx])
    }

    /// Log probability by class and vocabulary position.
    pub(crate) fn log_probability_at(&self, class_idx: usize, word_idx: usize) -> f64 {
        self.word_probabilities[class_idx][word_idx].log_probability
    }

    /// Snapshot of the priors, class → prior.
    pub fn priors_snapshot(&self) -> BTreeMap<String, f64> {
        self.classes
            .iter()
            .cloned()
            .zip(self.priors.iter().copied())
            .collect()
    }

    /// Snapshot of the linear word probabilities, class → (word → P(w|c)).
    pub fn probabilities_snapshot(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.snapshot(|p| p.probability)
    }

    /// Snapshot of the log word probabilities, class → (word → ln P(w|c)).
    pub fn log_probabilities_snapshot(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.snapshot(|p| p.log_probability)
    }

    fn snapshot<F>(&self, value: F) -> BTreeMap<String, BTreeMap<String, f64>>
    where
        F: Fn(&WordProbability) -> f64,
    {
        self.classes
            .iter()
            .zip(&self.word_probabilities)
            .map(|(class, table)| {
                let words = self
                    .vocabulary
                    .iter()
                    .cloned()
                    .zip(table.iter().map(&value))
                    .collect();
                (class.clone(), words)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes() -> Vec<String> {
        vec!["pos".to_string(), "neg".to_string()]
    }

    fn movie_counts() -> CountsStore {
        let mut counts = CountsStore::new(&classes()).unwrap();
        counts.record("pos", ["good", "movie", "good"]).unwrap();
        counts.record("neg", ["bad", "movie", "bad"]).unwrap();
        counts
    }

    #[test]
    fn test_movie_scenario() {
        let table = ProbabilityTable::estimate(movie_counts(), 1.0).unwrap();

        assert_eq!(table.vocabulary(), &["bad", "good", "movie"]);
        assert_eq!(table.total_words("pos"), Some(3));
        assert_eq!(table.total_words("neg"), Some(3));

        let good = table.word_probability("pos", "good").unwrap();
        assert!((good.probability - 0.5).abs() < 1e-12);
        assert!((good.log_probability - 0.5f64.ln()).abs() < 1e-12);

        let bad = table.word_probability("pos", "bad").unwrap();
        assert!((bad.probability - 1.0 / 6.0).abs() < 1e-12);

        let movie = table.word_probability("neg", "movie").unwrap();
        assert!((movie.probability - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_priors_sum_to_one() {
        let mut counts = CountsStore::new(&["a".to_string(), "b".to_string(), "c".to_string()]).unwrap();
        counts.record("a", ["x"]).unwrap();
        counts.record("a", ["y"]).unwrap();
        counts.record("b", ["z"]).unwrap();
        counts.record("c", ["x", "z"]).unwrap();

        let table = ProbabilityTable::estimate(counts, 0.5).unwrap();
        let sum: f64 = table.priors_snapshot().values().sum();

        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(table.prior("a"), Some(0.5));
        assert_eq!(table.prior("b"), Some(0.25));
    }

    #[test]
    fn test_probabilities_are_bounded_and_finite() {
        for alpha in [1e-6, 0.1, 0.9, 1.0, 10.0] {
            let table = ProbabilityTable::estimate(movie_counts(), alpha).unwrap();
            for class in table.classes() {
                for word in table.vocabulary() {
                    let p = table.word_probability(class, word).unwrap();
                    assert!(p.probability > 0.0 && p.probability < 1.0);
                    assert!(p.log_probability.is_finite());
                    assert!(p.log_probability <= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_each_class_distribution_sums_to_one() {
        let table = ProbabilityTable::estimate(movie_counts(), 0.9).unwrap();
        for (_, words) in table.probabilities_snapshot() {
            let sum: f64 = words.values().sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_training_data() {
        let counts = CountsStore::new(&classes()).unwrap();
        assert!(matches!(
            ProbabilityTable::estimate(counts, 1.0),
            Err(PolarityError::EmptyTrainingData)
        ));
    }

    #[test]
    fn test_invalid_alpha() {
        assert!(matches!(
            ProbabilityTable::estimate(movie_counts(), 0.0),
            Err(PolarityError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_class_without_documents() {
        let mut counts = CountsStore::new(&classes()).unwrap();
        counts.record("pos", ["good"]).unwrap();

        let table = ProbabilityTable::estimate(counts, 1.0).unwrap();

        assert_eq!(table.prior("neg"), Some(0.0));
        assert_eq!(table.log_priors()[1], f64::NEG_INFINITY);
        // Unseen in "neg": alpha / (0 + alpha * |V|)
        let p = table.word_probability("neg", "good").unwrap();
        assert_eq!(p.probability, 1.0);
    }

    #[test]
    fn test_snapshots() {
        let table = ProbabilityTable::estimate(movie_counts(), 1.0).unwrap();

        let linear = table.probabilities_snapshot();
        let log = table.log_probabilities_snapshot();

        assert_eq!(linear.keys().collect::<Vec<_>>(), vec!["neg", "pos"]);
        assert_eq!(linear["pos"].len(), 3);
        assert!((log["pos"]["good"] - linear["pos"]["good"].ln()).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_lookups() {
        let table = ProbabilityTable::estimate(movie_counts(), 1.0).unwrap();
        assert!(table.word_probability("neutral", "good").is_none());
        assert!(table.word_probability("pos", "great").is_none());
        assert!(!table.contains("great"));
    }
}
