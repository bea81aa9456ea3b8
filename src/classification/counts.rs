//! Vocabulary and per-class frequency tables.
//!
//! [`CountsStore`] is the mutable half of the classifier: it only grows
//! while training documents are recorded and is consumed by the probability
//! estimator once every document has been seen.

use ahash::{AHashMap, AHashSet};

use crate::classification::config::validate_classes;
use crate::error::{PolarityError, Result};

/// Per-class word counts, per-class document counts and the global vocabulary.
#[derive(Debug, Clone)]
pub struct CountsStore {
    classes: Vec<String>,
    class_index: AHashMap<String, usize>,
    vocabulary: AHashSet<String>,
    word_counts: Vec<AHashMap<String, u64>>,
    doc_counts: Vec<u64>,
}

impl CountsStore {
    /// Create an empty store for the given class list.
    pub fn new(classes: &[String]) -> Result<Self> {
        validate_classes(classes)?;

        let class_index = classes
            .iter()
            .enumerate()
            .map(|(idx, class)| (class.clone(), idx))
            .collect();

        Ok(CountsStore {
            classes: classes.to_vec(),
            class_index,
            vocabulary: AHashSet::new(),
            word_counts: vec![AHashMap::new(); classes.len()],
            doc_counts: vec![0; classes.len()],
        })
    }

    /// An empty store with the same class list, used as a partial table by
    /// parallel workers.
    pub fn empty_like(&self) -> Self {
        CountsStore {
            classes: self.classes.clone(),
            class_index: self.class_index.clone(),
            vocabulary: AHashSet::new(),
            word_counts: vec![AHashMap::new(); self.classes.len()],
            doc_counts: vec![0; self.classes.len()],
        }
    }

    /// Record one training document of `class`.
    ///
    /// Increments the class document count once and every token's count
    /// once per occurrence; every token joins the vocabulary.
    pub fn record<I, S>(&mut self, class: &str, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let idx = self.require_class(class)?;

        self.doc_counts[idx] += 1;
        let counts = &mut self.word_counts[idx];
        for token in tokens {
            let token = token.into();
            if !self.vocabulary.contains(&token) {
                self.vocabulary.insert(token.clone());
            }
            *counts.entry(token).or_insert(0) += 1;
        }

        Ok(())
    }

    /// Merge another store built for the same class list into this one.
    pub fn merge(&mut self, other: CountsStore) -> Result<()> {
        if self.classes != other.classes {
            return Err(PolarityError::invalid_config(format!(
                "cannot merge counts for classes {:?} into {:?}",
                other.classes, self.classes
            )));
        }

        self.vocabulary.extend(other.vocabulary);
        for (idx, counts) in other.word_counts.into_iter().enumerate() {
            self.doc_counts[idx] += other.doc_counts[idx];
            let target = &mut self.word_counts[idx];
            for (word, count) in counts {
                *target.entry(word).or_insert(0) += count;
            }
        }

        Ok(())
    }

    /// Configured classes in order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Position of `class` in the class list.
    pub fn class_index(&self, class: &str) -> Option<usize> {
        self.class_index.get(class).copied()
    }

    /// Every token recorded for any class.
    pub fn vocabulary(&self) -> &AHashSet<String> {
        &self.vocabulary
    }

    /// Number of distinct tokens recorded.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Occurrences of `word` in documents of `class` (0 if never seen there).
    pub fn count(&self, class: &str, word: &str) -> Result<u64> {
        let idx = self.require_class(class)?;
        Ok(self.word_counts[idx].get(word).copied().unwrap_or(0))
    }

    /// Number of documents recorded for `class`.
    pub fn doc_count(&self, class: &str) -> Result<u64> {
        let idx = self.require_class(class)?;
        Ok(self.doc_counts[idx])
    }

    /// Number of documents recorded over all classes.
    pub fn total_documents(&self) -> u64 {
        self.doc_counts.iter().sum()
    }

    /// Sum of all word counts of `class`.
    pub fn total_words(&self, class: &str) -> Result<u64> {
        let idx = self.require_class(class)?;
        Ok(self.word_counts[idx].values().sum())
    }

    pub(crate) fn word_counts_at(&self, idx: usize) -> &AHashMap<String, u64> {
        &self.word_counts[idx]
    }

    pub(crate) fn doc_count_at(&self, idx: usize) -> u64 {
        self.doc_counts[idx]
    }

    fn require_class(&self, class: &str) -> Result<usize> {
        self.class_index(class)
            .ok_or_else(|| PolarityError::unknown_class(class))
    }
}
