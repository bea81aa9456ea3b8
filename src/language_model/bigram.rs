//! Maximum likelihood bigram model.
//!
//! Training counts whitespace-separated words and adjacent word pairs line by
//! line; pairs never cross a line boundary. The probability of a sentence
//! `w1 … wn` is the product of `count(wi wi+1) / count(wi)` over its
//! adjacent pairs, with no smoothing: any unseen pair makes it zero.

use ahash::AHashMap;
use log::debug;

/// Unigram and bigram counts over a training corpus.
#[derive(Debug, Clone, Default)]
pub struct BigramModel {
    unigrams: AHashMap<String, u64>,
    bigrams: AHashMap<String, AHashMap<String, u64>>,
}

impl BigramModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from the lines of `corpus`.
    pub fn from_corpus(corpus: &str) -> Self {
        let mut model = Self::new();
        model.train(corpus.lines());
        model
    }

    /// Add the counts of every sentence.
    pub fn train<I, S>(&mut self, sentences: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = 0usize;
        for sentence in sentences {
            let words: Vec<&str> = sentence.as_ref().split_whitespace().collect();
            for word in &words {
                *self.unigrams.entry((*word).to_string()).or_insert(0) += 1;
            }
            for pair in words.windows(2) {
                *self
                    .bigrams
                    .entry(pair[0].to_string())
                    .or_default()
                    .entry(pair[1].to_string())
                    .or_insert(0) += 1;
            }
            lines += 1;
        }
        debug!(
            "Trained bigram model on {lines} sentences, {} distinct words",
            self.unigrams.len()
        );
    }

    /// Occurrences of `word`.
    pub fn unigram_count(&self, word: &str) -> u64 {
        self.unigrams.get(word).copied().unwrap_or(0)
    }

    /// Occurrences of `first` immediately followed by `second`.
    pub fn bigram_count(&self, first: &str, second: &str) -> u64 {
        self.bigrams
            .get(first)
            .and_then(|following| following.get(second))
            .copied()
            .unwrap_or(0)
    }

    /// `P(second | first)`, zero when `first` was never seen.
    pub fn conditional_probability(&self, first: &str, second: &str) -> f64 {
        match self.unigram_count(first) {
            0 => 0.0,
            count => self.bigram_count(first, second) as f64 / count as f64,
        }
    }

    /// Probability of a whitespace-separated sentence.
    ///
    /// Sentences with fewer than two words have probability 1.
    pub fn sentence_probability(&self, sentence: &str) -> f64 {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        words
            .windows(2)
            .map(|pair| self.conditional_probability(pair[0], pair[1]))
            .product()
    }

    /// Natural log of [`sentence_probability`](Self::sentence_probability);
    /// negative infinity for an impossible sentence.
    pub fn sentence_log_probability(&self, sentence: &str) -> f64 {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        words
            .windows(2)
            .map(|pair| self.conditional_probability(pair[0], pair[1]).ln())
            .sum()
    }

    /// Number of distinct words.
    pub fn vocabulary_size(&self) -> usize {
        self.unigrams.len()
    }
}
