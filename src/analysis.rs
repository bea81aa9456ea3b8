//! Text analysis for Polarity.
//!
//! Tokenization, token filtering, and analysis pipelines that turn raw
//! document text into the terms the classifier counts and scores, plus a
//! rule-based sentence splitter.

pub mod analyzer;
pub mod sentence;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
