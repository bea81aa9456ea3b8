//! Statistical language models.

pub mod bigram;

pub use bigram::BigramModel;
