//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step in the analysis pipeline: they split raw
//! document text into tokens that the token filters then normalize.
//!
//! # Examples
//!
//! ```
//! use polarity::analysis::tokenizer::Tokenizer;
//! use polarity::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a single analyzer can be shared by
/// parallel training and prediction workers.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod whitespace;
