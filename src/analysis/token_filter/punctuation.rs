//! Punctuation filter implementation.
//!
//! Removes tokens that consist entirely of punctuation characters. Tokens
//! that merely contain punctuation are kept as they are, so `"word."` and
//! `"word"` stay distinct.
//!
//! # Examples
//!
//! ```
//! use polarity::analysis::token_filter::Filter;
//! use polarity::analysis::token_filter::punctuation::PunctuationFilter;
//! use polarity::analysis::token::Token;
//!
//! let filter = PunctuationFilter::new();
//! let tokens = vec![
//!     Token::new("great", 0),
//!     Token::new("--", 1),
//!     Token::new("film.", 2),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "great");
//! assert_eq!(result[1].text, "film.");
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// The ASCII punctuation characters.
pub const ASCII_PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

static ASCII_PUNCTUATION_SET: LazyLock<HashSet<char>> =
    LazyLock::new(|| ASCII_PUNCTUATION.chars().collect());

/// A filter that removes punctuation-only tokens.
///
/// Empty tokens and tokens already marked as stopped are removed as well,
/// so the stream leaving this filter contains only scorable tokens.
#[derive(Clone, Debug)]
pub struct PunctuationFilter {
    punctuation: HashSet<char>,
}

impl PunctuationFilter {
    /// Create a new filter using [`ASCII_PUNCTUATION`].
    pub fn new() -> Self {
        PunctuationFilter {
            punctuation: ASCII_PUNCTUATION_SET.clone(),
        }
    }

    /// Create a filter with a custom punctuation character set.
    pub fn with_punctuation<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        PunctuationFilter {
            punctuation: chars.into_iter().collect(),
        }
    }

    /// Check whether every character of `text` is punctuation.
    ///
    /// The empty string is not considered punctuation.
    pub fn is_punctuation(&self, text: &str) -> bool {
        !text.is_empty() && text.chars().all(|c| self.punctuation.contains(&c))
    }
}

impl Default for PunctuationFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for PunctuationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| {
                !token.is_stopped() && !token.is_empty() && !self.is_punctuation(&token.text)
            })
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}
