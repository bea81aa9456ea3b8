//! Rule-based sentence boundary detection.
//!
//! [`SentenceSplitter`] protects periods, question marks and exclamation
//! marks that do not end a sentence (titles, company suffixes, web
//! addresses, acronyms, punctuation inside closing quotes), splits after
//! every remaining terminator, and then restores the protected characters.
//!
//! Known limitation: a sentence that really does end with a protected form
//! (`... to the U.S. He flew ...`) is not split.
//!
//! # Examples
//!
//! ```
//! use polarity::analysis::sentence::SentenceSplitter;
//!
//! let splitter = SentenceSplitter::new().unwrap();
//! let sentences = splitter.split("Dr. Watson arrived. He was late!");
//! assert_eq!(sentences, vec!["Dr. Watson arrived.", "He was late!"]);
//! ```

use regex::Regex;

use crate::error::{PolarityError, Result};

const PERIOD_MARK: &str = "<False>";
const QUESTION_MARK: &str = "<False_q>";
const EXCLAMATION_MARK: &str = "<False_e>";
const SPLIT_MARK: &str = "<Split>";

/// Protection rules applied in order: pattern and replacement.
const PROTECTION_RULES: &[(&str, &str)] = &[
    // Titles and prefixes
    (
        r"(Mr|St|Mrs|Ms|Dr|Prof|Capt|Cpt|Lt|Mt|www)[.]",
        "${1}<False>",
    ),
    // Company and name suffixes
    (r"(Inc|Ltd|Jr|Sr|Co)[.]", "${1}<False>"),
    // Web suffixes
    (r"[.](ie|com|net|org|io|gov|me|edu)", "<False>${1}"),
    (r"\.co\.uk", "<False>co<False>uk"),
    // Periods between word characters and two or three letter acronyms
    (r"(\w)\.(\w)", "${1}<False>${2}"),
    (
        r"(\w)[.](\w)[.](\w)[.]?",
        "${1}<False>${2}<False>${3}<False>",
    ),
    (r"(\w)[.](\w)[.]?", "${1}<False>${2}<False>"),
    // Terminators directly followed by a closing quote
    (r#"\.(["|'])"#, "<False>${1}"),
    (r#"\?(["|'])"#, "<False_q>${1}"),
    (r#"!(["|'])"#, "<False_e>${1}"),
];

/// Splits running text into sentences.
#[derive(Clone, Debug)]
pub struct SentenceSplitter {
    rules: Vec<(Regex, &'static str)>,
}

impl SentenceSplitter {
    /// Create a splitter with the built-in protection rules.
    pub fn new() -> Result<Self> {
        let rules = PROTECTION_RULES
            .iter()
            .map(|(pattern, replacement)| {
                Regex::new(pattern)
                    .map(|regex| (regex, *replacement))
                    .map_err(|e| PolarityError::analysis(format!("Invalid regex pattern: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SentenceSplitter { rules })
    }

    /// Split `text` into trimmed sentences.
    ///
    /// Line breaks are treated as spaces. Trailing text that is not closed
    /// by a terminator is dropped.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut text = text.replace('\n', " ");

        for (regex, replacement) in &self.rules {
            text = regex.replace_all(&text, *replacement).into_owned();
        }

        let text = text
            .replace('.', ".<Split>")
            .replace('?', "?<Split>")
            .replace('!', "!<Split>")
            .replace(PERIOD_MARK, ".")
            .replace(QUESTION_MARK, "?")
            .replace(EXCLAMATION_MARK, "!");

        let mut pieces: Vec<&str> = text.split(SPLIT_MARK).collect();
        pieces.pop();

        pieces
            .into_iter()
            .map(|sentence| sentence.trim().to_string())
            .collect()
    }

    /// Split `text` and join the sentences with newlines, one per line.
    pub fn split_to_lines(&self, text: &str) -> String {
        self.split(text).join("\n")
    }
}
