//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PolarityArgs};
use crate::error::Result;

/// Results that know how to print themselves for a terminal.
pub trait HumanOutput {
    /// Lines printed in human mode, without the leading message.
    fn human_lines(&self) -> Vec<String>;
}

/// Per-class accuracy line of a classification run.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassAccuracyResult {
    pub class: String,
    pub correct: usize,
    pub total: usize,
    pub accuracy: f64,
}

/// Result structure for a classification run.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// `evaluation` or `prediction`.
    pub mode: String,
    pub started_at: DateTime<Local>,
    pub duration_ms: u64,
    pub classes: Vec<String>,
    pub alpha: f64,
    pub training_documents: usize,
    pub test_documents: usize,
    pub vocabulary_size: usize,
    /// Evaluation only.
    pub class_accuracies: Vec<ClassAccuracyResult>,
    /// Evaluation only.
    pub overall_accuracy: Option<f64>,
    /// Prediction only: documents per predicted label.
    pub label_counts: BTreeMap<String, usize>,
    /// The accuracy report as written to `results.txt`.
    pub summary: Vec<String>,
    pub output_dir: String,
    pub copied_files: usize,
}

impl HumanOutput for ClassificationResult {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = self.summary.clone();
        for (label, count) in &self.label_counts {
            lines.push(format!("{label}: {count} documents"));
        }
        lines.push(format!(
            "Trained on {} documents ({} words), tested {} documents in {} ms",
            self.training_documents, self.vocabulary_size, self.test_documents, self.duration_ms
        ));
        lines.push(format!(
            "Results written to {} ({} files copied)",
            self.output_dir, self.copied_files
        ));
        lines
    }
}

/// Result structure for sentence splitting.
#[derive(Debug, Serialize, Deserialize)]
pub struct SentenceSplitResult {
    pub input: String,
    pub output: String,
    pub sentences: usize,
    pub finished_at: DateTime<Local>,
}

impl HumanOutput for SentenceSplitResult {
    fn human_lines(&self) -> Vec<String> {
        vec![format!(
            "Wrote {} sentences from {} to {}",
            self.sentences, self.input, self.output
        )]
    }
}

/// Probability of one test sentence under a bigram model.
#[derive(Debug, Serialize, Deserialize)]
pub struct SentenceProbability {
    pub sentence: String,
    pub probability: f64,
    pub log_probability: f64,
}

/// Result structure for bigram scoring.
#[derive(Debug, Serialize, Deserialize)]
pub struct BigramResult {
    pub train_file: String,
    pub vocabulary_size: usize,
    pub sentences: Vec<SentenceProbability>,
}

impl HumanOutput for BigramResult {
    fn human_lines(&self) -> Vec<String> {
        self.sentences
            .iter()
            .map(|s| format!("The probability for {} is {}", s.sentence, s.probability))
            .collect()
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &PolarityArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &PolarityArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    for line in result.human_lines() {
        println!("{line}");
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PolarityArgs) -> Result<()> {
    println!("{}", format_json(result, args.pretty)?);
    Ok(())
}

fn format_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
