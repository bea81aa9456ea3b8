//! Command line argument parsing for the Polarity CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Polarity - Naive Bayes text classification and small language tools
#[derive(Parser, Debug, Clone)]
#[command(name = "polarity")]
#[command(about = "Naive Bayes sentiment classification, sentence splitting and bigram scoring")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Polarity Contributors")]
#[command(long_about = None)]
pub struct PolarityArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(long, value_name = "FILE", env = "POLARITY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PolarityArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train on a labeled corpus, then evaluate its test split or classify a directory
    Classify(ClassifyArgs),

    /// Split a text file into one sentence per line
    #[command(name = "split-sentences")]
    SplitSentences(SplitSentencesArgs),

    /// Score test sentences with a bigram model trained on a corpus file
    Bigram(BigramArgs),
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Corpus root with one directory per class (overrides the config file)
    #[arg(value_name = "CORPUS_DIR")]
    pub corpus_dir: Option<PathBuf>,

    /// Comma separated class labels
    #[arg(long, value_delimiter = ',')]
    pub classes: Option<Vec<String>>,

    /// Smoothing parameter
    #[arg(short, long)]
    pub alpha: Option<f64>,

    /// Files numbered below this index are used for training
    #[arg(long)]
    pub split_index: Option<u64>,

    /// Directory that receives the results
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Classify the files of this directory instead of evaluating the test split
    #[arg(long, value_name = "DIR")]
    pub predict: Option<PathBuf>,

    /// Train and predict on a thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Number of threads for --parallel (default: number of CPUs)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Don't copy documents into the result folders
    #[arg(long)]
    pub no_copy: bool,
}

/// Arguments for sentence splitting
#[derive(Parser, Debug, Clone)]
pub struct SplitSentencesArgs {
    /// Input text file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (default: <input stem>_split.txt next to the input)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl SplitSentencesArgs {
    /// The output path, derived from the input when not given.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let stem = self
                    .input
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                self.input.with_file_name(format!("{stem}_split.txt"))
            }
        }
    }
}

/// Arguments for bigram scoring
#[derive(Parser, Debug, Clone)]
pub struct BigramArgs {
    /// Training corpus, one sentence per line
    #[arg(value_name = "TRAIN_FILE")]
    pub train_file: PathBuf,

    /// Sentences to score, one per line
    #[arg(value_name = "TEST_FILE")]
    pub test_file: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
