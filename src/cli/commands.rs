//! Command implementations for the Polarity CLI.

use std::fs;
use std::time::Instant;

use anyhow::Context;
use chrono::Local;
use log::{debug, info};

use crate::analysis::sentence::SentenceSplitter;
use crate::classification::evaluator::{Evaluator, TestOutcome};
use crate::classification::model::NaiveBayesTrainer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::PolarityConfig;
use crate::corpus::loader::CorpusLoader;
use crate::corpus::results::ResultWriter;
use crate::error::{PolarityError, Result};
use crate::language_model::bigram::BigramModel;

/// Execute a CLI command.
pub fn execute_command(args: PolarityArgs) -> Result<()> {
    match &args.command {
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::SplitSentences(split_args) => split_sentences(split_args.clone(), &args),
        Command::Bigram(bigram_args) => score_bigrams(bigram_args.clone(), &args),
    }
}

/// Merge the config file (if any) with command line overrides.
pub fn resolve_config(args: &ClassifyArgs, cli_args: &PolarityArgs) -> Result<PolarityConfig> {
    let mut config = match &cli_args.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            PolarityConfig::load(path)?
        }
        None => PolarityConfig::default(),
    };

    if let Some(root) = &args.corpus_dir {
        config.corpus.root = Some(root.clone());
    }
    if let Some(split_index) = args.split_index {
        config.corpus.split_index = split_index;
    }
    if let Some(classes) = &args.classes {
        config.classifier.classes = classes.iter().map(|c| c.trim().to_string()).collect();
    }
    if let Some(alpha) = args.alpha {
        config.classifier.alpha = alpha;
    }
    if args.parallel {
        config.classifier.parallel = true;
    }
    if let Some(threads) = args.threads {
        config.classifier.threads = Some(threads);
    }

    config.classifier.validate()?;
    Ok(config)
}

/// Train on the training split, then evaluate or predict.
fn classify(args: ClassifyArgs, cli_args: &PolarityArgs) -> Result<()> {
    let started_at = Local::now();
    let start_time = Instant::now();
    let config = resolve_config(&args, cli_args)?;

    let loader = CorpusLoader::from_config(&config.corpus)?;
    let split = loader.load_split(&config.classifier.classes)?;

    let model = NaiveBayesTrainer::train(config.classifier.clone(), &split.train)?;
    info!("Trained model: {model:?}");

    let (groups, sources) = match &args.predict {
        Some(directory) => {
            let loaded = CorpusLoader::load_unlabeled(directory)?;
            (loaded.groups, loaded.sources)
        }
        None => (split.test, split.sources),
    };

    let outcome = Evaluator::new(&model).run(&groups)?;
    let summary = ResultWriter::new(&args.output)
        .with_copy_files(!args.no_copy)
        .with_pretty(cli_args.pretty)
        .write(&model, &outcome, &sources)?;

    let mut result = ClassificationResult {
        mode: String::new(),
        started_at,
        duration_ms: start_time.elapsed().as_millis() as u64,
        classes: model.classes().to_vec(),
        alpha: config.classifier.alpha,
        training_documents: split.train.total_documents(),
        test_documents: groups.total_documents(),
        vocabulary_size: model.table().vocabulary_size(),
        class_accuracies: Vec::new(),
        overall_accuracy: None,
        label_counts: Default::default(),
        summary: Vec::new(),
        output_dir: summary.directory.to_string_lossy().to_string(),
        copied_files: summary.copied_files,
    };

    match &outcome {
        TestOutcome::Evaluation(report) => {
            result.mode = "evaluation".to_string();
            result.class_accuracies = report
                .classes
                .iter()
                .map(|entry| ClassAccuracyResult {
                    class: entry.class.clone(),
                    correct: entry.correct,
                    total: entry.total,
                    accuracy: entry.accuracy,
                })
                .collect();
            result.overall_accuracy = Some(report.overall_accuracy);
            result.summary = report.summary_lines();
        }
        TestOutcome::Prediction(batch) => {
            result.mode = "prediction".to_string();
            result.label_counts = batch.label_counts();
        }
    }

    output_result("Classification finished", &result, cli_args)
}

/// Split a text file into sentences, one per line.
fn split_sentences(args: SplitSentencesArgs, cli_args: &PolarityArgs) -> Result<()> {
    let output = args.output_path();
    if output == args.input {
        return Err(PolarityError::invalid_config(
            "output file must differ from the input file",
        ));
    }

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let splitter = SentenceSplitter::new()?;
    let sentences = splitter.split(&text);
    fs::write(&output, sentences.join("\n"))
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("Split {} into {} sentences", args.input.display(), sentences.len());

    output_result(
        "Sentences split",
        &SentenceSplitResult {
            input: args.input.to_string_lossy().to_string(),
            output: output.to_string_lossy().to_string(),
            sentences: sentences.len(),
            finished_at: Local::now(),
        },
        cli_args,
    )
}

/// Train a bigram model and score every test sentence.
fn score_bigrams(args: BigramArgs, cli_args: &PolarityArgs) -> Result<()> {
    let train = fs::read_to_string(&args.train_file)
        .with_context(|| format!("failed to read {}", args.train_file.display()))?;
    let test = fs::read_to_string(&args.test_file)
        .with_context(|| format!("failed to read {}", args.test_file.display()))?;

    let model = BigramModel::from_corpus(&train);
    let sentences = test
        .lines()
        .map(|sentence| SentenceProbability {
            sentence: sentence.to_string(),
            probability: model.sentence_probability(sentence),
            log_probability: model.sentence_log_probability(sentence),
        })
        .collect();

    output_result(
        "Bigram probabilities",
        &BigramResult {
            train_file: args.train_file.to_string_lossy().to_string(),
            vocabulary_size: model.vocabulary_size(),
            sentences,
        },
        cli_args,
    )
}
