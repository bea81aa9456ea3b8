//! Writing classification results to disk.
//!
//! Evaluation output goes to `<out>/results/`, prediction output to
//! `<out>/prediction/`:
//!
//! ```text
//! results/
//!   correct/<class>/<file>
//!   incorrect/<class>/<file>
//!   results.txt
//!   class_probabilities.json
//!   probabilities.json
//!   log_probabilities.json
//!   scores.json
//! prediction/
//!   <predicted class>/<file>
//!   ...same JSON files...
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, info};
use serde::Serialize;

use crate::classification::evaluator::{DocumentOutcome, TestOutcome};
use crate::classification::model::NaiveBayesModel;
use crate::corpus::loader::SourceDirectories;
use crate::error::{PolarityError, Result};

pub const RESULTS_DIR: &str = "results";
pub const PREDICTION_DIR: &str = "prediction";
pub const REPORT_FILE: &str = "results.txt";

/// What a [`ResultWriter`] produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    /// `results/` or `prediction/` under the output directory.
    pub directory: PathBuf,
    /// Number of source files copied.
    pub copied_files: usize,
    /// Path of `results.txt` in evaluation mode.
    pub report: Option<PathBuf>,
}

#[derive(Serialize)]
struct ScoreRecord<'a> {
    group: &'a str,
    document: &'a str,
    label: &'a str,
    correct: Option<bool>,
    scores: BTreeMap<String, f64>,
}

/// Writes outcomes and model parameters under an output directory.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    output_dir: PathBuf,
    copy_files: bool,
    pretty: bool,
}

impl ResultWriter {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        ResultWriter {
            output_dir: output_dir.into(),
            copy_files: true,
            pretty: false,
        }
    }

    /// Whether source documents are copied into the class folders.
    pub fn with_copy_files(mut self, copy_files: bool) -> Self {
        self.copy_files = copy_files;
        self
    }

    /// Pretty-print the JSON exports.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write everything for one run.
    pub fn write(
        &self,
        model: &NaiveBayesModel,
        outcome: &TestOutcome,
        sources: &SourceDirectories,
    ) -> Result<ResultSummary> {
        let directory = match outcome {
            TestOutcome::Evaluation(_) => self.output_dir.join(RESULTS_DIR),
            TestOutcome::Prediction(_) => self.output_dir.join(PREDICTION_DIR),
        };
        fs::create_dir_all(&directory)
            .with_context(|| format!("failed to create {}", directory.display()))?;

        let copied_files = if self.copy_files {
            self.copy_documents(&directory, outcome, sources)?
        } else {
            0
        };

        let report = match outcome {
            TestOutcome::Evaluation(report) => {
                let path = directory.join(REPORT_FILE);
                let mut file = BufWriter::new(File::create(&path)?);
                for line in report.summary_lines() {
                    writeln!(file, "{line}")?;
                }
                file.flush()?;
                Some(path)
            }
            TestOutcome::Prediction(_) => None,
        };

        self.write_json(&directory.join("class_probabilities.json"), &model.priors())?;
        self.write_json(&directory.join("probabilities.json"), &model.probabilities())?;
        self.write_json(
            &directory.join("log_probabilities.json"),
            &model.log_probabilities(),
        )?;

        let scores: Vec<ScoreRecord<'_>> = outcome
            .outcomes()
            .iter()
            .map(|o| ScoreRecord {
                group: &o.group,
                document: &o.document_id,
                label: &o.prediction.label,
                correct: o.correct,
                scores: o.prediction.scores.to_map(),
            })
            .collect();
        self.write_json(&directory.join("scores.json"), &scores)?;

        info!(
            "Wrote results to {} ({copied_files} files copied)",
            directory.display()
        );

        Ok(ResultSummary {
            directory,
            copied_files,
            report,
        })
    }

    fn copy_documents(
        &self,
        directory: &Path,
        outcome: &TestOutcome,
        sources: &SourceDirectories,
    ) -> Result<usize> {
        let mut copied = 0;
        for document in outcome.outcomes() {
            let source = sources
                .path_of(&document.group, &document.document_id)
                .ok_or_else(|| {
                    PolarityError::corpus(format!(
                        "no source directory for group '{}'",
                        document.group
                    ))
                })?;
            let target_dir = directory.join(target_folder(document));
            fs::create_dir_all(&target_dir)?;

            let target = target_dir.join(&document.document_id);
            fs::copy(&source, &target).with_context(|| {
                format!("failed to copy {} to {}", source.display(), target.display())
            })?;
            debug!("Copied {} to {}", source.display(), target.display());
            copied += 1;
        }
        Ok(copied)
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Folder of a document relative to the mode directory.
fn target_folder(outcome: &DocumentOutcome) -> PathBuf {
    match outcome.correct {
        Some(true) => Path::new("correct").join(&outcome.group),
        Some(false) => Path::new("incorrect").join(&outcome.group),
        None => PathBuf::from(&outcome.prediction.label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::config::ClassifierConfig;
    use crate::classification::document::{Document, DocumentGroups};
    use crate::classification::evaluator::Evaluator;
    use crate::classification::model::NaiveBayesTrainer;
    use tempfile::TempDir;

    fn model() -> NaiveBayesModel {
        let groups = DocumentGroups::new()
            .with_group("pos", vec![Document::new("p", "good movie good")])
            .with_group("neg", vec![Document::new("n", "bad movie bad")]);
        NaiveBayesTrainer::train(ClassifierConfig::new(["pos", "neg"]), &groups).unwrap()
    }

    fn source_dir(temp: &TempDir, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = temp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        for (file, text) in files {
            fs::write(dir.join(file), text).unwrap();
        }
        dir
    }

    #[test]
    fn test_write_evaluation() {
        let temp = TempDir::new().unwrap();
        let mut sources = SourceDirectories::new();
        let pos = source_dir(&temp, "pos", &[("1.txt", "good"), ("2.txt", "bad")]);
        let neg = source_dir(&temp, "neg", &[("3.txt", "bad"), ("4.txt", "good")]);
        sources.insert("pos", pos);
        sources.insert("neg", neg);

        let groups = DocumentGroups::new()
            .with_group(
                "pos",
                vec![Document::new("1.txt", "good"), Document::new("2.txt", "bad")],
            )
            .with_group(
                "neg",
                vec![Document::new("3.txt", "bad"), Document::new("4.txt", "good")],
            );

        let model = model();
        let outcome = Evaluator::new(&model).run(&groups).unwrap();
        let out = temp.path().join("out");
        let summary = ResultWriter::new(&out)
            .write(&model, &outcome, &sources)
            .unwrap();

        let results = out.join(RESULTS_DIR);
        assert_eq!(summary.directory, results);
        assert_eq!(summary.copied_files, 4);
        assert!(results.join("correct/pos/1.txt").is_file());
        assert!(results.join("incorrect/pos/2.txt").is_file());
        assert!(results.join("correct/neg/3.txt").is_file());
        assert!(results.join("incorrect/neg/4.txt").is_file());

        let report = fs::read_to_string(results.join(REPORT_FILE)).unwrap();
        assert_eq!(
            report,
            "The accuracy for pos is 0.5\nThe accuracy for neg is 0.5\nThe overall accuracy is 0.5\n"
        );

        let priors = fs::read_to_string(results.join("class_probabilities.json")).unwrap();
        let priors: BTreeMap<String, f64> = serde_json::from_str(&priors).unwrap();
        assert_eq!(priors.get("pos"), Some(&0.5));
        assert!(results.join("probabilities.json").is_file());
        assert!(results.join("log_probabilities.json").is_file());

        let scores = fs::read_to_string(results.join("scores.json")).unwrap();
        let scores: serde_json::Value = serde_json::from_str(&scores).unwrap();
        assert_eq!(scores.as_array().unwrap().len(), 4);
        assert_eq!(scores[0]["document"], "1.txt");
        assert_eq!(scores[0]["label"], "pos");
    }

    #[test]
    fn test_write_prediction_without_copy() {
        let temp = TempDir::new().unwrap();
        let mut sources = SourceDirectories::new();
        sources.insert("test", source_dir(&temp, "unlabeled", &[("a.txt", "good")]));

        let groups =
            DocumentGroups::new().with_group("test", vec![Document::new("a.txt", "good")]);
        let model = model();
        let outcome = Evaluator::new(&model).run(&groups).unwrap();

        let out = temp.path().join("out");
        let summary = ResultWriter::new(&out)
            .with_copy_files(false)
            .write(&model, &outcome, &sources)
            .unwrap();

        assert_eq!(summary.copied_files, 0);
        assert!(summary.report.is_none());
        assert!(!out.join(PREDICTION_DIR).join("pos").exists());
        assert!(out.join(PREDICTION_DIR).join("scores.json").is_file());

        let summary = ResultWriter::new(&out)
            .write(&model, &outcome, &sources)
            .unwrap();
        assert_eq!(summary.copied_files, 1);
        assert!(out.join(PREDICTION_DIR).join("pos/a.txt").is_file());
    }

    #[test]
    fn test_missing_source_directory() {
        let temp = TempDir::new().unwrap();
        let groups =
            DocumentGroups::new().with_group("test", vec![Document::new("a.txt", "good")]);
        let model = model();
        let outcome = Evaluator::new(&model).run(&groups).unwrap();

        let result =
            ResultWriter::new(temp.path()).write(&model, &outcome, &SourceDirectories::new());
        assert!(matches!(result, Err(PolarityError::Corpus(_))));
    }
}
