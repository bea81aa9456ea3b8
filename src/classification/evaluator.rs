//! Evaluation and batch prediction over document groups.

use std::collections::{BTreeMap, HashSet};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::classification::document::{Document, DocumentGroups};
use crate::classification::model::{NaiveBayesModel, Prediction};
use crate::error::{PolarityError, Result};

/// Outcome for a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    /// Key of the group the document came from.
    pub group: String,
    /// Identifier of the document.
    pub document_id: String,
    /// The model decision.
    pub prediction: Prediction,
    /// Whether the decision matched the group key; `None` when unlabeled.
    pub correct: Option<bool>,
}

/// Accuracy over the documents of one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAccuracy {
    pub class: String,
    pub correct: usize,
    pub total: usize,
    pub accuracy: f64,
}

/// Result of evaluating labeled groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Per-class accuracy in group order.
    pub classes: Vec<ClassAccuracy>,
    pub correct: usize,
    pub total: usize,
    pub overall_accuracy: f64,
    /// Every document outcome in input order.
    pub outcomes: Vec<DocumentOutcome>,
}

impl EvaluationReport {
    /// Accuracy of a class, if it was evaluated.
    pub fn class_accuracy(&self, class: &str) -> Option<f64> {
        self.classes
            .iter()
            .find(|entry| entry.class == class)
            .map(|entry| entry.accuracy)
    }

    /// Human readable report lines.
    ///
    /// Per-class lines are only produced when more than one group was
    /// evaluated; the overall line always comes last.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.classes.len() + 1);
        if self.classes.len() > 1 {
            for entry in &self.classes {
                lines.push(format!(
                    "The accuracy for {} is {}",
                    entry.class, entry.accuracy
                ));
            }
        }
        lines.push(format!("The overall accuracy is {}", self.overall_accuracy));
        lines
    }
}

/// Predictions for unlabeled groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPredictions {
    /// Every document outcome in input order.
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchPredictions {
    /// Number of documents assigned to each label.
    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for outcome in &self.outcomes {
            *counts.entry(outcome.prediction.label.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// What [`Evaluator::run`] decided to do with its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TestOutcome {
    Evaluation(EvaluationReport),
    Prediction(BatchPredictions),
}

impl TestOutcome {
    /// Every document outcome, whichever mode ran.
    pub fn outcomes(&self) -> &[DocumentOutcome] {
        match self {
            TestOutcome::Evaluation(report) => &report.outcomes,
            TestOutcome::Prediction(batch) => &batch.outcomes,
        }
    }
}

/// Runs a trained model over document groups.
#[derive(Debug)]
pub struct Evaluator<'a> {
    model: &'a NaiveBayesModel,
}

impl<'a> Evaluator<'a> {
    pub fn new(model: &'a NaiveBayesModel) -> Self {
        Evaluator { model }
    }

    /// Whether the group keys are exactly the configured class set.
    pub fn is_labeled(&self, groups: &DocumentGroups) -> bool {
        let keys: HashSet<&str> = groups.keys().collect();
        let classes: HashSet<&str> = self.model.classes().iter().map(String::as_str).collect();
        keys == classes
    }

    /// Evaluate labeled groups; every key must be a class and every class
    /// must have a non-empty group.
    pub fn evaluate(&self, groups: &DocumentGroups) -> Result<EvaluationReport> {
        if !self.is_labeled(groups) {
            return Err(PolarityError::invalid_config(format!(
                "evaluation groups {:?} do not match classes {:?}",
                groups.keys().collect::<Vec<_>>(),
                self.model.classes()
            )));
        }
        if let Some(group) = groups.iter().find(|group| group.is_empty()) {
            return Err(PolarityError::empty_group(&group.key));
        }

        let outcomes = self.outcomes(groups, true)?;

        let mut classes = Vec::with_capacity(groups.len());
        let mut offset = 0;
        for group in groups {
            let slice = &outcomes[offset..offset + group.len()];
            offset += group.len();

            let correct = slice
                .iter()
                .filter(|outcome| outcome.correct == Some(true))
                .count();
            let accuracy = correct as f64 / group.len() as f64;
            debug!("Class '{}': {correct}/{} correct", group.key, group.len());

            classes.push(ClassAccuracy {
                class: group.key.clone(),
                correct,
                total: group.len(),
                accuracy,
            });
        }

        let correct: usize = classes.iter().map(|entry| entry.correct).sum();
        let total = outcomes.len();
        let overall_accuracy = correct as f64 / total as f64;
        info!("Evaluated {total} documents, overall accuracy {overall_accuracy:.4}");

        Ok(EvaluationReport {
            classes,
            correct,
            total,
            overall_accuracy,
            outcomes,
        })
    }

    /// Predict every document without comparing against the keys.
    pub fn predict_batch(&self, groups: &DocumentGroups) -> Result<BatchPredictions> {
        let outcomes = self.outcomes(groups, false)?;
        info!("Predicted {} documents", outcomes.len());
        Ok(BatchPredictions { outcomes })
    }

    /// Evaluate when the keys equal the class set, predict otherwise.
    pub fn run(&self, groups: &DocumentGroups) -> Result<TestOutcome> {
        if self.is_labeled(groups) {
            self.evaluate(groups).map(TestOutcome::Evaluation)
        } else {
            self.predict_batch(groups).map(TestOutcome::Prediction)
        }
    }

    fn outcomes(&self, groups: &DocumentGroups, labeled: bool) -> Result<Vec<DocumentOutcome>> {
        let pairs: Vec<(&str, &Document)> = groups.documents().collect();
        let documents: Vec<&Document> = pairs.iter().map(|(_, document)| *document).collect();
        let predictions = self.model.predict_documents(&documents)?;

        Ok(pairs
            .into_iter()
            .zip(predictions)
            .map(|((group, document), prediction)| DocumentOutcome {
                group: group.to_string(),
                document_id: document.id.clone(),
                correct: labeled.then(|| prediction.label == group),
                prediction,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::config::ClassifierConfig;
    use crate::classification::model::NaiveBayesTrainer;

    fn model() -> NaiveBayesModel {
        let groups = DocumentGroups::new()
            .with_group("pos", vec![Document::new("p1", "good movie good")])
            .with_group("neg", vec![Document::new("n1", "bad movie bad")]);
        NaiveBayesTrainer::train(ClassifierConfig::new(["pos", "neg"]), &groups).unwrap()
    }

    fn labeled() -> DocumentGroups {
        DocumentGroups::new()
            .with_group(
                "pos",
                vec![Document::new("p1", "good good"), Document::new("p2", "bad")],
            )
            .with_group(
                "neg",
                vec![Document::new("n1", "bad bad"), Document::new("n2", "good")],
            )
    }

    #[test]
    fn test_evaluation_scenario() {
        let model = model();
        let report = Evaluator::new(&model).evaluate(&labeled()).unwrap();

        assert_eq!(report.overall_accuracy, 0.5);
        assert_eq!(report.class_accuracy("pos"), Some(0.5));
        assert_eq!(report.class_accuracy("neg"), Some(0.5));
        assert_eq!(report.correct, 2);
        assert_eq!(report.total, 4);

        let ids: Vec<&str> = report
            .outcomes
            .iter()
            .map(|o| o.document_id.as_str())
            .collect();
        assert_eq!(ids, vec!["p1", "p2", "n1", "n2"]);
        assert_eq!(report.outcomes[1].correct, Some(false));
    }

    #[test]
    fn test_summary_lines() {
        let model = model();
        let report = Evaluator::new(&model).evaluate(&labeled()).unwrap();

        assert_eq!(
            report.summary_lines(),
            vec![
                "The accuracy for pos is 0.5",
                "The accuracy for neg is 0.5",
                "The overall accuracy is 0.5",
            ]
        );
    }

    #[test]
    fn test_single_class_summary_has_only_overall() {
        let groups = DocumentGroups::new().with_group("only", vec![Document::new("a", "x")]);
        let model = NaiveBayesTrainer::train(ClassifierConfig::new(["only"]), &groups).unwrap();
        let report = Evaluator::new(&model).evaluate(&groups).unwrap();

        assert_eq!(report.summary_lines(), vec!["The overall accuracy is 1"]);
    }

    #[test]
    fn test_empty_group() {
        let model = model();
        let groups = DocumentGroups::new()
            .with_group("pos", vec![Document::new("p1", "good")])
            .with_group("neg", vec![]);

        let result = Evaluator::new(&model).evaluate(&groups);
        assert!(matches!(result, Err(PolarityError::EmptyEvaluationGroup(k)) if k == "neg"));
    }

    #[test]
    fn test_mismatched_keys() {
        let model = model();
        let groups = DocumentGroups::new().with_group("pos", vec![Document::new("p1", "good")]);

        assert!(matches!(
            Evaluator::new(&model).evaluate(&groups),
            Err(PolarityError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_dispatch() {
        let model = model();
        let evaluator = Evaluator::new(&model);

        assert!(matches!(
            evaluator.run(&labeled()).unwrap(),
            TestOutcome::Evaluation(_)
        ));

        let unlabeled = DocumentGroups::new().with_group(
            "test",
            vec![Document::new("1", "good"), Document::new("2", "bad bad")],
        );
        match evaluator.run(&unlabeled).unwrap() {
            TestOutcome::Prediction(batch) => {
                assert_eq!(batch.len(), 2);
                assert!(batch.outcomes.iter().all(|o| o.correct.is_none()));
                assert_eq!(batch.label_counts().get("pos"), Some(&1));
                assert_eq!(batch.label_counts().get("neg"), Some(&1));
            }
            other => panic!("expected prediction, got {other:?}"),
        }
    }

    #[test]
    fn test_key_order_does_not_matter_for_dispatch() {
        let model = model();
        let groups = DocumentGroups::new()
            .with_group("neg", vec![Document::new("n1", "bad")])
            .with_group("pos", vec![Document::new("p1", "good")]);

        let report = Evaluator::new(&model).evaluate(&groups).unwrap();
        assert_eq!(report.classes[0].class, "neg");
        assert_eq!(report.overall_accuracy, 1.0);
    }
}
