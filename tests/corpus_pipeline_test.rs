//! End-to-end tests: corpus on disk, training, evaluation and result files.

use std::fs;
use std::path::Path;

use clap::Parser;
use polarity::classification::*;
use polarity::cli::args::PolarityArgs;
use polarity::cli::commands::execute_command;
use polarity::corpus::*;
use polarity::error::Result;
use tempfile::TempDir;

fn write_corpus(root: &Path) {
    let pos = root.join("pos");
    let neg = root.join("neg");
    fs::create_dir_all(&pos).unwrap();
    fs::create_dir_all(&neg).unwrap();

    fs::write(pos.join("cv000_1.txt"), "a great and moving film").unwrap();
    fs::write(pos.join("cv001_2.txt"), "great acting , great story").unwrap();
    fs::write(pos.join("cv002_3.txt"), "a wonderful film").unwrap();
    fs::write(neg.join("cv000_4.txt"), "a boring and dull film").unwrap();
    fs::write(neg.join("cv001_5.txt"), "boring acting , awful story").unwrap();
    fs::write(neg.join("cv002_6.txt"), "an awful film").unwrap();

    // Ids 2 and 3 form the test split when the split index is 2.
    fs::write(pos.join("cv003_7.txt"), "great great").unwrap();
    fs::write(neg.join("cv003_8.txt"), "great film").unwrap();
}

fn classes() -> Vec<String> {
    vec!["pos".to_string(), "neg".to_string()]
}

#[test]
fn test_load_train_evaluate_write() -> Result<()> {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("corpus");
    write_corpus(&root);

    let split = CorpusLoader::new(&root).with_split_index(2).load_split(&classes())?;
    assert_eq!(split.train.total_documents(), 4);
    assert_eq!(split.test.total_documents(), 4);

    let model = NaiveBayesTrainer::train(ClassifierConfig::new(classes()), &split.train)?;
    let outcome = Evaluator::new(&model).run(&split.test)?;

    let report = match &outcome {
        TestOutcome::Evaluation(report) => report.clone(),
        TestOutcome::Prediction(_) => panic!("labeled test split must be evaluated"),
    };
    assert_eq!(report.total, 4);

    let out = temp.path().join("out");
    let summary = ResultWriter::new(&out).write(&model, &outcome, &split.sources)?;
    assert_eq!(summary.copied_files, 4);

    let results = out.join("results");
    let report_text = fs::read_to_string(results.join("results.txt"))?;
    assert_eq!(report_text.lines().count(), 3);
    assert!(report_text.ends_with(&format!(
        "The overall accuracy is {}\n",
        report.overall_accuracy
    )));

    // "great film" under neg is misclassified as pos.
    assert!(results.join("incorrect/neg/cv003_8.txt").is_file());
    assert!(results.join("correct/pos/cv003_7.txt").is_file());

    Ok(())
}

#[test]
fn test_cli_classify_evaluation() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("corpus");
    write_corpus(&root);
    let out = temp.path().join("out");

    let args = PolarityArgs::try_parse_from([
        "polarity",
        "--quiet",
        "classify",
        root.to_str().unwrap(),
        "--classes",
        "pos,neg",
        "--split-index",
        "3",
        "--alpha",
        "0.9",
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();
    execute_command(args).unwrap();

    let results = out.join("results");
    assert!(results.join("results.txt").is_file());
    assert!(results.join("class_probabilities.json").is_file());
    assert!(results.join("probabilities.json").is_file());
    assert!(results.join("log_probabilities.json").is_file());
    assert!(results.join("scores.json").is_file());
    assert!(!out.join("prediction").exists());
}

#[test]
fn test_cli_classify_prediction_without_copy() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("corpus");
    write_corpus(&root);

    let unlabeled = temp.path().join("unlabeled");
    fs::create_dir_all(&unlabeled).unwrap();
    fs::write(unlabeled.join("review.txt"), "a dull and boring story").unwrap();

    let out = temp.path().join("out");
    let args = PolarityArgs::try_parse_from([
        "polarity",
        "-q",
        "--format",
        "json",
        "classify",
        root.to_str().unwrap(),
        "--classes",
        "pos,neg",
        "--predict",
        unlabeled.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--no-copy",
        "--parallel",
        "--threads",
        "2",
    ])
    .unwrap();
    execute_command(args).unwrap();

    let prediction = out.join("prediction");
    assert!(prediction.join("scores.json").is_file());
    assert!(!prediction.join("neg").exists());

    let scores: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(prediction.join("scores.json")).unwrap())
            .unwrap();
    assert_eq!(scores[0]["document"], "review.txt");
    assert_eq!(scores[0]["label"], "neg");
    assert!(scores[0]["correct"].is_null());
}

#[test]
fn test_cli_classify_missing_class_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("corpus");
    write_corpus(&root);

    let args = PolarityArgs::try_parse_from([
        "polarity",
        "-q",
        "classify",
        root.to_str().unwrap(),
        "--classes",
        "pos,neutral",
    ])
    .unwrap();
    assert!(execute_command(args).is_err());
}
