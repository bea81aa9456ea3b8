//! Integration tests for the sentence splitter and the bigram model.

use std::fs;

use clap::Parser;
use polarity::analysis::sentence::SentenceSplitter;
use polarity::cli::args::PolarityArgs;
use polarity::cli::commands::execute_command;
use polarity::error::Result;
use polarity::language_model::BigramModel;
use tempfile::TempDir;

#[test]
fn test_split_mixed_text() -> Result<()> {
    let splitter = SentenceSplitter::new()?;
    let text = "Mrs. Jones works at Acme Inc. in Dublin.\nShe said \"Hello.\" Then she left! \
                Did she visit example.ie? Yes";

    let sentences = splitter.split(text);
    assert_eq!(
        sentences,
        vec![
            "Mrs. Jones works at Acme Inc. in Dublin.",
            "She said \"Hello.\" Then she left!",
            "Did she visit example.ie?",
        ]
    );
    assert_eq!(splitter.split_to_lines(text).lines().count(), 3);

    Ok(())
}

#[test]
fn test_bigram_training_file() {
    let corpus = "<s> the cat sat </s>\n<s> the cat ran </s>\n<s> a dog sat </s>";
    let model = BigramModel::from_corpus(corpus);

    // P(the|<s>) P(cat|the) P(sat|cat) P(</s>|sat) = 2/3 * 1 * 1/2 * 1
    let p = model.sentence_probability("<s> the cat sat </s>");
    assert!((p - 1.0 / 3.0).abs() < 1e-12);

    assert_eq!(model.sentence_probability("<s> the dog sat </s>"), 0.0);
    assert_eq!(model.conditional_probability("unicorn", "sat"), 0.0);
}

#[test]
fn test_cli_bigram() {
    let temp = TempDir::new().unwrap();
    let train = temp.path().join("training.txt");
    let test = temp.path().join("test.txt");
    fs::write(&train, "<s> I am Sam </s>\n<s> Sam I am </s>").unwrap();
    fs::write(&test, "<s> I am Sam </s>\n<s> Sam is here </s>").unwrap();

    let args = PolarityArgs::try_parse_from([
        "polarity",
        "--format",
        "json",
        "bigram",
        train.to_str().unwrap(),
        test.to_str().unwrap(),
    ])
    .unwrap();
    execute_command(args).unwrap();
}

#[test]
fn test_cli_split_sentences_explicit_output() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input.txt");
    let output = temp.path().join("sentences.txt");
    fs::write(&input, "One. Two? Three!").unwrap();

    let args = PolarityArgs::try_parse_from([
        "polarity",
        "-q",
        "split-sentences",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ])
    .unwrap();
    execute_command(args).unwrap();

    assert_eq!(fs::read_to_string(output).unwrap(), "One.\nTwo?\nThree!");
    assert!(!temp.path().join("input_split.txt").exists());
}
