//! Criterion benchmarks for Polarity.
//!
//! Covers the hot paths of a classification run:
//! - Bag-of-words analysis
//! - Sequential and parallel training
//! - Single and batch prediction

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use polarity::analysis::analyzer::{Analyzer, BagOfWordsAnalyzer};
use polarity::classification::{
    ClassifierConfig, Document, DocumentGroups, NaiveBayesModel, NaiveBayesTrainer,
};
use std::hint::black_box;

const POSITIVE_WORDS: &[&str] = &[
    "great", "wonderful", "moving", "brilliant", "funny", "charming", "superb", "touching",
];
const NEGATIVE_WORDS: &[&str] = &[
    "boring", "dull", "awful", "predictable", "tedious", "weak", "mess", "lifeless",
];
const NEUTRAL_WORDS: &[&str] = &[
    "the", "film", "story", "actor", "scene", "plot", "director", "camera", "music", "ending",
    "character", "script", ",", ".", "!",
];

/// Generate review-like documents for benchmarking.
fn generate_reviews(count: usize, sentiment: &[&str], offset: usize) -> Vec<Document> {
    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let length = 200 + (i % 150);
        let mut words = Vec::with_capacity(length);
        for j in 0..length {
            let seed = (i + offset) * 7 + j * 13;
            if seed % 5 == 0 {
                words.push(sentiment[seed % sentiment.len()]);
            } else {
                words.push(NEUTRAL_WORDS[seed % NEUTRAL_WORDS.len()]);
            }
        }
        documents.push(Document::new(format!("cv{i:03}.txt"), words.join(" ")));
    }
    documents
}

fn corpus(count: usize) -> DocumentGroups {
    DocumentGroups::new()
        .with_group("positive", generate_reviews(count, POSITIVE_WORDS, 0))
        .with_group("negative", generate_reviews(count, NEGATIVE_WORDS, 17))
}

fn trained_model(groups: &DocumentGroups) -> NaiveBayesModel {
    NaiveBayesTrainer::train(ClassifierConfig::default(), groups).unwrap()
}

/// Benchmark text analysis.
fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    let analyzer = BagOfWordsAnalyzer::new();
    let groups = corpus(100);
    let texts: Vec<&str> = groups.documents().map(|(_, d)| d.text.as_str()).collect();

    group.bench_function("analyze_single_document", |b| {
        b.iter(|| black_box(analyzer.terms(black_box(texts[0]))))
    });

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("analyze_batch_documents", |b| {
        b.iter(|| {
            for text in &texts {
                let _ = black_box(analyzer.terms(black_box(text)));
            }
        })
    });

    group.finish();
}

/// Benchmark training.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(20);

    let groups = corpus(500);
    group.throughput(Throughput::Elements(groups.total_documents() as u64));

    group.bench_function("train_sequential", |b| {
        b.iter(|| black_box(NaiveBayesTrainer::train(ClassifierConfig::default(), &groups)))
    });

    group.bench_function("train_parallel", |b| {
        let config = ClassifierConfig::default().with_parallel(true);
        b.iter(|| black_box(NaiveBayesTrainer::train(config.clone(), &groups)))
    });

    group.finish();
}

/// Benchmark prediction.
fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    let groups = corpus(200);
    let model = trained_model(&groups);
    let documents: Vec<&Document> = groups.documents().map(|(_, d)| d).collect();

    group.bench_function("predict_single_document", |b| {
        b.iter(|| black_box(model.predict(black_box(&documents[0].text))))
    });

    let tokens = BagOfWordsAnalyzer::new().terms(&documents[0].text).unwrap();
    group.bench_function("predict_pre_tokenized", |b| {
        b.iter(|| black_box(model.predict_tokens(black_box(&tokens))))
    });

    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("predict_batch", |b| {
        b.iter(|| black_box(model.predict_documents(black_box(&documents))))
    });

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_training, bench_prediction);
criterion_main!(benches);
