// FAQ Search Performance Benchmarks
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use intake_server::search::{preprocess, FaqIndex, FaqRecord, FaqSearchConfig, FaqSearchService};

const TOPICS: &[&str] = &[
    "password reset",
    "invoice payment",
    "mobile application",
    "internship duration",
    "website pricing",
    "project timeline",
    "hosting maintenance",
    "support contact",
];

fn synthetic_corpus(size: usize) -> Vec<FaqRecord> {
    (0..size)
        .map(|i| {
            let topic = TOPICS[i % TOPICS.len()];
            FaqRecord::new(
                format!("Question {i} about {topic}?"),
                format!("Answer {i}: details on {topic} for variant {}.", i / TOPICS.len()),
                topic.split(' ').map(str::to_string).collect(),
                format!("category-{}", i % 5),
            )
        })
        .collect()
}

fn preprocess_text(c: &mut Criterion) {
    let text = "How do I reset my password if I no longer have access to my e-mail?!";

    c.bench_function("faq_preprocess", |b| {
        b.iter(|| preprocess(black_box(text)))
    });
}

fn build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("faq_build_index");

    for size in [10, 100, 1000].iter() {
        let corpus = synthetic_corpus(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &corpus, |b, corpus| {
            b.iter(|| FaqIndex::build(black_box(corpus.clone()), 1000))
        });
    }
    group.finish();
}

fn search_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("faq_search");

    for size in [10, 100, 1000].iter() {
        let service =
            FaqSearchService::from_records(synthetic_corpus(*size), FaqSearchConfig::default());
        group.bench_with_input(BenchmarkId::from_parameter(size), &service, |b, service| {
            b.iter(|| service.search(black_box("how do I reset my password"), Some(3), Some(0.1)))
        });
    }
    group.finish();
}

criterion_group!(benches, preprocess_text, build_index, search_index);
criterion_main!(benches);
