//! Benchmarks for intent classification and full conversational turns.
//!
//! Classification runs on every message, so it should stay well under a
//! millisecond even for the slowest path (no pattern match, keyword scan).

use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use shopbot_chat::{ChatEngine, ChatIntent, ConversationContext, IntentClassifier};
use shopbot_core::{ChatConfig, Product};

const QUERIES: &[&str] = &[
    "hello",
    "how much is the leather jacket?",
    "is the desk lamp available?",
    "show me electronics",
    "show products under 50 euros",
    "zwischen 10 und 30 euro",
    "what are the cheapest products?",
    "was ist das teuerste?",
    "any sport stuff?",
    "qwerty asdf zxcv",
];

/// A catalog of `n` products spread over a handful of categories.
fn generate_catalog(n: usize) -> Vec<Product> {
    const CATEGORIES: &[&str] = &["Clothing", "Electronics", "Home", "Sports", "Books"];
    (0..n)
        .map(|i| {
            Product::new(
                format!("p{}", i),
                format!("Product {}", i),
                (i % 97) as f64 * 1.5 + 0.99,
                (i % 7) as u32,
                CATEGORIES[i % CATEGORIES.len()],
            )
            .with_description(format!("Description of product number {}", i))
        })
        .collect()
}

fn bench_classification(c: &mut Criterion) {
    let classifier = IntentClassifier::new();
    let mut context = ConversationContext::default();
    context.set_last_intent(ChatIntent::ProductSearch, Some("p1"));

    let mut group = c.benchmark_group("classification");
    group.sample_size(200);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("mixed_queries_no_context", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let intent = classifier.classify(QUERIES[idx % QUERIES.len()], None);
            idx += 1;
            intent
        });
    });

    group.bench_function("follow_up_with_context", |b| {
        b.iter(|| classifier.classify("how much is it?", Some(&context)));
    });

    group.bench_function("keyword_fallback_miss", |b| {
        b.iter(|| classifier.classify("qwerty asdf zxcv", None));
    });

    group.finish();
}

fn bench_respond(c: &mut Criterion) {
    let products = generate_catalog(500);

    let mut group = c.benchmark_group("respond");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("turn_over_500_products", |b| {
        let mut engine = ChatEngine::new(ChatConfig::default());
        let mut idx = 0usize;
        b.iter(|| {
            let reply = engine.respond(QUERIES[idx % QUERIES.len()], &products);
            idx += 1;
            reply
        });
    });

    group.finish();
}

criterion_group!(benches, bench_classification, bench_respond);
criterion_main!(benches);
