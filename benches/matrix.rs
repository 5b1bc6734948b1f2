//! Benchmarks for catalog loading and matrix generation.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use crosstab::matrix::generate;
use crosstab::{Answer, AxisQuestion, BuilderConfig, Catalog, MeanOfMarginals, Question};
use serde_json::json;

/// Axis question with `answers` options, counts and percentages varying per key.
fn axis_question(id: &str, answers: usize) -> AxisQuestion {
    let answers = (0..answers)
        .map(|i| {
            Answer::new(format!("{i}"), format!("Answer {i}"), (i * 7) as u64)
                .with_percentage((i % 100) as f64 + 0.25)
        })
        .collect();
    AxisQuestion::from(&Question::new(id, id, answers))
}

fn axis(prefix: &str, questions: usize, answers: usize) -> Vec<AxisQuestion> {
    (0..questions)
        .map(|i| axis_question(&format!("{prefix}{i}"), answers))
        .collect()
}

/// Catalog JSON with `questions` entries of `answers` options each.
fn catalog_json(questions: usize, answers: usize) -> String {
    let entries: Vec<_> = (0..questions)
        .map(|q| {
            let options: serde_json::Map<_, _> = (0..answers)
                .map(|a| (a.to_string(), json!(format!("Option {a}"))))
                .collect();
            let counts: serde_json::Map<_, _> =
                (0..answers).map(|a| (a.to_string(), json!(a * 3))).collect();
            json!({
                "question": { "var": format!("Q{q}"), "txt": format!("Question {q}") },
                "options": options,
                "stats": { "count": counts },
            })
        })
        .collect();
    json!({ "questions": entries }).to_string()
}

/// Benchmark the diagonal branch
fn bench_self_intersection(c: &mut Criterion) {
    let q = vec![axis_question("SELF", 200)];
    let agg = MeanOfMarginals::default();

    c.bench_function("generate_self_intersection_200", |b| {
        b.iter(|| generate(black_box(&q), black_box(&q), &agg))
    });
}

/// Compare generation across grid sizes
fn bench_grid_sizes(c: &mut Criterion) {
    let agg = MeanOfMarginals::default();
    let mut group = c.benchmark_group("generate_grid");

    for (questions, answers) in [(1, 10), (4, 25), (10, 50), (20, 50)] {
        let rows = axis("R", questions, answers);
        let columns = axis("C", questions, answers);
        let cells = (questions * answers) * (questions * answers);

        group.throughput(Throughput::Elements(cells as u64));
        group.bench_with_input(
            BenchmarkId::new("mean_of_marginals", cells),
            &(rows, columns),
            |b, (rows, columns)| b.iter(|| generate(black_box(rows), black_box(columns), &agg)),
        );
    }

    group.finish();
}

/// Benchmark catalog parsing and validation
fn bench_catalog_load(c: &mut Criterion) {
    let json = catalog_json(500, 12);
    let config = BuilderConfig::default();

    let mut group = c.benchmark_group("catalog");
    group.throughput(Throughput::Bytes(json.len() as u64));
    group.bench_function("load_500_questions", |b| {
        b.iter(|| Catalog::from_json(black_box(&json), &config).expect("Failed to load"))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_self_intersection,
    bench_grid_sizes,
    bench_catalog_load,
);

criterion_main!(benches);
