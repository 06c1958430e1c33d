use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weather_prob::analyzers::{ProbabilityEngine, StatisticsEngine};
use weather_prob::models::WeatherRecord;
use weather_prob::processors::{Categorizer, DataCleaner};
use weather_prob::settings::SampleConfig;
use weather_prob::utils::generate_sample_data;

fn create_test_data(rows: usize) -> Vec<WeatherRecord> {
    generate_sample_data(&SampleConfig {
        rows,
        seed: 42,
        ..SampleConfig::default()
    })
}

fn benchmark_cleaner(c: &mut Criterion) {
    let mut group = c.benchmark_group("data_cleaner");

    for rows in [1_000, 10_000, 100_000] {
        let raw = create_test_data(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &raw, |b, raw| {
            let cleaner = DataCleaner::new();
            b.iter(|| black_box(cleaner.clean(raw).0.len()))
        });
    }

    group.finish();
}

fn benchmark_categorizer(c: &mut Criterion) {
    let (cleaned, _) = DataCleaner::new().clean(&create_test_data(10_000));

    c.bench_function("categorizer", |b| {
        let categorizer = Categorizer::new();
        b.iter(|| black_box(categorizer.categorize(&cleaned).len()))
    });
}

fn benchmark_engines(c: &mut Criterion) {
    let (cleaned, _) = DataCleaner::new().clean(&create_test_data(10_000));
    let dataset = Categorizer::new().categorize(&cleaned);

    c.bench_function("statistics_engine", |b| {
        let engine = StatisticsEngine::new();
        b.iter(|| black_box(engine.analyze(&dataset.records).map(|s| s.records)))
    });

    c.bench_function("probability_engine", |b| {
        let engine = ProbabilityEngine::new();
        b.iter(|| black_box(engine.compute(&dataset.records).rain))
    });
}

criterion_group!(
    benches,
    benchmark_cleaner,
    benchmark_categorizer,
    benchmark_engines
);
criterion_main!(benches);
