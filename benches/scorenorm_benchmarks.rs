use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scorenorm::kde::GaussianKde;
use scorenorm::testdata::overlapping_classes;
use scorenorm::utils::linspace;
use scorenorm::ScoreNormalizer;

pub fn normalizer_benchmarks(c: &mut Criterion) {
    let (tp_scores, tn_scores) = overlapping_classes(2000, 42).expect("test score generation failed");

    let kde = GaussianKde::estimate(&tp_scores, 1024, 8.0).unwrap();
    let grid = linspace(0.0, 12.0, 1024);
    c.bench_function("kde evaluate serial", |b| b.iter(|| kde.evaluate(black_box(&grid), false)));
    c.bench_function("kde evaluate parallel", |b| b.iter(|| kde.evaluate(black_box(&grid), true)));

    let mut batch = tp_scores.clone();
    batch.extend_from_slice(&tn_scores);

    let mut normalizer_train = c.benchmark_group("normalizer_train");
    normalizer_train.sample_size(10);
    normalizer_train.bench_function("fit", |b| {
        b.iter(|| {
            let mut normalizer = ScoreNormalizer::default();
            normalizer.fit(black_box(&tp_scores), black_box(&tn_scores)).unwrap();
        })
    });

    let mut normalizer = ScoreNormalizer::default();
    normalizer.fit(&tp_scores, &tn_scores).unwrap();
    normalizer_train.bench_function("normalize serial", |b| {
        b.iter(|| normalizer.normalize(black_box(&batch), false).unwrap())
    });
    normalizer_train.bench_function("normalize parallel", |b| {
        b.iter(|| normalizer.normalize(black_box(&batch), true).unwrap())
    });
    normalizer_train.bench_function("inverse normalize", |b| {
        b.iter(|| normalizer.inverse_normalize(black_box(&[0.25, 0.5, 0.75]), false).unwrap())
    });
    normalizer_train.finish();
}

criterion_group!(benches, normalizer_benchmarks);
criterion_main!(benches);
