use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use seqmine::{
    mine_closed, mine_frequent, mine_generators, mine_maximal, mine_top_k, MinerConfig, SequenceDatabase, Traversal,
};

/// Generate a synthetic sequence database
///
/// Parameters:
/// - num_sequences: Number of sequences
/// - num_items: Total number of possible items
/// - avg_itemsets: Average itemsets per sequence
/// - avg_itemset_size: Average items per itemset
fn generate_sequences(
    num_sequences: usize,
    num_items: u32,
    avg_itemsets: usize,
    avg_itemset_size: usize,
) -> SequenceDatabase {
    let mut rng = StdRng::seed_from_u64(42);

    (0..num_sequences)
        .map(|_| {
            let random_factor: f64 = rng.r#gen();
            let num_itemsets = ((avg_itemsets as f64 * (0.5 + random_factor)).round() as usize).max(1);
            (0..num_itemsets)
                .map(|_| {
                    let random_factor: f64 = rng.r#gen();
                    let size = ((avg_itemset_size as f64 * (0.5 + random_factor)).round() as usize).max(1);
                    // skew towards low item ids so some patterns are frequent
                    (0..size)
                        .map(|_| {
                            let a = rng.gen_range(1..=num_items);
                            let b = rng.gen_range(1..=num_items);
                            a.min(b)
                        })
                        .collect()
                })
                .collect()
        })
        .collect()
}

/// Frequent mining with different database sizes
fn bench_spam_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("spam_scaling");
    group.sample_size(20);

    let configs = vec![
        ("small_100seq", 100, 20, 5, 2),
        ("medium_500seq", 500, 50, 8, 2),
        ("large_1000seq", 1000, 100, 10, 3),
    ];

    for (name, num_seq, num_items, avg_itemsets, avg_size) in configs {
        let db = generate_sequences(num_seq, num_items, avg_itemsets, avg_size);

        group.bench_with_input(BenchmarkId::from_parameter(name), &db, |b, db| {
            b.iter(|| mine_frequent(black_box(db), black_box(0.2), &MinerConfig::default()));
        });
    }

    group.finish();
}

/// Frequent mining with different min_support thresholds
fn bench_spam_min_support(c: &mut Criterion) {
    let mut group = c.benchmark_group("spam_min_support");
    group.sample_size(20);

    let db = generate_sequences(500, 50, 8, 2);
    let min_supports = vec![0.1, 0.2, 0.3, 0.5];

    for &min_sup in &min_supports {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{:.2}", min_sup)), &min_sup, |b, &sup| {
            b.iter(|| mine_frequent(black_box(&db), black_box(sup), &MinerConfig::default()));
        });
    }

    group.finish();
}

/// Result policies over the same database and threshold
fn bench_spam_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("spam_policies");
    group.sample_size(20);

    let db = generate_sequences(500, 50, 8, 2);
    let config = MinerConfig::default();
    let pruning = MinerConfig::new().with_backward_pruning(true);

    group.bench_function("frequent", |b| b.iter(|| mine_frequent(black_box(&db), 0.2, &config)));
    group.bench_function("closed", |b| b.iter(|| mine_closed(black_box(&db), 0.2, &config)));
    group.bench_function("maximal", |b| b.iter(|| mine_maximal(black_box(&db), 0.2, &config)));
    group.bench_function("generators", |b| b.iter(|| mine_generators(black_box(&db), 0.2, &config)));
    group.bench_function("generators_backward_pruning", |b| {
        b.iter(|| mine_generators(black_box(&db), 0.2, &pruning))
    });

    group.finish();
}

/// Top-k mining with both traversals
fn bench_top_k(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_k");
    group.sample_size(20);

    let db = generate_sequences(500, 50, 8, 2);

    for k in [10, 100, 500] {
        for (name, traversal) in [("best_first", Traversal::BestFirst), ("depth_first", Traversal::DepthFirst)] {
            let config = MinerConfig::new().with_traversal(traversal);
            group.bench_with_input(BenchmarkId::new(name, k), &k, |b, &k| {
                b.iter(|| mine_top_k(black_box(&db), black_box(k), &config));
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_spam_scaling,
    bench_spam_min_support,
    bench_spam_policies,
    bench_top_k
);
criterion_main!(benches);
