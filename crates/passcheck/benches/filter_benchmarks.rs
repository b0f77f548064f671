//! # PassCheck Benchmarks
//!
//! | Area | Operation | Expectation |
//! |------|-----------|-------------|
//! | Bloom filter | `add` / `contains` | O(k), independent of list size |
//! | Ingestion | two-pass vs counted | counted reads the source once |
//! | Policy | `evaluate` | dominated by the filter lookup |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use passcheck::{
    BloomFilter, InMemoryWordList, LengthAssertion, NotLeakedAssertion, PassCheckConfig,
    PasswordPolicy, WordListIngestor,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_passwords(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(6..16);
            (0..len)
                .map(|_| rng.sample(rand::distributions::Alphanumeric) as char)
                .collect()
        })
        .collect()
}

// ============================================================================
// Bloom filter
// ============================================================================

fn bench_filter_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-filter");

    for size in [1_000usize, 10_000, 100_000] {
        let passwords = random_passwords(size, 7);
        let mut filter = BloomFilter::build(size as u64, 0.001).unwrap();
        for password in &passwords {
            filter.add(password);
        }
        let candidates = random_passwords(1_000, 11);

        group.throughput(Throughput::Elements(candidates.len() as u64));
        group.bench_with_input(BenchmarkId::new("contains", size), &candidates, |b, candidates| {
            b.iter(|| {
                let hits = candidates.iter().filter(|p| filter.contains(p)).count();
                black_box(hits)
            })
        });
    }

    let passwords = random_passwords(10_000, 13);
    group.throughput(Throughput::Elements(passwords.len() as u64));
    group.bench_function("add_10k", |b| {
        b.iter(|| {
            let mut filter = BloomFilter::build(passwords.len() as u64, 0.001).unwrap();
            for password in &passwords {
                filter.add(password);
            }
            black_box(filter.elements_inserted())
        })
    });

    group.finish();
}

// ============================================================================
// Ingestion
// ============================================================================

fn bench_ingestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingestion");
    let source = InMemoryWordList::new(random_passwords(50_000, 17));
    let ingestor = WordListIngestor::new(&PassCheckConfig::default());

    group.throughput(Throughput::Elements(source.len() as u64));
    group.bench_function("two_pass", |b| {
        b.iter(|| black_box(ingestor.ingest(&source).unwrap().report.inserted))
    });
    group.bench_function("counted", |b| {
        b.iter(|| {
            black_box(
                ingestor
                    .ingest_counted(&source, source.len() as u64)
                    .unwrap()
                    .report
                    .inserted,
            )
        })
    });

    group.finish();
}

// ============================================================================
// Policy evaluation
// ============================================================================

fn bench_policy_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy");
    let source = InMemoryWordList::new(random_passwords(50_000, 19));
    let policy = PasswordPolicy::new(vec![
        LengthAssertion::new(Some(8), Some(128)).unwrap().into(),
        NotLeakedAssertion::from_source(PassCheckConfig::default(), &source)
            .unwrap()
            .into(),
    ]);
    let candidates = random_passwords(1_000, 23);

    group.throughput(Throughput::Elements(candidates.len() as u64));
    group.bench_function("evaluate", |b| {
        b.iter(|| {
            let compliant = candidates
                .iter()
                .filter(|c| policy.check_compliance(Some(c.as_str())))
                .count();
            black_box(compliant)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_filter_operations,
    bench_ingestion,
    bench_policy_evaluation
);
criterion_main!(benches);
