use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pdfseek::chunker::split_fixed;
use pdfseek::{ChunkMetadata, ChunkRecord, VectorIndex};
use rand::prelude::*;

const DIMENSIONS: usize = 384;
const TOP_K: usize = 5;

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(std::time::Duration::from_secs(10))
        .warm_up_time(std::time::Duration::from_secs(2))
        .configure_from_args()
}

fn random_vector(rng: &mut StdRng) -> Vec<f32> {
    (0..DIMENSIONS).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn random_index(rng: &mut StdRng, size: usize) -> VectorIndex {
    let records = (0..size)
        .map(|i| ChunkRecord {
            text: String::new(),
            metadata: ChunkMetadata {
                filename: format!("doc{}.pdf", i / 100),
                offset: (i % 100) * 500,
            },
            vector: random_vector(rng),
        })
        .collect();
    VectorIndex::build(records).expect("uniform dimensions")
}

fn query_index(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("flat_l2_query");

    for size in [1_000usize, 10_000, 50_000] {
        let index = random_index(&mut rng, size);
        let query = random_vector(&mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| index.query(black_box(&query), TOP_K).expect("query"))
        });
    }
    group.finish();
}

fn chunk_text(c: &mut Criterion) {
    let text: String = "The quick brown fox jumps over the lazy dog. ".repeat(20_000);
    c.bench_function("split_fixed 900k chars", |b| {
        b.iter(|| split_fixed(black_box(&text), 500).len())
    });
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = query_index, chunk_text
}
criterion_main!(benches);
