use criterion::{Criterion, criterion_group, criterion_main};
use phylo2vec::vector::{sample_vector, seed_everything, to_newick, to_vector};
use std::hint::black_box;

const REGRESSION_SIZES: &[usize] = &[10, 100, 1_000, 10_000];

const REPORTING_SIZES: &[usize] = &[100_000];

fn encode_decode(c: &mut Criterion, sizes: &[usize]) {
    for &num_leaves in sizes {
        let mut rng = seed_everything(42);
        let v = sample_vector(num_leaves, &mut rng).unwrap();
        let newick = to_newick(&v);

        c.bench_function(&format!("to_newick n={num_leaves}"), |b| {
            b.iter(|| to_newick(black_box(&v)));
        });
        c.bench_function(&format!("to_vector n={num_leaves}"), |b| {
            b.iter(|| to_vector(black_box(&newick)).unwrap());
        });
    }
}

fn codec_regression(c: &mut Criterion) {
    encode_decode(c, REGRESSION_SIZES);
}

fn codec_reporting(c: &mut Criterion) {
    encode_decode(c, REPORTING_SIZES);
}

criterion_group!(regression, codec_regression);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = codec_reporting
}
criterion_main!(regression, reporting);
