use criterion::{black_box, criterion_group, criterion_main, Criterion};
use textscout_core::bitmap::{Operator, SetAlgebra};
use textscout_core::DocId;

const CORPUS: usize = 100_000;

fn bench_set_algebra(c: &mut Criterion) {
    let alg = SetAlgebra::new(CORPUS);
    let a: Vec<DocId> = (0..CORPUS as DocId).step_by(3).collect();
    let b: Vec<DocId> = (0..CORPUS as DocId).step_by(7).collect();
    let d: Vec<DocId> = (0..CORPUS as DocId).step_by(11).collect();

    c.bench_function("intersection_100k", |bench| bench.iter(|| alg.intersection(black_box(&a), black_box(&b))));
    c.bench_function("union_100k", |bench| bench.iter(|| alg.union(black_box(&a), black_box(&b))));
    c.bench_function("fold_and_three_terms", |bench| {
        bench.iter(|| alg.fold([Some(a.as_slice()), Some(b.as_slice()), Some(d.as_slice())], Operator::And))
    });
}

criterion_group!(benches, bench_set_algebra);
criterion_main!(benches);
