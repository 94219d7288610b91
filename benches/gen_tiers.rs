use criterion::{Criterion, criterion_group, criterion_main};
use sapador::{BoardConfig, MinefieldGenerator, UniformGenerator};
use std::hint::black_box;

fn bench_generation(c: &mut Criterion) {
    let tiers = [
        ("beginner", BoardConfig::beginner()),
        ("intermediate", BoardConfig::intermediate()),
        ("expert", BoardConfig::expert()),
    ];

    let mut group = c.benchmark_group("generate");
    for (name, config) in tiers {
        group.bench_function(name, |b| {
            b.iter(|| UniformGenerator::new(black_box(42)).generate(config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
