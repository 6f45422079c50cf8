use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

fn generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let tiers = [
        ("beginner", BoardConfig::new(9, 9, 10)),
        ("expert", BoardConfig::new(16, 30, 99)),
        ("dense", BoardConfig::new(30, 30, 450)),
    ];

    for (name, config) in tiers {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                black_box(RejectionSampler::new(seed).generate(config))
            });
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    // one mine in a corner leaves a single zero region covering the board
    let layout = MineLayout::from_mine_coords((200, 200), &[(0, 0)]).unwrap();
    let config = BoardConfig::default().with_auto_flood_fill(true);

    c.bench_function("flood_fill/open_board", |b| {
        b.iter(|| black_box(Board::from_layout(&layout, config).unwrap()))
    });
}

criterion_group!(benches, generation, flood_fill);
criterion_main!(benches);
