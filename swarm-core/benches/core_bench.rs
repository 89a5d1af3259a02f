//! Criterion benchmarks for swarm-core.
//!
//! Benchmarks:
//! 1. Projection table for growing tier/horizon grids
//! 2. Breakeven across tiers
//! 3. Reveal evaluation: one scroll pass over N registered blocks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use swarm_core::projection::{
    compute_breakeven, compute_projection, AssumptionsConfig, Horizon, ProjectionAssumptions,
};
use swarm_core::reveal::{Region, RevealController, Viewport, DEFAULT_THRESHOLD};

// ── Helpers ──────────────────────────────────────────────────────────

fn assumptions(tiers: usize, horizons: u32) -> ProjectionAssumptions {
    AssumptionsConfig {
        capital_tiers: (1..=tiers).map(|t| t as f64 * 1_000.0).collect(),
        horizons: (1..=horizons).map(Horizon::Day).collect(),
        ..AssumptionsConfig::default()
    }
    .validate()
    .unwrap()
}

fn controller_with(blocks: usize) -> RevealController {
    let mut ctl = RevealController::new(Viewport::new(0.0, 0.0, 1_200.0, 800.0));
    for i in 0..blocks {
        let region = Region::new(0.0, 1_000.0 + i as f64 * 120.0, 1_200.0, 110.0);
        ctl.register(region, DEFAULT_THRESHOLD, (i % 6) as u64 * 75)
            .unwrap();
    }
    ctl
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    for &(tiers, horizons) in &[(5usize, 7u32), (20, 365), (100, 730)] {
        let a = assumptions(tiers, horizons);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{tiers}x{horizons}")),
            &a,
            |b, a| b.iter(|| compute_projection(black_box(a))),
        );
    }
    group.finish();
}

fn bench_breakeven(c: &mut Criterion) {
    let a = assumptions(100, 7);
    c.bench_function("breakeven_100_tiers", |b| {
        b.iter(|| compute_breakeven(black_box(&a), black_box(25_000.0)).unwrap())
    });
}

fn bench_reveal_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_scroll_pass");
    for &blocks in &[10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &blocks, |b, &n| {
            b.iter_batched(
                || controller_with(n),
                |mut ctl| {
                    let base = ctl.viewport();
                    for step in 0..200u64 {
                        ctl.on_viewport(base.scrolled_to(step as f64 * 60.0), step * 16);
                    }
                    ctl
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_projection, bench_breakeven, bench_reveal_scroll);
criterion_main!(benches);
