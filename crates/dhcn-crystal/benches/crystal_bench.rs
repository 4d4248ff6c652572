// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Crystal Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the spacetime-crystal evolver.
//!
//! Covers graph construction, the two observables, a single tick on a
//! fresh graph, and a full default-length run.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use dhcn_crystal::{average_clustering, jaccard_curvature, SpacetimeCrystal};
use dhcn_types::CrystalConfig;

fn make_crystal() -> SpacetimeCrystal {
    SpacetimeCrystal::new(CrystalConfig::default()).expect("default config is valid")
}

// ── Construction ─────────────────────────────────────────────────────

fn bench_create_60(c: &mut Criterion) {
    c.bench_function("crystal_create_60", |b| {
        b.iter(|| SpacetimeCrystal::new(black_box(CrystalConfig::default())))
    });
}

fn bench_create_300(c: &mut Criterion) {
    let cfg = CrystalConfig {
        node_count: 300,
        edge_probability: 0.05,
        ..CrystalConfig::default()
    };
    c.bench_function("crystal_create_300", |b| {
        b.iter(|| SpacetimeCrystal::new(black_box(cfg.clone())))
    });
}

// ── Observables ──────────────────────────────────────────────────────

fn bench_curvature_all_edges(c: &mut Criterion) {
    let crystal = make_crystal();
    let graph = crystal.graph();
    let edges: Vec<(usize, usize)> = graph.edges().map(|(u, v, _)| (u, v)).collect();
    c.bench_function("curvature_all_edges_60", |b| {
        b.iter(|| {
            edges
                .iter()
                .map(|&(u, v)| jaccard_curvature(black_box(graph), u, v))
                .sum::<f64>()
        })
    });
}

fn bench_average_clustering(c: &mut Criterion) {
    let crystal = make_crystal();
    c.bench_function("average_clustering_60", |b| {
        b.iter(|| average_clustering(black_box(crystal.graph())))
    });
}

// ── Tick ─────────────────────────────────────────────────────────────

fn bench_single_evolve(c: &mut Criterion) {
    c.bench_function("evolve_single_tick_60", |b| {
        b.iter_batched(make_crystal, |mut crystal| crystal.evolve(), BatchSize::SmallInput)
    });
}

fn bench_full_simulation(c: &mut Criterion) {
    c.bench_function("simulate_60_ticks", |b| {
        b.iter_batched(make_crystal, |mut crystal| crystal.simulate(), BatchSize::SmallInput)
    });
}

// ── Groups ───────────────────────────────────────────────────────────

criterion_group!(construction, bench_create_60, bench_create_300,);

criterion_group!(observables, bench_curvature_all_edges, bench_average_clustering,);

criterion_group!(tick, bench_single_evolve, bench_full_simulation,);

criterion_main!(construction, observables, tick);
