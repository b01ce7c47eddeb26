use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lossgraph::graph::{GraphStore, Interface, InterfaceId, MemoryStore, NewInterface, Scope, UnitId};
use lossgraph::scoring::ScoringEngine;
use std::sync::Arc;

const BONDS: [&str; 4] = ["codified-strong", "codified-moderate", "institutional-weak", "fragile-temporary"];

/// Engine over `size` interfaces, bootstrapped and migrated
fn migrated_engine(size: usize) -> ScoringEngine {
    let store = Arc::new(MemoryStore::new());
    let unit = UnitId::new("bench");
    for i in 0..size {
        let request = NewInterface::new(format!("iface_{}", i), format!("team_{}", i % 50), format!("project_{}", i % 7))
            .with_type("team-to-project")
            .with_bond(BONDS[i % BONDS.len()]);
        store.insert_interface(Interface::from_request(request, &unit)).unwrap();
    }

    let engine = ScoringEngine::with_store(store);
    engine.bootstrap().unwrap();
    engine.migrate_all_legacy();
    engine
}

/// Benchmark single interface scoring
fn bench_interface_score(c: &mut Criterion) {
    let engine = migrated_engine(100);
    let id = InterfaceId::new("iface_3");

    c.bench_function("interface_score", |b| {
        b.iter(|| {
            let score = engine.compute_interface_score(&id, None).unwrap();
            criterion::black_box(score.total_energy_loss);
        });
    });
}

/// Benchmark network aggregation across scope sizes
fn bench_network_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_score");
    group.sample_size(20);

    for size in [100, 1000, 5000].iter() {
        let engine = migrated_engine(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let network = engine.compute_network_score(&Scope::All, None).unwrap();
                criterion::black_box(network.average_energy_loss);
            });
        });
    }
    group.finish();
}

/// Benchmark legacy migration throughput
fn bench_legacy_migration(c: &mut Criterion) {
    let mut group = c.benchmark_group("legacy_migration");
    group.sample_size(20);

    for size in [100, 1000].iter() {
        let engine = migrated_engine(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let report = engine.migrate_all_legacy();
                criterion::black_box(report.migrated);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_interface_score, bench_network_score, bench_legacy_migration);
criterion_main!(benches);
