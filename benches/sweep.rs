//! Benchmarks for the sequential and concurrent sweeps
//!
//! Run with: cargo bench --bench sweep

#![allow(clippy::unwrap_used)]

use cfw::{Config, Consistency, Edge, Graph, Scheduler, sequential};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use core::num::NonZeroUsize;
use std::hint::black_box;

/// Dense pseudo-random graph; roughly half of all pairs get an edge.
fn dense_graph(n: usize) -> Graph {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let mut edges = Vec::new();
    for from in 1..=n as i64 {
        for to in from + 1..=n as i64 {
            let roll = next();
            if roll % 2 == 0 {
                edges.push(Edge::new(from, to, (roll >> 8) as i64 % 1000 + 1));
            }
        }
    }
    Graph::from_edges(n, edges, &Config::default()).unwrap()
}

fn bench_sweeps(c: &mut Criterion) {
    let mut group = c.benchmark_group("floyd_warshall");
    for n in [16, 50, 100] {
        let graph = dense_graph(n);
        group.bench_with_input(BenchmarkId::new("sequential", n), &graph, |b, graph| {
            b.iter(|| sequential::floyd_warshall(black_box(graph)).unwrap());
        });
        for consistency in [Consistency::Checked, Consistency::Monotone] {
            let config = Config::new().with_consistency(consistency);
            let scheduler = Scheduler::new(config).unwrap();
            let id = BenchmarkId::new(format!("concurrent/{consistency}"), n);
            group.bench_with_input(id, &graph, |b, graph| {
                b.iter(|| scheduler.solve(black_box(graph)).unwrap());
            });
        }
        let single = Scheduler::new(Config::new().with_workers(NonZeroUsize::MIN)).unwrap();
        group.bench_with_input(BenchmarkId::new("concurrent/1-worker", n), &graph, |b, graph| {
            b.iter(|| single.solve(black_box(graph)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sweeps);
criterion_main!(benches);
