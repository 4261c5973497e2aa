#![allow(missing_docs)]
#![cfg(not(feature = "loom"))]

use cfw::{
    Config, Consistency, Distance, DistanceMatrix, DistanceSnapshot, Edge, Error, Graph,
    InputError, MatrixError, Pivot, Row, Scheduler, TaskError, relax_row, sequential,
    types::MAX_WEIGHT,
};
use core::num::NonZeroUsize;
use proptest::prelude::*;
use std::{cmp::Reverse, collections::BinaryHeap};

fn workers(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn scheduler(workers_count: usize, consistency: Consistency) -> Scheduler {
    let config = Config::new()
        .with_workers(workers(workers_count))
        .with_consistency(consistency);
    Scheduler::new(config).expect("pool must build")
}

fn graph(nodes: usize, edges: &[(i64, i64, i64)]) -> Graph {
    let edges = edges.iter().map(|&(from, to, weight)| Edge::new(from, to, weight));
    Graph::from_edges(nodes, edges, &Config::default()).expect("valid graph")
}

/// Independent reference: Dijkstra from every source.
fn dijkstra_all_pairs(graph: &Graph) -> Vec<Vec<Option<Distance>>> {
    let n = graph.order();
    (0..n)
        .map(|source| {
            let mut dist: Vec<Option<Distance>> = vec![None; n];
            let mut heap = BinaryHeap::new();
            dist[source] = Some(0);
            heap.push(Reverse((0, source)));
            while let Some(Reverse((d, node))) = heap.pop() {
                if dist[node].is_some_and(|best| d > best) {
                    continue;
                }
                for (next, weight) in graph.neighbors(node) {
                    let candidate = d + Distance::from(weight);
                    if dist[next].is_none_or(|best| candidate < best) {
                        dist[next] = Some(candidate);
                        heap.push(Reverse((candidate, next)));
                    }
                }
            }
            dist
        })
        .collect()
}

#[test]
fn path_of_three_nodes() {
    let graph = graph(3, &[(1, 2, 4), (2, 3, 1)]);
    let solution = scheduler(2, Consistency::Checked).solve(&graph).unwrap();
    assert_eq!(
        solution.distances.to_rows(),
        vec![
            vec![Some(0), Some(4), Some(5)],
            vec![Some(4), Some(0), Some(1)],
            vec![Some(5), Some(1), Some(0)],
        ]
    );
    assert_eq!(solution.stats.pivots, 3);
    assert_eq!(solution.stats.updated, 2);
    assert!(solution.elapsed_secs() >= 0.0);
}

#[test]
fn two_nodes_without_edges_stay_unreachable() {
    let graph = graph(2, &[]);
    let solution = scheduler(2, Consistency::Checked).solve(&graph).unwrap();
    assert_eq!(
        solution.distances.to_rows(),
        vec![vec![Some(0), None], vec![None, Some(0)]]
    );
    assert_eq!(solution.distances.to_string(), "0 INF\nINF 0\n");
}

#[test]
fn single_node_graph() {
    let graph = graph(1, &[]);
    let solution = scheduler(1, Consistency::Monotone).solve(&graph).unwrap();
    assert_eq!(solution.distances.to_rows(), vec![vec![Some(0)]]);
}

#[test]
fn negative_weight_is_rejected_before_computation() {
    let err = Graph::from_edges(2, [Edge::new(1, 2, -3)], &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidInput(InputError::NegativeWeight { edge }) if edge == Edge::new(1, 2, -3)
    ));

    let err = Graph::parse("2 1\n1 2 -3\n", &Config::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(InputError::NegativeWeight { .. })));
}

#[test]
fn node_count_above_the_bound_is_rejected() {
    let err = Graph::parse("101 0", &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidInput(InputError::NodeCount { nodes: 101, max: 100 })
    ));
    assert!(Graph::parse("101 0", &Config::default().with_max_nodes(128)).is_ok());
}

#[test]
fn heaviest_weights_do_not_overflow() {
    let n = 100;
    let edges: Vec<_> = (1..n as i64).map(|node| (node, node + 1, MAX_WEIGHT)).collect();
    let mut graph = graph(n, &edges);
    // Node 100 is cut off from the rest.
    graph.add_edge(Edge::new(99, 100, 0)).unwrap();
    let solution = scheduler(4, Consistency::Checked).solve(&graph).unwrap();
    let max = Distance::from(u32::MAX);
    assert_eq!(solution.distances.distance(0, 98), Some(98 * max));
    assert_eq!(solution.distances.distance(0, 99), None);
    assert_eq!(solution.distances.distance(99, 0), None);
}

#[test]
fn converged_matrix_is_a_fixed_point() {
    let graph = graph(5, &[(1, 2, 3), (2, 3, 4), (3, 4, 5), (4, 5, 6), (1, 5, 20)]);
    let scheduler = scheduler(3, Consistency::Checked);
    let matrix = DistanceMatrix::initialize(&graph).unwrap();
    let first = scheduler.run(&matrix).unwrap();
    assert!(first.updated > 0);
    let converged = matrix.snapshot();

    let second = scheduler.run(&matrix).unwrap();
    assert_eq!(second.pivots, 5);
    assert_eq!(second.updated, 0);
    assert_eq!(matrix.snapshot(), converged);
}

#[test]
fn out_of_range_row_task_is_a_task_failure() {
    let graph = graph(2, &[(1, 2, 1)]);
    let matrix = DistanceMatrix::initialize(&graph).unwrap();
    let err = relax_row(&matrix, Row(0), Pivot(2), Consistency::Checked).unwrap_err();
    assert_eq!(
        err,
        TaskError::Matrix {
            pivot: Pivot(2),
            row: Row(0),
            source: MatrixError::OutOfBounds {
                row: 0,
                col: 2,
                order: 2
            },
        }
    );
    assert!(matches!(Error::from(err), Error::TaskFailure(_)));
}

#[test]
fn scheduler_is_reusable_across_graphs() {
    let scheduler = scheduler(2, Consistency::Checked);
    let small = scheduler.solve(&graph(2, &[(1, 2, 7)])).unwrap();
    let large = scheduler
        .solve(&graph(4, &[(1, 2, 1), (2, 3, 1), (3, 4, 1)]))
        .unwrap();
    assert_eq!(small.distances.distance(1, 0), Some(7));
    assert_eq!(large.distances.distance(0, 3), Some(3));
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(i64, i64, i64)>)> {
    (1usize..=14).prop_flat_map(|n| {
        let node = 1..=n as i64;
        let edges = proptest::collection::vec((node.clone(), node, 0i64..=50), 0..=3 * n);
        (Just(n), edges)
    })
}

fn assert_matches_reference(snapshot: &DistanceSnapshot, graph: &Graph) {
    assert_eq!(snapshot.to_rows(), dijkstra_all_pairs(graph));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn agrees_with_dijkstra((n, edges) in graph_strategy()) {
        let graph = graph(n, &edges);
        let solution = scheduler(4, Consistency::Checked).solve(&graph).unwrap();
        assert_matches_reference(&solution.distances, &graph);
    }

    #[test]
    fn zero_diagonal_and_symmetry((n, edges) in graph_strategy()) {
        let graph = graph(n, &edges);
        let distances = scheduler(3, Consistency::Monotone).solve(&graph).unwrap().distances;
        for i in 0..n {
            prop_assert_eq!(distances.distance(i, i), Some(0));
            for j in 0..n {
                prop_assert_eq!(distances.distance(i, j), distances.distance(j, i));
            }
        }
    }

    #[test]
    fn fan_out_and_consistency_do_not_change_the_result((n, edges) in graph_strategy()) {
        let graph = graph(n, &edges);
        let reference = sequential::floyd_warshall(&graph).unwrap();
        for consistency in [Consistency::Checked, Consistency::Monotone] {
            for workers_count in [1, n.max(2)] {
                let solution = scheduler(workers_count, consistency).solve(&graph).unwrap();
                prop_assert_eq!(&solution.distances, &reference);
            }
        }
    }
}
