use std::collections::HashMap;

use faster_paths::{
    graphs::{hash_graph::HashGraph, Distance, Graph, Weight},
    search::{
        collections::{distance_queue::QueueKind, priority_queue::IndexedPriorityQueue},
        dijkstra::{shortest_path, shortest_paths, shortest_paths_with_queue},
    },
    utility::path_distance,
};
use proptest::prelude::*;

const NUMBER_OF_VERTICES: u8 = 12;

fn build_graph(edges: &[(u8, u8, Weight)]) -> HashGraph<u8> {
    let mut graph = HashGraph::new();
    for vertex in 0..NUMBER_OF_VERTICES {
        graph.add_node(vertex);
    }
    for &(tail, head, weight) in edges {
        graph.add_edge(tail, head, weight);
    }
    graph
}

fn edge_lists() -> impl Strategy<Value = Vec<(u8, u8, Weight)>> {
    prop::collection::vec(
        (0..NUMBER_OF_VERTICES, 0..NUMBER_OF_VERTICES, 0..20u32),
        0..48,
    )
}

/// Reference distances by relaxing every edge until nothing changes.
fn bellman_ford(graph: &HashGraph<u8>, source: u8) -> HashMap<u8, Distance> {
    let mut distances = HashMap::from([(source, 0)]);
    let all_edges = graph.edges();

    loop {
        let mut changed = false;
        for edge in &all_edges {
            let Some(&distance_tail) = distances.get(&edge.tail) else {
                continue;
            };
            let alternative = distance_tail + Distance::from(edge.weight);
            if distances.get(&edge.head).map_or(true, |&current| alternative < current) {
                distances.insert(edge.head, alternative);
                changed = true;
            }
        }
        if !changed {
            return distances;
        }
    }
}

#[derive(Clone, Debug)]
enum QueueOperation {
    Push(u8, u32),
    Pop,
}

fn queue_operations() -> impl Strategy<Value = Vec<QueueOperation>> {
    prop::collection::vec(
        prop_oneof![
            (0..16u8, 0..32u32).prop_map(|(item, priority)| QueueOperation::Push(item, priority)),
            Just(QueueOperation::Pop),
        ],
        0..64,
    )
}

proptest! {
    #[test]
    fn source_has_distance_zero(edges in edge_lists(), source in 0..NUMBER_OF_VERTICES) {
        let graph = build_graph(&edges);
        let data = shortest_paths(&graph, &source);

        prop_assert_eq!(data.get_distance(&source), Some(0));
        prop_assert!(data.get_predecessor(&source).is_none());
    }

    #[test]
    fn distances_match_bellman_ford(edges in edge_lists(), source in 0..NUMBER_OF_VERTICES) {
        let graph = build_graph(&edges);
        let expected = bellman_ford(&graph, source);

        for kind in QueueKind::ALL {
            let mut queue = kind.new_queue();
            let data = shortest_paths_with_queue(&graph, &mut *queue, &source);
            let distances: HashMap<u8, Distance> =
                data.distances().iter().map(|(&vertex, &distance)| (vertex, distance)).collect();
            prop_assert_eq!(&distances, &expected, "{:?}", kind);
        }
    }

    #[test]
    fn triangle_inequality_holds(edges in edge_lists(), source in 0..NUMBER_OF_VERTICES) {
        let graph = build_graph(&edges);
        let data = shortest_paths(&graph, &source);

        for edge in graph.edges() {
            if let Some(distance_tail) = data.get_distance(&edge.tail) {
                let distance_head = data.get_distance(&edge.head);
                prop_assert!(distance_head.is_some());
                prop_assert!(distance_head.unwrap() <= distance_tail + Distance::from(edge.weight));
            }
        }
    }

    #[test]
    fn predecessors_lie_on_shortest_paths(edges in edge_lists(), source in 0..NUMBER_OF_VERTICES) {
        let graph = build_graph(&edges);
        let data = shortest_paths(&graph, &source);

        for (vertex, predecessor) in data.predecessors() {
            let weight = graph.get_weight(predecessor, vertex);
            prop_assert!(weight.is_some());

            let distance_vertex = data.get_distance(vertex).unwrap();
            let distance_predecessor = data.get_distance(predecessor).unwrap();
            prop_assert!(distance_predecessor <= distance_vertex);
            prop_assert_eq!(distance_vertex, distance_predecessor + Distance::from(weight.unwrap()));
        }
    }

    #[test]
    fn paths_are_consistent(
        edges in edge_lists(),
        source in 0..NUMBER_OF_VERTICES,
        target in 0..NUMBER_OF_VERTICES,
    ) {
        let graph = build_graph(&edges);
        let data = shortest_paths(&graph, &source);

        match shortest_path(&graph, &source, &target) {
            Some(path) => {
                prop_assert_eq!(path.source(), Some(&source));
                prop_assert_eq!(path.target(), Some(&target));
                prop_assert_eq!(Some(path.distance), data.get_distance(&target));
                prop_assert_eq!(path_distance(&graph, &path.vertices), Some(path.distance));
            }
            None => prop_assert!(!data.is_reachable(&target)),
        }
    }

    #[test]
    fn contraction_keeps_remaining_distances(
        edges in edge_lists(),
        contracted in 0..NUMBER_OF_VERTICES,
        source in 0..NUMBER_OF_VERTICES,
    ) {
        prop_assume!(source != contracted);
        let graph = build_graph(&edges);
        let mut reduced = graph.clone();
        reduced.contract_vertex(&contracted).unwrap();

        let mut expected = bellman_ford(&graph, source);
        expected.remove(&contracted);
        let actual: HashMap<u8, Distance> = shortest_paths(&reduced, &source)
            .distances()
            .iter()
            .map(|(&vertex, &distance)| (vertex, distance))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn queue_extracts_like_a_sorted_model(operations in queue_operations()) {
        let mut queue = IndexedPriorityQueue::new();
        // item -> (priority, first insertion)
        let mut model: HashMap<u8, (u32, usize)> = HashMap::new();

        for (step, operation) in operations.into_iter().enumerate() {
            match operation {
                QueueOperation::Push(item, priority) => {
                    queue.push(item, priority);
                    let entry = model.entry(item).or_insert((priority, step));
                    entry.0 = priority;
                }
                QueueOperation::Pop => {
                    let expected = model
                        .iter()
                        .min_by_key(|(_, &(priority, inserted))| (priority, inserted))
                        .map(|(&item, &(priority, _))| (item, priority));
                    if let Some((item, _)) = expected {
                        model.remove(&item);
                    }
                    prop_assert_eq!(queue.pop(), expected);
                }
            }
            prop_assert_eq!(queue.len(), model.len());
        }

        let mut last = None;
        while let Some((_, priority)) = queue.pop() {
            prop_assert!(last <= Some(priority));
            last = Some(priority);
        }
    }
}
