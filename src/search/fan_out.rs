//! Independent queries from many sources against one shared, read-only graph.
//!
//! Each source runs its own search on a rayon worker. There is no
//! cancellation, every query runs to completion. These are the only
//! functions that need `Send + Sync` vertices and a `Sync` graph.

use rayon::prelude::*;
use tracing::debug;

use super::{
    collections::dijkstra_data::ShortestPaths,
    dijkstra::{shortest_path, shortest_paths},
    path::Path,
};
use crate::{
    error::GraphError,
    graphs::{hash_graph::HashGraph, Graph, Vertex, Weight},
};

/// The shortest of all paths from any of `sources` to `target`.
///
/// Sources that can not reach `target` are skipped. On equal distances the
/// source listed first wins.
pub fn shortest_path_from_any<T: Vertex + Send + Sync>(
    graph: &(dyn Graph<T> + Sync),
    sources: &[T],
    target: &T,
) -> Option<Path<T>> {
    let best = sources
        .par_iter()
        .enumerate()
        .filter_map(|(index, source)| {
            shortest_path(graph, source, target).map(|path| (index, path))
        })
        .min_by_key(|(index, path)| (path.distance, *index))
        .map(|(_, path)| path);

    debug!(
        sources = sources.len(),
        distance = best.as_ref().map(|path| path.distance),
        "fan out search finished"
    );

    best
}

/// One complete single source result per source, in the order of `sources`.
pub fn shortest_paths_from_all<T: Vertex + Send + Sync>(
    graph: &(dyn Graph<T> + Sync),
    sources: &[T],
) -> Vec<ShortestPaths<T>> {
    sources
        .par_iter()
        .map(|source| shortest_paths(graph, source))
        .collect()
}

/// Complete graph over `vertices`: an edge from each of them to every other
/// one it can reach in `graph`, weighted by the shortest distance.
///
/// Every entry of `vertices` becomes a vertex, even if it reaches nothing.
/// Fails if a distance does not fit into a [`Weight`].
pub fn metric_closure<T: Vertex + Send + Sync>(
    graph: &(dyn Graph<T> + Sync),
    vertices: &[T],
) -> Result<HashGraph<T>, GraphError> {
    let mut closure = HashGraph::new();

    for (tail, data) in vertices.iter().zip(shortest_paths_from_all(graph, vertices)) {
        closure.add_node(tail.clone());
        for head in vertices {
            if head == tail {
                continue;
            }
            let Some(distance) = data.get_distance(head) else {
                continue;
            };
            let weight = Weight::try_from(distance).map_err(|_| GraphError::InvalidWeight {
                weight: i64::try_from(distance).unwrap_or(i64::MAX),
            })?;
            closure.add_edge(tail.clone(), head.clone(), weight);
        }
    }

    debug!(
        vertices = closure.number_of_vertices(),
        edges = closure.number_of_edges(),
        "built metric closure"
    );

    Ok(closure)
}
