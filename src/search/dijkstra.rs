use ahash::{HashSet, HashSetExt};
use tracing::debug;

use super::{
    collections::{
        dijkstra_data::ShortestPaths, distance_queue::DistanceQueue,
        priority_queue::IndexedPriorityQueue,
    },
    path::Path,
    PathFinding,
};
use crate::graphs::{Distance, Graph, Vertex};

/// Dijkstra over a borrowed graph, usable behind `&dyn PathFinding<T>`.
#[derive(Clone)]
pub struct Dijkstra<'a, T: Vertex> {
    graph: &'a dyn Graph<T>,
}

impl<'a, T: Vertex> Dijkstra<'a, T> {
    pub fn new(graph: &'a dyn Graph<T>) -> Dijkstra<'a, T> {
        Dijkstra { graph }
    }

    pub fn single_source(&self, source: &T) -> ShortestPaths<T> {
        shortest_paths(self.graph, source)
    }
}

impl<'a, T: Vertex> PathFinding<T> for Dijkstra<'a, T> {
    fn shortest_path(&self, source: &T, target: &T) -> Option<Path<T>> {
        shortest_path(self.graph, source, target)
    }

    fn shortest_path_distance(&self, source: &T, target: &T) -> Option<Distance> {
        shortest_path_distance(self.graph, source, target)
    }
}

/// Shortest distances and predecessors from `source` to every vertex it can
/// reach.
///
/// A source that is not part of the graph reaches nothing, not even itself,
/// and the returned data is empty.
pub fn shortest_paths<T: Vertex>(graph: &dyn Graph<T>, source: &T) -> ShortestPaths<T> {
    let mut queue = IndexedPriorityQueue::new();
    dijkstra(graph, &mut queue, source, None)
}

pub fn shortest_paths_with_queue<T: Vertex>(
    graph: &dyn Graph<T>,
    queue: &mut dyn DistanceQueue<T>,
    source: &T,
) -> ShortestPaths<T> {
    dijkstra(graph, queue, source, None)
}

/// Shortest path from `source` to `target`, or `None` if `target` can not be
/// reached. The search stops as soon as `target` is settled.
pub fn shortest_path<T: Vertex>(graph: &dyn Graph<T>, source: &T, target: &T) -> Option<Path<T>> {
    let mut queue = IndexedPriorityQueue::new();
    shortest_path_with_queue(graph, &mut queue, source, target)
}

pub fn shortest_path_with_queue<T: Vertex>(
    graph: &dyn Graph<T>,
    queue: &mut dyn DistanceQueue<T>,
    source: &T,
    target: &T,
) -> Option<Path<T>> {
    let data = dijkstra(graph, queue, source, Some(target));
    data.get_path(target)
}

pub fn shortest_path_distance<T: Vertex>(
    graph: &dyn Graph<T>,
    source: &T,
    target: &T,
) -> Option<Distance> {
    shortest_path(graph, source, target).map(|path| path.distance)
}

fn dijkstra<T: Vertex>(
    graph: &dyn Graph<T>,
    queue: &mut dyn DistanceQueue<T>,
    source: &T,
    target: Option<&T>,
) -> ShortestPaths<T> {
    let mut data = ShortestPaths::new(source.clone());
    queue.clear();

    if !graph.contains_vertex(source) {
        debug!("source is not part of the graph, nothing is reachable");
        return data;
    }

    let mut settled = HashSet::new();
    data.set_distance(source.clone(), 0);
    queue.insert(source.clone(), 0);

    while let Some((tail, _)) = queue.pop() {
        // lazy queues may hand out a vertex more than once
        if !settled.insert(tail.clone()) {
            continue;
        }
        if target == Some(&tail) {
            break;
        }

        let Some(distance_tail) = data.get_distance(&tail) else {
            continue;
        };

        for (head, weight) in graph.out_edges(&tail) {
            if settled.contains(head) {
                continue;
            }

            let alternative_distance_head = distance_tail + Distance::from(weight);
            let current_distance_head = data.get_distance(head).unwrap_or(Distance::MAX);
            if alternative_distance_head < current_distance_head {
                data.set_distance(head.clone(), alternative_distance_head);
                data.set_predecessor(head.clone(), tail.clone());
                queue.insert(head.clone(), alternative_distance_head);
            }
        }
    }

    debug!(
        settled = settled.len(),
        reached = data.number_of_reached(),
        "dijkstra finished"
    );

    data
}
