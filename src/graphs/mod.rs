use std::hash::Hash;

use serde::{Deserialize, Serialize};

pub mod edge_list;
pub mod grid;
pub mod hash_graph;

pub type Weight = u32;
pub type Distance = u64;

/// Bound shared by every vertex type a graph can be built over.
///
/// Thread safety is not part of it. Only the parallel searches in
/// [`crate::search::fan_out`] ask for `Send + Sync` vertices and graphs, so
/// single threaded code may use `Rc` based vertices.
pub trait Vertex: Clone + Eq + Hash {}

impl<T: Clone + Eq + Hash> Vertex for T {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEdge<T> {
    pub tail: T,
    pub head: T,
    pub weight: Weight,
}

impl<T: Vertex> WeightedEdge<T> {
    pub fn new(tail: T, head: T, weight: Weight) -> WeightedEdge<T> {
        WeightedEdge { tail, head, weight }
    }

    pub fn reversed(&self) -> WeightedEdge<T> {
        WeightedEdge {
            tail: self.head.clone(),
            head: self.tail.clone(),
            weight: self.weight,
        }
    }
}

/// Read access to a directed graph with non-negative edge weights.
///
/// Queries only ever take `&self`, so a `Sync` implementation can be shared
/// between threads as `&(dyn Graph<T> + Sync)`.
pub trait Graph<T: Vertex> {
    fn number_of_vertices(&self) -> u32;

    fn number_of_edges(&self) -> u32 {
        self.vertices()
            .map(|vertex| self.out_edges(vertex).len() as u32)
            .sum::<u32>()
    }

    fn contains_vertex(&self, vertex: &T) -> bool;

    fn vertices(&self) -> Box<dyn Iterator<Item = &T> + '_>;

    /// Outgoing edges of `tail` as `(head, weight)` pairs. Unknown vertices
    /// have no outgoing edges.
    fn out_edges(&self, tail: &T) -> Box<dyn ExactSizeIterator<Item = (&T, Weight)> + '_>;

    fn get_weight(&self, tail: &T, head: &T) -> Option<Weight>;
}
