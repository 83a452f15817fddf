use std::{
    collections::hash_map::Entry::{Occupied, Vacant},
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use ahash::{HashMap, HashMapExt};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info};

use super::{Graph, Vertex, Weight, WeightedEdge};
use crate::error::GraphError;

/// Adjacency map graph over arbitrary hashable vertices.
///
/// Every vertex that was passed to [`HashGraph::add_node`] or appeared at
/// either end of an edge is registered, even if it has no outgoing edges.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Vertex + Serialize",
    deserialize = "T: Vertex + Deserialize<'de>"
))]
pub struct HashGraph<T: Vertex> {
    out_edges: HashMap<T, HashMap<T, Weight>>,
}

impl<T: Vertex> Default for HashGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Vertex> Graph<T> for HashGraph<T> {
    fn number_of_vertices(&self) -> u32 {
        self.out_edges.len() as u32
    }

    fn number_of_edges(&self) -> u32 {
        self.out_edges.values().map(HashMap::len).sum::<usize>() as u32
    }

    fn contains_vertex(&self, vertex: &T) -> bool {
        self.out_edges.contains_key(vertex)
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.out_edges.keys())
    }

    fn out_edges(&self, tail: &T) -> Box<dyn ExactSizeIterator<Item = (&T, Weight)> + '_> {
        match self.out_edges.get(tail) {
            Some(edges) => Box::new(edges.iter().map(|(head, &weight)| (head, weight))),
            None => Box::new(std::iter::empty()),
        }
    }

    fn get_weight(&self, tail: &T, head: &T) -> Option<Weight> {
        self.out_edges.get(tail)?.get(head).copied()
    }
}

impl<T: Vertex> HashGraph<T> {
    pub fn new() -> Self {
        HashGraph {
            out_edges: HashMap::new(),
        }
    }

    pub fn from_edges(edges: &[WeightedEdge<T>]) -> HashGraph<T> {
        let mut graph = HashGraph::new();
        edges.iter().for_each(|edge| {
            graph.add_edge(edge.tail.clone(), edge.head.clone(), edge.weight);
        });
        graph
    }

    /// Registers `vertex` without touching edges it may already have.
    pub fn add_node(&mut self, vertex: T) {
        self.out_edges.entry(vertex).or_default();
    }

    /// Sets the weight of `tail -> head`, replacing any previous weight.
    pub fn add_edge(&mut self, tail: T, head: T, weight: Weight) {
        self.out_edges.entry(head.clone()).or_default();
        self.out_edges.entry(tail).or_default().insert(head, weight);
    }

    /// Like [`HashGraph::add_edge`] for weights that come from untyped input.
    pub fn try_add_edge(&mut self, tail: T, head: T, weight: i64) -> Result<(), GraphError> {
        let weight = Weight::try_from(weight).map_err(|_| GraphError::InvalidWeight { weight })?;
        self.add_edge(tail, head, weight);
        Ok(())
    }

    pub fn add_edge_bidirectional(&mut self, edge: &WeightedEdge<T>) {
        let reversed = edge.reversed();
        self.add_edge(edge.tail.clone(), edge.head.clone(), edge.weight);
        self.add_edge(reversed.tail, reversed.head, reversed.weight);
    }

    /// Adds `tail -> head` unless an edge of at most `weight` already exists.
    pub fn add_edge_min(&mut self, tail: T, head: T, weight: Weight) {
        self.out_edges.entry(head.clone()).or_default();
        match self.out_edges.entry(tail).or_default().entry(head) {
            Occupied(mut o) => {
                let current_weight = o.get_mut();
                if weight < *current_weight {
                    *current_weight = weight;
                }
            }
            Vacant(v) => {
                v.insert(weight);
            }
        }
    }

    /// Incoming edges of `head` as `(tail, weight)` pairs. Needs a scan over
    /// all vertices, only outgoing edges are indexed.
    pub fn in_edges(&self, head: &T) -> Vec<(T, Weight)> {
        self.out_edges
            .iter()
            .filter_map(|(tail, heads)| heads.get(head).map(|&weight| (tail.clone(), weight)))
            .collect()
    }

    /// Removes `vertex` with all edges leading into or out of it. Returns
    /// `false` if it was not part of the graph.
    pub fn remove_vertex(&mut self, vertex: &T) -> bool {
        if self.out_edges.remove(vertex).is_none() {
            return false;
        }
        self.out_edges.values_mut().for_each(|heads| {
            heads.remove(vertex);
        });
        true
    }

    /// Removes `vertex` and bridges it: every `tail -> vertex -> head` becomes
    /// a shortcut `tail -> head` weighing the sum of both edges, unless a
    /// lighter edge is already there. Distances between the remaining
    /// vertices stay the same.
    ///
    /// Returns the shortcuts that were added or lowered. Fails without
    /// touching the graph if a shortcut does not fit into a [`Weight`].
    pub fn contract_vertex(&mut self, vertex: &T) -> Result<Vec<WeightedEdge<T>>, GraphError> {
        let Some(out_edges) = self.out_edges.get(vertex) else {
            return Ok(Vec::new());
        };

        // tail -> vertex -> head
        let mut shortcuts = Vec::new();
        for (tail, in_weight) in self.in_edges(vertex) {
            for (head, &out_weight) in out_edges {
                if &tail == vertex || head == vertex || &tail == head {
                    continue;
                }

                let weight = in_weight.checked_add(out_weight).ok_or(
                    GraphError::InvalidWeight {
                        weight: i64::from(in_weight) + i64::from(out_weight),
                    },
                )?;
                if weight < self.get_weight(&tail, head).unwrap_or(Weight::MAX) {
                    shortcuts.push(WeightedEdge::new(tail.clone(), head.clone(), weight));
                }
            }
        }

        self.remove_vertex(vertex);
        shortcuts.iter().for_each(|edge| {
            self.add_edge_min(edge.tail.clone(), edge.head.clone(), edge.weight);
        });

        debug!(shortcuts = shortcuts.len(), "contracted vertex");
        Ok(shortcuts)
    }

    /// Contracts every vertex `predicate` holds for. Returns how many were
    /// contracted.
    pub fn contract_vertices_where<F>(&mut self, mut predicate: F) -> Result<usize, GraphError>
    where
        F: FnMut(&T) -> bool,
    {
        let vertices: Vec<T> = self
            .out_edges
            .keys()
            .filter(|&vertex| predicate(vertex))
            .cloned()
            .collect();

        for vertex in &vertices {
            self.contract_vertex(vertex)?;
        }

        info!(
            contracted = vertices.len(),
            vertices = self.number_of_vertices(),
            edges = self.number_of_edges(),
            "contracted vertices"
        );
        Ok(vertices.len())
    }

    pub fn edges(&self) -> Vec<WeightedEdge<T>> {
        self.out_edges
            .iter()
            .flat_map(|(tail, heads)| {
                heads
                    .iter()
                    .map(|(head, &weight)| WeightedEdge::new(tail.clone(), head.clone(), weight))
            })
            .collect()
    }
}

impl<T: Vertex + Serialize> HashGraph<T> {
    pub fn write_bincode(&self, path: &Path) -> Result<(), GraphError> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        info!(
            path = %path.display(),
            vertices = self.number_of_vertices(),
            edges = self.number_of_edges(),
            "wrote graph snapshot"
        );
        Ok(())
    }
}

impl<T: Vertex + DeserializeOwned> HashGraph<T> {
    pub fn read_bincode(path: &Path) -> Result<HashGraph<T>, GraphError> {
        let reader = BufReader::new(File::open(path)?);
        let graph: HashGraph<T> = bincode::deserialize_from(reader)?;
        info!(
            path = %path.display(),
            vertices = graph.number_of_vertices(),
            edges = graph.number_of_edges(),
            "read graph snapshot"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwriting_an_edge_keeps_the_last_weight() {
        let mut graph = HashGraph::new();
        graph.add_edge("u", "v", 5);
        graph.add_edge("u", "v", 3);

        assert_eq!(graph.get_weight(&"u", &"v"), Some(3));
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.out_edges(&"u").len(), 1);
    }

    #[test]
    fn heads_are_registered_as_vertices() {
        let mut graph = HashGraph::new();
        graph.add_edge(1, 2, 7);

        assert!(graph.contains_vertex(&2));
        assert_eq!(graph.out_edges(&2).len(), 0);
        assert_eq!(graph.number_of_vertices(), 2);
    }

    #[test]
    fn add_node_keeps_existing_edges() {
        let mut graph = HashGraph::new();
        graph.add_edge('a', 'b', 1);
        graph.add_node('a');
        graph.add_node('z');

        assert_eq!(graph.get_weight(&'a', &'b'), Some(1));
        assert!(graph.contains_vertex(&'z'));
        assert_eq!(graph.number_of_vertices(), 3);
    }

    #[test]
    fn negative_weights_are_rejected() {
        let mut graph = HashGraph::new();
        let result = graph.try_add_edge(0, 1, -4);

        assert!(matches!(
            result,
            Err(GraphError::InvalidWeight { weight: -4 })
        ));
        assert_eq!(graph.number_of_edges(), 0);

        graph.try_add_edge(0, 1, 4).unwrap();
        assert_eq!(graph.get_weight(&0, &1), Some(4));
    }

    #[test]
    fn oversized_weights_are_rejected() {
        let mut graph = HashGraph::new();
        let weight = Weight::MAX as i64 + 1;

        assert!(matches!(
            graph.try_add_edge(0, 1, weight),
            Err(GraphError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn unknown_vertices_have_no_out_edges() {
        let graph: HashGraph<u32> = HashGraph::new();

        assert_eq!(graph.out_edges(&42).len(), 0);
        assert!(!graph.contains_vertex(&42));
    }

    #[test]
    fn bidirectional_edges() {
        let mut graph = HashGraph::new();
        graph.add_edge_bidirectional(&WeightedEdge::new("x", "y", 9));

        assert_eq!(graph.get_weight(&"x", &"y"), Some(9));
        assert_eq!(graph.get_weight(&"y", &"x"), Some(9));
    }

    #[test]
    fn add_edge_min_keeps_the_lighter_weight() {
        let mut graph = HashGraph::new();
        graph.add_edge_min('a', 'b', 5);
        graph.add_edge_min('a', 'b', 7);
        assert_eq!(graph.get_weight(&'a', &'b'), Some(5));

        graph.add_edge_min('a', 'b', 2);
        assert_eq!(graph.get_weight(&'a', &'b'), Some(2));
        assert!(graph.contains_vertex(&'b'));
    }

    #[test]
    fn removed_vertex_loses_edges_in_both_directions() {
        let mut graph = HashGraph::new();
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 3, 1);
        graph.add_edge(3, 2, 1);
        graph.add_edge(1, 3, 4);

        assert!(graph.remove_vertex(&2));
        assert!(!graph.contains_vertex(&2));
        assert_eq!(graph.number_of_vertices(), 2);
        assert_eq!(graph.edges(), vec![WeightedEdge::new(1, 3, 4)]);
        assert!(graph.in_edges(&2).is_empty());

        assert!(!graph.remove_vertex(&2));
    }

    #[test]
    fn contraction_bridges_in_and_out_neighbours() {
        // a -> m -> c costs 3, the direct a -> c costs 5
        // b -> m -> c costs 4, the direct b -> c costs 2
        let mut graph = HashGraph::new();
        graph.add_edge('a', 'm', 1);
        graph.add_edge('b', 'm', 2);
        graph.add_edge('m', 'c', 2);
        graph.add_edge('a', 'c', 5);
        graph.add_edge('b', 'c', 2);

        let shortcuts = graph.contract_vertex(&'m').unwrap();

        assert_eq!(shortcuts, vec![WeightedEdge::new('a', 'c', 3)]);
        assert!(!graph.contains_vertex(&'m'));
        assert_eq!(graph.get_weight(&'a', &'c'), Some(3));
        assert_eq!(graph.get_weight(&'b', &'c'), Some(2));
        assert_eq!(graph.number_of_edges(), 2);
    }

    #[test]
    fn contraction_adds_no_self_loops() {
        let mut graph = HashGraph::new();
        graph.add_edge_bidirectional(&WeightedEdge::new("x", "hub", 1));
        graph.add_edge_bidirectional(&WeightedEdge::new("y", "hub", 2));
        graph.add_edge("hub", "hub", 1);

        graph.contract_vertex(&"hub").unwrap();

        assert_eq!(graph.get_weight(&"x", &"y"), Some(3));
        assert_eq!(graph.get_weight(&"y", &"x"), Some(3));
        assert_eq!(graph.get_weight(&"x", &"x"), None);
        assert_eq!(graph.number_of_edges(), 2);
    }

    #[test]
    fn contracting_an_unknown_vertex_changes_nothing() {
        let mut graph = HashGraph::new();
        graph.add_edge(0, 1, 1);

        assert!(graph.contract_vertex(&7).unwrap().is_empty());
        assert_eq!(graph.number_of_vertices(), 2);
    }

    #[test]
    fn overflowing_shortcut_leaves_the_graph_untouched() {
        let mut graph = HashGraph::new();
        graph.add_edge(0, 1, Weight::MAX);
        graph.add_edge(1, 2, 1);

        assert!(matches!(
            graph.contract_vertex(&1),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(graph.contains_vertex(&1));
        assert_eq!(graph.number_of_edges(), 2);
    }

    #[test]
    fn contracting_all_vertices_without_flow() {
        // valves with a flow rate of zero are only corridors
        let flow = |valve: &&str| match *valve {
            "AA" | "DD" => 20,
            _ => 0,
        };
        let mut graph = HashGraph::new();
        for (tail, head) in [("AA", "BB"), ("BB", "CC"), ("CC", "DD")] {
            graph.add_edge_bidirectional(&WeightedEdge::new(tail, head, 1));
        }

        let contracted = graph.contract_vertices_where(|valve| flow(valve) == 0).unwrap();

        assert_eq!(contracted, 2);
        assert_eq!(graph.number_of_vertices(), 2);
        assert_eq!(graph.get_weight(&"AA", &"DD"), Some(3));
        assert_eq!(graph.get_weight(&"DD", &"AA"), Some(3));
    }

    #[test]
    fn snapshot_survives_a_round_trip() {
        let mut graph = HashGraph::new();
        graph.add_edge("a".to_string(), "b".to_string(), 1);
        graph.add_node("lonely".to_string());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.bincode");
        graph.write_bincode(&path).unwrap();
        let read: HashGraph<String> = HashGraph::read_bincode(&path).unwrap();

        assert_eq!(read.number_of_vertices(), 3);
        assert_eq!(
            read.get_weight(&"a".to_string(), &"b".to_string()),
            Some(1)
        );
        assert!(read.contains_vertex(&"lonely".to_string()));
    }
}
