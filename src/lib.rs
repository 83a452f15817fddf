pub mod error;
pub mod graphs;
pub mod search;
pub mod utility;

pub use error::GraphError;
pub use graphs::{hash_graph::HashGraph, Distance, Graph, Weight};
pub use search::{
    collections::{dijkstra_data::ShortestPaths, priority_queue::IndexedPriorityQueue},
    dijkstra::{shortest_path, shortest_paths},
    path::Path,
};
