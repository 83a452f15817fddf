use path::Path;

use crate::graphs::{Distance, Vertex};

pub mod collections;
pub mod dijkstra;
pub mod fan_out;
pub mod path;

pub trait PathFinding<T: Vertex> {
    fn shortest_path(&self, source: &T, target: &T) -> Option<Path<T>>;

    fn shortest_path_distance(&self, source: &T, target: &T) -> Option<Distance>;
}
