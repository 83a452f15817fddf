use ahash::{HashMap, HashMapExt};

use crate::{
    graphs::{Distance, Vertex},
    search::path::Path,
};

/// Distances and predecessors of one single source search.
///
/// Vertices that were never reached have neither a distance nor a
/// predecessor. The source has distance 0 and no predecessor.
#[derive(Clone, Debug)]
pub struct ShortestPaths<T: Vertex> {
    source: T,
    distances: HashMap<T, Distance>,
    predecessors: HashMap<T, T>,
}

impl<T: Vertex> ShortestPaths<T> {
    pub fn new(source: T) -> Self {
        ShortestPaths {
            source,
            distances: HashMap::new(),
            predecessors: HashMap::new(),
        }
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    pub fn get_distance(&self, vertex: &T) -> Option<Distance> {
        self.distances.get(vertex).copied()
    }

    pub fn set_distance(&mut self, vertex: T, distance: Distance) {
        self.distances.insert(vertex, distance);
    }

    pub fn get_predecessor(&self, vertex: &T) -> Option<&T> {
        self.predecessors.get(vertex)
    }

    pub fn set_predecessor(&mut self, vertex: T, predecessor: T) {
        self.predecessors.insert(vertex, predecessor);
    }

    pub fn distances(&self) -> &HashMap<T, Distance> {
        &self.distances
    }

    pub fn predecessors(&self) -> &HashMap<T, T> {
        &self.predecessors
    }

    pub fn is_reachable(&self, vertex: &T) -> bool {
        self.distances.contains_key(vertex)
    }

    pub fn number_of_reached(&self) -> usize {
        self.distances.len()
    }

    /// A reached vertex with the largest distance and that distance, `None`
    /// if nothing was reached. Among equally far vertices any may be returned.
    pub fn farthest(&self) -> Option<(&T, Distance)> {
        self.distances
            .iter()
            .max_by_key(|(_, &distance)| distance)
            .map(|(vertex, &distance)| (vertex, distance))
    }

    pub fn max_distance(&self) -> Option<Distance> {
        self.distances.values().max().copied()
    }

    /// Constructs the path to `target` by tracing back predecessors. Returns
    /// `None` if `target` was not reached.
    pub fn get_path(&self, target: &T) -> Option<Path<T>> {
        let distance = self.get_distance(target)?;

        let mut vertices = vec![target.clone()];
        let mut current = target;
        while let Some(predecessor) = self.predecessors.get(current) {
            vertices.push(predecessor.clone());
            current = predecessor;
        }

        // Reverse the path to start from the source vertex.
        vertices.reverse();

        Some(Path { vertices, distance })
    }
}
