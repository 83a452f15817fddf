use serde::{Deserialize, Serialize};

use crate::graphs::Distance;

/// A path in a graph together with its total distance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path<T> {
    pub vertices: Vec<T>,
    pub distance: Distance,
}

impl<T> Path<T> {
    pub fn source(&self) -> Option<&T> {
        self.vertices.first()
    }

    pub fn target(&self) -> Option<&T> {
        self.vertices.last()
    }

    /// Number of edges along the path.
    pub fn number_of_edges(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// Represents a request for finding a shortest path in a graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathRequest<T> {
    pub source: T,
    pub target: T,
}

impl<T> ShortestPathRequest<T> {
    pub fn new(source: T, target: T) -> ShortestPathRequest<T> {
        ShortestPathRequest { source, target }
    }
}

/// A request along with the distance of a shortest path, if there exists
/// one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestCase<T> {
    pub request: ShortestPathRequest<T>,
    pub distance: Option<Distance>,
}
