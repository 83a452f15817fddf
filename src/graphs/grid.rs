use serde::{Deserialize, Serialize};

use super::{hash_graph::HashGraph, Weight};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Position {
        Position { row, column }
    }

    /// Up, down, left and right neighbours that exist in `cells`.
    pub fn neighbors<C>(&self, cells: &[Vec<C>]) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);

        if self.row > 0 {
            neighbors.push(Position::new(self.row - 1, self.column));
        }
        if self.row + 1 < cells.len() {
            neighbors.push(Position::new(self.row + 1, self.column));
        }
        if self.column > 0 {
            neighbors.push(Position::new(self.row, self.column - 1));
        }
        neighbors.push(Position::new(self.row, self.column + 1));

        // rows may be ragged, so check the neighbour's own row
        neighbors.retain(|neighbor| {
            cells
                .get(neighbor.row)
                .is_some_and(|row| neighbor.column < row.len())
        });
        neighbors
    }
}

/// Builds a graph with one vertex per cell and an edge to each of the four
/// neighbours for which `weight` returns `Some`.
///
/// `weight` is called as `weight(from_cell, to_cell)`, so height limited
/// climbing and cost-of-entering-a-cell grids can both be expressed.
pub fn grid_graph<C, F>(cells: &[Vec<C>], weight: F) -> HashGraph<Position>
where
    F: Fn(&C, &C) -> Option<Weight>,
{
    let mut graph = HashGraph::new();

    for (row, line) in cells.iter().enumerate() {
        for (column, cell) in line.iter().enumerate() {
            let tail = Position::new(row, column);
            graph.add_node(tail);

            for head in tail.neighbors(cells) {
                if let Some(weight) = weight(cell, &cells[head.row][head.column]) {
                    graph.add_edge(tail, head, weight);
                }
            }
        }
    }

    graph
}
