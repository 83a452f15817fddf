use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::info;

use super::{hash_graph::HashGraph, Graph};
use crate::error::GraphError;

/// Reads a graph from a whitespace separated edge list.
///
/// ```text
/// # comment
/// tail head weight
/// isolated_vertex
/// ```
pub fn read_edge_list(path: &Path) -> Result<HashGraph<String>, GraphError> {
    let reader = BufReader::new(File::open(path)?);
    let graph = parse_edge_list(reader)?;
    info!(
        path = %path.display(),
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        "read edge list"
    );
    Ok(graph)
}

pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<HashGraph<String>, GraphError> {
    let mut graph = HashGraph::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let line = line.trim();

        // skip comment and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let values: Vec<&str> = line.split_whitespace().collect();
        match values.as_slice() {
            [vertex] => graph.add_node(vertex.to_string()),
            [tail, head, weight] => {
                let weight: i64 = weight.parse().map_err(|_| GraphError::Parse {
                    line: line_number,
                    message: format!("unable to parse weight '{}'", weight),
                })?;
                graph.try_add_edge(tail.to_string(), head.to_string(), weight)?;
            }
            _ => {
                return Err(GraphError::Parse {
                    line: line_number,
                    message: format!(
                        "expected 'vertex' or 'tail head weight', found {} fields",
                        values.len()
                    ),
                })
            }
        }
    }

    Ok(graph)
}
