use std::fmt::Debug;

use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};

use crate::{
    graphs::{Distance, Graph, Vertex},
    search::path::{Path, ShortestPathTestCase},
};

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    if let Ok(style) =
        ProgressStyle::with_template(" {msg} {wide_bar} estimated remaining: {eta_precise}")
    {
        bar.set_style(style);
    }
    bar
}

/// Logs to stderr. `RUST_LOG` takes precedence over `verbose`. Fails if a
/// global subscriber is already set.
pub fn init_tracing(verbose: bool) -> Result<(), TryInitError> {
    let level = if verbose {
        "faster_paths=debug"
    } else {
        "faster_paths=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

/// Sum of the edge weights along `vertices`, or `None` if two consecutive
/// vertices are not connected.
pub fn path_distance<T: Vertex>(graph: &dyn Graph<T>, vertices: &[T]) -> Option<Distance> {
    vertices
        .iter()
        .tuple_windows()
        .map(|(tail, head)| graph.get_weight(tail, head).map(Distance::from))
        .sum()
}

/// Check if a path is correct for a given test case.
pub fn validate_path<T: Vertex + Debug>(
    graph: &dyn Graph<T>,
    test_case: &ShortestPathTestCase<T>,
    path: &Option<Path<T>>,
) -> Result<(), String> {
    let (path, distance) = match (path, test_case.distance) {
        (Some(path), Some(distance)) => (path, distance),
        (None, None) => return Ok(()),
        (Some(_), None) => return Err("a path was found where there should be none".to_string()),
        (None, Some(_)) => return Err("no path is found but there should be one".to_string()),
    };

    if path.distance != distance {
        return Err(format!(
            "wrong path distance, expected {} but got {}",
            distance, path.distance
        ));
    }

    // Ensure first and last vertex of path are source and target of request.
    if path.source() != Some(&test_case.request.source) {
        return Err("first vertex of path is not source of request".to_string());
    }
    if path.target() != Some(&test_case.request.target) {
        return Err("last vertex of path is not target of request".to_string());
    }

    for (tail, head) in path.vertices.iter().tuple_windows() {
        if graph.get_weight(tail, head).is_none() {
            return Err(format!("no edge between {:?} and {:?} found", tail, head));
        }
    }

    match path_distance(graph, &path.vertices) {
        Some(true_distance) if true_distance == path.distance => Ok(()),
        _ => Err("sum of edge weights does not match path distance".to_string()),
    }
}
