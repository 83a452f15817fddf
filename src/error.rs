use thiserror::Error;

/// Everything that can go wrong while building or querying a graph.
///
/// An unreachable target is not an error; queries report it as `None`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid edge weight {weight}, weights must be in 0..={max}", max = crate::graphs::Weight::MAX)]
    InvalidWeight { weight: i64 },

    #[error("extract from an empty priority queue")]
    EmptyQueue,

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("snapshot: {0}")]
    Bincode(#[from] bincode::Error),
}
