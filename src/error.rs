use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for kerfcheck.
#[derive(Debug, Error)]
pub enum KerfError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Check(#[from] CheckError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to topological structure.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors from shape-building operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors while reading or writing a shape document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse shape document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to serialize shape document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("unknown document format: {0}")]
    UnknownFormat(String),

    #[error("document version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },

    #[error("face {face} references missing edge {edge}")]
    DanglingEdge { face: usize, edge: usize },
}

/// Errors related to check configuration.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("kerf width must be positive and finite, got {0}")]
    InvalidKerfWidth(f64),
}

/// Convenience type alias for results using [`KerfError`].
pub type Result<T> = std::result::Result<T, KerfError>;
