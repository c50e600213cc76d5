use thiserror::Error;

/// Top-level error type for the meshkit engine.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors raised while reading or walking mesh connectivity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("vertex index {index} is out of range (mesh has {vertex_count} vertices)")]
    InvalidVertexIndex { index: usize, vertex_count: usize },

    #[error("face not found")]
    FaceNotFound,

    #[error("face has {arity} corners, at least 3 are required")]
    DegenerateFace { arity: usize },

    #[error("half-edge {from} -> {to} has no owning face")]
    MissingHalfEdge { from: usize, to: usize },

    #[error("vertex {vertex} has no outgoing half-edge")]
    IsolatedVertex { vertex: usize },

    #[error("face fan around vertex {vertex} does not close")]
    OpenVertexFan { vertex: usize },

    #[error("vertex {vertex} joins more than one face fan")]
    NonManifoldVertex { vertex: usize },
}

/// Errors related to modifier and creator parameters.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised while converting faces to triangles.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;
