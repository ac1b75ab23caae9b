//! Error types for closeness computations

use thiserror::Error;

/// Errors raised by the indexed heap.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeapError {
    /// The index is already stored in the heap.
    #[error("index {0} is already present in the heap")]
    DuplicateKey(usize),

    /// The index is not stored in the heap.
    #[error("index {0} is not present in the heap")]
    NotFound(usize),

    /// Pop on an empty heap.
    #[error("heap is empty")]
    Empty,

    /// The index does not fit the capacity the heap was created with.
    #[error("index {index} is out of range for heap of capacity {capacity}")]
    OutOfRange { index: usize, capacity: usize },
}

/// Error type for closeness centrality calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClosenessError {
    /// Malformed argument such as an unknown neighbor mode or a negative cutoff.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Weight vector does not line up with the graph's edges.
    #[error("Invalid weight vector length: expected {expected}, got {actual}")]
    WeightLength { expected: usize, actual: usize },

    /// Requested vertex does not exist.
    #[error("Invalid vertex id {vertex} (graph has {vertex_count} vertices)")]
    InvalidVertex { vertex: usize, vertex_count: usize },

    /// Weights must be finite and strictly positive.
    #[error("Weight of edge {edge} must be positive, got {weight}")]
    InvalidWeight { edge: usize, weight: f64 },

    /// The interruption check tripped between two sources.
    #[error("Closeness computation was cancelled")]
    Cancelled,

    #[error("Heap error: {0}")]
    Heap(#[from] HeapError),
}

/// Result type for closeness calculations.
pub type Result<T> = std::result::Result<T, ClosenessError>;
