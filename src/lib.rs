//! Closeness centrality for large graphs
//!
//! Scores are computed for a chosen set of vertices with breadth-first search
//! on unweighted graphs and Dijkstra on weighted ones, optionally limited to
//! paths no longer than a cutoff.

pub mod config;
pub mod error;
pub mod graph;
pub mod centrality;
pub mod data;
pub mod storage;

pub use centrality::{
    all_vertices, closeness, closeness_estimate, resolve_vertices, ClosenessEstimator,
    ClosenessReport, ClosenessWarning, InterruptCheck, ProgressSink,
};
pub use config::ClosenessConfig;
pub use error::{ClosenessError, HeapError};
pub use graph::{CompressedGraph, GraphBuilder, GraphProvider, Incidence, NeighborMode};
