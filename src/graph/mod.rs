//! Graph representation and provider interface module

pub mod compressed;
pub mod builder;
pub mod provider;

pub use compressed::CompressedGraph;
pub use builder::GraphBuilder;
pub use provider::{GraphProvider, Incidence, NeighborMode};

/// A graph together with the optional weight of each edge, indexed by edge id
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: CompressedGraph,
    pub weights: Option<Vec<f64>>,
}
