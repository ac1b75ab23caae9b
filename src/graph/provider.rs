//! Read-only graph interface consumed by the centrality engine

use std::fmt;
use std::str::FromStr;

use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::error::ClosenessError;

/// Which edges are followed when walking away from a vertex
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeighborMode {
    /// Follow edges from source to target
    #[default]
    Out,
    /// Follow edges from target to source
    In,
    /// Ignore edge direction
    All,
}

impl fmt::Display for NeighborMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NeighborMode::Out => "out",
            NeighborMode::In => "in",
            NeighborMode::All => "all",
        };
        f.write_str(name)
    }
}

impl FromStr for NeighborMode {
    type Err = ClosenessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "out" => Ok(NeighborMode::Out),
            "in" => Ok(NeighborMode::In),
            "all" | "both" => Ok(NeighborMode::All),
            other => Err(ClosenessError::InvalidArgument(format!(
                "unknown neighbor mode '{}', expected one of out, in, all",
                other
            ))),
        }
    }
}

/// One edge incident on a vertex, seen from that vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incidence {
    /// Vertex at the other end of the edge
    pub neighbor: usize,

    /// Edge id, used to look up the edge weight
    pub edge: usize,
}

/// Graph access required by the closeness engine.
///
/// Vertices are `0..vertex_count()` and edges `0..edge_count()`. Implementations
/// must not change while a computation borrows them. On undirected graphs the
/// mode is ignored and every incident edge is returned.
pub trait GraphProvider {
    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn is_directed(&self) -> bool;

    /// Edges incident on `vertex` that can be walked in the given mode
    fn incident(&self, vertex: usize, mode: NeighborMode) -> Vec<Incidence>;
}

impl<N, E, Ty, Ix> GraphProvider for petgraph::Graph<N, E, Ty, Ix>
where
    Ty: petgraph::EdgeType,
    Ix: petgraph::graph::IndexType,
{
    fn vertex_count(&self) -> usize {
        self.node_count()
    }

    fn edge_count(&self) -> usize {
        petgraph::Graph::edge_count(self)
    }

    fn is_directed(&self) -> bool {
        petgraph::Graph::is_directed(self)
    }

    fn incident(&self, vertex: usize, mode: NeighborMode) -> Vec<Incidence> {
        let node = petgraph::graph::NodeIndex::<Ix>::new(vertex);
        let other = |source: usize, target: usize| if source == vertex { target } else { source };

        let directions: &[Direction] = if !self.is_directed() {
            &[Direction::Outgoing]
        } else {
            match mode {
                NeighborMode::Out => &[Direction::Outgoing],
                NeighborMode::In => &[Direction::Incoming],
                NeighborMode::All => &[Direction::Outgoing, Direction::Incoming],
            }
        };

        let mut incident = Vec::new();
        for &direction in directions {
            for edge in self.edges_directed(node, direction) {
                let source = edge.source().index();
                let target = edge.target().index();
                let neighbor = match (self.is_directed(), direction) {
                    (true, Direction::Outgoing) => target,
                    (true, Direction::Incoming) => source,
                    (false, _) => other(source, target),
                };
                incident.push(Incidence {
                    neighbor,
                    edge: edge.id().index(),
                });
            }
        }

        incident
    }
}
