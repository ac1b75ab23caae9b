//! Lazily materialized incidence lists

use std::sync::OnceLock;

use crate::graph::{GraphProvider, Incidence, NeighborMode};

/// Per-vertex incidence lists, fetched from the graph on first use and then kept.
///
/// Only vertices a traversal actually reaches are ever materialized, so
/// estimating closeness for a few sources in a large graph does not pay for
/// the full adjacency structure. Each slot is written at most once, which lets
/// parallel workers share one cache.
pub struct LazyNeighborCache<'g, G: ?Sized> {
    graph: &'g G,
    mode: NeighborMode,
    lists: Vec<OnceLock<Vec<Incidence>>>,
}

impl<'g, G: GraphProvider + ?Sized> LazyNeighborCache<'g, G> {
    pub fn new(graph: &'g G, mode: NeighborMode) -> Self {
        let lists = (0..graph.vertex_count()).map(|_| OnceLock::new()).collect();
        Self { graph, mode, lists }
    }

    pub fn mode(&self) -> NeighborMode {
        self.mode
    }

    /// Incidence list of `vertex`, computed on first access
    pub fn get(&self, vertex: usize) -> &[Incidence] {
        self.lists[vertex].get_or_init(|| self.graph.incident(vertex, self.mode))
    }

    /// Number of vertices whose list has been materialized
    pub fn materialized(&self) -> usize {
        self.lists.iter().filter(|slot| slot.get().is_some()).count()
    }
}
