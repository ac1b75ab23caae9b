//! Memory-efficient graph representation

use std::mem;
use serde::{Serialize, Deserialize};

use crate::graph::provider::{GraphProvider, Incidence, NeighborMode};

/// Compressed sparse representation of a graph with stable edge ids.
///
/// Edge `e` connects `from[e]` to `to[e]`. Edge ids are kept in two CSR
/// incidence arrays: one grouped by source vertex and one grouped by target
/// vertex, so both walking directions are a slice lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Whether edge direction is meaningful
    pub directed: bool,

    /// Source vertex of each edge
    pub from: Vec<u32>,

    /// Target vertex of each edge
    pub to: Vec<u32>,

    /// Offset array: out_offsets[i] to out_offsets[i+1] is the range of
    /// edge ids leaving node i in `out_edges`
    pub out_offsets: Vec<u32>,

    /// Edge ids grouped by source vertex
    pub out_edges: Vec<u32>,

    /// Offset array for `in_edges`
    pub in_offsets: Vec<u32>,

    /// Edge ids grouped by target vertex
    pub in_edges: Vec<u32>,

    /// Optional mapping from internal node IDs to original string IDs
    pub node_ids: Option<Vec<String>>,
}

impl CompressedGraph {
    /// Build the graph from an edge list over `node_count` vertices
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is not below `node_count`. [`GraphBuilder`]
    /// assigns indices itself and never hits this.
    ///
    /// [`GraphBuilder`]: crate::graph::GraphBuilder
    pub fn from_edges(node_count: usize, directed: bool, edges: &[(u32, u32)]) -> Self {
        let from: Vec<u32> = edges.iter().map(|&(src, _)| src).collect();
        let to: Vec<u32> = edges.iter().map(|&(_, dst)| dst).collect();

        let (out_offsets, out_edges) = Self::group_edges(node_count, &from);
        let (in_offsets, in_edges) = Self::group_edges(node_count, &to);

        Self {
            node_count,
            directed,
            from,
            to,
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
            node_ids: None,
        }
    }

    /// Counting sort of edge ids by the given endpoint
    fn group_edges(node_count: usize, endpoint: &[u32]) -> (Vec<u32>, Vec<u32>) {
        let mut counts = vec![0u32; node_count];
        for &node in endpoint {
            counts[node as usize] += 1;
        }

        // Calculate offsets
        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        let mut current_offset = 0;
        for &count in &counts {
            current_offset += count;
            offsets.push(current_offset);
        }

        // Fill in edge ids, keeping insertion order within each node
        let mut grouped = vec![0u32; endpoint.len()];
        let mut current_pos = vec![0u32; node_count];
        for (edge, &node) in endpoint.iter().enumerate() {
            let node = node as usize;
            let pos = (offsets[node] + current_pos[node]) as usize;
            grouped[pos] = edge as u32;
            current_pos[node] += 1;
        }

        (offsets, grouped)
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.from.len()
    }

    /// Ids of edges leaving a node
    pub fn outgoing_edges(&self, node: usize) -> &[u32] {
        let start = self.out_offsets[node] as usize;
        let end = self.out_offsets[node + 1] as usize;
        &self.out_edges[start..end]
    }

    /// Ids of edges entering a node
    pub fn incoming_edges(&self, node: usize) -> &[u32] {
        let start = self.in_offsets[node] as usize;
        let end = self.in_offsets[node + 1] as usize;
        &self.in_edges[start..end]
    }

    /// Endpoints of an edge
    pub fn endpoints(&self, edge: usize) -> (usize, usize) {
        (self.from[edge] as usize, self.to[edge] as usize)
    }

    /// Get out-degree of a node
    pub fn out_degree(&self, node: usize) -> usize {
        self.outgoing_edges(node).len()
    }

    /// Get in-degree of a node
    pub fn in_degree(&self, node: usize) -> usize {
        self.incoming_edges(node).len()
    }

    /// Original string id of a node, or its index when no ids were recorded
    pub fn node_label(&self, node: usize) -> String {
        self.node_ids
            .as_ref()
            .and_then(|ids| ids.get(node).cloned())
            .unwrap_or_else(|| node.to_string())
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let endpoints = (self.from.capacity() + self.to.capacity()) * mem::size_of::<u32>();
        let outgoing = (self.out_offsets.capacity() + self.out_edges.capacity()) * mem::size_of::<u32>();
        let incoming = (self.in_offsets.capacity() + self.in_edges.capacity()) * mem::size_of::<u32>();

        // Add node IDs if present
        let ids = self.node_ids.as_ref()
            .map(|ids| ids.iter().map(|s| s.capacity()).sum::<usize>())
            .unwrap_or(0);

        base + endpoints + outgoing + incoming + ids
    }
}

impl GraphProvider for CompressedGraph {
    fn vertex_count(&self) -> usize {
        self.node_count
    }

    fn edge_count(&self) -> usize {
        self.from.len()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn incident(&self, vertex: usize, mode: NeighborMode) -> Vec<Incidence> {
        let mode = if self.directed { mode } else { NeighborMode::All };

        let mut incident = Vec::new();
        if matches!(mode, NeighborMode::Out | NeighborMode::All) {
            incident.extend(self.outgoing_edges(vertex).iter().map(|&edge| Incidence {
                neighbor: self.to[edge as usize] as usize,
                edge: edge as usize,
            }));
        }
        if matches!(mode, NeighborMode::In | NeighborMode::All) {
            incident.extend(self.incoming_edges(vertex).iter().map(|&edge| Incidence {
                neighbor: self.from[edge as usize] as usize,
                edge: edge as usize,
            }));
        }

        incident
    }
}
