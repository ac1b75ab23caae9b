//! Graph construction module

use anyhow::{anyhow, Result};
use crate::graph::{CompressedGraph, LoadedGraph};
use std::collections::HashMap;

/// Builder for incrementally constructing a CompressedGraph
pub struct GraphBuilder {
    /// Whether the built graph is directed
    directed: bool,

    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs
    node_ids: Vec<String>,

    /// Edge endpoints in insertion order (this order becomes the edge id)
    edges: Vec<(u32, u32)>,

    /// Edge weights, parallel to `edges`
    weights: Vec<f64>,

    /// Number of edges added without a weight
    unweighted_edges: usize,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(directed: bool, capacity: usize) -> Self {
        Self {
            directed,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            edges: Vec::with_capacity(capacity),
            weights: Vec::new(),
            unweighted_edges: 0,
        }
    }

    /// Number of nodes seen so far
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Get or create a node ID for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        // Create a new node
        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());

        idx
    }

    /// Add an unweighted edge from one node to another
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);

        self.edges.push((src_idx, dst_idx));
        self.unweighted_edges += 1;
    }

    /// Add a weighted edge from one node to another
    pub fn add_weighted_edge(&mut self, src_id: &str, dst_id: &str, weight: f64) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);

        self.edges.push((src_idx, dst_idx));
        self.weights.push(weight);
    }

    /// Build the compressed graph.
    ///
    /// Fails when only some of the edges carry a weight. Weight values are not
    /// validated here; the centrality computation checks them.
    pub fn build(self) -> Result<LoadedGraph> {
        if !self.weights.is_empty() && self.unweighted_edges > 0 {
            return Err(anyhow!(
                "{} of {} edges have no weight; either all or none of the edges must be weighted",
                self.unweighted_edges,
                self.edges.len()
            ));
        }

        let mut graph = CompressedGraph::from_edges(self.node_ids.len(), self.directed, &self.edges);
        graph.node_ids = Some(self.node_ids);

        let weights = if self.weights.is_empty() {
            None
        } else {
            Some(self.weights)
        };

        Ok(LoadedGraph { graph, weights })
    }
}
