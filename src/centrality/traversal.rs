//! Single-source shortest path sums

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::centrality::epsilon::cmp_epsilon;
use crate::centrality::heap::IndexedMaxHeap;
use crate::centrality::neighbors::LazyNeighborCache;
use crate::error::Result;
use crate::graph::GraphProvider;

/// What one traversal contributes to a closeness score
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SourceSummary {
    /// Sum of distances of every reached vertex, the source included at 0
    pub distance_sum: f64,

    /// Vertices reached, the source included
    pub reached: usize,

    /// Whether at least one reached vertex lay beyond the cutoff
    pub truncated: bool,
}

/// Scratch space reused across the traversals of one centrality call.
///
/// Nothing is cleared between sources. Every traversal takes a fresh
/// generation number and a vertex counts as seen only while its marker holds
/// the current generation; any other marker means the stored distance is stale.
pub struct TraversalState {
    /// Id of the running traversal; 0 is never used
    generation: u64,

    /// Generation that last reached each vertex
    markers: Vec<u64>,

    /// Best known distance, valid only where the marker is current
    distances: Vec<f64>,

    /// BFS work queue of (vertex, hop count)
    queue: VecDeque<(usize, u64)>,

    /// Dijkstra frontier keyed on negated distance
    heap: IndexedMaxHeap,
}

impl TraversalState {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            generation: 0,
            markers: vec![0; vertex_count],
            distances: vec![0.0; vertex_count],
            queue: VecDeque::with_capacity(100),
            heap: IndexedMaxHeap::new(vertex_count),
        }
    }

    /// Distance of `vertex` found by the most recent traversal
    pub fn distance(&self, vertex: usize) -> Option<f64> {
        self.is_current(vertex).then(|| self.distances[vertex])
    }

    fn is_current(&self, vertex: usize) -> bool {
        self.generation != 0 && self.markers[vertex] == self.generation
    }

    fn start(&mut self, source: usize) -> u64 {
        self.generation += 1;
        self.markers[source] = self.generation;
        self.distances[source] = 0.0;
        self.generation
    }

    /// Breadth-first traversal counting hops.
    ///
    /// Vertices are marked when enqueued. A vertex popped beyond the cutoff
    /// still counts but its neighbors are not expanded; the traversal goes on
    /// with the rest of the queue.
    pub fn bfs<G>(
        &mut self,
        cache: &LazyNeighborCache<'_, G>,
        source: usize,
        cutoff: Option<f64>,
    ) -> SourceSummary
    where
        G: GraphProvider + ?Sized,
    {
        let generation = self.start(source);
        self.queue.clear();
        self.queue.push_back((source, 0));

        let mut summary = SourceSummary::default();

        while let Some((vertex, hops)) = self.queue.pop_front() {
            summary.distance_sum += hops as f64;
            summary.reached += 1;

            if cutoff.map_or(false, |cutoff| hops as f64 > cutoff) {
                summary.truncated = true;
                continue;
            }

            for incidence in cache.get(vertex) {
                let neighbor = incidence.neighbor;
                if self.markers[neighbor] == generation {
                    continue;
                }
                self.markers[neighbor] = generation;
                self.distances[neighbor] = (hops + 1) as f64;
                self.queue.push_back((neighbor, hops + 1));
            }
        }

        summary
    }

    /// Dijkstra traversal over positive edge weights.
    ///
    /// `weights` must be indexed by edge id and already validated. A new path
    /// replaces a known one only when it is shorter by more than `epsilon`.
    pub fn dijkstra<G>(
        &mut self,
        cache: &LazyNeighborCache<'_, G>,
        weights: &[f64],
        source: usize,
        cutoff: Option<f64>,
        epsilon: f64,
    ) -> Result<SourceSummary>
    where
        G: GraphProvider + ?Sized,
    {
        let generation = self.start(source);
        self.heap.clear();
        self.heap.push(source, -0.0)?;

        let mut summary = SourceSummary::default();

        while !self.heap.is_empty() {
            let (vertex, key) = self.heap.pop_max()?;
            let distance = -key;

            summary.distance_sum += distance;
            summary.reached += 1;

            if cutoff.map_or(false, |cutoff| distance > cutoff) {
                summary.truncated = true;
                continue;
            }

            for incidence in cache.get(vertex) {
                let neighbor = incidence.neighbor;
                let candidate = distance + weights[incidence.edge];

                if self.markers[neighbor] != generation {
                    self.markers[neighbor] = generation;
                    self.distances[neighbor] = candidate;
                    self.heap.push(neighbor, -candidate)?;
                } else if cmp_epsilon(candidate, self.distances[neighbor], epsilon) == Ordering::Less {
                    self.distances[neighbor] = candidate;
                    self.heap.modify(neighbor, -candidate)?;
                }
            }
        }

        Ok(summary)
    }
}
