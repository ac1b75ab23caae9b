//! Closeness centrality estimation for a set of vertices
//!
//! The closeness of a vertex is the number of vertices minus one divided by
//! the sum of its shortest path lengths to (or from) every other vertex. A
//! vertex that cannot be reached, or lies beyond the cutoff, contributes the
//! vertex count instead of a path length. This keeps scores finite on
//! disconnected graphs; with a cutoff every score is at most the exact one.
//!
//! Unweighted graphs are traversed breadth-first, weighted graphs with
//! Dijkstra. Time complexity is O(k |E|) for k requested vertices
//! (O(k |E| log |V|) when weighted).

use std::collections::HashMap;

use rayon::prelude::*;

use crate::centrality::neighbors::LazyNeighborCache;
use crate::centrality::traversal::{SourceSummary, TraversalState};
use crate::centrality::{ClosenessReport, ClosenessWarning, InterruptCheck, ProgressSink};
use crate::config::ClosenessConfig;
use crate::error::{ClosenessError, Result};
use crate::graph::{CompressedGraph, GraphProvider};

/// Every vertex of the graph, in index order
pub fn all_vertices<G: GraphProvider + ?Sized>(graph: &G) -> Vec<usize> {
    (0..graph.vertex_count()).collect()
}

/// Map vertex ids to indices; an empty request selects every vertex
pub fn resolve_vertices<S: AsRef<str>>(graph: &CompressedGraph, ids: &[S]) -> Result<Vec<usize>> {
    if ids.is_empty() {
        return Ok(all_vertices(graph));
    }

    let index: HashMap<String, usize> = (0..graph.node_count)
        .map(|node| (graph.node_label(node), node))
        .collect();

    ids.iter()
        .map(|id| {
            let id = id.as_ref().trim();
            index
                .get(id)
                .copied()
                .ok_or_else(|| ClosenessError::InvalidArgument(format!("Unknown vertex id: {}", id)))
        })
        .collect()
}

/// Exact closeness: the configured cutoff is ignored
pub fn closeness<G>(
    graph: &G,
    vertices: &[usize],
    weights: Option<&[f64]>,
    config: &ClosenessConfig,
) -> Result<ClosenessReport>
where
    G: GraphProvider + Sync + ?Sized,
{
    let config = ClosenessConfig {
        cutoff: None,
        ..*config
    };
    closeness_estimate(graph, vertices, weights, &config)
}

/// Closeness considering only paths up to `config.cutoff`
pub fn closeness_estimate<G>(
    graph: &G,
    vertices: &[usize],
    weights: Option<&[f64]>,
    config: &ClosenessConfig,
) -> Result<ClosenessReport>
where
    G: GraphProvider + Sync + ?Sized,
{
    ClosenessEstimator::new(graph, *config)
        .weights(weights)
        .run(vertices)
}

/// Closeness computation with optional weights, progress reporting and cancellation
pub struct ClosenessEstimator<'a, G: ?Sized> {
    graph: &'a G,
    weights: Option<&'a [f64]>,
    config: ClosenessConfig,
    progress: Option<&'a mut dyn ProgressSink>,
    interrupt: Option<&'a (dyn InterruptCheck + Sync)>,
}

impl<'a, G> ClosenessEstimator<'a, G>
where
    G: GraphProvider + Sync + ?Sized,
{
    pub fn new(graph: &'a G, config: ClosenessConfig) -> Self {
        Self {
            graph,
            weights: None,
            config,
            progress: None,
            interrupt: None,
        }
    }

    /// Edge weights indexed by edge id; `None` selects the unweighted traversal
    pub fn weights(mut self, weights: Option<&'a [f64]>) -> Self {
        self.weights = weights;
        self
    }

    pub fn progress(mut self, sink: &'a mut dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    pub fn interrupt(mut self, check: &'a (dyn InterruptCheck + Sync)) -> Self {
        self.interrupt = Some(check);
        self
    }

    /// Compute one score per entry of `vertices`, in the same order.
    ///
    /// Arguments and weights are validated before any traversal runs; on error
    /// no scores are returned.
    pub fn run(mut self, vertices: &[usize]) -> Result<ClosenessReport> {
        self.config.validate()?;

        let vertex_count = self.graph.vertex_count();
        if let Some(&vertex) = vertices.iter().find(|&&v| v >= vertex_count) {
            return Err(ClosenessError::InvalidVertex { vertex, vertex_count });
        }

        let mut warnings = Vec::new();
        if let Some(weights) = self.weights {
            if let Some(warning) =
                check_weights(self.graph.edge_count(), weights, self.config.epsilon)?
            {
                log::warn!("{}", warning);
                warnings.push(warning);
            }
        }

        let cache = LazyNeighborCache::new(self.graph, self.config.mode);

        log::info!(
            "Computing {} closeness for {} vertices (mode: {}, cutoff: {:?})",
            if self.weights.is_some() { "weighted" } else { "unweighted" },
            vertices.len(),
            cache.mode(),
            self.config.cutoff
        );

        let summaries = if self.config.parallel {
            self.run_parallel(&cache, vertices)?
        } else {
            self.run_sequential(&cache, vertices)?
        };

        let disconnected = summaries
            .iter()
            .any(|s| s.reached < vertex_count && !s.truncated);
        if disconnected {
            let warning = ClosenessWarning::DisconnectedGraph;
            log::warn!("{}", warning);
            warnings.push(warning);
        }

        let scores = summaries
            .iter()
            .map(|summary| score(summary, vertex_count, self.config.normalized))
            .collect();

        log::info!(
            "Closeness computed for {} vertices, {} neighbor lists materialized",
            vertices.len(),
            cache.materialized()
        );

        Ok(ClosenessReport { scores, warnings })
    }

    fn run_sequential(
        &mut self,
        cache: &LazyNeighborCache<'_, G>,
        vertices: &[usize],
    ) -> Result<Vec<SourceSummary>> {
        let mut state = TraversalState::new(self.graph.vertex_count());
        let mut summaries = Vec::with_capacity(vertices.len());

        for (i, &source) in vertices.iter().enumerate() {
            self.report_progress(100.0 * i as f64 / vertices.len() as f64);
            if self.is_interrupted() {
                return Err(ClosenessError::Cancelled);
            }

            let summary = traverse(&mut state, cache, self.weights, &self.config, source)?;
            log::debug!(
                "Source {}: reached {} vertices, distance sum {}",
                source,
                summary.reached,
                summary.distance_sum
            );
            summaries.push(summary);
        }

        self.report_progress(100.0);
        Ok(summaries)
    }

    /// Each rayon worker gets its own traversal state; only the graph,
    /// weights and neighbor cache are shared.
    fn run_parallel(
        &mut self,
        cache: &LazyNeighborCache<'_, G>,
        vertices: &[usize],
    ) -> Result<Vec<SourceSummary>> {
        let vertex_count = self.graph.vertex_count();
        let weights = self.weights;
        let config = self.config;
        let interrupt = self.interrupt;

        self.report_progress(0.0);

        let summaries = vertices
            .par_iter()
            .map_init(
                || TraversalState::new(vertex_count),
                |state, &source| {
                    if interrupt.map_or(false, |check| check.is_interrupted()) {
                        return Err(ClosenessError::Cancelled);
                    }
                    traverse(state, cache, weights, &config, source)
                },
            )
            .collect::<Result<Vec<_>>>()?;

        self.report_progress(100.0);
        Ok(summaries)
    }

    fn report_progress(&mut self, percent: f64) {
        if let Some(sink) = self.progress.as_mut() {
            sink.report(percent);
        }
    }

    fn is_interrupted(&self) -> bool {
        self.interrupt.map_or(false, |check| check.is_interrupted())
    }
}

fn traverse<G>(
    state: &mut TraversalState,
    cache: &LazyNeighborCache<'_, G>,
    weights: Option<&[f64]>,
    config: &ClosenessConfig,
    source: usize,
) -> Result<SourceSummary>
where
    G: GraphProvider + ?Sized,
{
    match weights {
        Some(weights) => state.dijkstra(cache, weights, source, config.cutoff, config.epsilon),
        None => Ok(state.bfs(cache, source, config.cutoff)),
    }
}

/// Validate the weight vector, returning a warning when the smallest weight
/// is within the comparison tolerance
fn check_weights(
    edge_count: usize,
    weights: &[f64],
    epsilon: f64,
) -> Result<Option<ClosenessWarning>> {
    if weights.len() != edge_count {
        return Err(ClosenessError::WeightLength {
            expected: edge_count,
            actual: weights.len(),
        });
    }

    if let Some((edge, &weight)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w <= 0.0)
    {
        return Err(ClosenessError::InvalidWeight { edge, weight });
    }

    let min_weight = weights.iter().copied().fold(f64::INFINITY, f64::min);
    if !weights.is_empty() && min_weight <= epsilon {
        return Ok(Some(ClosenessWarning::NumericalPrecision { min_weight, epsilon }));
    }

    Ok(None)
}

/// Turn a traversal summary into a score. Unreached vertices add the vertex
/// count each; the arithmetic is done in f64 so large graphs cannot overflow.
fn score(summary: &SourceSummary, vertex_count: usize, normalized: bool) -> f64 {
    let n = vertex_count as f64;
    let total = summary.distance_sum + n * (n - summary.reached as f64);
    let score = (n - 1.0) / total;

    if normalized {
        score
    } else {
        score / (n - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CompressedGraph, NeighborMode};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn undirected(n: usize, edges: &[(u32, u32)]) -> CompressedGraph {
        CompressedGraph::from_edges(n, false, edges)
    }

    fn path5() -> CompressedGraph {
        undirected(5, &[(0, 1), (1, 2), (2, 3), (3, 4)])
    }

    fn config(normalized: bool) -> ClosenessConfig {
        ClosenessConfig::new(NeighborMode::All, None, normalized)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn path_graph_center() {
        let graph = path5();

        let report = closeness(&graph, &[2], None, &config(true)).unwrap();
        assert_close(report.scores[0], 4.0 / 6.0);
        assert!(report.warnings.is_empty());

        let report = closeness(&graph, &[2], None, &config(false)).unwrap();
        assert_close(report.scores[0], 1.0 / 6.0);
    }

    #[test]
    fn preserves_request_order_and_duplicates() {
        let graph = path5();
        let report = closeness(&graph, &[4, 2, 4, 0], None, &config(true)).unwrap();

        assert_eq!(report.scores.len(), 4);
        assert_close(report.scores[0], 4.0 / 10.0);
        assert_close(report.scores[1], 4.0 / 6.0);
        assert_eq!(report.scores[0], report.scores[2]);
        assert_eq!(report.scores[0], report.scores[3]);
    }

    #[test]
    fn single_vertex_is_nan() {
        let graph = undirected(1, &[]);
        let report = closeness(&graph, &[0], None, &config(true)).unwrap();
        assert!(report.scores[0].is_nan());

        let report = closeness(&graph, &[0], None, &config(false)).unwrap();
        assert!(report.scores[0].is_nan());
    }

    #[test]
    fn empty_request_yields_empty_scores() {
        let graph = path5();
        let report = closeness(&graph, &[], None, &config(true)).unwrap();
        assert!(report.scores.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn disconnected_graph_penalizes_and_warns_once() {
        // components {0, 1} and {2, 3, 4}
        let graph = undirected(5, &[(0, 1), (2, 3), (3, 4)]);
        let report = closeness(&graph, &all_vertices(&graph), None, &config(true)).unwrap();

        assert_eq!(report.warnings, vec![ClosenessWarning::DisconnectedGraph]);
        // vertex 0: 1 reachable at distance 1, three unreached at 5 each
        assert_close(report.scores[0], 4.0 / 16.0);
        // vertex 3: distances 1 + 1, two unreached
        assert_close(report.scores[3], 4.0 / 12.0);
    }

    #[test]
    fn directed_modes_measure_different_paths() {
        // 0 -> 1 -> 2
        let graph = CompressedGraph::from_edges(3, true, &[(0, 1), (1, 2)]);
        let out = ClosenessConfig::new(NeighborMode::Out, None, true);
        let inc = ClosenessConfig::new(NeighborMode::In, None, true);

        let report = closeness(&graph, &[0], None, &out).unwrap();
        assert_close(report.scores[0], 2.0 / 3.0);

        let report = closeness(&graph, &[0], None, &inc).unwrap();
        assert_close(report.scores[0], 2.0 / 6.0);
        assert!(report.is_disconnected());
    }

    #[test]
    fn cutoff_truncated_sources_do_not_warn() {
        let graph = path5();
        let config = ClosenessConfig::new(NeighborMode::All, Some(0.0), true);
        let report = closeness_estimate(&graph, &[0], None, &config).unwrap();

        // vertex 1 counted at distance 1, three vertices beyond the cutoff
        assert_close(report.scores[0], 4.0 / 16.0);
        assert!(!report.is_disconnected());

        let exact = closeness(&graph, &[0], None, &config).unwrap();
        assert_close(exact.scores[0], 4.0 / 10.0);
    }

    #[test]
    fn weighted_path() {
        let graph = path5();
        let weights = [1.0, 2.0, 2.0, 1.0];
        let report = closeness(&graph, &[2], Some(&weights[..]), &config(true)).unwrap();

        // distances from 2: 3, 2, 0, 2, 3
        assert_close(report.scores[0], 4.0 / 10.0);
    }

    #[test]
    fn invalid_weights_fail_before_any_work() {
        let graph = path5();
        let mut calls = Vec::new();
        let mut sink = |p: f64| calls.push(p);

        let result = ClosenessEstimator::new(&graph, config(true))
            .weights(Some(&[1.0, 0.0, 1.0, 1.0][..]))
            .progress(&mut sink)
            .run(&[0, 1]);
        assert_eq!(result, Err(ClosenessError::InvalidWeight { edge: 1, weight: 0.0 }));
        assert!(calls.is_empty());

        let negative = closeness(&graph, &[0], Some(&[1.0, 1.0, -2.0, 1.0][..]), &config(true));
        assert!(matches!(negative, Err(ClosenessError::InvalidWeight { edge: 2, .. })));

        let nan = closeness(&graph, &[0], Some(&[1.0, f64::NAN, 1.0, 1.0][..]), &config(true));
        assert!(matches!(nan, Err(ClosenessError::InvalidWeight { edge: 1, .. })));
    }

    #[test]
    fn weight_length_must_match_edges() {
        let graph = path5();
        let result = closeness(&graph, &[0], Some(&[1.0, 1.0][..]), &config(true));
        assert_eq!(result, Err(ClosenessError::WeightLength { expected: 4, actual: 2 }));
    }

    #[test]
    fn tiny_weights_warn_but_compute() {
        let graph = undirected(2, &[(0, 1)]);
        let report = closeness(&graph, &[0], Some(&[1e-12][..]), &config(true)).unwrap();

        assert!(report.has_precision_warning());
        assert_close(report.scores[0], 1.0 / 1e-12);
    }

    #[test]
    fn invalid_vertex_is_rejected() {
        let graph = path5();
        let result = closeness(&graph, &[1, 7], None, &config(true));
        assert_eq!(result, Err(ClosenessError::InvalidVertex { vertex: 7, vertex_count: 5 }));
    }

    #[test]
    fn resolves_ids_to_indices() {
        let mut graph = path5();
        assert_eq!(resolve_vertices::<&str>(&graph, &[][..]).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(resolve_vertices(&graph, &["3", " 0"][..]).unwrap(), vec![3, 0]);

        graph.node_ids = Some(["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect());
        assert_eq!(resolve_vertices(&graph, &["e", "b", "e"][..]).unwrap(), vec![4, 1, 4]);

        let unknown = resolve_vertices(&graph, &["b", "zed"][..]);
        assert_eq!(
            unknown,
            Err(ClosenessError::InvalidArgument("Unknown vertex id: zed".to_string()))
        );
    }

    #[test]
    fn infinite_cutoff_matches_exact() {
        let graph = undirected(5, &[(0, 1), (2, 3), (3, 4)]);
        let vertices = all_vertices(&graph);
        let unbounded = ClosenessConfig::new(NeighborMode::All, Some(f64::INFINITY), true);

        let exact = closeness(&graph, &vertices, None, &config(true)).unwrap();
        let estimate = closeness_estimate(&graph, &vertices, None, &unbounded).unwrap();
        assert_eq!(estimate, exact);

        let weights = [1.5, 2.0, 0.5];
        let exact = closeness(&graph, &vertices, Some(&weights[..]), &config(true)).unwrap();
        let estimate = closeness_estimate(&graph, &vertices, Some(&weights[..]), &unbounded).unwrap();
        assert_eq!(estimate, exact);
    }

    #[test]
    fn invalid_cutoff_is_rejected() {
        let graph = path5();
        let config = ClosenessConfig::new(NeighborMode::All, Some(-1.0), true);
        let result = closeness_estimate(&graph, &[0], None, &config);
        assert!(matches!(result, Err(ClosenessError::InvalidArgument(_))));
    }

    #[test]
    fn progress_is_monotonic_and_ends_at_100() {
        let graph = path5();
        let mut seen = Vec::new();
        let mut sink = |p: f64| seen.push(p);

        ClosenessEstimator::new(&graph, config(true))
            .progress(&mut sink)
            .run(&[0, 1, 2, 3])
            .unwrap();

        assert_eq!(seen, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn interruption_cancels_without_scores() {
        let graph = path5();
        let flag = AtomicBool::new(true);

        let result = ClosenessEstimator::new(&graph, config(true))
            .interrupt(&flag)
            .run(&[0, 1]);
        assert_eq!(result, Err(ClosenessError::Cancelled));

        let parallel = ClosenessEstimator::new(&graph, config(true).with_parallel(true))
            .interrupt(&flag)
            .run(&[0, 1]);
        assert_eq!(parallel, Err(ClosenessError::Cancelled));

        flag.store(false, Ordering::Relaxed);
        let result = ClosenessEstimator::new(&graph, config(true))
            .interrupt(&flag)
            .run(&[0, 1]);
        assert!(result.is_ok());
    }

    #[test]
    fn parallel_matches_sequential() {
        let graph = undirected(7, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (5, 6)]);
        let weights = [1.0, 2.5, 0.5, 3.0, 1.0, 2.0];
        let vertices = all_vertices(&graph);

        for weights in [None, Some(&weights[..])] {
            let sequential = closeness(&graph, &vertices, weights, &config(true)).unwrap();
            let parallel =
                closeness(&graph, &vertices, weights, &config(true).with_parallel(true)).unwrap();
            assert_eq!(sequential, parallel);
        }
    }

    #[test]
    fn works_on_petgraph() {
        let graph: petgraph::graph::UnGraph<(), ()> =
            petgraph::graph::UnGraph::from_edges([(0, 1), (1, 2), (2, 3), (3, 4)]);
        let report = closeness(&graph, &[2], None, &config(true)).unwrap();
        assert_close(report.scores[0], 4.0 / 6.0);
    }
}
