//! Results persistence module

use anyhow::Result;
use crate::centrality::ClosenessReport;
use crate::config::ClosenessConfig;
use crate::graph::CompressedGraph;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use serde::Serialize;
use serde_json::{json, to_string_pretty};

/// Score of one requested vertex
#[derive(Debug, Clone, Serialize)]
pub struct VertexScore {
    /// Internal vertex index
    pub index: usize,

    /// Original vertex id
    pub id: String,

    /// Closeness score, `null` when undefined
    pub closeness: Option<f64>,
}

/// Save scores and a run summary to the specified directory
pub fn save_results(
    report: &ClosenessReport,
    vertices: &[usize],
    graph: &CompressedGraph,
    config: &ClosenessConfig,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} scores to {}", report.scores.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_scores(report, vertices, graph, output_dir)?;
    save_summary(report, graph, config, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Pair each score with its vertex
pub fn vertex_scores(
    report: &ClosenessReport,
    vertices: &[usize],
    graph: &CompressedGraph,
) -> Vec<VertexScore> {
    vertices
        .iter()
        .zip(&report.scores)
        .map(|(&index, &score)| VertexScore {
            index,
            id: graph.node_label(index),
            closeness: score.is_finite().then_some(score),
        })
        .collect()
}

/// Save per-vertex scores
fn save_scores(
    report: &ClosenessReport,
    vertices: &[usize],
    graph: &CompressedGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving per-vertex scores");

    let path = Path::new(output_dir).join("closeness.json");
    let mut file = File::create(path)?;

    let scores = json!({ "scores": vertex_scores(report, vertices, graph) });
    file.write_all(to_string_pretty(&scores)?.as_bytes())?;

    Ok(())
}

/// Save summary information
fn save_summary(
    report: &ClosenessReport,
    graph: &CompressedGraph,
    config: &ClosenessConfig,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let finite: Vec<f64> = report.scores.iter().copied().filter(|s| s.is_finite()).collect();
    let min = finite.iter().copied().reduce(f64::min);
    let max = finite.iter().copied().reduce(f64::max);
    let mean = if finite.is_empty() {
        None
    } else {
        Some(finite.iter().sum::<f64>() / finite.len() as f64)
    };

    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count,
            "edge_count": graph.edge_count(),
            "directed": graph.directed,
            "memory_usage_bytes": graph.memory_usage(),
        },
        "config": config,
        "score_stats": {
            "vertex_count": report.scores.len(),
            "undefined_count": report.scores.len() - finite.len(),
            "min": min,
            "max": max,
            "mean": mean,
        },
        "warnings": report.warnings,
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}
