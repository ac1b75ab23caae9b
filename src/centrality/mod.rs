//! Closeness centrality module

pub mod closeness;
pub mod epsilon;
pub mod heap;
pub mod neighbors;
pub mod traversal;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

pub use closeness::{
    all_vertices, closeness, closeness_estimate, resolve_vertices, ClosenessEstimator,
};

/// Result-quality caveat recorded during a computation.
///
/// Warnings never change the returned scores; they are also logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClosenessWarning {
    /// Some edge weight is not larger than the comparison tolerance
    NumericalPrecision { min_weight: f64, epsilon: f64 },

    /// At least one source could not reach every vertex within the cutoff
    DisconnectedGraph,
}

impl fmt::Display for ClosenessWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosenessWarning::NumericalPrecision { min_weight, epsilon } => write!(
                f,
                "minimum weight {} is not larger than epsilon {}, calculations may suffer from numerical precision",
                min_weight, epsilon
            ),
            ClosenessWarning::DisconnectedGraph => {
                f.write_str("closeness centrality is not well-defined for disconnected graphs")
            }
        }
    }
}

/// Scores in request order plus any warnings raised on the way
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosenessReport {
    /// One score per requested vertex; NaN for a single-vertex graph
    pub scores: Vec<f64>,

    /// Each warning kind appears at most once
    pub warnings: Vec<ClosenessWarning>,
}

impl ClosenessReport {
    pub fn is_disconnected(&self) -> bool {
        self.warnings.contains(&ClosenessWarning::DisconnectedGraph)
    }

    pub fn has_precision_warning(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, ClosenessWarning::NumericalPrecision { .. }))
    }
}

/// Receives percent-complete values, non-decreasing and ending at 100
pub trait ProgressSink {
    fn report(&mut self, percent: f64);
}

impl<F: FnMut(f64)> ProgressSink for F {
    fn report(&mut self, percent: f64) {
        self(percent)
    }
}

/// Polled between sources; returning true cancels the computation
pub trait InterruptCheck {
    fn is_interrupted(&self) -> bool;
}

impl InterruptCheck for AtomicBool {
    fn is_interrupted(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_render_and_serialize() {
        let warning = ClosenessWarning::NumericalPrecision { min_weight: 1e-12, epsilon: 1e-10 };
        assert!(warning.to_string().contains("numerical precision"));

        let json = serde_json::to_value(&ClosenessWarning::DisconnectedGraph).unwrap();
        assert_eq!(json["kind"], "disconnected_graph");
    }

    #[test]
    fn report_flags() {
        let report = ClosenessReport {
            scores: vec![0.5],
            warnings: vec![ClosenessWarning::DisconnectedGraph],
        };
        assert!(report.is_disconnected());
        assert!(!report.has_precision_warning());
    }
}
