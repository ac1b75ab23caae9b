//! Configuration for closeness centrality calculations

use serde::{Deserialize, Serialize};

use crate::centrality::epsilon::DEFAULT_EPSILON;
use crate::error::{ClosenessError, Result};
use crate::graph::NeighborMode;

/// Options shared by the unweighted and weighted closeness estimators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosenessConfig {
    /// Which paths are measured in directed graphs
    pub mode: NeighborMode,

    /// Maximal path length considered; `None` (or an infinite cutoff)
    /// computes exact closeness
    pub cutoff: Option<f64>,

    /// Return `(n - 1) / sum` instead of `1 / sum`
    pub normalized: bool,

    /// Tolerance below which two weighted path lengths are considered equal
    pub epsilon: f64,

    /// Process sources on the rayon thread pool
    pub parallel: bool,
}

impl Default for ClosenessConfig {
    fn default() -> Self {
        Self {
            mode: NeighborMode::Out,
            cutoff: None,
            normalized: true,
            epsilon: DEFAULT_EPSILON,
            parallel: false,
        }
    }
}

impl ClosenessConfig {
    /// Create a new configuration with custom values
    pub fn new(mode: NeighborMode, cutoff: Option<f64>, normalized: bool) -> Self {
        Self {
            mode,
            cutoff,
            normalized,
            ..Self::default()
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check cutoff and epsilon
    pub fn validate(&self) -> Result<()> {
        if let Some(cutoff) = self.cutoff {
            if cutoff.is_nan() || cutoff < 0.0 {
                return Err(ClosenessError::InvalidArgument(format!(
                    "cutoff must be a non-negative number, got {}",
                    cutoff
                )));
            }
        }

        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ClosenessError::InvalidArgument(format!(
                "epsilon must be a finite non-negative number, got {}",
                self.epsilon
            )));
        }

        Ok(())
    }
}
