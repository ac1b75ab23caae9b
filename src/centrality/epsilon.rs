//! Tolerant comparison of path lengths

use std::cmp::Ordering;

/// Default tolerance used when comparing weighted path lengths.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Compare two reals, treating them as equal when they are at most `eps` apart.
pub fn cmp_epsilon(a: f64, b: f64, eps: f64) -> Ordering {
    if (a - b).abs() <= eps {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}
