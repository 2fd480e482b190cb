//! Synthetic score data
//!
//! Deterministic generators for overlapping true and false match score
//! distributions, used by the examples and benchmarks.

use crate::errors::ScorenormError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Draw `n` scores from a Gaussian.
///
/// The same seed always yields the same scores.
pub fn gaussian_scores(n: usize, mean: f64, std: f64, seed: u64) -> Result<Vec<f64>, ScorenormError> {
    if !(std > 0.0) || !std.is_finite() {
        return Err(ScorenormError::InvalidParameter(
            "std".to_string(),
            "a positive finite spread".to_string(),
            std.to_string(),
        ));
    }
    let normal = Normal::new(mean, std).map_err(|e| {
        ScorenormError::InvalidParameter("std".to_string(), "a positive finite spread".to_string(), e.to_string())
    })?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..n).map(|_| normal.sample(&mut rng)).collect())
}

/// A pair of overlapping score classes.
///
/// True matches score around 6.5 and false matches around 2.5, with
/// enough spread that the tails overlap the way verification scores do
/// in practice.
pub fn overlapping_classes(n: usize, seed: u64) -> Result<(Vec<f64>, Vec<f64>), ScorenormError> {
    let tp_scores = gaussian_scores(n, 6.5, 2.0, seed)?;
    let tn_scores = gaussian_scores(n, 2.5, 1.5, seed.wrapping_add(1))?;
    Ok((tp_scores, tn_scores))
}
