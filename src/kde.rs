//! Gaussian kernel density estimation
//!
//! One dimensional KDE used to turn raw score samples into smooth
//! class conditional densities.

use crate::constants::{MIN_KDE_SAMPLES, SQRT_2PI};
use crate::errors::ScorenormError;
use crate::utils::{linspace, min_max, sample_std, validate_positive_float_parameter};
use rayon::prelude::*;

/// Scott's rule bandwidth, scaled by `bandwidth_adjust`.
///
/// The base bandwidth is the sample standard deviation times `n^(-1/5)`.
/// Values of `bandwidth_adjust` above one oversmooth the density, which
/// keeps the downstream probability curve stable on small sample sets.
pub fn scotts_bandwidth(samples: &[f64], bandwidth_adjust: f64) -> f64 {
    sample_std(samples) * (samples.len() as f64).powf(-0.2) * bandwidth_adjust
}

/// A Gaussian kernel density estimate over one dimensional samples.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    /// Samples the density was estimated from.
    pub samples: Vec<f64>,
    /// Kernel bandwidth.
    pub bandwidth: f64,
    /// Evaluation grid spanning the sample range.
    pub support: Vec<f64>,
    /// Density values at each support point.
    pub density: Vec<f64>,
}

impl GaussianKde {
    /// Estimate a density from `samples`.
    ///
    /// The native support grid spans the sample range with `grid_size`
    /// points. Densities at arbitrary points are available through
    /// [`GaussianKde::evaluate`].
    ///
    /// * `samples` - Raw sample values, at least two and free of NaN.
    /// * `grid_size` - Number of points in the native support grid.
    /// * `bandwidth_adjust` - Multiplier applied to the Scott's rule bandwidth.
    pub fn estimate(samples: &[f64], grid_size: usize, bandwidth_adjust: f64) -> Result<Self, ScorenormError> {
        if samples.len() < MIN_KDE_SAMPLES {
            return Err(ScorenormError::InsufficientData(
                "a kernel density estimate".to_string(),
                MIN_KDE_SAMPLES,
            ));
        }
        if let Some(bad) = samples.iter().find(|v| v.is_nan()) {
            return Err(ScorenormError::InvalidScore(
                *bad,
                "a kernel density estimate".to_string(),
            ));
        }
        validate_positive_float_parameter(bandwidth_adjust, "bandwidth_adjust")?;
        let bandwidth = scotts_bandwidth(samples, bandwidth_adjust);
        if !(bandwidth > 0.0) || !bandwidth.is_finite() {
            return Err(ScorenormError::DegenerateRange(format!(
                "bandwidth {} computed from samples with no spread",
                bandwidth
            )));
        }
        if grid_size < MIN_KDE_SAMPLES {
            return Err(ScorenormError::DegenerateRange(format!(
                "grid size {} cannot span the sample range",
                grid_size
            )));
        }
        let (lo, hi) = match min_max(samples) {
            Some(pair) => pair,
            None => {
                return Err(ScorenormError::InsufficientData(
                    "a kernel density estimate".to_string(),
                    MIN_KDE_SAMPLES,
                ))
            }
        };
        let mut kde = GaussianKde {
            samples: samples.to_vec(),
            bandwidth,
            support: linspace(lo, hi, grid_size),
            density: Vec::new(),
        };
        kde.density = kde.evaluate(&kde.support, false);
        Ok(kde)
    }

    /// Density at a single point.
    pub fn density_at(&self, point: f64) -> f64 {
        let norm = self.samples.len() as f64 * self.bandwidth * SQRT_2PI;
        let mut acc = 0.0;
        for sample in &self.samples {
            let z = (point - sample) / self.bandwidth;
            acc += (-0.5 * z * z).exp();
        }
        acc / norm
    }

    /// Evaluate the density at arbitrary points.
    ///
    /// * `points` - Points to evaluate the density at.
    /// * `parallel` - If `true`, points are evaluated in parallel.
    pub fn evaluate(&self, points: &[f64], parallel: bool) -> Vec<f64> {
        if parallel {
            points.par_iter().map(|p| self.density_at(*p)).collect()
        } else {
            points.iter().map(|p| self.density_at(*p)).collect()
        }
    }
}
