//! Score interpolation
//!
//! Linear interpolation over the learned probability curve, plus the
//! stateless mapping from raw scores to probabilities.

use crate::errors::ScorenormError;
use rayon::prelude::*;

/// Piecewise linear interpolation.
///
/// `xs` must be sorted ascending and `x` must lie within the closed
/// interval it spans. The bracketing segment is found by binary search
/// for the largest index whose x value does not exceed `x`.
pub fn interp_sorted(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let last = xs.len() - 1;
    if x == xs[last] {
        return ys[last];
    }
    let mut a = 0;
    let mut b = last;
    while b - a > 1 {
        let m = (a + b) / 2;
        if xs[m] <= x {
            a = m;
        } else {
            b = m;
        }
    }
    let t = (x - xs[a]) / (xs[a + 1] - xs[a]);
    ys[a] + (ys[a + 1] - ys[a]) * t
}

/// Map raw scores onto a learned probability curve.
///
/// Scores below the domain map to probability zero. Scores above the
/// domain map to the midpoint between the final curve value and one,
/// a hedge for values the normalizer never saw while training. NaN
/// scores are rejected.
///
/// * `score_domain` - Scores the curve was learned over, sorted ascending.
/// * `posterior` - Probability of a true match at each domain point.
/// * `scores` - Raw scores to normalize.
pub fn normalize_scores(score_domain: &[f64], posterior: &[f64], scores: &[f64]) -> Result<Vec<f64>, ScorenormError> {
    if score_domain.is_empty() || score_domain.len() != posterior.len() {
        return Err(ScorenormError::InvalidParameter(
            "posterior".to_string(),
            "one probability per domain point".to_string(),
            format!(
                "{} probabilities for {} domain points",
                posterior.len(),
                score_domain.len()
            ),
        ));
    }
    normalize_scores_impl(score_domain, posterior, scores, false)
}

pub(crate) fn normalize_scores_impl(
    score_domain: &[f64],
    posterior: &[f64],
    scores: &[f64],
    parallel: bool,
) -> Result<Vec<f64>, ScorenormError> {
    let last = score_domain.len() - 1;
    let to_prob = |score: &f64| -> Result<f64, ScorenormError> {
        if score.is_nan() {
            return Err(ScorenormError::InvalidScore(*score, "normalize_scores".to_string()));
        }
        if *score < score_domain[0] {
            Ok(0.0)
        } else if *score > score_domain[last] {
            Ok((posterior[last] + 1.0) / 2.0)
        } else {
            Ok(interp_sorted(score_domain, posterior, *score))
        }
    };
    if parallel {
        scores.par_iter().map(to_prob).collect()
    } else {
        scores.iter().map(to_prob).collect()
    }
}
