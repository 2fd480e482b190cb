//! Clip range selection
//!
//! Picks the score interval worth modelling before densities are
//! estimated. The top of the interval is clipped when the best scoring
//! class overshoots the other class, otherwise a handful of outlier
//! scores would stretch the domain and starve the interesting region of
//! grid points.

use crate::errors::ScorenormError;
use crate::utils::{mean, min_max};
use log::warn;

/// Resolve the orientation of the raw score axis.
///
/// When `reverse` is `None` the orientation is inferred from the class
/// means: scores are treated as reversed when true matches tend to score
/// lower than false matches.
pub fn resolve_reverse(tp_scores: &[f64], tn_scores: &[f64], reverse: Option<bool>) -> bool {
    match reverse {
        Some(value) => value,
        None => mean(tp_scores) < mean(tn_scores),
    }
}

/// Find the score range to build the probability curve over.
///
/// The range is anchored at the minimum of the class that scores high.
/// With a `clip_factor`, the top of the range is pulled down to
/// `max_low * clip_factor` whenever the high class tops out more than
/// `clip_factor` times above the low class. Without one, the range spans
/// all observed scores.
///
/// * `tp_scores` - Scores of known true matches.
/// * `tn_scores` - Scores of known false matches.
/// * `clip_factor` - Overshoot factor above which the range is clipped.
/// * `reverse` - Whether low raw scores mean a true match.
pub fn find_clip_range(
    tp_scores: &[f64],
    tn_scores: &[f64],
    clip_factor: Option<f64>,
    reverse: bool,
) -> Result<(f64, f64), ScorenormError> {
    let (high_scores, low_scores) = if reverse {
        (tn_scores, tp_scores)
    } else {
        (tp_scores, tn_scores)
    };

    let (min_high_score, max_high_score) = match min_max(high_scores) {
        Some(pair) => pair,
        None => {
            return Err(ScorenormError::InsufficientData(
                "clip range selection of the high scoring class".to_string(),
                1,
            ))
        }
    };
    let (min_low_score, max_low_score) = match min_max(low_scores) {
        Some(pair) => pair,
        None => {
            return Err(ScorenormError::InsufficientData(
                "clip range selection of the low scoring class".to_string(),
                1,
            ))
        }
    };
    let abs_max_score = max_high_score.max(max_low_score);
    let abs_min_score = min_high_score.min(min_low_score);

    let (min_score, max_score) = match clip_factor {
        None => (abs_min_score, abs_max_score),
        Some(factor) => {
            let max_score = if max_low_score < max_high_score {
                if max_low_score == 0.0 {
                    return Err(ScorenormError::DegenerateRange(
                        "the low scoring class tops out at zero, overshoot is undefined".to_string(),
                    ));
                }
                let overshoot_factor = max_high_score / max_low_score;
                if overshoot_factor > factor {
                    max_low_score * factor
                } else {
                    max_high_score
                }
            } else {
                warn!("The low scoring class tops out above the high scoring class, keeping the full score range.");
                abs_max_score
            };
            (min_high_score, max_score)
        }
    };

    if !(max_score > min_score) {
        return Err(ScorenormError::DegenerateRange(format!(
            "score range [{}, {}] is empty",
            min_score, max_score
        )));
    }
    Ok((min_score, max_score))
}
