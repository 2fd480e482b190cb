//! Decision metrics
//!
//! Threshold learning over normalized probabilities, plus the
//! classification quality measures reported for a fit normalizer.

use crate::errors::ScorenormError;
use crate::utils::validate_float_parameter;

fn validate_label_shape(probs: &[f64], labels: &[bool]) -> Result<(), ScorenormError> {
    if probs.len() != labels.len() {
        return Err(ScorenormError::InvalidParameter(
            "labels".to_string(),
            "one label per probability".to_string(),
            format!("{} labels for {} probabilities", labels.len(), probs.len()),
        ));
    }
    Ok(())
}

/// Learn the tightest decision threshold that satisfies a recall target.
///
/// Candidate thresholds are the distinct probabilities seen in training,
/// swept from the highest down. A sample counts as recalled when its
/// probability is strictly above the threshold, so the learned value is
/// the largest candidate whose recall over the true matches exceeds
/// `target_recall`.
///
/// * `probs` - Normalized probabilities of all training samples.
/// * `labels` - `true` for true matches, `false` for false matches.
/// * `target_recall` - Fraction of true matches that must score above the threshold.
pub fn learn_threshold(probs: &[f64], labels: &[bool], target_recall: f64) -> Result<f64, ScorenormError> {
    validate_float_parameter(target_recall, 0.0, 1.0, "target_recall")?;
    validate_label_shape(probs, labels)?;
    let mut tp_probs: Vec<f64> = probs
        .iter()
        .zip(labels)
        .filter(|(_, label)| **label)
        .map(|(p, _)| *p)
        .collect();
    tp_probs.sort_by(|a, b| a.total_cmp(b));
    let n_tp = tp_probs.len();

    let mut candidates = probs.to_vec();
    candidates.sort_by(|a, b| b.total_cmp(a));
    candidates.dedup();

    for threshold in candidates {
        let above = n_tp - tp_probs.partition_point(|p| *p <= threshold);
        let recall = above as f64 / n_tp as f64;
        if recall > target_recall {
            return Ok(threshold);
        }
    }
    Err(ScorenormError::UnreachableRecall(target_recall))
}

/// Fraction of samples the threshold classifies correctly.
///
/// A sample is predicted to be a true match when its probability is
/// strictly above `threshold`. An empty batch yields NaN.
pub fn accuracy(probs: &[f64], labels: &[bool], threshold: f64) -> Result<f64, ScorenormError> {
    validate_label_shape(probs, labels)?;
    if labels.is_empty() {
        return Ok(f64::NAN);
    }
    let correct = probs
        .iter()
        .zip(labels)
        .filter(|(p, label)| (**p > threshold) == **label)
        .count();
    Ok(correct as f64 / labels.len() as f64)
}

/// Indices of misclassified samples, worst offenders first.
///
/// Returns `(false_positives, false_negatives)`. False positives are
/// ordered by descending probability and false negatives by ascending
/// probability, so the most confident mistakes of each kind lead.
pub fn error_indices(
    probs: &[f64],
    labels: &[bool],
    threshold: f64,
) -> Result<(Vec<usize>, Vec<usize>), ScorenormError> {
    validate_label_shape(probs, labels)?;
    let mut false_positives = Vec::new();
    let mut false_negatives = Vec::new();
    for (i, (p, label)) in probs.iter().zip(labels).enumerate() {
        let predicted = *p > threshold;
        if predicted != *label {
            if *label {
                false_negatives.push(i);
            } else {
                false_positives.push(i);
            }
        }
    }
    false_positives.sort_by(|&i, &j| probs[j].total_cmp(&probs[i]));
    false_negatives.sort_by(|&i, &j| probs[i].total_cmp(&probs[j]));
    Ok((false_positives, false_negatives))
}
