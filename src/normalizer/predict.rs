//! Prediction methods
//!
//! Normalization, inverse normalization, and classification methods for a
//! fit score normalizer.

use crate::errors::ScorenormError;
use crate::interpolation::{interp_sorted, normalize_scores_impl};
use crate::metric::{accuracy, error_indices};
use crate::monotonic::strict_direction;
use crate::ScoreNormalizer;
use rayon::prelude::*;

impl ScoreNormalizer {
    /// Map raw comparison scores to probabilities of being a true match.
    ///
    /// Scores below the learned score domain map to probability zero. Scores
    /// above it map to the hedge halfway between the top of the curve and
    /// certainty.
    ///
    /// * `scores` - Raw comparison scores.
    /// * `parallel` - If `true`, probabilities are computed in parallel using Rayon.
    pub fn normalize(&self, scores: &[f64], parallel: bool) -> Result<Vec<f64>, ScorenormError> {
        let model = self.fitted("normalize")?;
        normalize_scores_impl(&model.score_domain, &model.posterior, scores, parallel)
    }

    /// Recover the raw scores that would normalize to the given probabilities.
    ///
    /// Only defined when the learned probability curve is strictly monotone,
    /// and only for probabilities the curve actually covers.
    ///
    /// * `probs` - Probabilities of being a true match.
    /// * `parallel` - If `true`, scores are computed in parallel using Rayon.
    pub fn inverse_normalize(&self, probs: &[f64], parallel: bool) -> Result<Vec<f64>, ScorenormError> {
        let model = self.fitted("inverse_normalize")?;
        let increasing = match strict_direction(&model.posterior) {
            Some(direction) => direction,
            None => return Err(ScorenormError::NonMonotoneInverse),
        };

        let reversed_posterior: Vec<f64>;
        let reversed_domain: Vec<f64>;
        let (xs, ys): (&[f64], &[f64]) = if increasing {
            (&model.posterior, &model.score_domain)
        } else {
            reversed_posterior = model.posterior.iter().rev().copied().collect();
            reversed_domain = model.score_domain.iter().rev().copied().collect();
            (&reversed_posterior, &reversed_domain)
        };
        let last = xs.len() - 1;

        let to_score = |prob: &f64| -> Result<f64, ScorenormError> {
            if prob.is_nan() || *prob < xs[0] || *prob > xs[last] {
                return Err(ScorenormError::InvalidScore(*prob, "inverse_normalize".to_string()));
            }
            Ok(interp_sorted(xs, ys, *prob))
        };
        if parallel {
            probs.par_iter().map(to_score).collect()
        } else {
            probs.iter().map(to_score).collect()
        }
    }

    /// Classify scores with the threshold learned at fit time.
    ///
    /// * `scores` - Raw comparison scores.
    /// * `parallel` - If `true`, predictions are computed in parallel using Rayon.
    pub fn predict(&self, scores: &[f64], parallel: bool) -> Result<Vec<bool>, ScorenormError> {
        let learned_threshold = self.fitted("predict")?.learned_threshold;
        let probs = self.normalize(scores, parallel)?;
        Ok(probs.iter().map(|p| *p > learned_threshold).collect())
    }

    /// Raw score the learned probability threshold corresponds to.
    pub fn score_threshold(&self) -> Result<f64, ScorenormError> {
        let learned_threshold = self.fitted("score_threshold")?.learned_threshold;
        Ok(self.inverse_normalize(&[learned_threshold], false)?[0])
    }

    /// Fraction of scores the learned threshold classifies correctly.
    ///
    /// * `scores` - Raw comparison scores.
    /// * `labels` - `true` where the pair is a true match.
    /// * `parallel` - If `true`, probabilities are computed in parallel using Rayon.
    pub fn get_accuracy(&self, scores: &[f64], labels: &[bool], parallel: bool) -> Result<f64, ScorenormError> {
        let learned_threshold = self.fitted("get_accuracy")?.learned_threshold;
        let probs = self.normalize(scores, parallel)?;
        accuracy(&probs, labels, learned_threshold)
    }

    /// Indices of misclassified scores, worst offenders first.
    ///
    /// Returns `(false_positives, false_negatives)`. False positives are
    /// ordered by descending probability and false negatives by ascending
    /// probability, so the most confident mistakes of each kind lead.
    ///
    /// * `scores` - Raw comparison scores.
    /// * `labels` - `true` where the pair is a true match.
    /// * `parallel` - If `true`, probabilities are computed in parallel using Rayon.
    pub fn get_error_indices(
        &self,
        scores: &[f64],
        labels: &[bool],
        parallel: bool,
    ) -> Result<(Vec<usize>, Vec<usize>), ScorenormError> {
        let learned_threshold = self.fitted("get_error_indices")?.learned_threshold;
        let probs = self.normalize(scores, parallel)?;
        error_indices(&probs, labels, learned_threshold)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ScorenormError;
    use crate::utils::linspace;
    use crate::ScoreNormalizer;
    use approx::assert_relative_eq;
    use std::error::Error;

    fn forward_normalizer() -> Result<ScoreNormalizer, Box<dyn Error>> {
        let mut normalizer = ScoreNormalizer::default();
        normalizer.fit(&linspace(100.0, 10000.0, 512), &linspace(0.0, 120.0, 512))?;
        Ok(normalizer)
    }

    #[test]
    fn test_normalize() -> Result<(), Box<dyn Error>> {
        let normalizer = forward_normalizer()?;
        let probs = normalizer.normalize(&[50.0, 150.0, 250.0, 5000.0], false)?;
        assert_eq!(probs[0], 0.0);
        assert_relative_eq!(probs[1], 0.0160633728581542, epsilon = 1e-9);
        assert_relative_eq!(probs[2], 0.0948101576941797, epsilon = 1e-9);
        assert_eq!(probs[3], 1.0);

        let scores = linspace(0.0, 400.0, 257);
        assert_eq!(
            normalizer.normalize(&scores, false)?,
            normalizer.normalize(&scores, true)?
        );
        Ok(())
    }

    #[test]
    fn test_inverse_normalize() -> Result<(), Box<dyn Error>> {
        let normalizer = forward_normalizer()?;
        let scores = normalizer.inverse_normalize(&[0.5], false)?;
        assert_relative_eq!(scores[0], 313.98483465263257, epsilon = 1e-6);

        // curve endpoints map back to the domain endpoints
        let ends = normalizer.inverse_normalize(&[0.0, 1.0], false)?;
        assert_eq!(ends[0], 100.0);
        assert_eq!(ends[1], 314.1640786499874);

        let probs = normalizer.normalize(&[150.0], false)?;
        let recovered = normalizer.inverse_normalize(&probs, false)?;
        assert_relative_eq!(recovered[0], 150.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_inverse_normalize_invalid_probs() -> Result<(), Box<dyn Error>> {
        let normalizer = forward_normalizer()?;
        for prob in [1.5, -0.2, f64::NAN] {
            let result = normalizer.inverse_normalize(&[prob], false);
            assert!(matches!(result, Err(ScorenormError::InvalidScore(_, _))));
        }
        Ok(())
    }

    #[test]
    fn test_inverse_normalize_non_monotone() -> Result<(), Box<dyn Error>> {
        let mut normalizer = forward_normalizer()?;
        if let Some(model) = normalizer.model.as_mut() {
            let n = model.posterior.len();
            model.posterior = vec![0.5; n];
        }
        let result = normalizer.inverse_normalize(&[0.5], false);
        assert!(matches!(result, Err(ScorenormError::NonMonotoneInverse)));
        Ok(())
    }

    #[test]
    fn test_inverse_normalize_without_monotonize() -> Result<(), Box<dyn Error>> {
        // two true match modes around the false match scores leave the raw
        // curve rising and falling again
        let mut tp_scores = linspace(2.5, 3.5, 64);
        tp_scores.extend_from_slice(&linspace(6.5, 7.5, 64));
        let tn_scores = linspace(4.4, 5.4, 64);

        let mut normalizer = ScoreNormalizer::default()
            .set_monotonize(false)
            .set_bandwidth_adjust(1.0);
        normalizer.fit(&tp_scores, &tn_scores)?;

        // forward mapping still follows the raw curve through both modes
        let probs = normalizer.normalize(&[3.0, 4.9, 7.0], false)?;
        assert!(probs[0] > 0.99 && probs[2] > 0.99);
        assert!(probs[1] < 0.1);
        assert!(normalizer.learned_threshold()? > 0.9);

        let result = normalizer.inverse_normalize(&[0.5], false);
        assert!(matches!(result, Err(ScorenormError::NonMonotoneInverse)));
        Ok(())
    }

    #[test]
    fn test_predict_and_accuracy() -> Result<(), Box<dyn Error>> {
        let normalizer = forward_normalizer()?;
        let tp_scores = linspace(100.0, 10000.0, 512);
        let tn_scores = linspace(0.0, 120.0, 512);
        let mut scores = tp_scores.clone();
        scores.extend_from_slice(&tn_scores);
        let mut labels = vec![true; 512];
        labels.resize(1024, false);

        let learned = normalizer.learned_threshold()?;
        let probs = normalizer.normalize(&scores, false)?;
        let recalled = probs[..512].iter().filter(|p| **p > learned).count();
        assert_eq!(recalled, 500);

        let predictions = normalizer.predict(&[50.0, 5000.0], false)?;
        assert_eq!(predictions, vec![false, true]);

        assert_eq!(normalizer.get_accuracy(&scores, &labels, false)?, 0.98828125);

        let (fp_indices, fn_indices) = normalizer.get_error_indices(&scores, &labels, false)?;
        assert!(fp_indices.is_empty());
        assert_eq!(fn_indices, (0..12).collect::<Vec<usize>>());
        Ok(())
    }

    #[test]
    fn test_reverse_scenario() -> Result<(), Box<dyn Error>> {
        let tp_scores = linspace(100.0, 220.0, 512);
        let tn_scores = linspace(100.0, 10000.0, 512);
        let mut normalizer = ScoreNormalizer::default();
        normalizer.fit(&tp_scores, &tn_scores)?;

        let probs = normalizer.normalize(&[110.0, 500.0, 5000.0], false)?;
        assert_relative_eq!(probs[0], 0.9898721209227778, epsilon = 1e-9);
        assert_relative_eq!(probs[1], 0.03987160848586403, epsilon = 1e-9);
        // beyond the clipped domain the curve hedges between its floor and certainty
        assert_eq!(probs[2], 0.5);

        let recovered = normalizer.inverse_normalize(&normalizer.normalize(&[150.0], false)?, false)?;
        assert_relative_eq!(recovered[0], 150.0, epsilon = 1e-6);

        let mut scores = tp_scores.clone();
        scores.extend_from_slice(&tn_scores);
        let mut labels = vec![true; 512];
        labels.resize(1024, false);
        assert_eq!(normalizer.get_accuracy(&scores, &labels, false)?, 0.9697265625);
        let (fp_indices, fn_indices) = normalizer.get_error_indices(&scores, &labels, false)?;
        assert_eq!(fp_indices.len(), 6);
        assert_eq!(fn_indices.len(), 25);
        Ok(())
    }

    #[test]
    fn test_score_threshold() -> Result<(), Box<dyn Error>> {
        let normalizer = forward_normalizer()?;
        assert_relative_eq!(normalizer.score_threshold()?, 313.1115459882583, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_not_fitted() {
        let normalizer = ScoreNormalizer::default();
        assert!(matches!(
            normalizer.normalize(&[1.0], false),
            Err(ScorenormError::NotFitted(_))
        ));
        assert!(matches!(
            normalizer.inverse_normalize(&[0.5], false),
            Err(ScorenormError::NotFitted(_))
        ));
        assert!(matches!(normalizer.predict(&[1.0], false), Err(ScorenormError::NotFitted(_))));
        assert!(matches!(normalizer.score_threshold(), Err(ScorenormError::NotFitted(_))));
        assert!(matches!(
            normalizer.get_accuracy(&[1.0], &[true], false),
            Err(ScorenormError::NotFitted(_))
        ));
    }

    #[test]
    fn test_label_shape_mismatch() -> Result<(), Box<dyn Error>> {
        let normalizer = forward_normalizer()?;
        let result = normalizer.get_accuracy(&[1.0, 2.0], &[true], false);
        assert!(matches!(result, Err(ScorenormError::InvalidParameter(_, _, _))));
        let result = normalizer.get_error_indices(&[1.0, 2.0], &[true], false);
        assert!(matches!(result, Err(ScorenormError::InvalidParameter(_, _, _))));
        Ok(())
    }
}
