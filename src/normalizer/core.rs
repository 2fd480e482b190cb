use crate::errors::ScorenormError;
use crate::interpolation::normalize_scores_impl;
use crate::kde::GaussianKde;
use crate::metric::learn_threshold;
use crate::monotonic::monotonize;
use crate::normalizer::config::*;
use crate::range::{find_clip_range, resolve_reverse};
use crate::utils::linspace;
use hashbrown::HashMap;
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Learned state of a fit normalizer.
#[derive(Clone, Serialize, Deserialize)]
pub struct NormalizerModel {
    /// Whether low raw scores mean a true match.
    pub reverse: bool,
    /// Grid of scores the probability curve is defined over.
    pub score_domain: Vec<f64>,
    /// Probability of a true match at each score domain point.
    pub posterior: Vec<f64>,
    /// Probability of a false match at each score domain point.
    pub complement: Vec<f64>,
    /// Density of true match scores at each score domain point.
    pub tp_density: Vec<f64>,
    /// Density of false match scores at each score domain point.
    pub tn_density: Vec<f64>,
    /// Mixture density of all match scores at each score domain point.
    pub score_density: Vec<f64>,
    /// Probability threshold that satisfies the recall target.
    pub learned_threshold: f64,
    /// Kernel bandwidth used for the true match density.
    pub tp_bandwidth: f64,
    /// Kernel bandwidth used for the false match density.
    pub tn_bandwidth: f64,
    /// Number of true match scores the normalizer was fit on.
    pub n_tp: usize,
    /// Number of false match scores the normalizer was fit on.
    pub n_tn: usize,
}

/// Score Normalizer object
#[derive(Clone, Serialize, Deserialize)]
pub struct ScoreNormalizer {
    pub cfg: NormalizerConfig,
    pub model: Option<NormalizerModel>,
    pub metadata: HashMap<String, String>,
}

impl Default for ScoreNormalizer {
    fn default() -> Self {
        ScoreNormalizer {
            cfg: NormalizerConfig::default(),
            model: None,
            metadata: HashMap::new(),
        }
    }
}

impl ScoreNormalizer {
    /// Score Normalizer object
    ///
    /// * `grid_size` - Number of points in the score domain grid.
    /// * `bandwidth_adjust` - Multiplier applied to the Scott's rule kernel bandwidth.
    /// * `monotonize` - Whether to force the probability curve to be strictly monotone.
    /// * `clip_factor` - Overshoot factor above which the score domain is clipped. `None`
    ///   keeps the full range spanned by the training scores.
    /// * `reverse` - Whether low raw scores mean a true match. Inferred from the class
    ///   means when `None`.
    /// * `target_recall` - Fraction of true matches the learned threshold must recall.
    pub fn new(
        grid_size: usize,
        bandwidth_adjust: f64,
        monotonize: bool,
        clip_factor: Option<f64>,
        reverse: Option<bool>,
        target_recall: f64,
    ) -> Result<Self, ScorenormError> {
        let cfg = NormalizerConfig {
            grid_size,
            bandwidth_adjust,
            monotonize,
            clip_factor,
            reverse,
            target_recall,
        };

        let normalizer = ScoreNormalizer {
            cfg,
            model: None,
            metadata: HashMap::new(),
        };

        normalizer.validate_parameters()?;
        Ok(normalizer)
    }

    pub fn validate_parameters(&self) -> Result<(), ScorenormError> {
        self.cfg.validate()
    }

    pub fn reset(&mut self) {
        self.model = None;
    }

    /// Fit the normalizer on scores of known true and false matches.
    ///
    /// Estimates a Gaussian kernel density for each class, turns the pair of
    /// densities into a probability of being a true match over a shared score
    /// domain, and learns the decision threshold that satisfies the recall
    /// target. On error the previously fit model, if any, is left untouched.
    ///
    /// * `tp_scores` - Scores of pairs known to be true matches.
    /// * `tn_scores` - Scores of pairs known to be false matches.
    pub fn fit(&mut self, tp_scores: &[f64], tn_scores: &[f64]) -> Result<(), ScorenormError> {
        let start = Instant::now();
        self.validate_parameters()?;

        let reverse = resolve_reverse(tp_scores, tn_scores, self.cfg.reverse);
        info!("Resolved score orientation: reverse = {}.", reverse);
        let tp_kde = GaussianKde::estimate(tp_scores, self.cfg.grid_size, self.cfg.bandwidth_adjust)?;
        let tn_kde = GaussianKde::estimate(tn_scores, self.cfg.grid_size, self.cfg.bandwidth_adjust)?;

        let (min_score, max_score) = find_clip_range(tp_scores, tn_scores, self.cfg.clip_factor, reverse)?;
        let score_domain = linspace(min_score, max_score, self.cfg.grid_size);
        info!(
            "Learning over score domain [{0}, {1}] with {2} grid points.",
            min_score, max_score, self.cfg.grid_size
        );

        let tp_density = tp_kde.evaluate(&score_domain, false);
        let tn_density = tn_kde.evaluate(&score_domain, false);
        let score_density: Vec<f64> = tp_density.iter().zip(&tn_density).map(|(a, b)| (a + b) / 2.0).collect();

        // Equal class priors. Zero evidence pins the probability at zero.
        let mut posterior: Vec<f64> = tp_density
            .iter()
            .zip(&score_density)
            .map(|(a, p_score)| if *p_score == 0.0 { 0.0 } else { a * 0.5 / p_score })
            .collect();

        if self.cfg.monotonize {
            posterior = if reverse {
                monotonize(&posterior, 1.0, 0.0, false)
            } else {
                monotonize(&posterior, 0.0, 1.0, true)
            };
        }

        let mut scores = Vec::with_capacity(tp_scores.len() + tn_scores.len());
        scores.extend_from_slice(tp_scores);
        scores.extend_from_slice(tn_scores);
        let mut labels = vec![true; tp_scores.len()];
        labels.resize(scores.len(), false);

        let probs = normalize_scores_impl(&score_domain, &posterior, &scores, false)?;
        let learned_threshold = learn_threshold(&probs, &labels, self.cfg.target_recall)?;

        let complement = posterior.iter().map(|p| 1.0 - p).collect();
        self.model = Some(NormalizerModel {
            reverse,
            score_domain,
            posterior,
            complement,
            tp_density,
            tn_density,
            score_density,
            learned_threshold,
            tp_bandwidth: tp_kde.bandwidth,
            tn_bandwidth: tn_kde.bandwidth,
            n_tp: tp_scores.len(),
            n_tn: tn_scores.len(),
        });

        info!(
            "Finished fitting a normalizer on {0} true and {1} false match scores in {2} seconds, learned threshold: {3}.",
            tp_scores.len(),
            tn_scores.len(),
            start.elapsed().as_secs(),
            learned_threshold
        );

        Ok(())
    }

    /// Fit the normalizer on a mixed batch of scores with match labels.
    ///
    /// * `scores` - Raw comparison scores.
    /// * `labels` - `true` where the pair is a true match.
    pub fn fit_labeled(&mut self, scores: &[f64], labels: &[bool]) -> Result<(), ScorenormError> {
        if scores.len() != labels.len() {
            return Err(ScorenormError::InvalidParameter(
                "labels".to_string(),
                "one label per score".to_string(),
                format!("{} labels for {} scores", labels.len(), scores.len()),
            ));
        }
        let mut tp_scores = Vec::new();
        let mut tn_scores = Vec::new();
        for (score, label) in scores.iter().zip(labels) {
            if *label {
                tp_scores.push(*score);
            } else {
                tn_scores.push(*score);
            }
        }
        self.fit(&tp_scores, &tn_scores)
    }

    pub(crate) fn fitted(&self, operation: &str) -> Result<&NormalizerModel, ScorenormError> {
        self.model
            .as_ref()
            .ok_or_else(|| ScorenormError::NotFitted(operation.to_string()))
    }

    /// Whether the normalizer has been fit.
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Probability threshold learned at fit time.
    pub fn learned_threshold(&self) -> Result<f64, ScorenormError> {
        Ok(self.fitted("learned_threshold")?.learned_threshold)
    }

    /// Grid of scores the probability curve is defined over.
    pub fn score_domain(&self) -> Result<&[f64], ScorenormError> {
        Ok(&self.fitted("score_domain")?.score_domain)
    }

    /// Probability of a true match at each score domain point.
    pub fn posterior(&self) -> Result<&[f64], ScorenormError> {
        Ok(&self.fitted("posterior")?.posterior)
    }

    /// Probability of a false match at each score domain point.
    pub fn complement(&self) -> Result<&[f64], ScorenormError> {
        Ok(&self.fitted("complement")?.complement)
    }

    /// Whether low raw scores mean a true match.
    pub fn is_reversed(&self) -> Result<bool, ScorenormError> {
        Ok(self.fitted("is_reversed")?.reverse)
    }

    /// Insert metadata
    /// * `key` - String value for the metadata key.
    /// * `value` - value to assign to the metadata key.
    pub fn insert_metadata(&mut self, key: String, value: String) {
        self.metadata.insert(key, value);
    }

    /// Get Metadata
    /// * `key` - Get the associated value for the metadata key.
    pub fn get_metadata(&self, key: &String) -> Option<String> {
        self.metadata.get(key).cloned()
    }
}

impl NormalizerIO for ScoreNormalizer {}
