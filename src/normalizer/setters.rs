use crate::ScoreNormalizer;

impl ScoreNormalizer {
    // Set methods for parameters

    /// Set the grid size on the normalizer.
    /// * `grid_size` - Number of points in the score domain grid.
    pub fn set_grid_size(mut self, grid_size: usize) -> Self {
        self.cfg.grid_size = grid_size;
        self
    }

    /// Set the bandwidth adjust on the normalizer.
    /// * `bandwidth_adjust` - Multiplier applied to the Scott's rule kernel bandwidth.
    pub fn set_bandwidth_adjust(mut self, bandwidth_adjust: f64) -> Self {
        self.cfg.bandwidth_adjust = bandwidth_adjust;
        self
    }

    /// Set whether the probability curve is forced monotone on the normalizer.
    /// * `monotonize` - Whether to force the probability curve to be strictly monotone.
    pub fn set_monotonize(mut self, monotonize: bool) -> Self {
        self.cfg.monotonize = monotonize;
        self
    }

    /// Set the clip factor on the normalizer.
    /// * `clip_factor` - Overshoot factor above which the score domain is clipped.
    pub fn set_clip_factor(mut self, clip_factor: Option<f64>) -> Self {
        self.cfg.clip_factor = clip_factor;
        self
    }

    /// Set the score orientation on the normalizer.
    /// * `reverse` - Whether low raw scores mean a true match.
    pub fn set_reverse(mut self, reverse: Option<bool>) -> Self {
        self.cfg.reverse = reverse;
        self
    }

    /// Set the target recall on the normalizer.
    /// * `target_recall` - Fraction of true matches the learned threshold must recall.
    pub fn set_target_recall(mut self, target_recall: f64) -> Self {
        self.cfg.target_recall = target_recall;
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::ScoreNormalizer;

    #[test]
    fn test_setters_chain() {
        let normalizer = ScoreNormalizer::default()
            .set_grid_size(256)
            .set_bandwidth_adjust(4.0)
            .set_monotonize(false)
            .set_clip_factor(None)
            .set_reverse(Some(true))
            .set_target_recall(0.9);
        assert_eq!(normalizer.cfg.grid_size, 256);
        assert_eq!(normalizer.cfg.bandwidth_adjust, 4.0);
        assert!(!normalizer.cfg.monotonize);
        assert_eq!(normalizer.cfg.clip_factor, None);
        assert_eq!(normalizer.cfg.reverse, Some(true));
        assert_eq!(normalizer.cfg.target_recall, 0.9);
    }
}
