//! Normalizer configuration
//!
//! Defines the configuration for the score normalizer along with the
//! IO helpers used to persist normalizers and configurations as json.
use crate::constants::{DEFAULT_BANDWIDTH_ADJUST, DEFAULT_CLIP_FACTOR, DEFAULT_GRID_SIZE, DEFAULT_TARGET_RECALL};
use crate::errors::ScorenormError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}
fn default_bandwidth_adjust() -> f64 {
    DEFAULT_BANDWIDTH_ADJUST
}
fn default_monotonize() -> bool {
    true
}
fn default_clip_factor() -> Option<f64> {
    Some(DEFAULT_CLIP_FACTOR)
}
fn default_reverse() -> Option<bool> {
    None
}
fn default_target_recall() -> f64 {
    DEFAULT_TARGET_RECALL
}

/// Configuration for the `ScoreNormalizer`.
///
/// Unknown keys are rejected when deserializing.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizerConfig {
    /// Number of points in the score domain grid.
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Multiplier applied to the Scott's rule kernel bandwidth.
    #[serde(default = "default_bandwidth_adjust")]
    pub bandwidth_adjust: f64,
    /// Whether to force the probability curve to be strictly monotone.
    #[serde(default = "default_monotonize")]
    pub monotonize: bool,
    /// Overshoot factor above which the score domain is clipped.
    #[serde(default = "default_clip_factor")]
    pub clip_factor: Option<f64>,
    /// Whether low raw scores mean a true match. Inferred from the
    /// class means when `None`.
    #[serde(default = "default_reverse")]
    pub reverse: Option<bool>,
    /// Fraction of true matches the learned threshold must recall.
    #[serde(default = "default_target_recall")]
    pub target_recall: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            grid_size: DEFAULT_GRID_SIZE,
            bandwidth_adjust: DEFAULT_BANDWIDTH_ADJUST,
            monotonize: true,
            clip_factor: Some(DEFAULT_CLIP_FACTOR),
            reverse: None,
            target_recall: DEFAULT_TARGET_RECALL,
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> Result<(), ScorenormError> {
        if self.grid_size < 2 {
            return Err(ScorenormError::InvalidParameter(
                "grid_size".to_string(),
                "an integer of at least 2".to_string(),
                self.grid_size.to_string(),
            ));
        }
        if !(self.bandwidth_adjust > 0.0) || !self.bandwidth_adjust.is_finite() {
            return Err(ScorenormError::InvalidParameter(
                "bandwidth_adjust".to_string(),
                "a positive finite number".to_string(),
                self.bandwidth_adjust.to_string(),
            ));
        }
        if let Some(factor) = self.clip_factor {
            if !(factor > 0.0) || !factor.is_finite() {
                return Err(ScorenormError::InvalidParameter(
                    "clip_factor".to_string(),
                    "a positive finite number".to_string(),
                    factor.to_string(),
                ));
            }
        }
        if !(self.target_recall > 0.0) || !(self.target_recall < 1.0) {
            return Err(ScorenormError::InvalidParameter(
                "target_recall".to_string(),
                "a fraction strictly between 0 and 1".to_string(),
                self.target_recall.to_string(),
            ));
        }
        Ok(())
    }
}

/// IO
pub trait NormalizerIO: Serialize + DeserializeOwned + Sized {
    /// Save a normalizer as a json object to a file.
    ///
    /// * `path` - Path to save normalizer.
    fn save_normalizer<P: AsRef<Path>>(&self, path: P) -> Result<(), ScorenormError> {
        fs::write(path, self.json_dump()?).map_err(|e| ScorenormError::UnableToWrite(e.to_string()))
    }

    /// Dump a normalizer as a json object
    fn json_dump(&self) -> Result<String, ScorenormError> {
        serde_json::to_string(self).map_err(|e| ScorenormError::UnableToWrite(e.to_string()))
    }

    /// Load a normalizer from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, ScorenormError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| ScorenormError::UnableToRead(e.to_string()))
    }

    /// Load a normalizer from a path to a json normalizer object.
    ///
    /// * `path` - Path to load normalizer from.
    fn load_normalizer<P: AsRef<Path>>(path: P) -> Result<Self, ScorenormError> {
        let json_str = fs::read_to_string(path).map_err(|e| ScorenormError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl NormalizerIO for NormalizerConfig {}
