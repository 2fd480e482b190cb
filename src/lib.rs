// Modules
pub mod constants;
pub mod distance;
pub mod errors;
pub mod interpolation;
pub mod kde;
pub mod metric;
pub mod monotonic;
pub mod normalizer;
pub mod range;
pub mod testdata;
pub mod utils;

// Individual classes, and functions
pub use kde::GaussianKde;
pub use normalizer::{NormalizerConfig, NormalizerIO, ScoreNormalizer};
