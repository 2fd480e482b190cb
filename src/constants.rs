pub const GOLDEN_RATIO: f64 = 1.618033988749895;
pub const DEFAULT_CLIP_FACTOR: f64 = GOLDEN_RATIO + 1.0;
pub const DEFAULT_GRID_SIZE: usize = 1024;
pub const DEFAULT_BANDWIDTH_ADJUST: f64 = 8.0;
pub const DEFAULT_TARGET_RECALL: f64 = 0.95;
pub const SQRT_2PI: f64 = 2.5066282746310002;
pub const MIN_KDE_SAMPLES: usize = 2;
