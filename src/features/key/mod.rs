//! Key estimation modules
//!
//! Estimate the major key of a melody using:
//! - A duration-weighted pitch-class histogram
//! - Pearson correlation against the Krumhansl-Kessler profile (12 rotations)
//! - Key clarity scoring

pub mod detector;
pub mod key_clarity;
pub mod templates;

pub use detector::{detect_key, estimate_key, pearson_correlation, pitch_class_histogram};
pub use key_clarity::compute_key_clarity;
pub use templates::{KeyProfile, KRUMHANSL_KESSLER_MAJOR};

use serde::{Deserialize, Serialize};

use crate::analysis::result::Key;

/// Key detection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyDetectionResult {
    /// Detected key (C when nothing could be correlated)
    pub key: Key,

    /// Correlation of the winning rotation, if any rotation was defined
    pub correlation: Option<f64>,

    /// Confidence score (0.0-1.0), correlation mapped from [-1, 1]
    pub confidence: f32,

    /// Margin between the best and runner-up key (0.0-1.0)
    pub clarity: f32,

    /// Correlations of every defined rotation, highest first
    pub all_scores: Vec<(Key, f64)>,
}
