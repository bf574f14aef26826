//! Key clarity scoring
//!
//! Estimates how "tonal" vs "atonal" a melody is.

use crate::analysis::result::Key;

/// Compute key clarity from ranked key correlations
///
/// Clarity is the margin between the best and the runner-up correlation,
/// clamped to [0, 1]. A single candidate has clarity equal to its own
/// (non-negative) correlation; no candidates means no clarity.
///
/// # Arguments
///
/// * `ranked_scores` - Key correlations, highest first
pub fn compute_key_clarity(ranked_scores: &[(Key, f64)]) -> f32 {
    let clarity = match ranked_scores {
        [] => 0.0,
        [(_, only)] => *only,
        [(_, best), (_, second), ..] => best - second,
    };
    clarity.clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clarity_empty() {
        assert_eq!(compute_key_clarity(&[]), 0.0);
    }

    #[test]
    fn test_clarity_margin() {
        let scores = vec![(Key::new(0), 0.9), (Key::new(7), 0.6), (Key::new(5), 0.1)];
        assert!((compute_key_clarity(&scores) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_clarity_clamped() {
        let scores = vec![(Key::new(0), 1.0), (Key::new(7), -0.8)];
        assert_eq!(compute_key_clarity(&scores), 1.0);
    }
}
