//! Krumhansl-Kessler key profile
//!
//! Reference tonal profile for a major key, index 0 = tonic.

/// Krumhansl-Kessler major-key profile
pub const KRUMHANSL_KESSLER_MAJOR: [f64; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Reference profile a pitch-class histogram is correlated against
#[derive(Debug, Clone, PartialEq)]
pub struct KeyProfile {
    /// Profile weights, index 0 = tonic
    pub weights: [f64; 12],
}

impl KeyProfile {
    /// Create a profile from explicit weights
    pub fn new(weights: [f64; 12]) -> Self {
        Self { weights }
    }

    /// Krumhansl-Kessler major profile
    pub fn major() -> Self {
        Self::new(KRUMHANSL_KESSLER_MAJOR)
    }
}

impl Default for KeyProfile {
    fn default() -> Self {
        Self::major()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_major_profile() {
        let profile = KeyProfile::default();
        assert_eq!(profile.weights[0], 6.35);
        assert_eq!(profile.weights[7], 5.19);
    }
}
