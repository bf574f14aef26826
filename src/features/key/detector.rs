//! Key detection algorithm
//!
//! Correlates a duration-weighted pitch-class histogram against the
//! Krumhansl-Kessler major profile under all 12 rotations.
//!
//! # Reference
//!
//! Krumhansl, C. L., & Kessler, E. J. (1982). Tracing the Dynamic Changes in Perceived
//! Tonal Organization in a Spatial Representation of Musical Keys. *Psychological Review*,
//! 89(4), 334-368.

use super::{compute_key_clarity, templates::KeyProfile, KeyDetectionResult};
use crate::analysis::result::{Key, Note};

/// Build a 12-bin pitch-class histogram weighted by note duration
pub fn pitch_class_histogram(notes: &[Note]) -> [f64; 12] {
    let mut histogram = [0.0f64; 12];
    for note in notes {
        histogram[note.pitch_class() as usize] += note.duration();
    }
    histogram
}

/// Pearson correlation coefficient between two 12-element series
///
/// Returns `None` when either series has zero variance (correlation undefined).
pub fn pearson_correlation(x: &[f64; 12], y: &[f64; 12]) -> Option<f64> {
    let n = 12.0f64;
    let mean_x: f64 = x.iter().sum::<f64>() / n;
    let mean_y: f64 = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0f64;
    let mut var_x = 0.0f64;
    let mut var_y = 0.0f64;

    for i in 0..12 {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom_x = var_x.sqrt();
    let denom_y = var_y.sqrt();
    if denom_x > 0.0 && denom_y > 0.0 {
        Some(covariance / (denom_x * denom_y))
    } else {
        None
    }
}

/// Detect the major key of a melody
///
/// For each rotation offset `k` the histogram is rotated so that pitch class
/// `k` lines up with the profile's tonic, and the Pearson correlation is
/// computed. The highest correlation wins; on exact ties the lowest offset
/// wins. Rotations with an undefined correlation are skipped.
///
/// An empty melody (or one whose histogram is flat) yields C with zero
/// confidence.
///
/// # Example
///
/// ```
/// use tabscribe::analysis::result::Note;
/// use tabscribe::features::key::{detect_key, KeyProfile};
///
/// // G held longest, with D and B around it
/// let notes = vec![
///     Note::new(67, 0.0, 2.0, 80),
///     Note::new(71, 2.0, 3.0, 80),
///     Note::new(74, 3.0, 4.5, 80),
/// ];
/// let result = detect_key(&notes, &KeyProfile::major());
/// assert_eq!(result.key.name(), "G");
/// ```
pub fn detect_key(notes: &[Note], profile: &KeyProfile) -> KeyDetectionResult {
    log::debug!("Detecting key from {} notes", notes.len());

    if notes.is_empty() {
        return KeyDetectionResult {
            key: Key::default(),
            correlation: None,
            confidence: 0.0,
            clarity: 0.0,
            all_scores: vec![],
        };
    }

    let histogram = pitch_class_histogram(notes);

    let mut scores: Vec<(Key, f64)> = Vec::with_capacity(12);
    let mut best: Option<(Key, f64)> = None;

    for shift in 0..12 {
        let mut rotated = [0.0f64; 12];
        for (i, slot) in rotated.iter_mut().enumerate() {
            *slot = histogram[(i + shift) % 12];
        }

        let Some(correlation) = pearson_correlation(&rotated, &profile.weights) else {
            log::debug!("Skipping rotation {}: zero variance", shift);
            continue;
        };

        let key = Key::new(shift as u8);
        scores.push((key, correlation));

        let is_better = match best {
            None => true,
            Some((_, best_correlation)) => correlation > best_correlation,
        };
        if is_better {
            best = Some((key, correlation));
        }
    }

    // Stable sort keeps lower offsets first on ties
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));
    let clarity = compute_key_clarity(&scores);

    let (key, correlation) = match best {
        Some((key, correlation)) => (key, Some(correlation)),
        None => (Key::default(), None),
    };
    let confidence = correlation
        .map(|r| ((r + 1.0) / 2.0).clamp(0.0, 1.0) as f32)
        .unwrap_or(0.0);

    log::debug!(
        "Detected key: {}, correlation: {:?}, confidence: {:.3}, clarity: {:.3}",
        key.name(),
        correlation,
        confidence,
        clarity
    );

    KeyDetectionResult {
        key,
        correlation,
        confidence,
        clarity,
        all_scores: scores,
    }
}

/// Estimate the key with the reference major profile
///
/// Returns C for an empty melody.
pub fn estimate_key(notes: &[Note]) -> Key {
    detect_key(notes, &KeyProfile::major()).key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::key::KRUMHANSL_KESSLER_MAJOR;

    /// One note per pitch class whose duration follows the profile transposed to `tonic`
    fn profile_melody(tonic: usize) -> Vec<Note> {
        (0..12)
            .map(|pc| {
                let weight = KRUMHANSL_KESSLER_MAJOR[(pc + 12 - tonic) % 12];
                Note::new(60 + pc as u8, 0.0, weight, 80)
            })
            .collect()
    }

    #[test]
    fn test_empty_defaults_to_c() {
        let result = detect_key(&[], &KeyProfile::major());
        assert_eq!(result.key.name(), "C");
        assert_eq!(result.confidence, 0.0);
        assert!(result.all_scores.is_empty());
        assert_eq!(estimate_key(&[]).name(), "C");
    }

    #[test]
    fn test_rotated_profile_identifies_each_key() {
        let names = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
        for (tonic, name) in names.iter().enumerate() {
            let result = detect_key(&profile_melody(tonic), &KeyProfile::major());
            assert_eq!(result.key.name(), *name, "tonic {}", tonic);
            let r = result.correlation.unwrap();
            assert!((r - 1.0).abs() < 1e-9);
            assert!(result.confidence > 0.99);
            assert_eq!(result.all_scores.len(), 12);
            assert_eq!(result.all_scores[0].0, result.key);
        }
    }

    #[test]
    fn test_histogram_is_duration_weighted() {
        let notes = vec![
            Note::new(60, 0.0, 0.1, 80),
            Note::new(60, 0.1, 0.2, 80),
            Note::new(60, 0.2, 0.3, 80),
            Note::new(67, 0.3, 2.3, 80),
        ];
        let histogram = pitch_class_histogram(&notes);
        assert!((histogram[0] - 0.3).abs() < 1e-9);
        assert!((histogram[7] - 2.0).abs() < 1e-9);
        // one long G outweighs three short Cs
        assert_eq!(estimate_key(&notes).name(), "G");
    }

    #[test]
    fn test_single_pitch_class_selects_its_tonic() {
        let notes = vec![Note::new(67, 0.0, 1.0, 80), Note::new(79, 1.0, 1.5, 80)];
        assert_eq!(estimate_key(&notes).name(), "G");
    }

    #[test]
    fn test_flat_histogram_is_degenerate() {
        let notes: Vec<Note> = (0..12).map(|pc| Note::new(60 + pc, 0.0, 0.5, 80)).collect();
        let result = detect_key(&notes, &KeyProfile::major());
        assert_eq!(result.key.name(), "C");
        assert!(result.correlation.is_none());
        assert!(result.all_scores.is_empty());
    }

    #[test]
    fn test_pearson_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut y = x;
        y.reverse();
        assert!((pearson_correlation(&x, &x).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson_correlation(&x, &y).unwrap() + 1.0).abs() < 1e-12);
        assert!(pearson_correlation(&x, &[3.0; 12]).is_none());
    }

    #[test]
    fn test_exact_tie_goes_to_lowest_offset() {
        // period-6 profile: rotations 0 and 6 see identical series
        let weights = [5.0, 1.0, 2.0, 1.0, 3.0, 1.0, 5.0, 1.0, 2.0, 1.0, 3.0, 1.0];
        let profile = KeyProfile::new(weights);
        let notes: Vec<Note> = weights
            .iter()
            .enumerate()
            .map(|(pc, &w)| Note::new(60 + pc as u8, 0.0, w, 80))
            .collect();

        let result = detect_key(&notes, &profile);
        assert_eq!(result.key.name(), "C");

        let c = result.all_scores.iter().find(|(k, _)| k.tonic == 0).unwrap().1;
        let f_sharp = result.all_scores.iter().find(|(k, _)| k.tonic == 6).unwrap().1;
        assert_eq!(c, f_sharp);
        // the stable sort keeps the lower offset first
        assert_eq!(result.all_scores[0].0.tonic, 0);
        assert_eq!(result.all_scores[1].0.tonic, 6);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let notes = profile_melody(4);
        let a = detect_key(&notes, &KeyProfile::major());
        let b = detect_key(&notes, &KeyProfile::major());
        assert_eq!(a.key, b.key);
        assert_eq!(a.all_scores, b.all_scores);
    }
}
