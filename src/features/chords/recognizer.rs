//! Chord recognition by template overlap
//!
//! Reduces simultaneous pitches to a pitch-class set and picks the template
//! sharing the most pitch classes with it.

use super::templates::{ChordTemplate, CHORD_TEMPLATES};

/// Minimum overlap for a chord to be reported
pub const MIN_CHORD_SCORE: usize = 2;

/// Distinct pitch classes of `pitches`, ascending
pub fn pitch_class_set(pitches: &[u8]) -> Vec<u8> {
    let mut present = [false; 12];
    for &p in pitches {
        present[(p % 12) as usize] = true;
    }
    (0..12u8).filter(|&pc| present[pc as usize]).collect()
}

/// Recognize a chord from simultaneous MIDI pitches
///
/// Each template scores the number of input pitch classes it contains. The
/// highest score wins, earlier templates winning ties. Scores below
/// [`MIN_CHORD_SCORE`] (e.g., a single note) recognize nothing.
///
/// # Example
///
/// ```
/// use tabscribe::features::chords::recognize;
///
/// assert_eq!(recognize(&[60, 64, 67]).map(|c| c.name), Some("C"));
/// assert_eq!(recognize(&[57, 60, 64]).map(|c| c.name), Some("Am"));
/// assert!(recognize(&[60]).is_none());
/// ```
pub fn recognize(pitches: &[u8]) -> Option<&'static ChordTemplate> {
    let pitch_classes = pitch_class_set(pitches);
    if pitch_classes.is_empty() {
        return None;
    }

    let mut best: Option<(&'static ChordTemplate, usize)> = None;
    for template in CHORD_TEMPLATES.iter() {
        let score = pitch_classes.iter().filter(|&&pc| template.contains(pc)).count();
        let is_better = match best {
            None => score > 0,
            Some((_, best_score)) => score > best_score,
        };
        if is_better {
            best = Some((template, score));
        }
    }

    best.filter(|(_, score)| *score >= MIN_CHORD_SCORE)
        .map(|(template, _)| template)
}

/// Chord label for simultaneous pitches, empty when nothing is recognized
pub fn chord_label(pitches: &[u8]) -> &'static str {
    recognize(pitches).map(|t| t.name).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_set() {
        assert_eq!(pitch_class_set(&[72, 60, 64, 76]), vec![0, 4]);
        assert!(pitch_class_set(&[]).is_empty());
    }

    #[test]
    fn test_c_major_triad() {
        assert_eq!(chord_label(&[0, 4, 7]), "C");
        assert_eq!(chord_label(&[48, 64, 79]), "C");
    }

    #[test]
    fn test_added_sixth_still_major() {
        // C, E, G, A: both C and Am score 3, C is listed first
        let chord = recognize(&[0, 4, 7, 9]).unwrap();
        assert_eq!(chord.name, "C");
    }

    #[test]
    fn test_minor_triads() {
        assert_eq!(chord_label(&[57, 60, 64]), "Am");
        assert_eq!(chord_label(&[62, 65, 69]), "Dm");
        assert_eq!(chord_label(&[64, 67, 71]), "Em");
    }

    #[test]
    fn test_two_notes_tie_break_by_order() {
        // C and E are shared by C, Am (and E belongs to Em too): C comes first
        assert_eq!(chord_label(&[60, 64]), "C");
        // D and A: D major listed before Dm
        assert_eq!(chord_label(&[62, 69]), "D");
    }

    #[test]
    fn test_sparse_input_is_empty() {
        assert_eq!(chord_label(&[]), "");
        assert_eq!(chord_label(&[60]), "");
        assert_eq!(chord_label(&[60, 72, 84]), "");
    }

    #[test]
    fn test_recognition_is_deterministic() {
        let pitches = [61, 66, 70, 75];
        assert_eq!(recognize(&pitches), recognize(&pitches));
    }
}
