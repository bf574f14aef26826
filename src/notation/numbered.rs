//! Numbered notation (jianpu)
//!
//! Scale degrees 1-7 relative to a major key, `#` for the raised degree in
//! between, `·` per octave above the middle-C octave and `,` per octave below.

use crate::analysis::result::PITCH_CLASS_NAMES;

/// Semitone offset of each major-scale degree
const SCALE_DEGREES: [(i32, &str); 7] = [
    (0, "1"),
    (2, "2"),
    (4, "3"),
    (5, "4"),
    (7, "5"),
    (9, "6"),
    (11, "7"),
];

/// Octave mark above the middle-C octave
pub const HIGH_OCTAVE_MARK: &str = "·";

/// Octave mark below the middle-C octave
pub const LOW_OCTAVE_MARK: &str = ",";

fn degree(semitones: i32) -> Option<&'static str> {
    SCALE_DEGREES
        .iter()
        .find(|(offset, _)| *offset == semitones)
        .map(|(_, d)| *d)
}

/// Render a MIDI pitch in numbered notation relative to `key_offset`
///
/// The octave is counted from middle C (60 to 71 carry no mark) and is not
/// affected by the key offset.
///
/// # Example
///
/// ```
/// use tabscribe::notation::midi_to_numbered;
///
/// assert_eq!(midi_to_numbered(60, 0), "1");
/// assert_eq!(midi_to_numbered(66, 0), "4#");
/// assert_eq!(midi_to_numbered(76, 0), "3·");
/// assert_eq!(midi_to_numbered(55, 0), "5,");
/// assert_eq!(midi_to_numbered(62, 2), "1");
/// ```
pub fn midi_to_numbered(pitch: u8, key_offset: i32) -> String {
    let note_in_scale = (pitch as i32 - key_offset).rem_euclid(12);
    let octave = (pitch as i32 - 60).div_euclid(12);

    let mut out = match degree(note_in_scale) {
        Some(d) => d.to_string(),
        None => match degree(note_in_scale - 1) {
            Some(d) => format!("{}#", d),
            None => note_in_scale.to_string(),
        },
    };

    if octave > 0 {
        out.push_str(&HIGH_OCTAVE_MARK.repeat(octave as usize));
    } else if octave < 0 {
        out.push_str(&LOW_OCTAVE_MARK.repeat(octave.unsigned_abs() as usize));
    }
    out
}

/// Scientific pitch name of a MIDI note (60 = "C4")
pub fn midi_note_to_name(pitch: u8) -> String {
    let octave = (pitch as i32 / 12) - 1;
    format!("{}{}", PITCH_CLASS_NAMES[(pitch % 12) as usize], octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_major_scale() {
        let scale: Vec<String> = [60u8, 62, 64, 65, 67, 69, 71]
            .iter()
            .map(|&p| midi_to_numbered(p, 0))
            .collect();
        assert_eq!(scale, vec!["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn test_accidentals() {
        assert_eq!(midi_to_numbered(61, 0), "1#");
        assert_eq!(midi_to_numbered(63, 0), "2#");
        assert_eq!(midi_to_numbered(68, 0), "5#");
        assert_eq!(midi_to_numbered(70, 0), "6#");
    }

    #[test]
    fn test_octave_marks() {
        assert_eq!(midi_to_numbered(72, 0), "1·");
        assert_eq!(midi_to_numbered(84, 0), "1··");
        assert_eq!(midi_to_numbered(59, 0), "7,");
        assert_eq!(midi_to_numbered(36, 0), "1,,");
    }

    #[test]
    fn test_key_offset() {
        // G major: G is 1, F# is 7
        assert_eq!(midi_to_numbered(67, 7), "1");
        assert_eq!(midi_to_numbered(66, 7), "7");
        // negative offsets wrap the same way
        assert_eq!(midi_to_numbered(67, -5), "1");
    }

    #[test]
    fn test_note_names() {
        assert_eq!(midi_note_to_name(60), "C4");
        assert_eq!(midi_note_to_name(61), "C#4");
        assert_eq!(midi_note_to_name(69), "A4");
        assert_eq!(midi_note_to_name(21), "A0");
        assert_eq!(midi_note_to_name(0), "C-1");
    }
}
