//! Fretboard mapping
//!
//! Places a MIDI pitch on a string/fret of a fixed-tuning six-string
//! instrument, preferring the lowest fret.

pub mod tuning;

pub use tuning::{Tuning, MAX_FRET, STANDARD_STRING_NAMES, STANDARD_TUNING};

use serde::{Deserialize, Serialize};

/// A playable position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FretPosition {
    /// 1-based string number (1 = lowest open pitch)
    pub string: u8,

    /// Fret number (0 = open string)
    pub fret: u8,
}

impl Tuning {
    /// Map a pitch to the position with the smallest fret
    ///
    /// A string is a candidate when `0 <= pitch - open <= MAX_FRET`. Among
    /// candidates the smallest fret wins (lower string on a tie). Returns
    /// `None` when no string reaches the pitch.
    pub fn map_to_fret(&self, pitch: u8) -> Option<FretPosition> {
        let mut best: Option<FretPosition> = None;
        for (idx, &open) in self.open_pitches.iter().enumerate() {
            let Some(fret) = pitch.checked_sub(open) else {
                continue;
            };
            if fret > MAX_FRET {
                continue;
            }
            if best.map_or(true, |b| fret < b.fret) {
                best = Some(FretPosition {
                    string: idx as u8 + 1,
                    fret,
                });
            }
        }
        best
    }
}

/// Map a pitch onto standard guitar tuning
///
/// # Example
///
/// ```
/// use tabscribe::features::fretboard::{map_to_fret, FretPosition};
///
/// assert_eq!(map_to_fret(40), Some(FretPosition { string: 1, fret: 0 }));
/// assert_eq!(map_to_fret(64), Some(FretPosition { string: 6, fret: 0 }));
/// assert_eq!(map_to_fret(30), None);
/// ```
pub fn map_to_fret(pitch: u8) -> Option<FretPosition> {
    Tuning::standard().map_to_fret(pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_open_string() {
        assert_eq!(map_to_fret(40), Some(FretPosition { string: 1, fret: 0 }));
    }

    #[test]
    fn test_prefers_open_high_e() {
        // 64 is also fret 24 on string 1, fret 19 on string 2, ...
        assert_eq!(map_to_fret(64), Some(FretPosition { string: 6, fret: 0 }));
    }

    #[test]
    fn test_prefers_smallest_fret() {
        // A3 (57): fret 2 on G string beats fret 7 on D string
        assert_eq!(map_to_fret(57), Some(FretPosition { string: 4, fret: 2 }));
        // B3 (59): open B string
        assert_eq!(map_to_fret(59), Some(FretPosition { string: 5, fret: 0 }));
    }

    #[test]
    fn test_range_limits() {
        assert_eq!(map_to_fret(39), None);
        assert_eq!(map_to_fret(88), Some(FretPosition { string: 6, fret: 24 }));
        assert_eq!(map_to_fret(89), None);
    }

    #[test]
    fn test_custom_tuning() {
        // drop D
        let tuning = Tuning::new([38, 45, 50, 55, 59, 64], ["D", "A", "D", "G", "B", "e"], "Drop D");
        assert_eq!(tuning.map_to_fret(38), Some(FretPosition { string: 1, fret: 0 }));
        assert_eq!(map_to_fret(38), None);
    }
}
