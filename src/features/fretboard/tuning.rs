//! Open-string tunings

/// Standard guitar tuning, string 1 (lowest) to string 6: E2 A2 D3 G3 B3 E4
pub const STANDARD_TUNING: [u8; 6] = [40, 45, 50, 55, 59, 64];

/// Names of the standard-tuning strings, string 1 to string 6
pub const STANDARD_STRING_NAMES: [&str; 6] = ["E", "A", "D", "G", "B", "e"];

/// Highest playable fret
pub const MAX_FRET: u8 = 24;

/// Fixed tuning of a six-string instrument
///
/// String numbers are 1-based and count from the lowest open pitch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuning {
    /// Open pitch per string, string 1 first
    pub open_pitches: [u8; 6],

    /// Display name per string, string 1 first
    pub names: [&'static str; 6],

    /// Display label for the whole tuning
    pub label: &'static str,
}

impl Tuning {
    /// Create a tuning from open pitches and string names
    pub fn new(open_pitches: [u8; 6], names: [&'static str; 6], label: &'static str) -> Self {
        Self {
            open_pitches,
            names,
            label,
        }
    }

    /// Standard EADGBE tuning
    pub fn standard() -> Self {
        Self::new(STANDARD_TUNING, STANDARD_STRING_NAMES, "Standard (EADGBE)")
    }

    /// Open pitch of a 1-based string number
    pub fn open_pitch(&self, string: u8) -> Option<u8> {
        let idx = (string as usize).checked_sub(1)?;
        self.open_pitches.get(idx).copied()
    }

    /// Display name of a 1-based string number
    pub fn name(&self, string: u8) -> Option<&'static str> {
        let idx = (string as usize).checked_sub(1)?;
        self.names.get(idx).copied()
    }

    /// String numbers ordered from the highest open pitch to the lowest
    pub fn strings_high_to_low(&self) -> Vec<u8> {
        let mut strings: Vec<u8> = (1..=6).collect();
        strings.sort_by(|a, b| {
            self.open_pitches[*b as usize - 1].cmp(&self.open_pitches[*a as usize - 1])
        });
        strings
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}
