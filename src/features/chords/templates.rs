//! Chord templates
//!
//! Major and minor triads on the seven natural roots, in lookup order.
//! Order matters: when two templates score the same, the earlier one wins.

use serde::Serialize;

/// Triad quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChordQuality {
    /// Root, major third, fifth
    Major,
    /// Root, minor third, fifth
    Minor,
}

/// A named set of pitch classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChordTemplate {
    /// Chord label (e.g., "Am")
    pub name: &'static str,

    /// Root pitch class
    pub root: u8,

    /// Triad quality
    pub quality: ChordQuality,

    /// Member pitch classes (root, third, fifth)
    pub pitch_classes: [u8; 3],
}

impl ChordTemplate {
    const fn triad(name: &'static str, root: u8, quality: ChordQuality) -> Self {
        let third = match quality {
            ChordQuality::Major => 4,
            ChordQuality::Minor => 3,
        };
        Self {
            name,
            root,
            quality,
            pitch_classes: [root, (root + third) % 12, (root + 7) % 12],
        }
    }

    /// Whether `pitch_class` belongs to the chord
    pub fn contains(&self, pitch_class: u8) -> bool {
        self.pitch_classes.contains(&(pitch_class % 12))
    }
}

/// Chord templates in lookup order
pub static CHORD_TEMPLATES: [ChordTemplate; 14] = [
    ChordTemplate::triad("C", 0, ChordQuality::Major),
    ChordTemplate::triad("Cm", 0, ChordQuality::Minor),
    ChordTemplate::triad("D", 2, ChordQuality::Major),
    ChordTemplate::triad("Dm", 2, ChordQuality::Minor),
    ChordTemplate::triad("E", 4, ChordQuality::Major),
    ChordTemplate::triad("Em", 4, ChordQuality::Minor),
    ChordTemplate::triad("F", 5, ChordQuality::Major),
    ChordTemplate::triad("Fm", 5, ChordQuality::Minor),
    ChordTemplate::triad("G", 7, ChordQuality::Major),
    ChordTemplate::triad("Gm", 7, ChordQuality::Minor),
    ChordTemplate::triad("A", 9, ChordQuality::Major),
    ChordTemplate::triad("Am", 9, ChordQuality::Minor),
    ChordTemplate::triad("B", 11, ChordQuality::Major),
    ChordTemplate::triad("Bm", 11, ChordQuality::Minor),
];
