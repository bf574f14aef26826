//! Chord modules
//!
//! Two separate chord concepts:
//! - Recognition: labels a set of simultaneous pitches with a triad template
//! - Progression: infers one bass root per measure from the melody

pub mod progression;
pub mod recognizer;
pub mod templates;

pub use progression::{estimate_progression, estimate_progression_with_base, DEFAULT_BASS_BASE_PITCH};
pub use recognizer::{chord_label, pitch_class_set, recognize, MIN_CHORD_SCORE};
pub use templates::{ChordQuality, ChordTemplate, CHORD_TEMPLATES};
