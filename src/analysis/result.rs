//! Transcription result types

use serde::{Deserialize, Serialize};

use super::metadata::TranscriptionMetadata;

/// Pitch-class names, index 0 = C
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A discrete note event
///
/// Produced by the segmenter (or built from an inferred bass line) and never
/// mutated afterwards. Times are in seconds from the start of the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI pitch number (0-127)
    pub pitch: u8,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds (always greater than `start`)
    pub end: f64,

    /// MIDI velocity (1-127)
    pub velocity: u8,
}

impl Note {
    /// Create a note
    pub fn new(pitch: u8, start: f64, end: f64, velocity: u8) -> Self {
        Self {
            pitch,
            start,
            end,
            velocity,
        }
    }

    /// Length of the note in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Pitch reduced modulo 12
    pub fn pitch_class(&self) -> u8 {
        self.pitch % 12
    }
}

/// Root inferred for one measure by the progression estimator
///
/// Distinct from the per-beat chord labels of the chord recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChordSpan {
    /// Root pitch class (0 = C, ..., 11 = B)
    pub root: u8,

    /// Bass pitch carrying the root (base pitch + root)
    pub pitch: u8,

    /// Measure start in seconds
    pub start: f64,

    /// Measure end in seconds
    pub end: f64,
}

impl ChordSpan {
    /// Name of the root pitch class
    pub fn root_name(&self) -> &'static str {
        PITCH_CLASS_NAMES[self.root as usize % 12]
    }

    /// Render the span as a sustained bass note
    pub fn to_note(&self, velocity: u8) -> Note {
        Note::new(self.pitch, self.start, self.end, velocity)
    }
}

/// Musical key (major, identified by its tonic pitch class)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// Tonic pitch class (0 = C, 1 = C#, ..., 11 = B)
    pub tonic: u8,
}

impl Key {
    /// Key with the given tonic; values above 11 wrap
    pub fn new(tonic: u8) -> Self {
        Self { tonic: tonic % 12 }
    }

    /// Get key name (e.g., "C", "F#")
    ///
    /// # Example
    ///
    /// ```
    /// use tabscribe::analysis::result::Key;
    ///
    /// assert_eq!(Key::new(0).name(), "C");
    /// assert_eq!(Key::new(6).name(), "F#");
    /// ```
    pub fn name(&self) -> &'static str {
        PITCH_CLASS_NAMES[self.tonic as usize % 12]
    }
}

/// Transcription quality flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptionFlag {
    /// Key clarity is low (flat or ambiguous pitch-class distribution)
    WeakTonality,
    /// Few analysis frames were voiced
    SparseVoicing,
    /// The beat tracker tempo was missing or had to be clamped
    TempoAdjusted,
}

/// Complete transcription of one pitch track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    /// Segmented melody, ordered by start
    pub notes: Vec<Note>,

    /// One inferred root per non-empty measure
    pub progression: Vec<ChordSpan>,

    /// The progression rendered as a bass line
    pub bass_notes: Vec<Note>,

    /// Estimated key
    pub key: Key,

    /// Key confidence (0.0-1.0)
    pub key_confidence: f32,

    /// Key clarity (0.0-1.0)
    pub key_clarity: f32,

    /// Working tempo in BPM (already clamped)
    pub tempo: f64,

    /// Run metadata
    pub metadata: TranscriptionMetadata,
}

impl Transcription {
    /// Number of melody notes
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Tempo rounded to whole BPM for reporting
    pub fn tempo_bpm(&self) -> u32 {
        self.tempo.round() as u32
    }

    /// Melody and bass line merged, ordered by start
    pub fn arrangement(&self) -> Vec<Note> {
        let mut all: Vec<Note> = self
            .notes
            .iter()
            .chain(self.bass_notes.iter())
            .copied()
            .collect();
        all.sort_by(|a, b| a.start.total_cmp(&b.start));
        all
    }
}
