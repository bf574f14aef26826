//! Text notation renderers
//!
//! Three independent renderers quantize a note sequence onto a fixed beat grid
//! and format fixed-width text:
//!
//! - [`render_chord_sheet`]: numbered-notation melody with per-beat chord labels
//! - [`render_tablature`]: six-line guitar tablature
//! - [`render_piano_sheet`]: right/left hand reduction split at middle C
//!
//! Each returns a typed result; [`render`] dispatches by [`SheetKind`] and folds
//! the outcome into a [`SheetResult`] for callers that want a flat
//! success/error record.

pub mod chord_sheet;
pub mod grid;
pub mod numbered;
pub mod piano;
pub mod tablature;

pub use chord_sheet::{render_chord_sheet, ChordSheet, SheetMeasure};
pub use grid::BeatGrid;
pub use numbered::{midi_note_to_name, midi_to_numbered};
pub use piano::{render_piano_sheet, PianoSheet};
pub use tablature::{render_tablature, render_tablature_with_tuning, TabLine, Tablature};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::result::{Note, PITCH_CLASS_NAMES};
use crate::config::{BEATS_PER_MEASURE, DEFAULT_TEMPO_BPM, MAX_TEMPO_BPM, MIN_TEMPO_BPM};
use crate::error::TranscriptionError;

/// Placeholder for an empty beat or column
pub const EMPTY_CELL: &str = "-";

/// Longest beat grid a renderer will lay out
pub const MAX_RENDER_BEATS: usize = 100_000;

/// Rendering parameters shared by all renderers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetOptions {
    /// Tempo in BPM, 60 to 200 (120 when `None`)
    pub tempo: Option<f64>,

    /// Tonic pitch class the numbered notation is relative to (0 = C)
    pub key_offset: i32,
}

impl SheetOptions {
    /// Name of the key selected by `key_offset`
    pub fn key_name(&self) -> &'static str {
        PITCH_CLASS_NAMES[self.key_offset.rem_euclid(12) as usize]
    }

    /// Tempo to render at
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidInput` for a tempo outside
    /// `[MIN_TEMPO_BPM, MAX_TEMPO_BPM]` (NaN included).
    pub fn tempo_bpm(&self) -> Result<f64, TranscriptionError> {
        let tempo = self.tempo.unwrap_or(DEFAULT_TEMPO_BPM);
        if !(MIN_TEMPO_BPM..=MAX_TEMPO_BPM).contains(&tempo) {
            return Err(TranscriptionError::InvalidInput(format!(
                "Tempo must be between {} and {} BPM, got {}",
                MIN_TEMPO_BPM, MAX_TEMPO_BPM, tempo
            )));
        }
        Ok(tempo)
    }
}

/// Sort notes by start and build the beat grid over them
pub(crate) fn prepare<'n>(
    notes: &'n [Note],
    options: &SheetOptions,
) -> Result<(Vec<&'n Note>, BeatGrid), TranscriptionError> {
    if notes.is_empty() {
        return Err(TranscriptionError::InsufficientData(
            "No notes to render".to_string(),
        ));
    }
    let tempo = options.tempo_bpm()?;

    if let Some(note) = notes
        .iter()
        .find(|n| !(n.start.is_finite() && n.end.is_finite() && n.start >= 0.0))
    {
        return Err(TranscriptionError::InvalidInput(format!(
            "Note times must be finite and non-negative, got {} to {}",
            note.start, note.end
        )));
    }

    let mut sorted: Vec<&Note> = notes.iter().collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let grid = BeatGrid::for_notes(tempo, &sorted);
    if grid.total_duration / grid.beat_duration > MAX_RENDER_BEATS as f64 {
        return Err(TranscriptionError::InvalidInput(format!(
            "{:.1}s at {} BPM exceeds {} beats",
            grid.total_duration, tempo, MAX_RENDER_BEATS
        )));
    }
    Ok((sorted, grid))
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    /// Numbered-notation melody with chord labels
    ChordSheet,
    /// Six-line guitar tablature
    FingerstyleTab,
    /// Two-hand piano reduction
    PianoSheet,
}

impl SheetKind {
    /// All kinds, in rendering order
    pub const ALL: [SheetKind; 3] = [SheetKind::ChordSheet, SheetKind::FingerstyleTab, SheetKind::PianoSheet];

    /// Identifier used in serialized form and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetKind::ChordSheet => "chord_sheet",
            SheetKind::FingerstyleTab => "fingerstyle_tab",
            SheetKind::PianoSheet => "piano_sheet",
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SheetKind {
    type Err = TranscriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SheetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| TranscriptionError::InvalidInput(format!("Unknown sheet kind: {}", s)))
    }
}

/// A successfully rendered sheet of any kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Sheet {
    /// Chord sheet
    ChordSheet(ChordSheet),
    /// Tablature
    Tablature(Tablature),
    /// Piano sheet
    PianoSheet(PianoSheet),
}

impl Sheet {
    /// Formatted text
    pub fn content(&self) -> &str {
        match self {
            Sheet::ChordSheet(s) => &s.content,
            Sheet::Tablature(t) => &t.content,
            Sheet::PianoSheet(p) => &p.content,
        }
    }
}

/// Render notes in the requested format
///
/// # Errors
///
/// Propagates the renderer's error.
pub fn render_sheet(kind: SheetKind, notes: &[Note], options: &SheetOptions) -> Result<Sheet, TranscriptionError> {
    match kind {
        SheetKind::ChordSheet => render_chord_sheet(notes, options).map(Sheet::ChordSheet),
        SheetKind::FingerstyleTab => render_tablature(notes, options).map(Sheet::Tablature),
        SheetKind::PianoSheet => render_piano_sheet(notes, options).map(Sheet::PianoSheet),
    }
}

/// Flat renderer outcome
///
/// Failures carry a message instead of content; building one never panics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetResult {
    /// Whether rendering succeeded
    pub success: bool,

    /// Requested format
    pub kind: SheetKind,

    /// Formatted text (empty on failure)
    pub content: String,

    /// Tempo in whole BPM
    pub tempo: Option<u32>,

    /// Key name, for formats written in numbered notation
    pub key: Option<String>,

    /// Number of 4-beat measures, counting a trailing partial one
    pub measures: Option<usize>,

    /// Notes placed on the fretboard (tablature)
    pub total_notes: Option<usize>,

    /// Failure message
    pub error: Option<String>,
}

impl SheetResult {
    /// Fold a renderer outcome into a flat result
    pub fn from_outcome(kind: SheetKind, outcome: Result<Sheet, TranscriptionError>) -> Self {
        let mut result = SheetResult {
            success: false,
            kind,
            content: String::new(),
            tempo: None,
            key: None,
            measures: None,
            total_notes: None,
            error: None,
        };

        match outcome {
            Ok(Sheet::ChordSheet(sheet)) => {
                result.tempo = Some(sheet.tempo);
                result.key = Some(sheet.key);
                result.measures = Some(sheet.measures.len());
                result.content = sheet.content;
                result.success = true;
            }
            Ok(Sheet::Tablature(tab)) => {
                result.tempo = Some(tab.tempo);
                result.total_notes = Some(tab.total_notes);
                result.content = tab.content;
                result.success = true;
            }
            Ok(Sheet::PianoSheet(sheet)) => {
                result.tempo = Some(sheet.tempo);
                result.key = Some(sheet.key);
                result.measures = Some(sheet.right_hand.len().div_ceil(BEATS_PER_MEASURE));
                result.content = sheet.content;
                result.success = true;
            }
            Err(e) => {
                log::warn!("Rendering {} failed: {}", kind, e);
                result.error = Some(e.to_string());
            }
        }
        result
    }
}

/// Render notes in the requested format as a flat result
///
/// # Example
///
/// ```
/// use tabscribe::notation::{render, SheetKind, SheetOptions};
///
/// let result = render(SheetKind::PianoSheet, &[], &SheetOptions::default());
/// assert!(!result.success);
/// assert!(result.error.is_some());
/// ```
pub fn render(kind: SheetKind, notes: &[Note], options: &SheetOptions) -> SheetResult {
    SheetResult::from_outcome(kind, render_sheet(kind, notes, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn melody() -> Vec<Note> {
        vec![
            Note::new(64, 0.6, 1.0, 80),
            Note::new(60, 0.0, 0.5, 80),
            Note::new(67, 1.0, 2.0, 80),
        ]
    }

    #[test]
    fn test_sheet_kind_parse() {
        assert_eq!("chord_sheet".parse::<SheetKind>().unwrap(), SheetKind::ChordSheet);
        assert_eq!("fingerstyle_tab".parse::<SheetKind>().unwrap(), SheetKind::FingerstyleTab);
        assert_eq!(" piano_sheet ".parse::<SheetKind>().unwrap(), SheetKind::PianoSheet);
        assert!(matches!(
            "lead_sheet".parse::<SheetKind>(),
            Err(TranscriptionError::InvalidInput(_))
        ));
        for kind in SheetKind::ALL {
            assert_eq!(kind.to_string().parse::<SheetKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_empty_notes_fail_for_every_kind() {
        for kind in SheetKind::ALL {
            let result = render(kind, &[], &SheetOptions::default());
            assert!(!result.success, "{}", kind);
            assert!(result.content.is_empty());
            assert!(!result.error.unwrap().is_empty());
        }
    }

    #[test]
    fn test_invalid_tempo() {
        let options = SheetOptions {
            tempo: Some(0.0),
            key_offset: 0,
        };
        let err = render_chord_sheet(&melody(), &options).unwrap_err();
        assert!(matches!(err, TranscriptionError::InvalidInput(_)));

        let options = SheetOptions {
            tempo: Some(f64::NAN),
            key_offset: 0,
        };
        assert!(!render(SheetKind::FingerstyleTab, &melody(), &options).success);
    }

    #[test]
    fn test_tempo_outside_policy_range_is_rejected() {
        let notes = vec![Note::new(60, 0.0, 1.0, 80)];
        for tempo in [f64::MAX, 1e9, f64::INFINITY, 201.0, 59.9, -120.0] {
            let options = SheetOptions {
                tempo: Some(tempo),
                key_offset: 0,
            };
            for kind in SheetKind::ALL {
                let result = render(kind, &notes, &options);
                assert!(!result.success, "{} at {}", kind, tempo);
                assert!(result.error.unwrap().contains("Tempo"));
            }
        }

        let bounds = [Some(60.0), Some(200.0)];
        for tempo in bounds {
            let options = SheetOptions { tempo, key_offset: 0 };
            assert!(render(SheetKind::ChordSheet, &notes, &options).success);
        }
    }

    #[test]
    fn test_unusable_note_times_are_rejected() {
        let options = SheetOptions::default();
        for note in [
            Note::new(60, 0.0, f64::INFINITY, 80),
            Note::new(60, f64::NAN, 1.0, 80),
            Note::new(60, -1.0, 1.0, 80),
        ] {
            let err = render_piano_sheet(&[note], &options).unwrap_err();
            assert!(matches!(err, TranscriptionError::InvalidInput(_)));
        }

        // a single note ending days later exceeds the grid limit
        let err = render_tablature(&[Note::new(64, 0.0, 1e6, 80)], &options).unwrap_err();
        assert!(matches!(err, TranscriptionError::InvalidInput(_)));
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let sheet = render_chord_sheet(&melody(), &SheetOptions::default()).unwrap();
        assert_eq!(sheet.measures[0].melody, vec!["1", "3", "5", "-"]);
    }

    #[test]
    fn test_structured_fields() {
        let notes = melody();
        let options = SheetOptions::default();

        let chords = render(SheetKind::ChordSheet, &notes, &options);
        assert!(chords.success);
        assert_eq!(chords.tempo, Some(120));
        assert_eq!(chords.key.as_deref(), Some("C"));
        assert_eq!(chords.measures, Some(1));
        assert!(chords.error.is_none());

        let tab = render(SheetKind::FingerstyleTab, &notes, &options);
        assert!(tab.success);
        assert_eq!(tab.total_notes, Some(3));
        assert!(tab.key.is_none());

        let piano = render(SheetKind::PianoSheet, &notes, &options);
        assert!(piano.success);
        // four beats make one measure
        assert_eq!(piano.measures, Some(1));
    }

    #[test]
    fn test_key_name_wraps() {
        let options = SheetOptions {
            tempo: None,
            key_offset: -3,
        };
        assert_eq!(options.key_name(), "A");
    }
}
