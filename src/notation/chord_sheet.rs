//! Chord sheet renderer
//!
//! One chord line and one numbered-notation melody line per 4-beat measure:
//! - Melody: the highest note starting in each beat, `-` for an empty beat
//! - Chords: the chord recognized over all notes starting in the beat; a label
//!   repeated within a measure is left blank
//! - A blank line after every 4 measures

use serde::{Deserialize, Serialize};

use super::grid::BeatGrid;
use super::numbered::midi_to_numbered;
use super::{prepare, SheetOptions, EMPTY_CELL};
use crate::analysis::result::Note;
use crate::config::BEATS_PER_MEASURE;
use crate::error::TranscriptionError;
use crate::features::chords::chord_label;

/// Measures per line group before a blank separator line
pub const MEASURES_PER_GROUP: usize = 4;

/// Blank chord cell
const BLANK_CHORD: &str = "    ";

/// Beat-level content of one measure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMeasure {
    /// Numbered-notation melody per beat (`-` when empty)
    pub melody: Vec<String>,

    /// Recognized chord label per beat (empty when none)
    pub chords: Vec<String>,
}

/// Rendered chord sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChordSheet {
    /// Formatted text
    pub content: String,

    /// Per-measure beat data
    pub measures: Vec<SheetMeasure>,

    /// Tempo in whole BPM
    pub tempo: u32,

    /// Key name used for the numbered notation
    pub key: String,
}

/// Render a chord sheet
///
/// # Errors
///
/// Returns `TranscriptionError::InsufficientData` for an empty note sequence
/// and `TranscriptionError::InvalidInput` for an unusable tempo.
pub fn render_chord_sheet(notes: &[Note], options: &SheetOptions) -> Result<ChordSheet, TranscriptionError> {
    let (sorted, grid) = prepare(notes, options)?;

    log::debug!(
        "Rendering chord sheet: {} notes, tempo {:.1}, {} beats",
        sorted.len(),
        grid.tempo,
        grid.beat_count()
    );

    let measures = collect_measures(&sorted, &grid, options.key_offset);

    let mut lines = vec![
        format!("Tempo: ♩ = {}", grid.tempo_label()),
        format!("Key: {} major", options.key_name()),
        String::new(),
    ];

    for (i, measure) in measures.iter().enumerate() {
        lines.push(format_chord_line(&measure.chords));
        lines.push(format_melody_line(&measure.melody));
        if (i + 1) % MEASURES_PER_GROUP == 0 {
            lines.push(String::new());
        }
    }

    Ok(ChordSheet {
        content: lines.join("\n"),
        measures,
        tempo: grid.tempo_label(),
        key: options.key_name().to_string(),
    })
}

fn collect_measures(sorted: &[&Note], grid: &BeatGrid, key_offset: i32) -> Vec<SheetMeasure> {
    let mut measures = Vec::new();
    let mut current = SheetMeasure {
        melody: Vec::with_capacity(BEATS_PER_MEASURE),
        chords: Vec::with_capacity(BEATS_PER_MEASURE),
    };

    for beat in 0..grid.beat_count() {
        let beat_notes = grid.notes_in_beat(beat, sorted);

        match beat_notes.iter().max_by_key(|n| n.pitch) {
            Some(top) => {
                current.melody.push(midi_to_numbered(top.pitch, key_offset));
                let pitches: Vec<u8> = beat_notes.iter().map(|n| n.pitch).collect();
                current.chords.push(chord_label(&pitches).to_string());
            }
            None => {
                current.melody.push(EMPTY_CELL.to_string());
                current.chords.push(String::new());
            }
        }

        if current.melody.len() == BEATS_PER_MEASURE {
            measures.push(std::mem::replace(
                &mut current,
                SheetMeasure {
                    melody: Vec::with_capacity(BEATS_PER_MEASURE),
                    chords: Vec::with_capacity(BEATS_PER_MEASURE),
                },
            ));
        }
    }

    if !current.melody.is_empty() {
        measures.push(current);
    }
    measures
}

/// Chord cells `[X]` right-aligned to width 5; repeats within the measure stay blank
fn format_chord_line(chords: &[String]) -> String {
    let mut last = "";
    chords
        .iter()
        .map(|chord| {
            let cell = if !chord.is_empty() && chord != last {
                last = chord;
                format!("[{}]", chord)
            } else {
                BLANK_CHORD.to_string()
            };
            format!("{:>5}", cell)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_melody_line(melody: &[String]) -> String {
    melody
        .iter()
        .map(|m| format!("{:>3}", m))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(pitch: u8, start: f64, end: f64) -> Note {
        Note::new(pitch, start, end, 80)
    }

    #[test]
    fn test_empty_input_fails() {
        let err = render_chord_sheet(&[], &SheetOptions::default()).unwrap_err();
        assert!(matches!(err, TranscriptionError::InsufficientData(_)));
    }

    #[test]
    fn test_single_measure_layout() {
        // beat 0: C major triad, beat 1: empty, beat 2: G, beat 3: C triad again
        let notes = vec![
            note(60, 0.0, 0.4),
            note(64, 0.0, 0.4),
            note(67, 0.1, 0.4),
            note(67, 1.0, 1.4),
            note(48, 1.5, 1.9),
            note(52, 1.5, 1.9),
            note(55, 1.6, 2.0),
        ];
        let sheet = render_chord_sheet(&notes, &SheetOptions::default()).unwrap();

        assert_eq!(sheet.tempo, 120);
        assert_eq!(sheet.key, "C");
        assert_eq!(sheet.measures.len(), 1);
        assert_eq!(sheet.measures[0].melody, vec!["5", "-", "5", "5,"]);
        assert_eq!(sheet.measures[0].chords, vec!["C", "", "", "C"]);

        let lines: Vec<&str> = sheet.content.lines().collect();
        assert_eq!(lines[0], "Tempo: ♩ = 120");
        assert_eq!(lines[1], "Key: C major");
        assert_eq!(lines[2], "");
        // the second C in the measure is suppressed
        assert_eq!(lines[3], format!("  [C]{}", " ".repeat(18)));
        assert_eq!(lines[4], "  5   -   5  5,");
    }

    #[test]
    fn test_chord_label_repeats_after_change() {
        let chords: Vec<String> = ["C", "Am", "C", "C"].iter().map(|s| s.to_string()).collect();
        assert_eq!(format_chord_line(&chords), format!("  [C]  [Am]   [C]{}", " ".repeat(6)));
    }

    #[test]
    fn test_blank_line_every_four_measures() {
        // one note per measure for 5 measures at 120 BPM
        let notes: Vec<Note> = (0..5).map(|m| note(60, m as f64 * 2.0, m as f64 * 2.0 + 0.5)).collect();
        let sheet = render_chord_sheet(&notes, &SheetOptions::default()).unwrap();

        assert_eq!(sheet.measures.len(), 5);
        // trailing partial measure keeps only the beats inside the material
        assert_eq!(sheet.measures[4].melody, vec!["1"]);

        let lines: Vec<&str> = sheet.content.lines().collect();
        // header (3) + 4 measures * 2 lines, then the separator
        assert_eq!(lines[3 + 8], "");
        assert_eq!(lines.len(), 3 + 8 + 1 + 2);
    }

    #[test]
    fn test_key_offset_and_tempo() {
        let notes = vec![note(67, 0.0, 1.0), note(71, 1.0, 2.0)];
        let options = SheetOptions {
            tempo: Some(60.0),
            key_offset: 7,
        };
        let sheet = render_chord_sheet(&notes, &options).unwrap();
        assert_eq!(sheet.key, "G");
        assert_eq!(sheet.tempo, 60);
        assert_eq!(sheet.measures[0].melody, vec!["1", "3"]);
        assert!(sheet.content.contains("Key: G major"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let notes = vec![note(60, 0.0, 0.5), note(64, 0.6, 1.0), note(67, 1.1, 2.5)];
        let a = render_chord_sheet(&notes, &SheetOptions::default()).unwrap();
        let b = render_chord_sheet(&notes, &SheetOptions::default()).unwrap();
        assert_eq!(a.content, b.content);
    }
}
