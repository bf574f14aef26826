//! Two-staff piano reduction in numbered notation
//!
//! Notes from middle C upward go to the right hand, which shows the highest
//! note per beat. Notes below middle C go to the left hand, which shows the
//! lowest note per beat.

use serde::{Deserialize, Serialize};

use super::numbered::midi_to_numbered;
use super::{prepare, SheetOptions, EMPTY_CELL};
use crate::analysis::result::Note;
use crate::error::TranscriptionError;

/// Lowest pitch played by the right hand (middle C)
pub const HAND_SPLIT_PITCH: u8 = 60;

/// Beats per printed line
pub const BEATS_PER_LINE: usize = 16;

/// Rendered piano sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PianoSheet {
    /// Formatted text
    pub content: String,

    /// Right-hand cell per beat
    pub right_hand: Vec<String>,

    /// Left-hand cell per beat
    pub left_hand: Vec<String>,

    /// Tempo in whole BPM
    pub tempo: u32,

    /// Key name used for the numbered notation
    pub key: String,
}

/// Render a piano sheet
///
/// # Errors
///
/// Returns `TranscriptionError::InsufficientData` for an empty note sequence
/// and `TranscriptionError::InvalidInput` for an unusable tempo.
pub fn render_piano_sheet(notes: &[Note], options: &SheetOptions) -> Result<PianoSheet, TranscriptionError> {
    let (sorted, grid) = prepare(notes, options)?;

    log::debug!(
        "Rendering piano sheet: {} notes over {} beats",
        sorted.len(),
        grid.beat_count()
    );

    let beats = grid.beat_count();
    let mut right_hand = Vec::with_capacity(beats);
    let mut left_hand = Vec::with_capacity(beats);

    for beat in 0..beats {
        let beat_notes = grid.notes_in_beat(beat, &sorted);

        let top = beat_notes
            .iter()
            .filter(|n| n.pitch >= HAND_SPLIT_PITCH)
            .map(|n| n.pitch)
            .max();
        let bottom = beat_notes
            .iter()
            .filter(|n| n.pitch < HAND_SPLIT_PITCH)
            .map(|n| n.pitch)
            .min();

        right_hand.push(cell(top, options.key_offset));
        left_hand.push(cell(bottom, options.key_offset));
    }

    let mut lines = vec![
        format!("Tempo: ♩ = {}", grid.tempo_label()),
        format!("Key: {} major", options.key_name()),
        String::new(),
        "Right hand (melody):".to_string(),
    ];
    lines.extend(format_rows(&right_hand));
    lines.push(String::new());
    lines.push("Left hand (accompaniment):".to_string());
    lines.extend(format_rows(&left_hand));

    Ok(PianoSheet {
        content: lines.join("\n"),
        right_hand,
        left_hand,
        tempo: grid.tempo_label(),
        key: options.key_name().to_string(),
    })
}

fn cell(pitch: Option<u8>, key_offset: i32) -> String {
    match pitch {
        Some(p) => midi_to_numbered(p, key_offset),
        None => EMPTY_CELL.to_string(),
    }
}

fn format_rows(cells: &[String]) -> Vec<String> {
    cells
        .chunks(BEATS_PER_LINE)
        .map(|chunk| {
            chunk
                .iter()
                .map(|c| format!("{:>3}", c))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
