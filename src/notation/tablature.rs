//! Six-line tablature renderer
//!
//! Each playable note is mapped to its lowest-fret position and written into
//! the column of the beat it starts in. Unreachable pitches are dropped.

use serde::{Deserialize, Serialize};

use super::grid::BeatGrid;
use super::{prepare, SheetOptions, EMPTY_CELL};
use crate::analysis::result::Note;
use crate::error::TranscriptionError;
use crate::features::fretboard::Tuning;

/// Beat columns per tablature block
pub const COLUMNS_PER_BLOCK: usize = 32;

/// One string of the tablature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabLine {
    /// 1-based string number (1 = lowest open pitch)
    pub string: u8,

    /// Display name
    pub name: String,

    /// Fret per beat column, `None` where nothing is played
    pub cells: Vec<Option<u8>>,
}

/// Rendered tablature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tablature {
    /// Formatted text
    pub content: String,

    /// Strings ordered from highest to lowest open pitch
    pub strings: Vec<TabLine>,

    /// Tempo in whole BPM
    pub tempo: u32,

    /// Notes placed on the fretboard
    pub total_notes: usize,

    /// Notes with no reachable position
    pub dropped_notes: usize,
}

/// Render tablature for standard tuning
///
/// # Errors
///
/// Returns `TranscriptionError::InsufficientData` when there are no notes or
/// none of them can be played, and `TranscriptionError::InvalidInput` for an
/// unusable tempo.
pub fn render_tablature(notes: &[Note], options: &SheetOptions) -> Result<Tablature, TranscriptionError> {
    render_tablature_with_tuning(notes, options, &Tuning::standard())
}

/// Render tablature for an arbitrary six-string tuning
pub fn render_tablature_with_tuning(
    notes: &[Note],
    options: &SheetOptions,
    tuning: &Tuning,
) -> Result<Tablature, TranscriptionError> {
    let (sorted, grid) = prepare(notes, options)?;

    let placed: Vec<(&Note, u8, u8)> = sorted
        .iter()
        .filter_map(|note| {
            tuning
                .map_to_fret(note.pitch)
                .map(|pos| (*note, pos.string, pos.fret))
        })
        .collect();
    let dropped_notes = sorted.len() - placed.len();

    if placed.is_empty() {
        return Err(TranscriptionError::InsufficientData(format!(
            "None of the {} notes can be played in {} tuning",
            sorted.len(),
            tuning.label
        )));
    }
    if dropped_notes > 0 {
        log::debug!("Dropped {} notes outside the fretboard", dropped_notes);
    }

    let strings = fill_columns(&placed, &grid, tuning);

    log::debug!(
        "Rendering tablature: {} notes over {} columns",
        placed.len(),
        grid.column_count()
    );

    let mut lines = vec![
        format!("Tempo: ♩ = {}", grid.tempo_label()),
        format!("Tuning: {}", tuning.label),
        String::new(),
    ];

    let column_count = grid.column_count();
    for block_start in (0..column_count).step_by(COLUMNS_PER_BLOCK) {
        let block_end = (block_start + COLUMNS_PER_BLOCK).min(column_count);
        for line in &strings {
            lines.push(format_block(line, block_start, block_end));
        }
        lines.push(String::new());
    }

    Ok(Tablature {
        content: lines.join("\n"),
        strings,
        tempo: grid.tempo_label(),
        total_notes: placed.len(),
        dropped_notes,
    })
}

fn fill_columns(placed: &[(&Note, u8, u8)], grid: &BeatGrid, tuning: &Tuning) -> Vec<TabLine> {
    let column_count = grid.column_count();
    let mut strings: Vec<TabLine> = tuning
        .strings_high_to_low()
        .into_iter()
        .map(|string| TabLine {
            string,
            name: tuning.name(string).unwrap_or("?").to_string(),
            cells: vec![None; column_count],
        })
        .collect();

    // later notes overwrite earlier ones in the same cell
    for &(note, string, fret) in placed {
        let col = grid.column_of(note.start);
        if col >= column_count {
            continue;
        }
        if let Some(line) = strings.iter_mut().find(|l| l.string == string) {
            line.cells[col] = Some(fret);
        }
    }
    strings
}

fn format_block(line: &TabLine, start: usize, end: usize) -> String {
    let cells = line.cells[start..end]
        .iter()
        .map(|cell| match cell {
            Some(fret) => format!("{:>2}", fret),
            None => format!("{:>2}", EMPTY_CELL),
        })
        .collect::<Vec<_>>()
        .join("-");
    format!("{}|{}|", line.name, cells)
}
