//! Note segmentation from a pitch contour
//!
//! Algorithm:
//! 1. Scan frames in time order, keeping at most one open note
//! 2. A voiced frame opens a note, or closes the open one and starts a new one
//!    when the pitch changes or the frame sits on an onset (re-articulation)
//! 3. An unvoiced frame closes the open note
//! 4. Closed notes shorter than the minimum duration are discarded
//!
//! # Example
//!
//! ```
//! use tabscribe::config::TranscriptionConfig;
//! use tabscribe::features::segmentation::segment;
//!
//! let times: Vec<f64> = (0..=100).map(|i| i as f64 * 0.01).collect();
//! let freqs = vec![440.0; times.len()];
//! let voiced = vec![true; times.len()];
//!
//! let notes = segment(&freqs, &voiced, &times, &[], &TranscriptionConfig::default())?;
//! assert_eq!(notes.len(), 1);
//! assert_eq!(notes[0].pitch, 69);
//! # Ok::<(), tabscribe::TranscriptionError>(())
//! ```

use super::{is_usable_frequency, validate_frames};
use crate::analysis::result::Note;
use crate::config::TranscriptionConfig;
use crate::error::TranscriptionError;

/// Segmenter state between frames
#[derive(Debug, Clone, Copy, PartialEq)]
enum NoteState {
    Closed,
    Open { pitch: u8, start: f64 },
}

/// Convert a frequency in Hz to a fractional MIDI pitch (A4 = 440 Hz = 69)
pub fn hz_to_midi(frequency_hz: f64) -> f64 {
    69.0 + 12.0 * (frequency_hz / 440.0).log2()
}

/// Round a fractional MIDI pitch to an integer pitch in `[min_pitch, max_pitch]`
///
/// Half-way values go to the even pitch (60.5 -> 60, 61.5 -> 62).
pub fn quantize_pitch(midi: f64, min_pitch: u8, max_pitch: u8) -> u8 {
    midi.round_ties_even().clamp(min_pitch as f64, max_pitch as f64) as u8
}

/// Convert a frequency to the nearest MIDI pitch, clamped to `[min_pitch, max_pitch]`
pub fn frequency_to_pitch(frequency_hz: f64, min_pitch: u8, max_pitch: u8) -> u8 {
    quantize_pitch(hz_to_midi(frequency_hz), min_pitch, max_pitch)
}

/// Segment a pitch contour into notes
///
/// # Arguments
///
/// * `frequencies_hz` - Fundamental frequency per frame
/// * `voiced` - Voicing flag per frame
/// * `times` - Frame timestamps in seconds
/// * `onsets` - Onset timestamps in seconds
/// * `config` - Segmentation thresholds
///
/// # Returns
///
/// Notes ordered by start; every note lasts at least `config.min_note_duration`.
/// The caller decides whether the count is enough for a usable transcription.
///
/// # Errors
///
/// Returns `TranscriptionError::InvalidInput` if the frame arrays differ in length.
pub fn segment(
    frequencies_hz: &[f64],
    voiced: &[bool],
    times: &[f64],
    onsets: &[f64],
    config: &TranscriptionConfig,
) -> Result<Vec<Note>, TranscriptionError> {
    validate_frames(frequencies_hz, voiced, times, onsets)?;

    log::debug!(
        "Segmenting {} frames with {} onsets (min duration {:.3}s)",
        times.len(),
        onsets.len(),
        config.min_note_duration
    );

    let mut notes = Vec::new();
    let mut state = NoteState::Closed;

    for ((&frequency_hz, &is_voiced), &time) in frequencies_hz.iter().zip(voiced).zip(times) {
        if !is_voiced || !is_usable_frequency(frequency_hz) {
            if let NoteState::Open { pitch, start } = state {
                push_note(&mut notes, pitch, start, time, config.base_velocity, config);
            }
            state = NoteState::Closed;
            continue;
        }

        let pitch = frequency_to_pitch(frequency_hz, config.min_pitch, config.max_pitch);
        let is_new_onset = onsets
            .iter()
            .any(|&onset| (time - onset).abs() < config.onset_tolerance);

        state = match state {
            NoteState::Closed => NoteState::Open { pitch, start: time },
            NoteState::Open {
                pitch: open_pitch,
                start,
            } if open_pitch != pitch || is_new_onset => {
                let velocity = articulation_velocity(time - start, config);
                push_note(&mut notes, open_pitch, start, time, velocity, config);
                NoteState::Open { pitch, start: time }
            }
            open => open,
        };
    }

    if let NoteState::Open { pitch, start } = state {
        let end = times.last().copied().unwrap_or(start + config.tail_duration);
        push_note(&mut notes, pitch, start, end, config.base_velocity, config);
    }

    log::debug!("Segmented {} notes", notes.len());

    Ok(notes)
}

/// Velocity of a note closed by the next articulation
///
/// Longer notes are louder: `base + floor((duration - reference) * slope)`,
/// clamped to the configured velocity range.
fn articulation_velocity(duration: f64, config: &TranscriptionConfig) -> u8 {
    let raw = config.base_velocity as f64
        + ((duration - config.velocity_reference_duration) * config.velocity_slope).floor();
    raw.clamp(config.min_velocity as f64, config.max_velocity as f64) as u8
}

fn push_note(notes: &mut Vec<Note>, pitch: u8, start: f64, end: f64, velocity: u8, config: &TranscriptionConfig) {
    let duration = end - start;
    if duration >= config.min_note_duration {
        let velocity = velocity.clamp(config.min_velocity, config.max_velocity);
        notes.push(Note::new(pitch, start, end, velocity));
    } else {
        log::trace!("Dropping {:.3}s note at {:.3}s (pitch {})", duration, start, pitch);
    }
}
