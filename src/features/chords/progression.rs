//! Chord progression estimation
//!
//! Infers one bass root per 4/4 measure from the melody: the most frequent
//! pitch class among the notes starting in that measure.

use crate::analysis::result::{ChordSpan, Note};
use crate::config::BEATS_PER_MEASURE;
use crate::error::TranscriptionError;

/// Pitch of pitch class 0 in the bass line (C2)
pub const DEFAULT_BASS_BASE_PITCH: u8 = 36;

/// Estimate a per-measure root progression
///
/// Equivalent to [`estimate_progression_with_base`] with a C2 bass base.
///
/// # Example
///
/// ```
/// use tabscribe::analysis::result::Note;
/// use tabscribe::features::chords::estimate_progression;
///
/// let notes = vec![Note::new(69, 0.0, 0.5, 80), Note::new(81, 0.5, 1.0, 80)];
/// let spans = estimate_progression(&notes, 120.0)?;
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].pitch, 45);
/// # Ok::<(), tabscribe::TranscriptionError>(())
/// ```
pub fn estimate_progression(notes: &[Note], tempo: f64) -> Result<Vec<ChordSpan>, TranscriptionError> {
    estimate_progression_with_base(notes, tempo, DEFAULT_BASS_BASE_PITCH)
}

/// Estimate a per-measure root progression with an explicit bass base pitch
///
/// The timeline `[0, latest note end)` is cut into measures of
/// `4 * 60 / tempo` seconds. Measures where no note starts are skipped. The
/// root is the pitch class with the most note starts in the measure; ties go
/// to the pitch class that appeared first.
///
/// # Errors
///
/// Returns `TranscriptionError::InvalidInput` if `tempo` is not a positive
/// finite number.
pub fn estimate_progression_with_base(
    notes: &[Note],
    tempo: f64,
    bass_base_pitch: u8,
) -> Result<Vec<ChordSpan>, TranscriptionError> {
    if !(tempo.is_finite() && tempo > 0.0) {
        return Err(TranscriptionError::InvalidInput(format!(
            "Tempo must be a positive number of BPM, got {}",
            tempo
        )));
    }

    if notes.is_empty() {
        return Ok(Vec::new());
    }

    let beat_duration = 60.0 / tempo;
    let measure_duration = beat_duration * BEATS_PER_MEASURE as f64;
    let total_duration = notes.iter().map(|n| n.end).fold(0.0f64, f64::max);

    log::debug!(
        "Estimating progression: {} notes, tempo {:.1}, measure {:.3}s, total {:.3}s",
        notes.len(),
        tempo,
        measure_duration,
        total_duration
    );

    let mut spans = Vec::new();
    let mut measure_index = 0usize;

    loop {
        let measure_start = measure_index as f64 * measure_duration;
        if measure_start >= total_duration {
            break;
        }
        let measure_end = measure_start + measure_duration;
        measure_index += 1;

        // (pitch class, count) in first-seen order
        let mut counts: Vec<(u8, usize)> = Vec::new();
        for note in notes.iter().filter(|n| n.start >= measure_start && n.start < measure_end) {
            let pc = note.pitch_class();
            match counts.iter_mut().find(|(p, _)| *p == pc) {
                Some((_, count)) => *count += 1,
                None => counts.push((pc, 1)),
            }
        }

        let mut root: Option<(u8, usize)> = None;
        for &(pc, count) in &counts {
            if root.map_or(true, |(_, best)| count > best) {
                root = Some((pc, count));
            }
        }

        let Some((root, _)) = root else {
            log::trace!("Measure at {:.3}s has no note starts", measure_start);
            continue;
        };

        spans.push(ChordSpan {
            root,
            pitch: bass_base_pitch.saturating_add(root),
            start: measure_start,
            end: measure_end,
        });
    }

    log::debug!("Estimated {} chord spans over {} measures", spans.len(), measure_index);

    Ok(spans)
}
