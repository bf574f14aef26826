//! # Tabscribe
//!
//! A score transcription engine: turns the frame-level output of a pitch
//! tracker into discrete notes, estimates key and a bass progression, and
//! renders the result as a chord sheet, guitar tablature or piano sheet.
//!
//! ## Features
//!
//! - **Segmentation**: pitch contour to notes with onset re-articulation
//! - **Key Estimation**: Krumhansl-Kessler correlation over a duration-weighted histogram
//! - **Chords**: per-beat triad recognition and a per-measure bass root progression
//! - **Fretboard Mapping**: lowest-fret placement on a six-string tuning
//! - **Rendering**: fixed-width text notation on a 4/4 beat grid
//!
//! ## Quick Start
//!
//! ```
//! use tabscribe::{transcribe, PitchTrack, SheetKind, TranscriptionConfig};
//!
//! // C D E F G, half a second each, from a 10 ms pitch tracker
//! let mut freqs = Vec::new();
//! for hz in [261.63, 293.66, 329.63, 349.23, 392.0] {
//!     freqs.extend(std::iter::repeat(hz).take(50));
//! }
//! let times: Vec<f64> = (0..freqs.len()).map(|i| i as f64 * 0.01).collect();
//! let voiced = vec![true; freqs.len()];
//!
//! let track = PitchTrack::new(freqs, voiced, times, vec![]).with_tempo(120.0);
//! let transcription = transcribe(&track, &TranscriptionConfig::default())?;
//!
//! println!("Key: {} ({:.2})", transcription.key.name(), transcription.key_confidence);
//! let sheet = transcription.render(SheetKind::ChordSheet);
//! assert!(sheet.success);
//! # Ok::<(), tabscribe::TranscriptionError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! PitchTrack → Segmentation → Notes → {Key, Progression} → Transcription → Renderers → Text
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod notation;

// Re-export main types
pub use analysis::metadata::TranscriptionMetadata;
pub use analysis::result::{ChordSpan, Key, Note, Transcription, TranscriptionFlag};
pub use config::TranscriptionConfig;
pub use error::TranscriptionError;
pub use features::fretboard::{map_to_fret, FretPosition, Tuning};
pub use features::segmentation::PitchTrack;
pub use notation::{render, SheetKind, SheetOptions, SheetResult};

use rayon::prelude::*;

use features::chords::estimate_progression_with_base;
use features::key::{detect_key, KeyProfile};

/// Main transcription function
///
/// Segments a pitch track into notes, estimates the key and a bass root per
/// measure, and collects quality metadata.
///
/// # Arguments
///
/// * `track` - Frame-level pitch tracker output and onset times
/// * `config` - Transcription configuration parameters
///
/// # Returns
///
/// `Transcription` with the melody, progression, bass line, key and metadata
///
/// # Errors
///
/// Returns `TranscriptionError::InvalidInput` for malformed frame arrays and
/// `TranscriptionError::InsufficientData` when fewer than
/// `config.min_note_count` notes survive segmentation.
pub fn transcribe(track: &PitchTrack, config: &TranscriptionConfig) -> Result<Transcription, TranscriptionError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!(
        "Starting transcription: {} frames, {} onsets",
        track.frame_count(),
        track.onsets.len()
    );

    track.validate()?;

    // Segmentation
    let notes = track.segment(config)?;
    if notes.len() < config.min_note_count {
        log::warn!(
            "Only {} notes segmented (need {})",
            notes.len(),
            config.min_note_count
        );
        return Err(TranscriptionError::InsufficientData(format!(
            "Only {} notes detected, at least {} are required; the pitch track may be too noisy or mostly unvoiced",
            notes.len(),
            config.min_note_count
        )));
    }

    let mut metadata = TranscriptionMetadata {
        frame_count: track.frame_count(),
        voiced_frame_count: track.voiced_frame_count(),
        onset_count: track.onsets.len(),
        duration_seconds: track.times.last().copied().unwrap_or(0.0),
        ..TranscriptionMetadata::default()
    };

    if metadata.voiced_ratio() < config.sparse_voicing_ratio {
        metadata.flag(
            TranscriptionFlag::SparseVoicing,
            format!("Only {:.0}% of frames are voiced", metadata.voiced_ratio() * 100.0),
        );
    }

    // Tempo
    let tempo = config.resolve_tempo(track.tempo_bpm);
    match track.tempo_bpm {
        Some(estimate) if estimate == tempo => {}
        Some(estimate) => metadata.flag(
            TranscriptionFlag::TempoAdjusted,
            format!("Tempo estimate {:.1} BPM adjusted to {:.1} BPM", estimate, tempo),
        ),
        None => metadata.flag(
            TranscriptionFlag::TempoAdjusted,
            format!("No tempo estimate, using {:.1} BPM", tempo),
        ),
    }

    // Key
    let key_result = detect_key(&notes, &KeyProfile::major());
    if key_result.clarity < config.weak_tonality_clarity {
        metadata.flag(
            TranscriptionFlag::WeakTonality,
            format!("Key {} is ambiguous (clarity {:.2})", key_result.key.name(), key_result.clarity),
        );
    }

    // Progression and bass line
    let progression = estimate_progression_with_base(&notes, tempo, config.bass_base_pitch)?;
    let bass_notes: Vec<Note> = progression
        .iter()
        .map(|span| span.to_note(config.bass_velocity))
        .collect();

    metadata.processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Transcription complete: {} notes, key {}, {} measures with a root, {:.1} ms",
        notes.len(),
        key_result.key.name(),
        progression.len(),
        metadata.processing_time_ms
    );

    Ok(Transcription {
        notes,
        progression,
        bass_notes,
        key: key_result.key,
        key_confidence: key_result.confidence,
        key_clarity: key_result.clarity,
        tempo,
        metadata,
    })
}

/// Transcribe several tracks in parallel
///
/// Tracks share no state, so each is transcribed independently on the rayon
/// thread pool. Results keep the input order.
pub fn transcribe_batch(
    tracks: &[PitchTrack],
    config: &TranscriptionConfig,
) -> Vec<Result<Transcription, TranscriptionError>> {
    log::debug!("Transcribing batch of {} tracks", tracks.len());
    tracks
        .par_iter()
        .map(|track| transcribe(track, config))
        .collect()
}

impl Transcription {
    /// Rendering options matching this transcription (detected key, working tempo)
    pub fn sheet_options(&self) -> SheetOptions {
        SheetOptions {
            tempo: Some(self.tempo),
            key_offset: self.key.tonic as i32,
        }
    }

    /// Render the melody and bass line in the requested format
    pub fn render(&self, kind: SheetKind) -> SheetResult {
        render(kind, &self.arrangement(), &self.sheet_options())
    }
}
