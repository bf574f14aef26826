//! Pitch contour segmentation
//!
//! Turns the frame-level output of a pitch tracker (frequency, voicing flag and
//! timestamp per frame, plus a list of onset times) into discrete notes.

pub mod segmenter;

pub use segmenter::{frequency_to_pitch, hz_to_midi, quantize_pitch, segment};

use crate::analysis::result::Note;
use crate::config::TranscriptionConfig;
use crate::error::TranscriptionError;

/// Frame-level pitch tracker output for one track
///
/// `frequencies_hz`, `voiced` and `times` are parallel arrays (one entry per
/// analysis frame, fixed hop). A frequency is meaningless when its frame is
/// unvoiced or the value is NaN.
#[derive(Debug, Clone, Default)]
pub struct PitchTrack {
    /// Fundamental frequency per frame in Hz
    pub frequencies_hz: Vec<f64>,

    /// Voicing decision per frame
    pub voiced: Vec<bool>,

    /// Frame timestamps in seconds (monotonic)
    pub times: Vec<f64>,

    /// Onset timestamps in seconds (ordered)
    pub onsets: Vec<f64>,

    /// Tempo estimate from the beat tracker, if any
    pub tempo_bpm: Option<f64>,
}

impl PitchTrack {
    /// Build a track from parallel frame arrays and onset times
    pub fn new(frequencies_hz: Vec<f64>, voiced: Vec<bool>, times: Vec<f64>, onsets: Vec<f64>) -> Self {
        Self {
            frequencies_hz,
            voiced,
            times,
            onsets,
            tempo_bpm: None,
        }
    }

    /// Attach a beat-tracker tempo estimate
    pub fn with_tempo(mut self, tempo_bpm: f64) -> Self {
        self.tempo_bpm = Some(tempo_bpm);
        self
    }

    /// Number of analysis frames
    pub fn frame_count(&self) -> usize {
        self.times.len()
    }

    /// Number of frames that are voiced with a usable frequency
    pub fn voiced_frame_count(&self) -> usize {
        self.frequencies_hz
            .iter()
            .zip(self.voiced.iter())
            .filter(|(f, v)| **v && is_usable_frequency(**f))
            .count()
    }

    /// Check the parallel arrays line up
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::InvalidInput` on mismatched lengths or
    /// non-finite timestamps.
    pub fn validate(&self) -> Result<(), TranscriptionError> {
        validate_frames(&self.frequencies_hz, &self.voiced, &self.times, &self.onsets)
    }

    /// Segment this track into notes
    pub fn segment(&self, config: &TranscriptionConfig) -> Result<Vec<Note>, TranscriptionError> {
        segment(&self.frequencies_hz, &self.voiced, &self.times, &self.onsets, config)
    }
}

pub(crate) fn is_usable_frequency(frequency_hz: f64) -> bool {
    frequency_hz.is_finite() && frequency_hz > 0.0
}

pub(crate) fn validate_frames(
    frequencies_hz: &[f64],
    voiced: &[bool],
    times: &[f64],
    onsets: &[f64],
) -> Result<(), TranscriptionError> {
    if frequencies_hz.len() != times.len() || voiced.len() != times.len() {
        return Err(TranscriptionError::InvalidInput(format!(
            "Frame arrays must have equal length: frequencies={}, voiced={}, times={}",
            frequencies_hz.len(),
            voiced.len(),
            times.len()
        )));
    }

    if let Some(i) = times.iter().position(|t| !t.is_finite()) {
        return Err(TranscriptionError::InvalidInput(format!(
            "Frame timestamp at index {} is not finite",
            i
        )));
    }

    if let Some(i) = onsets.iter().position(|t| !t.is_finite()) {
        return Err(TranscriptionError::InvalidInput(format!(
            "Onset timestamp at index {} is not finite",
            i
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_mismatched_lengths() {
        let track = PitchTrack::new(vec![440.0; 3], vec![true; 2], vec![0.0, 0.01, 0.02], vec![]);
        let err = track.validate().unwrap_err();
        assert!(matches!(err, TranscriptionError::InvalidInput(_)));
        assert!(err.to_string().contains("voiced=2"));
    }

    #[test]
    fn test_validate_non_finite_time() {
        let track = PitchTrack::new(vec![440.0; 2], vec![true; 2], vec![0.0, f64::NAN], vec![]);
        assert!(track.validate().is_err());
    }

    #[test]
    fn test_voiced_frame_count_ignores_nan() {
        let track = PitchTrack::new(
            vec![440.0, f64::NAN, 220.0, 330.0],
            vec![true, true, false, true],
            vec![0.0, 0.01, 0.02, 0.03],
            vec![],
        );
        assert_eq!(track.frame_count(), 4);
        assert_eq!(track.voiced_frame_count(), 2);
    }
}
