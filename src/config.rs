//! Configuration parameters for transcription

/// Beats per measure; the engine assumes 4/4 time
pub const BEATS_PER_MEASURE: usize = 4;

/// Tempo used by renderers when none is supplied
pub const DEFAULT_TEMPO_BPM: f64 = 120.0;

/// Slowest tempo the engine works at
pub const MIN_TEMPO_BPM: f64 = 60.0;

/// Fastest tempo the engine works at
pub const MAX_TEMPO_BPM: f64 = 200.0;

/// Transcription configuration parameters
///
/// Every field is a product-level policy value; the defaults reproduce the
/// reference behaviour of the engine.
#[derive(Debug, Clone)]
pub struct TranscriptionConfig {
    // Segmentation
    /// Shortest note that survives segmentation, in seconds (default: 0.08)
    pub min_note_duration: f64,

    /// Distance in seconds within which a frame counts as an onset (default: 0.05)
    pub onset_tolerance: f64,

    /// Lowest MIDI pitch a frame is clamped to (default: 21, A0)
    pub min_pitch: u8,

    /// Highest MIDI pitch a frame is clamped to (default: 108, C8)
    pub max_pitch: u8,

    /// Length given to a note left open when the track has no timestamps (default: 0.25)
    pub tail_duration: f64,

    // Velocity
    /// Velocity for notes closed by silence or end of track (default: 80)
    pub base_velocity: u8,

    /// Lower velocity clamp (default: 60)
    pub min_velocity: u8,

    /// Upper velocity clamp (default: 120)
    pub max_velocity: u8,

    /// Duration at which a re-articulated note gets `base_velocity` (default: 0.1 s)
    pub velocity_reference_duration: f64,

    /// Velocity gained per second above the reference duration (default: 40.0)
    pub velocity_slope: f64,

    // Quality gate
    /// Minimum number of segmented notes for a usable transcription (default: 5)
    pub min_note_count: usize,

    // Tempo
    /// Tempo used when the beat tracker supplied none (default: 120 BPM)
    pub default_tempo: f64,

    /// Lower tempo clamp (default: 60 BPM)
    pub min_tempo: f64,

    /// Upper tempo clamp (default: 200 BPM)
    pub max_tempo: f64,

    // Bass line
    /// Pitch of pitch class 0 in the inferred bass line (default: 36, C2)
    pub bass_base_pitch: u8,

    /// Velocity of bass line notes (default: 70)
    pub bass_velocity: u8,

    // Quality flags
    /// Key clarity below which the tonality is flagged as weak (default: 0.1)
    pub weak_tonality_clarity: f32,

    /// Voiced-frame ratio below which voicing is flagged as sparse (default: 0.3)
    pub sparse_voicing_ratio: f32,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            min_note_duration: 0.08,
            onset_tolerance: 0.05,
            min_pitch: 21,
            max_pitch: 108,
            tail_duration: 0.25,
            base_velocity: 80,
            min_velocity: 60,
            max_velocity: 120,
            velocity_reference_duration: 0.1,
            velocity_slope: 40.0,
            min_note_count: 5,
            default_tempo: DEFAULT_TEMPO_BPM,
            min_tempo: MIN_TEMPO_BPM,
            max_tempo: MAX_TEMPO_BPM,
            bass_base_pitch: 36,
            bass_velocity: 70,
            weak_tonality_clarity: 0.1,
            sparse_voicing_ratio: 0.3,
        }
    }
}

impl TranscriptionConfig {
    /// Resolve the working tempo from an optional beat-tracker estimate.
    ///
    /// Missing or non-finite estimates fall back to `default_tempo`; the result
    /// is clamped into `[min_tempo, max_tempo]`.
    pub fn resolve_tempo(&self, estimate: Option<f64>) -> f64 {
        let tempo = match estimate {
            Some(bpm) if bpm.is_finite() && bpm > 0.0 => bpm,
            Some(bpm) => {
                log::warn!("Ignoring unusable tempo estimate {}, using default {}", bpm, self.default_tempo);
                self.default_tempo
            }
            None => self.default_tempo,
        };
        let clamped = tempo.clamp(self.min_tempo, self.max_tempo);
        if clamped != tempo {
            log::warn!("Tempo {:.1} BPM clamped to {:.1} BPM", tempo, clamped);
        }
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TranscriptionConfig::default();
        assert_eq!(config.min_note_duration, 0.08);
        assert_eq!(config.min_pitch, 21);
        assert_eq!(config.max_pitch, 108);
        assert_eq!(config.min_note_count, 5);
        assert_eq!(config.bass_base_pitch, 36);
    }

    #[test]
    fn test_resolve_tempo() {
        let config = TranscriptionConfig::default();
        assert_eq!(config.resolve_tempo(None), 120.0);
        assert_eq!(config.resolve_tempo(Some(95.0)), 95.0);
        assert_eq!(config.resolve_tempo(Some(30.0)), 60.0);
        assert_eq!(config.resolve_tempo(Some(250.0)), 200.0);
        assert_eq!(config.resolve_tempo(Some(f64::NAN)), 120.0);
    }
}
