//! Transcription metadata structures

use serde::{Deserialize, Serialize};

use super::result::TranscriptionFlag;

/// Transcription metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionMetadata {
    /// Number of pitch frames in the input track
    pub frame_count: usize,

    /// Frames that were voiced with a usable frequency
    pub voiced_frame_count: usize,

    /// Number of onset timestamps supplied
    pub onset_count: usize,

    /// Track duration in seconds (last frame time)
    pub duration_seconds: f64,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// Quality flags
    pub flags: Vec<TranscriptionFlag>,

    /// Human-readable warnings
    pub warnings: Vec<String>,
}

impl Default for TranscriptionMetadata {
    fn default() -> Self {
        Self {
            frame_count: 0,
            voiced_frame_count: 0,
            onset_count: 0,
            duration_seconds: 0.0,
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            flags: vec![],
            warnings: vec![],
        }
    }
}

impl TranscriptionMetadata {
    /// Fraction of frames that were voiced (0.0 for an empty track)
    pub fn voiced_ratio(&self) -> f32 {
        if self.frame_count == 0 {
            0.0
        } else {
            self.voiced_frame_count as f32 / self.frame_count as f32
        }
    }

    /// Record a flag once, with its warning text
    pub fn flag(&mut self, flag: TranscriptionFlag, warning: impl Into<String>) {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self.warnings.push(warning.into());
    }
}
