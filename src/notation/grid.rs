//! Beat grid used to quantize notes for rendering
//!
//! The grid is rebuilt for every rendering call: beat `i` covers
//! `[i * beat_duration, (i + 1) * beat_duration)` and beats continue while
//! their start lies before the end of the last note.

use crate::analysis::result::Note;
use crate::config::BEATS_PER_MEASURE;

/// Fixed-tempo beat grid over a note sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatGrid {
    /// Tempo in BPM
    pub tempo: f64,

    /// Beat length in seconds (60 / tempo)
    pub beat_duration: f64,

    /// Latest note end in seconds
    pub total_duration: f64,
}

impl BeatGrid {
    /// Build a grid for `tempo` BPM spanning `total_duration` seconds
    pub fn new(tempo: f64, total_duration: f64) -> Self {
        Self {
            tempo,
            beat_duration: 60.0 / tempo,
            total_duration,
        }
    }

    /// Build a grid covering a note sequence
    pub fn for_notes(tempo: f64, notes: &[&Note]) -> Self {
        let total_duration = notes.iter().map(|n| n.end).fold(0.0f64, f64::max);
        Self::new(tempo, total_duration)
    }

    /// Start time of beat `index`
    pub fn beat_start(&self, index: usize) -> f64 {
        index as f64 * self.beat_duration
    }

    /// Number of beats whose start lies before the end of the material
    pub fn beat_count(&self) -> usize {
        if !(self.total_duration > 0.0 && self.beat_duration > 0.0) {
            return 0;
        }
        let mut count = (self.total_duration / self.beat_duration).ceil() as usize;
        while count > 0 && self.beat_start(count - 1) >= self.total_duration {
            count -= 1;
        }
        while count < usize::MAX && self.beat_start(count) < self.total_duration {
            count += 1;
        }
        count
    }

    /// Number of measures, counting a trailing partial measure
    pub fn measure_count(&self) -> usize {
        self.beat_count().div_ceil(BEATS_PER_MEASURE)
    }

    /// Column of the beat containing `time` (`floor(time / beat_duration)`)
    pub fn column_of(&self, time: f64) -> usize {
        (time / self.beat_duration).floor().max(0.0) as usize
    }

    /// Column count used by tablature (`floor(total / beat_duration) + 1`)
    pub fn column_count(&self) -> usize {
        self.column_of(self.total_duration) + 1
    }

    /// Notes starting inside beat `index`
    ///
    /// `sorted` must be ordered by start time.
    pub fn notes_in_beat<'n>(&self, index: usize, sorted: &[&'n Note]) -> Vec<&'n Note> {
        let start = self.beat_start(index);
        let end = start + self.beat_duration;
        let lo = sorted.partition_point(|n| n.start < start);
        let hi = sorted.partition_point(|n| n.start < end);
        sorted[lo..hi.max(lo)].to_vec()
    }

    /// Tempo as printed in headers (truncated to whole BPM)
    pub fn tempo_label(&self) -> u32 {
        self.tempo as u32
    }
}
