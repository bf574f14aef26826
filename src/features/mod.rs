//! Feature extraction modules
//!
//! This module contains the symbolic analysis stages:
//! - Pitch contour segmentation (frames -> notes)
//! - Key estimation
//! - Chord recognition and progression estimation
//! - Fretboard mapping

pub mod chords;
pub mod fretboard;
pub mod key;
pub mod segmentation;
