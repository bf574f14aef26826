//! Transcription result aggregation modules
//!
//! - Result types (notes, chord spans, key, transcription)
//! - Metadata

pub mod metadata;
pub mod result;
