//! Error types for the transcription engine

use std::fmt;

/// Errors that can occur during transcription and rendering
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptionError {
    /// Invalid input parameters (mismatched frame arrays, bad tempo, unknown sheet kind)
    InvalidInput(String),

    /// Not enough material to produce a score
    InsufficientData(String),
}

impl fmt::Display for TranscriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            TranscriptionError::InsufficientData(msg) => write!(f, "Insufficient data: {}", msg),
        }
    }
}

impl std::error::Error for TranscriptionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TranscriptionError::InsufficientData("only 3 notes".to_string());
        assert_eq!(err.to_string(), "Insufficient data: only 3 notes");
        let err = TranscriptionError::InvalidInput("bad tempo".to_string());
        assert_eq!(err.to_string(), "Invalid input: bad tempo");
    }
}
