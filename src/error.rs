//! Moodbot error types

/// Moodbot error types
///
/// One variant per failure kind surfaced to the user: capture/recognition,
/// synthesis and translation failures are reported per stage and never abort
/// the turn that produced them.
#[derive(Debug, thiserror::Error)]
pub enum MoodbotError {
    // Voice capture / recognition errors
    #[error("could not understand the captured audio")]
    Unrecognized,

    #[error("speech recognition service error: {0}")]
    Recognition(String),

    // Spoken-output errors
    #[error("speech synthesis error: {0}")]
    Synthesis(String),

    #[error("translation error: {0}")]
    Translation(String),

    // Data errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl MoodbotError {
    /// Stable lowercase token for the failure kind, used as a metric/log
    /// label and for CLI message headings.
    pub fn kind(&self) -> &'static str {
        match self {
            MoodbotError::Unrecognized => "unrecognized",
            MoodbotError::Recognition(_) => "recognition",
            MoodbotError::Synthesis(_) => "synthesis",
            MoodbotError::Translation(_) => "translation",
            MoodbotError::InvalidInput(_) => "invalid-input",
            MoodbotError::Configuration(_) => "configuration",
            MoodbotError::Io(_) => "io",
            MoodbotError::Unexpected(_) => "unexpected",
        }
    }
}

/// Result type alias for Moodbot operations
pub type Result<T> = std::result::Result<T, MoodbotError>;
