// File: src/error.rs
use thiserror::Error;

/// Failure taxonomy for the word store and the rendering service.
///
/// Infrastructure problems are reported as `Unavailable` with only the
/// operation name attached; the underlying driver error is logged where it
/// happens and never travels up to callers.
#[derive(Debug, Error)]
pub enum WordArtError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no word found with id {0}")]
    NotFound(i64),

    #[error("update for word {0} carried no recognized fields")]
    NoFields(i64),

    #[error("a word with text '{0}' already exists")]
    DuplicateText(String),

    /// A uniqueness or other constraint rejected the statement. Surfaced by
    /// the generic database layer; the word store rewraps it with context
    /// (e.g. `DuplicateText`) before it reaches a caller.
    #[error("constraint violation during {operation}")]
    Conflict { operation: &'static str },

    #[error("storage failure during {operation}")]
    Unavailable { operation: &'static str },
}

pub type Result<T> = std::result::Result<T, WordArtError>;
