//! Error types for Sealnote core operations.
//!
//! Two layers live here. [`EnvelopeError`] is what the envelope codec
//! returns: it keeps every failure distinguishable so the server side can
//! log precisely. [`SealnoteError`] is what the note service returns: it
//! folds the codec's credential failures into one variant so callers cannot
//! build a password oracle out of the error they show to users.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for Sealnote operations.
pub type Result<T> = std::result::Result<T, SealnoteError>;

/// Failures produced by the envelope codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Malformed base64, wrong salt/nonce length, or unusable metadata
    #[error("Invalid envelope encoding: {0}")]
    InvalidEncoding(String),

    /// AEAD tag verification failed (wrong password or tampered data)
    #[error("Envelope authentication failed")]
    AuthenticationFailure,

    /// Authenticated plaintext was not valid UTF-8
    #[error("Envelope invariant violated: {0}")]
    InternalInvariantViolation(String),

    /// Caller supplied parameters the codec cannot encrypt with
    #[error("Invalid envelope parameters: {0}")]
    InvalidParameters(String),
}

/// Core error type for Sealnote operations.
#[derive(Debug, Error)]
pub enum SealnoteError {
    /// Wrong master password or corrupted note data (deliberately ambiguous)
    #[error("Wrong master password or corrupted data")]
    WrongPasswordOrCorrupt,

    /// Note not found by ID
    #[error("Note not found: {0}")]
    NoteNotFound(Uuid),

    /// The note changed between being read and being written back
    #[error("Note was modified concurrently: {0}")]
    Conflict(Uuid),

    /// Codec or invariant failure that is a bug, not a user error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
