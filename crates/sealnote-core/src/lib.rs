//! # Sealnote Core
//!
//! Core library for Sealnote - an encrypted note store where only
//! ciphertext ever reaches disk.
//!
//! This crate provides the envelope codec, the storage abstraction and the
//! note service, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: password-based envelope encryption (PBKDF2 + AES-256-GCM)
//! - **storage**: note store trait and SQLite implementation
//! - **service**: note operations composed from the two
//! - **error**: codec and service error types

pub mod crypto;
pub mod error;
pub mod service;
pub mod storage;

pub use crypto::Envelope;
pub use error::{EnvelopeError, Result, SealnoteError};
pub use service::{CreateNote, CreatedNote, DecryptedNote, NoteService, ServiceSettings};
pub use storage::{NoteStore, SqliteNoteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
