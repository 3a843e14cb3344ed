//! Note store trait definition.
//!
//! The `NoteStore` trait is the persistence collaborator of the note
//! service. It stores envelopes as opaque values and never sees a password
//! or a plaintext body.

use uuid::Uuid;

use super::types::{InsertedNote, NewNote, NoteFilter, NoteSummary, StoredNote};
use crate::crypto::Envelope;
use crate::error::Result;

/// Storage interface for encrypted notes.
///
/// All implementations must ensure:
/// - The iteration count is stored with every envelope
/// - "Not found" is reported as `Ok(None)` / `Ok(false)`, never as an error
/// - Envelopes are replaced whole, never field by field
pub trait NoteStore: Send + Sync {
    /// Insert a new note, provisioning its owner if needed.
    ///
    /// The user record and the note are written in one transaction: if the
    /// note cannot be stored, no user is left behind.
    fn insert_note(&self, note: &NewNote) -> Result<InsertedNote>;

    /// Get a note by ID.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(note))` if found, `Ok(None)` if not found.
    fn get_note(&self, id: &Uuid) -> Result<Option<StoredNote>>;

    /// List notes matching the filter, newest first.
    fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteSummary>>;

    /// Replace the envelope of a note, but only if it still holds `expected`.
    ///
    /// Returns `false` if no such note exists or its envelope has changed
    /// since `expected` was read.
    fn replace_envelope(
        &self,
        id: &Uuid,
        expected: &Envelope,
        envelope: &Envelope,
    ) -> Result<bool>;

    /// Delete a note.
    ///
    /// Returns `false` if no such note exists.
    fn delete_note(&self, id: &Uuid) -> Result<bool>;
}
