//! Note service: the envelope codec composed with a note store.
//!
//! This is where codec failures are folded into what a caller may show a
//! user. `InvalidEncoding` and `AuthenticationFailure` both become
//! [`SealnoteError::WrongPasswordOrCorrupt`]; they are logged at different
//! levels so operators can still tell them apart.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::crypto::{
    encrypt_with_iterations, validate_master_password, Envelope, DEFAULT_ITERATIONS,
    MIN_PASSWORD_LENGTH,
};
use crate::error::{EnvelopeError, Result, SealnoteError};
use crate::storage::{NewNote, NoteFilter, NoteStore, NoteSummary, StoredNote};

/// Tunables injected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// PBKDF2 rounds for newly sealed envelopes
    pub kdf_iterations: u32,

    /// Minimum length for newly chosen master passwords
    pub min_password_length: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            kdf_iterations: DEFAULT_ITERATIONS,
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}

/// Request to create a note.
#[derive(Debug, Clone, Copy)]
pub struct CreateNote<'a> {
    /// Owner; a new user is generated and provisioned when absent
    pub user_id: Option<Uuid>,
    pub title: &'a str,
    pub content: &'a str,
    pub master_password: &'a str,
}

/// Result of creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedNote {
    pub note_id: Uuid,
    pub user_id: Uuid,

    /// Whether the user was provisioned by this call
    pub user_created: bool,
}

/// A note with its body decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecryptedNote {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Encrypted note operations over a [`NoteStore`].
pub struct NoteService<S: NoteStore> {
    store: S,
    settings: ServiceSettings,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(store: S, settings: ServiceSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> ServiceSettings {
        self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Encrypt and store a new note, provisioning its owner if needed.
    pub fn create_note(&self, request: CreateNote<'_>) -> Result<CreatedNote> {
        if request.title.trim().is_empty() {
            return Err(SealnoteError::InvalidInput(
                "Title cannot be empty".to_string(),
            ));
        }
        validate_master_password(request.master_password, self.settings.min_password_length)?;

        let user_id = request.user_id.unwrap_or_else(Uuid::new_v4);
        let envelope = self.seal(request.master_password, request.content)?;

        let inserted = self
            .store
            .insert_note(&NewNote::new(user_id, request.title, envelope))?;

        info!(note_id = %inserted.id, %user_id, "stored encrypted note");
        Ok(CreatedNote {
            note_id: inserted.id,
            user_id,
            user_created: inserted.user_created,
        })
    }

    /// Decrypt a stored note.
    ///
    /// # Errors
    ///
    /// - [`SealnoteError::NoteNotFound`] if no note has this ID
    /// - [`SealnoteError::WrongPasswordOrCorrupt`] if the password is wrong or
    ///   the stored envelope is damaged
    /// - [`SealnoteError::Internal`] if decryption broke an invariant
    pub fn decrypt_note(&self, id: &Uuid, master_password: &str) -> Result<DecryptedNote> {
        let note = self.load(id)?;
        let content = Self::open(&note, master_password)?;

        Ok(DecryptedNote {
            id: note.id,
            user_id: note.user_id,
            title: note.title,
            content,
            created_at: note.created_at,
        })
    }

    /// List note summaries. No decryption happens here.
    pub fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteSummary>> {
        self.store.list_notes(filter)
    }

    /// Re-encrypt a note under a new master password.
    ///
    /// The note gets a brand-new envelope (fresh salt and nonce, current
    /// iteration setting); the old one is replaced whole.
    ///
    /// The replacement only lands if the note still holds the envelope that
    /// `current` unlocked. If another change got there first this returns
    /// [`SealnoteError::Conflict`] and the stored note is left as the other
    /// change wrote it.
    pub fn change_password(&self, id: &Uuid, current: &str, new: &str) -> Result<()> {
        let note = self.load(id)?;
        let content = Self::open(&note, current)?;
        validate_master_password(new, self.settings.min_password_length)?;

        let envelope = self.seal(new, &content)?;
        if !self.store.replace_envelope(id, &note.envelope, &envelope)? {
            if self.store.get_note(id)?.is_none() {
                return Err(SealnoteError::NoteNotFound(*id));
            }
            warn!(note_id = %id, "note changed during password change");
            return Err(SealnoteError::Conflict(*id));
        }

        info!(note_id = %id, "re-encrypted note under new master password");
        Ok(())
    }

    /// Delete a note.
    pub fn delete_note(&self, id: &Uuid) -> Result<()> {
        if !self.store.delete_note(id)? {
            return Err(SealnoteError::NoteNotFound(*id));
        }
        info!(note_id = %id, "deleted note");
        Ok(())
    }

    fn load(&self, id: &Uuid) -> Result<StoredNote> {
        self.store
            .get_note(id)?
            .ok_or(SealnoteError::NoteNotFound(*id))
    }

    fn seal(&self, password: &str, content: &str) -> Result<Envelope> {
        encrypt_with_iterations(password, content, self.settings.kdf_iterations).map_err(|e| {
            error!(error = %e, "failed to seal note");
            SealnoteError::Internal(e.to_string())
        })
    }

    fn open(note: &StoredNote, password: &str) -> Result<String> {
        note.envelope.open(password).map_err(|e| match e {
            EnvelopeError::AuthenticationFailure => {
                info!(note_id = %note.id, "note decryption rejected");
                SealnoteError::WrongPasswordOrCorrupt
            }
            EnvelopeError::InvalidEncoding(detail) => {
                warn!(note_id = %note.id, %detail, "stored envelope is malformed");
                SealnoteError::WrongPasswordOrCorrupt
            }
            EnvelopeError::InternalInvariantViolation(detail)
            | EnvelopeError::InvalidParameters(detail) => {
                error!(note_id = %note.id, %detail, "envelope invariant violated");
                SealnoteError::Internal(detail)
            }
        })
    }
}
