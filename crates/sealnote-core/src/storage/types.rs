//! Core data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::Envelope;

/// A note as persisted: metadata in the clear, body sealed in an envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredNote {
    /// Unique identifier for this note
    pub id: Uuid,

    /// Owner of this note
    pub user_id: Uuid,

    /// Title (stored unencrypted, used for listings)
    pub title: String,

    /// Encrypted body
    pub envelope: Envelope,

    /// When this note was created
    pub created_at: DateTime<Utc>,

    /// When the envelope was last replaced
    pub updated_at: DateTime<Utc>,
}

/// Listing view of a note. Carries no envelope material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Builder for creating new notes.
#[derive(Debug, Clone)]
pub struct NewNote {
    /// Owner; provisioned on insert if unknown
    pub user_id: Uuid,

    /// Title
    pub title: String,

    /// Sealed body
    pub envelope: Envelope,
}

impl NewNote {
    pub fn new(user_id: Uuid, title: impl Into<String>, envelope: Envelope) -> Self {
        Self {
            user_id,
            title: title.into(),
            envelope,
        }
    }
}

/// Outcome of inserting a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertedNote {
    pub id: Uuid,

    /// Whether the owning user was provisioned by this insert
    pub user_created: bool,
}

/// Filter for listing notes.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    /// Only notes owned by this user
    pub user_id: Option<Uuid>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl NoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
