//! Note row type for database queries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::crypto::Envelope;
use crate::error::{Result, SealnoteError};
use crate::storage::types::StoredNote;

/// Columns selected for a full note, in order.
pub(crate) const NOTE_COLUMNS: &str =
    "id, user_id, title, ciphertext, salt, nonce, kdf_iterations, created_at, updated_at";

/// Raw row data from the notes table, before parsing into domain types.
#[derive(Debug)]
pub(crate) struct NoteRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub ciphertext: String,
    pub salt: String,
    pub nonce: String,
    pub kdf_iterations: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl NoteRow {
    /// Read a row selected with [`NOTE_COLUMNS`].
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            ciphertext: row.get(3)?,
            salt: row.get(4)?,
            nonce: row.get(5)?,
            kdf_iterations: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| SealnoteError::Storage(format!("Invalid {} UUID: {}", column, e)))
}

pub(crate) fn parse_timestamp(value: &str, column: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| SealnoteError::Storage(format!("Invalid {} timestamp: {}", column, e)))?
        .with_timezone(&Utc))
}

impl TryFrom<NoteRow> for StoredNote {
    type Error = SealnoteError;

    fn try_from(row: NoteRow) -> Result<Self> {
        let id = parse_uuid(&row.id, "note")?;
        let user_id = parse_uuid(&row.user_id, "user")?;
        let created_at = parse_timestamp(&row.created_at, "created_at")?;
        let updated_at = parse_timestamp(&row.updated_at, "updated_at")?;
        let iterations = u32::try_from(row.kdf_iterations).map_err(|_| {
            SealnoteError::Storage(format!(
                "Invalid kdf_iterations: {}",
                row.kdf_iterations
            ))
        })?;

        Ok(StoredNote {
            id,
            user_id,
            title: row.title,
            envelope: Envelope::from_parts(row.ciphertext, row.salt, row.nonce, iterations),
            created_at,
            updated_at,
        })
    }
}
