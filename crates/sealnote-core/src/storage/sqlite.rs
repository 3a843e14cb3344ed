//! SQLite note store.
//!
//! Notes live in a plain SQLite database; only envelopes are written, so
//! the file itself needs no further encryption. One connection is shared
//! behind a mutex.

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};
use uuid::Uuid;

use crate::crypto::Envelope;
use crate::error::{Result, SealnoteError};
use crate::storage::row::{parse_timestamp, parse_uuid, NoteRow, NOTE_COLUMNS};
use crate::storage::traits::NoteStore;
use crate::storage::types::{InsertedNote, NewNote, NoteFilter, NoteSummary, StoredNote};

/// Current on-disk schema version.
const FORMAT_VERSION: &str = "1";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS notes (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        title TEXT NOT NULL,
        ciphertext TEXT NOT NULL,
        salt TEXT NOT NULL,
        nonce TEXT NOT NULL,
        kdf_iterations INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,

        FOREIGN KEY(user_id) REFERENCES users(id)
    );

    CREATE INDEX IF NOT EXISTS notes_user_created
        ON notes(user_id, created_at);
"#;

/// SQLite-backed [`NoteStore`].
pub struct SqliteNoteStore {
    conn: Mutex<Connection>,
}

impl SqliteNoteStore {
    /// Open (or create) a note database at `path`.
    ///
    /// Parent directories are created as needed and the schema is applied
    /// idempotently.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened note database");
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('format_version', ?)",
            [FORMAT_VERSION],
        )?;

        let format_version: String = conn.query_row(
            "SELECT value FROM meta WHERE key = 'format_version'",
            [],
            |row| row.get(0),
        )?;
        if format_version != FORMAT_VERSION {
            return Err(SealnoteError::Storage(format!(
                "Unsupported note database format: {} (expected {})",
                format_version, FORMAT_VERSION
            )));
        }

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| SealnoteError::Storage("SQLite connection poisoned".to_string()))
    }

    fn now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

impl NoteStore for SqliteNoteStore {
    fn insert_note(&self, note: &NewNote) -> Result<InsertedNote> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        let now = Self::now();

        let user_created = tx.execute(
            "INSERT OR IGNORE INTO users (id, created_at) VALUES (?, ?)",
            params![note.user_id.to_string(), now],
        )? > 0;

        let id = Uuid::new_v4();
        tx.execute(
            r#"
            INSERT INTO notes (
                id,
                user_id,
                title,
                ciphertext,
                salt,
                nonce,
                kdf_iterations,
                created_at,
                updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                id.to_string(),
                note.user_id.to_string(),
                note.title,
                note.envelope.ciphertext(),
                note.envelope.salt(),
                note.envelope.nonce(),
                i64::from(note.envelope.iterations()),
                now,
                now,
            ],
        )?;
        tx.commit()?;

        if user_created {
            info!(user_id = %note.user_id, "provisioned new user");
        }
        debug!(note_id = %id, user_id = %note.user_id, "inserted note");
        Ok(InsertedNote { id, user_created })
    }

    fn get_note(&self, id: &Uuid) -> Result<Option<StoredNote>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM notes WHERE id = ?", NOTE_COLUMNS),
                [id.to_string()],
                NoteRow::from_row,
            )
            .optional()?;

        row.map(StoredNote::try_from).transpose()
    }

    fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteSummary>> {
        let conn = self.lock_conn()?;

        let mut query = String::from("SELECT id, user_id, title, created_at FROM notes");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(user_id) = filter.user_id {
            query.push_str(" WHERE user_id = ?");
            params.push(Box::new(user_id.to_string()));
        }
        query.push_str(" ORDER BY created_at DESC, rowid DESC");
        if let Some(limit) = filter.limit {
            let limit = i64::try_from(limit)
                .map_err(|_| SealnoteError::InvalidInput("Limit is too large".to_string()))?;
            query.push_str(" LIMIT ?");
            params.push(Box::new(limit));
        }

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut notes = Vec::new();
        for row in rows {
            let (id, user_id, title, created_at) = row?;
            notes.push(NoteSummary {
                id: parse_uuid(&id, "note")?,
                user_id: parse_uuid(&user_id, "user")?,
                title,
                created_at: parse_timestamp(&created_at, "created_at")?,
            });
        }
        Ok(notes)
    }

    fn replace_envelope(
        &self,
        id: &Uuid,
        expected: &Envelope,
        envelope: &Envelope,
    ) -> Result<bool> {
        let conn = self.lock_conn()?;
        let updated = conn.execute(
            r#"
            UPDATE notes
            SET ciphertext = ?, salt = ?, nonce = ?, kdf_iterations = ?, updated_at = ?
            WHERE id = ? AND ciphertext = ? AND salt = ? AND nonce = ? AND kdf_iterations = ?
            "#,
            params![
                envelope.ciphertext(),
                envelope.salt(),
                envelope.nonce(),
                i64::from(envelope.iterations()),
                Self::now(),
                id.to_string(),
                expected.ciphertext(),
                expected.salt(),
                expected.nonce(),
                i64::from(expected.iterations()),
            ],
        )?;
        Ok(updated > 0)
    }

    fn delete_note(&self, id: &Uuid) -> Result<bool> {
        let conn = self.lock_conn()?;
        let deleted = conn.execute("DELETE FROM notes WHERE id = ?", [id.to_string()])?;
        if deleted > 0 {
            debug!(note_id = %id, "deleted note");
        }
        Ok(deleted > 0)
    }
}
