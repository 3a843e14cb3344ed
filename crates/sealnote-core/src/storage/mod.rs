//! Storage layer for encrypted notes.
//!
//! This module provides:
//! - `NoteStore` trait: the persistence contract used by the note service
//! - `SqliteNoteStore`: the SQLite implementation
//! - Data types: `StoredNote`, `NewNote`, `InsertedNote`, `NoteSummary`, `NoteFilter`

mod row;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteNoteStore;
pub use traits::NoteStore;
pub use types::{InsertedNote, NewNote, NoteFilter, NoteSummary, StoredNote};
