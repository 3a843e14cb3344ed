//! Output formatting for notes.

use comfy_table::presets::NOTHING;
use comfy_table::{ContentArrangement, Table};

use sealnote_core::storage::NoteSummary;
use sealnote_core::DecryptedNote;

/// Convert a decrypted note to JSON for output.
pub fn note_json(note: &DecryptedNote) -> serde_json::Value {
    serde_json::json!({
        "id": note.id,
        "user_id": note.user_id,
        "title": note.title,
        "created_at": note.created_at,
        "content": note.content,
    })
}

/// Convert note summaries to a JSON array for output.
pub fn summaries_json(notes: &[NoteSummary]) -> Vec<serde_json::Value> {
    notes
        .iter()
        .map(|note| {
            serde_json::json!({
                "id": note.id,
                "user_id": note.user_id,
                "title": note.title,
                "created_at": note.created_at,
            })
        })
        .collect()
}

/// Render a decrypted note as text.
pub fn note_text(note: &DecryptedNote) -> String {
    format!(
        "{}\n{}\n\n{}",
        note.title,
        note.created_at.format("%Y-%m-%d %H:%M UTC"),
        note.content
    )
}

/// Render note summaries as a borderless table.
pub fn summaries_table(notes: &[NoteSummary], header: bool) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if header {
        table.set_header(vec!["ID", "CREATED", "USER", "TITLE"]);
    }
    for note in notes {
        table.add_row(vec![
            note.id.to_string(),
            note.created_at.format("%Y-%m-%d %H:%M").to_string(),
            note.user_id.to_string(),
            note.title.clone(),
        ]);
    }
    table.to_string()
}
