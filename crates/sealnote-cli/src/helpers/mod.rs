//! Helper functions for the Sealnote CLI.

mod input;
mod parsing;

pub use input::{prompt_master_password, prompt_new_master_password, read_note_body};
pub use parsing::parse_id;
