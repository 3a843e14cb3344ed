//! Command handlers for the Sealnote CLI.

pub mod init;
pub mod misc;
pub mod notes;
