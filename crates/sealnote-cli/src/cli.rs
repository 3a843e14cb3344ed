use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use sealnote_core::VERSION;

/// Sealnote - encrypted notes that only ever reach disk as ciphertext
#[derive(Parser)]
#[command(name = "sealnote")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "SEALNOTE_CONFIG")]
    pub config: Option<String>,

    /// Path to the note database (overrides the config file)
    #[arg(long, global = true, env = "SEALNOTE_DB")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file and create the note database
    Init(InitArgs),

    /// Encrypt and store a new note
    Add(AddArgs),

    /// Decrypt and show a note
    Show(ShowArgs),

    /// List notes (titles only, nothing is decrypted)
    List(ListArgs),

    /// Re-encrypt a note under a new master password
    Passwd(PasswdArgs),

    /// Delete a note
    Delete(DeleteArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// PBKDF2 iteration count for new notes
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Minimum length for new master passwords
    #[arg(long)]
    pub min_password_length: Option<usize>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Note title (stored unencrypted)
    #[arg(long)]
    pub title: String,

    /// Owner user ID; a new user is created when omitted
    #[arg(long, value_name = "UUID")]
    pub user: Option<String>,

    /// Note body (overrides stdin)
    #[arg(long)]
    pub body: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only notes owned by this user
    #[arg(long, value_name = "UUID")]
    pub user: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `passwd` command
#[derive(Args)]
pub struct PasswdArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: String,
}
