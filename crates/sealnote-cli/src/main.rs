//! Sealnote CLI - encrypted notes that only ever reach disk as ciphertext
//!
//! This is the command-line interface for Sealnote. It wires configuration,
//! logging and prompts around the note service in `sealnote-core`.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli)?;
    logging::init(
        ctx.config()
            .and_then(|config| config.logging.filter.as_deref()),
    );

    match &cli.command {
        Some(Commands::Init(args)) => commands::init::handle_init(&ctx, args),
        Some(Commands::Add(args)) => commands::notes::handle_add(&ctx, args),
        Some(Commands::Show(args)) => commands::notes::handle_show(&ctx, args),
        Some(Commands::List(args)) => commands::notes::handle_list(&ctx, args),
        Some(Commands::Passwd(args)) => commands::notes::handle_passwd(&ctx, args),
        Some(Commands::Delete(args)) => commands::notes::handle_delete(&ctx, args),
        Some(Commands::Completions { shell }) => commands::misc::handle_completions(*shell),
        None => {
            print_quickstart();
            Ok(())
        }
    }
}

fn print_quickstart() {
    println!("Sealnote - encrypted notes");
    println!();
    println!("Quick start:");
    println!("  sealnote init");
    println!("  sealnote add --title \"Groceries\" --body \"eggs, milk\"");
    println!("  sealnote list");
    println!("  sealnote show <ID>");
    println!();
    println!("Run `sealnote --help` for all commands.");
}
