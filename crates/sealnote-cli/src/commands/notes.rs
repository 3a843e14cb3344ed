use secrecy::ExposeSecret;

use sealnote_core::storage::NoteFilter;
use sealnote_core::CreateNote;

use crate::app::AppContext;
use crate::cli::{AddArgs, DeleteArgs, ListArgs, PasswdArgs, ShowArgs};
use crate::constants::{MASTER_PASSWORD_ENV, NEW_MASTER_PASSWORD_ENV};
use crate::errors::from_core;
use crate::helpers::{
    parse_id, prompt_master_password, prompt_new_master_password, read_note_body,
};
use crate::output::{note_json, note_text, summaries_json, summaries_table};

const DEFAULT_LIST_LIMIT: usize = 50;

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let user_id = args
        .user
        .as_deref()
        .map(|value| parse_id(value, "user"))
        .transpose()?;

    let service = ctx.open_service()?;
    let body = read_note_body(args.no_input, args.body.clone())?;
    let password = prompt_new_master_password(
        args.no_input,
        MASTER_PASSWORD_ENV,
        service.settings().min_password_length,
    )?;

    let created = service
        .create_note(CreateNote {
            user_id,
            title: &args.title,
            content: &body,
            master_password: password.expose_secret(),
        })
        .map_err(from_core)?;

    if ctx.quiet() {
        println!("{}", created.note_id);
    } else {
        if created.user_created {
            println!("Created user {}", created.user_id);
        }
        println!("Added note {} for user {}", created.note_id, created.user_id);
    }
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let id = parse_id(&args.id, "note")?;
    let service = ctx.open_service()?;
    let password = prompt_master_password(args.no_input)?;

    let note = service
        .decrypt_note(&id, password.expose_secret())
        .map_err(from_core)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&note_json(&note))?);
    } else if ctx.quiet() {
        println!("{}", note.content);
    } else {
        println!("{}", note_text(&note));
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let mut filter = NoteFilter::new().limit(args.limit.unwrap_or(DEFAULT_LIST_LIMIT));
    if let Some(value) = args.user.as_deref() {
        filter = filter.user(parse_id(value, "user")?);
    }

    let service = ctx.open_service()?;
    let notes = service.list_notes(&filter).map_err(from_core)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries_json(&notes))?);
        return Ok(());
    }
    if notes.is_empty() {
        if !ctx.quiet() {
            println!("No notes found.");
        }
        return Ok(());
    }
    println!("{}", summaries_table(&notes, !ctx.quiet()));
    Ok(())
}

pub fn handle_passwd(ctx: &AppContext, args: &PasswdArgs) -> anyhow::Result<()> {
    let id = parse_id(&args.id, "note")?;
    let service = ctx.open_service()?;
    let current = prompt_master_password(args.no_input)?;
    let new = prompt_new_master_password(
        args.no_input,
        NEW_MASTER_PASSWORD_ENV,
        service.settings().min_password_length,
    )?;

    service
        .change_password(&id, current.expose_secret(), new.expose_secret())
        .map_err(from_core)?;

    if !ctx.quiet() {
        println!("Re-encrypted note {}", id);
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let id = parse_id(&args.id, "note")?;
    let service = ctx.open_service()?;
    service.delete_note(&id).map_err(from_core)?;

    if !ctx.quiet() {
        println!("Deleted note {}", id);
    }
    Ok(())
}
