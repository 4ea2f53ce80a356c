//! Show command handler.

use anyhow::{Context, Result};

use super::format_tags;
use super::resolve::resolve_unique;
use crate::cli::ShowArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::store::NoteStore;
use crate::sync::NoteController;

pub async fn handle_show<S: NoteStore>(args: &ShowArgs, ctl: &mut NoteController<S>) -> Result<()> {
    ctl.load().await.context("failed to load notes")?;
    let id = resolve_unique(ctl.notes(), &args.note)?;
    let note = ctl
        .note(&id)
        .with_context(|| format!("note disappeared: {}", id))?;

    match args.format {
        OutputFormat::Human => {
            println!("# {}", note.title());
            println!();
            println!("ID: {}", note.id());
            if !note.tags().is_empty() {
                println!("Tags: {}", format_tags(note.tags()));
            }
            println!();
            if !note.content().is_empty() {
                println!("{}", note.content());
            }
        }
        OutputFormat::Json => {
            let output = Output::new(NoteListing::from(note));
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
