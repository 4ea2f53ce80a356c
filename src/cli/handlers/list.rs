//! List command handler.

use anyhow::{Context, Result};

use super::{note_table, select_tags};
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::store::NoteStore;
use crate::sync::NoteController;

pub async fn handle_list<S: NoteStore>(args: &ListArgs, ctl: &mut NoteController<S>) -> Result<()> {
    // 1. Tag filters are client-side; the search term goes to the store
    select_tags(ctl, &args.tags)?;
    ctl.set_search_term(args.search.as_str());

    // 2. Fetch
    ctl.load().await.context("failed to load notes")?;
    let notes = ctl.visible_notes();

    // 3. Output based on format
    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
            } else {
                print!("{}", note_table(&notes));
                println!();
                println!("{} note(s)", notes.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(|n| NoteListing::from(*n)).collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
