//! New note command handler.

use anyhow::{Context, Result, bail};

use crate::cli::NewArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::store::NoteStore;
use crate::sync::NoteController;

pub async fn handle_new<S: NoteStore>(args: &NewArgs, ctl: &mut NoteController<S>) -> Result<()> {
    // Fill the draft the same way the create form does
    let draft = ctl.draft_mut();
    draft.set_title(args.title.trim());
    draft.set_content(args.content.as_str());
    for tag in &args.tags {
        if !draft.add_tag(tag) {
            bail!("invalid tag '{}': tag cannot be empty", tag);
        }
    }

    let created = ctl.create().await.context("failed to create note")?;
    if let Some(message) = ctl.last_error() {
        eprintln!("warning: note created but the list could not be refreshed: {}", message);
    }

    let note = created.as_ref().and_then(|id| ctl.note(id));
    match args.format {
        OutputFormat::Human => match (note, &created) {
            (Some(note), _) => println!("Created: {} [{}]", note.title(), note.id()),
            (None, Some(id)) => println!("Created: {} [{}]", args.title.trim(), id),
            (None, None) => println!("Created: {}", args.title.trim()),
        },
        OutputFormat::Json => {
            let listing = note.map(NoteListing::from);
            println!("{}", serde_json::to_string_pretty(&Output::new(listing))?);
        }
    }

    Ok(())
}
