//! Remove command handler.

use anyhow::{Context, Result};

use super::resolve::resolve_unique;
use crate::cli::RemoveArgs;
use crate::store::NoteStore;
use crate::sync::NoteController;

pub async fn handle_remove<S: NoteStore>(
    args: &RemoveArgs,
    ctl: &mut NoteController<S>,
) -> Result<()> {
    ctl.load().await.context("failed to load notes")?;
    let id = resolve_unique(ctl.notes(), &args.note)?;
    let title = ctl
        .note(&id)
        .map(|n| n.title().to_string())
        .unwrap_or_default();

    ctl.remove(&id)
        .await
        .with_context(|| format!("failed to delete note {}", id))?;

    println!("Deleted: {} [{}]", title, id);
    Ok(())
}
