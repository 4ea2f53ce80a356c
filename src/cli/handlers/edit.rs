//! Edit command handler.

use anyhow::{Context, Result, bail};
use std::io::Write as IoWrite;
use std::process::Command;

use super::format_tags;
use super::resolve::resolve_unique;
use crate::cli::EditArgs;
use crate::cli::config::Config;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::{EditBuffer, Tag};
use crate::store::NoteStore;
use crate::sync::NoteController;

/// Trait for editing text in an external editor (allows mocking in tests).
pub(crate) trait EditorLauncher {
    fn edit_text(&self, initial: &str) -> Result<String>;
}

/// Launches the configured editor on a temporary file.
struct RealEditor<'a>(&'a Config);

impl EditorLauncher for RealEditor<'_> {
    fn edit_text(&self, initial: &str) -> Result<String> {
        let editor = self.0.editor();

        // Parse editor command (may include args like "code --wait")
        let parts: Vec<&str> = editor.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            bail!("editor command is empty");
        };

        let mut file = tempfile::Builder::new()
            .prefix("notecard-")
            .suffix(".txt")
            .tempfile()
            .context("failed to create temporary file for editing")?;
        file.write_all(initial.as_bytes())
            .context("failed to write temporary file for editing")?;

        let status = Command::new(cmd)
            .args(args)
            .arg(file.path())
            .status()
            .with_context(|| format!("failed to launch editor '{}'", editor))?;

        if !status.success() {
            bail!("editor '{}' exited with non-zero status", editor);
        }

        std::fs::read_to_string(file.path()).context("failed to read edited content")
    }
}

fn has_changes(args: &EditArgs) -> bool {
    args.title.is_some()
        || args.content.is_some()
        || args.tags.is_some()
        || !args.add_tags.is_empty()
        || !args.remove_tags.is_empty()
        || args.open
}

/// Applies the requested edits to an open buffer.
///
/// Order: title, content, tag list replacement, removals by index
/// (positions refer to the list before any removal), then additions.
fn apply_edits<E: EditorLauncher>(args: &EditArgs, buffer: &mut EditBuffer, editor: &E) -> Result<()> {
    if let Some(title) = &args.title {
        buffer.set_title(title.trim());
    }

    if let Some(content) = &args.content {
        buffer.set_content(content.as_str());
    } else if args.open {
        let edited = editor.edit_text(buffer.content())?;
        buffer.set_content(edited.trim_end_matches('\n'));
    }

    if let Some(list) = &args.tags {
        buffer.set_tags_from_list(list);
    }

    let mut removals = args.remove_tags.clone();
    removals.sort_unstable();
    removals.dedup();
    for index in removals.into_iter().rev() {
        if buffer.remove_tag(index).is_none() {
            bail!(
                "no tag at position {} (note has {} tag(s))",
                index,
                buffer.tags().len()
            );
        }
    }

    for value in &args.add_tags {
        let tag = Tag::parse(value).with_context(|| format!("invalid tag '{}'", value))?;
        let slot = buffer.add_tag();
        buffer.set_tag(slot, tag);
    }

    Ok(())
}

/// Internal implementation that accepts a generic editor launcher.
pub(crate) async fn handle_edit_impl<S: NoteStore, E: EditorLauncher>(
    args: &EditArgs,
    ctl: &mut NoteController<S>,
    editor: &E,
) -> Result<()> {
    if !has_changes(args) {
        bail!("nothing to change: pass --title, --content, --tags, --add-tag, --remove-tag, or --open");
    }

    ctl.load().await.context("failed to load notes")?;
    let id = resolve_unique(ctl.notes(), &args.note)?;

    let buffer = ctl.open_editor(&id)?;
    if let Err(e) = apply_edits(args, buffer, editor) {
        ctl.close_editor(&id)?;
        return Err(e);
    }

    ctl.update(&id)
        .await
        .with_context(|| format!("failed to save note {}", id))?;

    let note = ctl
        .note(&id)
        .with_context(|| format!("note disappeared: {}", id))?;
    match args.format {
        OutputFormat::Human => {
            println!("Updated: {} [{}]", note.title(), note.id());
            if !note.tags().is_empty() {
                println!("  tags: {}", format_tags(note.tags()));
            }
        }
        OutputFormat::Json => {
            let output = Output::new(NoteListing::from(note));
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

pub async fn handle_edit<S: NoteStore>(
    args: &EditArgs,
    ctl: &mut NoteController<S>,
    config: &Config,
) -> Result<()> {
    handle_edit_impl(args, ctl, &RealEditor(config)).await
}
