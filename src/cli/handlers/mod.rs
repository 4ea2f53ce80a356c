//! Command handlers for the CLI.

mod edit;
mod list;
mod login;
mod new;
mod remove;
mod resolve;
mod show;
mod tags;
mod watch;


use anyhow::{Context, Result};

use crate::domain::{Note, Tag};
use crate::filter::SelectedTags;
use crate::store::NoteStore;
use crate::sync::NoteController;

// Re-export public items
pub use edit::handle_edit;
pub use list::handle_list;
pub use login::{handle_login, handle_logout};
pub use new::handle_new;
pub use remove::handle_remove;
pub use resolve::{ResolveResult, resolve_note};
pub use show::handle_show;
pub use tags::handle_tags;
pub use watch::handle_watch;

// Re-export for tests
#[cfg(test)]
pub(crate) use edit::{EditorLauncher, handle_edit_impl};
#[cfg(test)]
pub(crate) use watch::watch_input;

// ===========================================
// Shared Utilities
// ===========================================

/// Parses `--tag` values into a selection.
pub(crate) fn parse_selected_tags(values: &[String]) -> Result<SelectedTags> {
    values
        .iter()
        .map(|v| Tag::parse(v).with_context(|| format!("invalid tag filter '{}'", v)))
        .collect()
}

/// Replaces the controller's tag selection with the `--tag` filters.
pub(crate) fn select_tags<S: NoteStore>(
    ctl: &mut NoteController<S>,
    values: &[String],
) -> Result<()> {
    let selected = parse_selected_tags(values)?;
    ctl.clear_tag_filters();
    for tag in selected.iter() {
        ctl.toggle_tag(tag.clone());
    }
    Ok(())
}

/// Formats tags for a single display line.
pub(crate) fn format_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a compact note table.
pub(crate) fn note_table(notes: &[&Note]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<10}  {:<40}  {}\n", "ID", "Title", "Tags"));
    out.push_str(&format!(
        "{:<10}  {:<40}  {}\n",
        "----------", "----------------------------------------", "----"
    ));
    for note in notes {
        out.push_str(&format!(
            "{:<10}  {:<40}  {}\n",
            note.id().prefix(),
            truncate_str(note.title(), 40),
            format_tags(note.tags())
        ));
    }
    out
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
