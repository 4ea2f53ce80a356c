//! Note resolution utilities.

use anyhow::{Result, bail};

use super::format_tags;
use crate::domain::{Note, NoteId};

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult<'a> {
    /// Exactly one note matched.
    Unique(&'a Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<&'a Note>),
    /// No notes matched.
    NotFound,
}

/// Resolves a note identifier against the loaded notes.
///
/// Resolution order:
/// 1. Exact ID match
/// 2. ID prefix match
/// 3. Exact title match (case-insensitive)
///
/// An exact ID wins outright. Otherwise prefix and title matches are
/// pooled: one candidate is `Unique`, several are `Ambiguous`.
pub fn resolve_note<'a>(notes: &'a [Note], identifier: &str) -> ResolveResult<'a> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return ResolveResult::NotFound;
    }

    if let Some(note) = notes.iter().find(|n| n.id().as_str() == identifier) {
        return ResolveResult::Unique(note);
    }

    let lowered = identifier.to_lowercase();
    let candidates: Vec<&Note> = notes
        .iter()
        .filter(|n| {
            n.id().as_str().starts_with(identifier) || n.title().to_lowercase() == lowered
        })
        .collect();

    match candidates.len() {
        0 => ResolveResult::NotFound,
        1 => ResolveResult::Unique(candidates[0]),
        _ => ResolveResult::Ambiguous(candidates),
    }
}

/// Resolves to exactly one note id, reporting ambiguity on stderr.
pub(crate) fn resolve_unique(notes: &[Note], identifier: &str) -> Result<NoteId> {
    match resolve_note(notes, identifier) {
        ResolveResult::Unique(note) => Ok(note.id().clone()),
        ResolveResult::Ambiguous(matches) => {
            print_ambiguous_notes(identifier, &matches);
            bail!("ambiguous note identifier");
        }
        ResolveResult::NotFound => bail!("note not found: '{}'", identifier),
    }
}

/// Prints detailed information about ambiguous notes to help distinguish them.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[&Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {} - {}", note.id(), note.title());
        if !note.tags().is_empty() {
            eprintln!("      tags: {}", format_tags(note.tags()));
        }
    }
    eprintln!();
    eprintln!("Use the full ID to specify which note you mean.");
}
