//! Pure derivations over an already-fetched note list.

use crate::domain::{Note, Tag};
use std::collections::HashSet;

use super::SelectedTags;

/// Returns the notes visible under `selected`, in their original order.
///
/// With no tags selected every note is visible. Otherwise a note is
/// visible when at least one of its tags is selected, so untagged notes
/// drop out. Comparison is exact and case-sensitive.
pub fn filter_by_tags<'a, I>(notes: I, selected: &SelectedTags) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    if selected.is_empty() {
        return notes.into_iter().collect();
    }
    notes
        .into_iter()
        .filter(|note| note.has_any_tag(selected.iter()))
        .collect()
}

/// Returns the distinct tags across `notes` in first-seen order.
pub fn tag_universe<'a, I>(notes: I) -> Vec<&'a Tag>
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut seen = HashSet::new();
    notes
        .into_iter()
        .flat_map(|note| note.tags())
        .filter(|tag| seen.insert(*tag))
        .collect()
}

/// Counts how many notes carry each tag, in tag-universe order.
///
/// A note listing the same tag twice is counted once for it.
pub fn tag_counts<'a>(notes: &'a [Note]) -> Vec<(&'a Tag, usize)> {
    tag_universe(notes)
        .into_iter()
        .map(|tag| {
            let count = notes.iter().filter(|n| n.tags().contains(tag)).count();
            (tag, count)
        })
        .collect()
}
