//! Session-scoped search term and tag selection.

use crate::domain::Tag;

/// Insertion-ordered set of tags the user has selected as filters.
///
/// Never sent to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedTags(Vec<Tag>);

impl SelectedTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.0.contains(tag)
    }

    /// Adds `tag` if absent. Returns false if it was already selected.
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    /// Selects `tag` if unselected, otherwise deselects it.
    ///
    /// Returns true if the tag is selected afterwards.
    pub fn toggle(&mut self, tag: Tag) -> bool {
        match self.0.iter().position(|t| *t == tag) {
            Some(index) => {
                self.0.remove(index);
                false
            }
            None => {
                self.0.push(tag);
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}

impl FromIterator<Tag> for SelectedTags {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut selected = Self::new();
        for tag in iter {
            selected.insert(tag);
        }
        selected
    }
}

/// The user's current view filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search_term: String,
    selected_tags: SelectedTags,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the free-text term sent to the store.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replaces the search term. Returns true if it changed.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        self.search_term = term;
        true
    }

    pub fn selected_tags(&self) -> &SelectedTags {
        &self.selected_tags
    }

    pub fn selected_tags_mut(&mut self) -> &mut SelectedTags {
        &mut self.selected_tags
    }
}
