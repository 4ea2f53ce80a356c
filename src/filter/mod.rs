//! Tag filter engine: visible-subset and tag-universe derivation

mod engine;
mod state;

pub use engine::{filter_by_tags, tag_counts, tag_universe};
pub use state::{FilterState, SelectedTags};
