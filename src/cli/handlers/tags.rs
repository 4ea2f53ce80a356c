//! Tags command handler.

use anyhow::{Context, Result};

use crate::cli::TagsArgs;
use crate::cli::output::{Output, OutputFormat, TagListing};
use crate::filter::tag_counts;
use crate::store::NoteStore;
use crate::sync::NoteController;

pub async fn handle_tags<S: NoteStore>(args: &TagsArgs, ctl: &mut NoteController<S>) -> Result<()> {
    ctl.set_search_term(args.search.as_str());
    ctl.load().await.context("failed to load notes")?;

    let listings: Vec<TagListing> = if args.counts {
        tag_counts(ctl.notes())
            .into_iter()
            .map(|(tag, count)| TagListing {
                name: tag.to_string(),
                count: Some(count),
            })
            .collect()
    } else {
        ctl.tag_universe()
            .into_iter()
            .map(|tag| TagListing {
                name: tag.to_string(),
                count: None,
            })
            .collect()
    };

    match args.format {
        OutputFormat::Human => {
            if listings.is_empty() {
                println!("No tags found.");
            }
            for listing in &listings {
                match listing.count {
                    Some(count) => println!("{} ({})", listing.name, count),
                    None => println!("{}", listing.name),
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }

    Ok(())
}
