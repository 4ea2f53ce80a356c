//! Interactive search command handler.

use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinSet;

use super::{format_tags, select_tags, truncate_str};
use crate::cli::WatchArgs;
use crate::domain::Note;
use crate::store::{NoteStore, StoreResult};
use crate::sync::{LoadOutcome, LoadTicket, NoteController, SearchDebouncer};

pub async fn handle_watch<S>(
    args: &WatchArgs,
    ctl: &mut NoteController<S>,
    quiet: Duration,
) -> Result<()>
where
    S: NoteStore + Clone + Send + Sync + 'static,
{
    let quiet = args.debounce_ms.map(Duration::from_millis).unwrap_or(quiet);
    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    watch_input(ctl, &args.tags, input, quiet, &mut out).await
}

/// Runs one search per settled input line until the input ends.
///
/// Each line replaces the search text. Loads run concurrently; a
/// response superseded by a newer search is dropped without printing.
pub(crate) async fn watch_input<S, R, W>(
    ctl: &mut NoteController<S>,
    tags: &[String],
    input: R,
    quiet: Duration,
    out: &mut W,
) -> Result<()>
where
    S: NoteStore + Clone + Send + Sync + 'static,
    R: AsyncBufRead + Unpin + Send + 'static,
    W: Write,
{
    select_tags(ctl, tags)?;

    match ctl.load().await {
        Ok(_) => print_visible(ctl, out)?,
        Err(e) => writeln!(out, "error: {}", e)?,
    }

    let (tx, rx) = watch::channel(ctl.filter().search_term().to_string());
    let mut debouncer = SearchDebouncer::new(rx, quiet);

    let reader = tokio::spawn(async move {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if tx.send(line.trim().to_string()).is_err() {
                break;
            }
        }
        Ok::<_, std::io::Error>(())
    });

    let mut in_flight: JoinSet<(LoadTicket, StoreResult<Vec<Note>>)> = JoinSet::new();
    let mut input_open = true;

    loop {
        tokio::select! {
            settled = debouncer.next_settled(), if input_open => match settled {
                Some(term) => {
                    if ctl.set_search_term(term) {
                        let ticket = ctl.begin_load();
                        let store = ctl.store().clone();
                        let user = ctl.session().user_id().clone();
                        in_flight.spawn(async move {
                            let result = store.list(&user, ticket.search_term()).await;
                            (ticket, result)
                        });
                    }
                }
                None => input_open = false,
            },
            Some(joined) = in_flight.join_next() => {
                let (ticket, result) = joined.context("search task failed")?;
                match ctl.finish_load(ticket, result) {
                    Ok(LoadOutcome::Applied(_)) => print_visible(ctl, out)?,
                    Ok(LoadOutcome::Stale) => {}
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
            }
            else => break,
        }
    }

    reader
        .await
        .context("input task failed")?
        .context("failed to read search input")?;
    Ok(())
}

fn print_visible<S: NoteStore, W: Write>(ctl: &NoteController<S>, out: &mut W) -> Result<()> {
    let notes = ctl.visible_notes();
    writeln!(
        out,
        "== {} note(s) for '{}'",
        notes.len(),
        ctl.filter().search_term()
    )?;
    for note in notes {
        writeln!(
            out,
            "  {}  {}  {}",
            note.id().prefix(),
            truncate_str(note.title(), 40),
            format_tags(note.tags())
        )?;
    }
    out.flush()?;
    Ok(())
}
