//! notecard - tagged notes kept in a remote note store

pub mod cli;
pub mod domain;
pub mod filter;
pub mod infra;
pub mod store;
pub mod sync;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_edit, handle_list, handle_login, handle_logout, handle_new, handle_remove,
        handle_show, handle_tags, handle_watch,
    },
};
use domain::{Session, UserId};
use infra::{init_logging, read_session};
use store::HttpNoteStore;
use sync::NoteController;

/// Main entry point for the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let session_path = config.session_file(cli.session_file.as_ref());

    // Completions and logout never touch the store
    match &cli.command {
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "notecard",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        Command::Logout => return handle_logout(&session_path),
        _ => {}
    }

    let api_url = config.api_url(cli.api_url.as_deref());
    let store = HttpNoteStore::new(&api_url, config.timeout())
        .with_context(|| format!("cannot use note store at {}", api_url))?;
    tracing::debug!(url = %store.base_url(), "using note store");

    if let Command::Login(args) = &cli.command {
        let provider = config.provider(args.provider.as_deref());
        return handle_login(args, &store, &session_path, &provider);
    }

    let session = current_session(cli.user.as_deref(), &session_path)?;
    let mut ctl = NoteController::new(store, session);

    match &cli.command {
        Command::List(args) => handle_list(args, &mut ctl).await,
        Command::Tags(args) => handle_tags(args, &mut ctl).await,
        Command::Show(args) => handle_show(args, &mut ctl).await,
        Command::New(args) => handle_new(args, &mut ctl).await,
        Command::Edit(args) => handle_edit(args, &mut ctl, &config).await,
        Command::Remove(args) => handle_remove(args, &mut ctl).await,
        Command::Watch(args) => handle_watch(args, &mut ctl, config.debounce()).await,
        Command::Login(_) | Command::Logout | Command::Completions(_) => Ok(()),
    }
}

/// Resolves the signed-in user: `--user` wins over the saved session.
fn current_session(user_flag: Option<&str>, session_path: &Path) -> Result<Session> {
    if let Some(id) = user_flag {
        let user_id: UserId = id.parse().context("invalid --user value")?;
        return Ok(Session::new(user_id));
    }

    match read_session(session_path)
        .with_context(|| format!("failed to read session {}", session_path.display()))?
    {
        Some(session) => Ok(session),
        None => bail!("not signed in; run `notecard login` first"),
    }
}
