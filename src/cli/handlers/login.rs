//! Login and logout command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::LoginArgs;
use crate::domain::{Session, UserId};
use crate::infra::{remove_session, write_session};
use crate::store::HttpNoteStore;

pub fn handle_login(
    args: &LoginArgs,
    store: &HttpNoteStore,
    session_path: &Path,
    provider: &str,
) -> Result<()> {
    let user_id = match (&args.redirect, &args.user_id) {
        (Some(redirect), _) => UserId::from_redirect(redirect)?,
        (None, Some(id)) => id.parse::<UserId>()?,
        (None, None) => {
            let url = store.sign_in_url(provider)?;
            println!("Open this URL in your browser to sign in:");
            println!("  {}", url);
            println!();
            println!("Then run: notecard login --redirect '<address you were sent back to>'");
            return Ok(());
        }
    };

    write_session(session_path, &Session::new(user_id.clone()))
        .with_context(|| format!("failed to save session to {}", session_path.display()))?;
    println!("Signed in as {}", user_id);
    Ok(())
}

pub fn handle_logout(session_path: &Path) -> Result<()> {
    let removed = remove_session(session_path)
        .with_context(|| format!("failed to remove session {}", session_path.display()))?;
    if removed {
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}
