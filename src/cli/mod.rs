//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// notecard - tagged notes kept in a remote note store
#[derive(Parser, Debug)]
#[command(name = "notecard", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the note store (overrides config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Act as this user id instead of the stored session
    #[arg(short = 'u', long, global = true)]
    pub user: Option<String>,

    /// Session file location (overrides config file)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Config file location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in: print the provider URL or store the user id from the redirect
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// List notes, optionally searched and filtered by tags
    #[command(name = "ls")]
    List(ListArgs),

    /// List all tags across the notes
    Tags(TagsArgs),

    /// Show a note
    Show(ShowArgs),

    /// Create a new note
    New(NewArgs),

    /// Edit a note's title, content, or tags
    Edit(EditArgs),

    /// Delete a note
    #[command(name = "rm")]
    Remove(RemoveArgs),

    /// Search interactively: each stdin line is the current search text
    Watch(WatchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `login` command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Identity provider (default from config, else google)
    #[arg(long)]
    pub provider: Option<String>,

    /// URL the browser was redirected to after signing in
    #[arg(long, conflicts_with = "user_id")]
    pub redirect: Option<String>,

    /// Store this user id directly
    #[arg(long)]
    pub user_id: Option<String>,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Search text sent to the store
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Show only notes with this tag (repeatable; any tag matches)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Restrict to notes matching this search text
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Show note counts for each tag
    #[arg(long)]
    pub counts: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID, ID prefix, or title
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note title
    pub title: String,

    /// Note content
    #[arg(short, long, default_value = "")]
    pub content: String,

    /// Tag for the note (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID, ID prefix, or title
    pub note: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New content
    #[arg(short, long, conflicts_with = "open")]
    pub content: Option<String>,

    /// Replace all tags with a comma-separated list
    #[arg(long, value_name = "LIST")]
    pub tags: Option<String>,

    /// Append a tag (can be specified multiple times)
    #[arg(long = "add-tag", action = ArgAction::Append)]
    pub add_tags: Vec<String>,

    /// Remove the tag at this position, counting from 0 (repeatable)
    #[arg(long = "remove-tag", action = ArgAction::Append, value_name = "INDEX")]
    pub remove_tags: Vec<usize>,

    /// Edit the content in your editor
    #[arg(short, long)]
    pub open: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Note ID, ID prefix, or title
    pub note: String,
}

/// Arguments for the `watch` command
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Show only notes with this tag (repeatable; any tag matches)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Quiet period in milliseconds before a search is sent
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
