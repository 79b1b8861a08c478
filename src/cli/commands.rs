use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::io::paths::DATA_DIR_ENV;
use crate::model::{Priority, StatusFilter};

#[derive(Parser)]
#[command(name = "planner", about = concat!("planner v", env!("CARGO_PKG_VERSION"), " - plan your day, own your goals"), version)]
pub struct Cli {
    /// Without a command the interactive planner starts
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding tasks, display mode, config and log
    #[arg(short = 'C', long = "data-dir", env = DATA_DIR_ENV, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: config.toml in the data directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep everything in memory; nothing is read or written
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Add a task at the end of the list
    Add(AddArgs),
    /// Flip a task between active and completed
    Toggle(IdArgs),
    /// Delete a task
    Rm(IdArgs),
    /// Replace a task's text
    Edit(EditArgs),
    /// Move a task to another position of the (filtered) list
    Mv(MvArgs),
    /// Show or change the display mode
    Theme(ThemeArgs),
}

/// Filter flags shared by `list` and `mv`
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Case-insensitive text search
    #[arg(long)]
    pub search: Option<String>,
    /// all, active or completed
    #[arg(long)]
    pub status: Option<StatusFilter>,
    /// Exact category
    #[arg(long)]
    pub category: Option<String>,
    /// high, medium or low
    #[arg(long)]
    pub priority: Option<Priority>,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// high, medium or low
    #[arg(long)]
    pub priority: Option<Priority>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task id or a unique prefix of it
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id or a unique prefix of it
    pub id: String,
    /// New text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Current position (1-based, as shown by `list` with the same filters)
    pub from: usize,
    /// New position
    pub to: usize,
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// Leave out to print the current mode
    pub mode: Option<ThemeChoice>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    Toggle,
}
