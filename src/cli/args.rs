//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Random course picker: keep an active list, draw courses, build tiered sets
#[derive(Parser, Debug)]
#[command(name = "coursetier")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Registry file (overrides config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub registry: Option<PathBuf>,

    /// Snapshot file of the active list (overrides config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub snapshot: Option<PathBuf>,

    /// Named save under the saves directory (overrides config)
    #[arg(long, global = true, conflicts_with = "snapshot")]
    pub save: Option<String>,

    /// Seed for reproducible draws (overrides config)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive session (default)
    Repl,

    /// List active courses
    List {
        /// List removed courses instead
        #[arg(long)]
        used: bool,
    },

    /// Build a tiered list from the active courses
    Tier {
        /// Number of tiers
        count: usize,
        /// Drop surplus courses without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Search removed courses and add matches back
    Add {
        /// Search key (empty matches all)
        #[arg(default_value = "")]
        key: String,
        /// 'all' or a match key; prompts when omitted
        #[arg(long)]
        select: Option<String>,
    },

    /// Search active courses and remove matches
    Remove {
        /// Search key (empty matches all)
        #[arg(default_value = "")]
        key: String,
        /// 'all' or a match key; prompts when omitted
        #[arg(long)]
        select: Option<String>,
    },

    /// List named saves
    Saves,

    /// Make every registry course active again
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Print the global config file location
    Path,
}
