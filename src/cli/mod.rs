//! CLI layer: argument parsing, command dispatch and the interactive loop

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod repl;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};
