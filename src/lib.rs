//! coursetier: keep an active subset of a course registry, draw from it at
//! random and build tiered sets.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
