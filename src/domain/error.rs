//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Rank;

/// The requested tier count cannot be satisfied by the available courses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    #[error("not enough courses: {requested} tiers requested, {available} courses available")]
    NotEnoughCourses { requested: usize, available: usize },

    #[error("cannot evenly divide {len} courses into {tier_count} tiers")]
    Indivisible { len: usize, tier_count: usize },
}

/// Domain errors represent business rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Size(#[from] SizeError),

    #[error("no course matches '{key}'")]
    NoMatch { key: String },

    #[error("invalid selection: {0}")]
    Selection(String),

    #[error("empty list: {0}")]
    EmptyList(&'static str),

    #[error("nothing to {0}")]
    HistoryExhausted(&'static str),

    #[error("duplicate course rank: {0}")]
    DuplicateRank(Rank),

    #[error("unknown course rank: {0}")]
    UnknownRank(Rank),
}
