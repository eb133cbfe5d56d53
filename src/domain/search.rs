//! Search results and the selection token that picks from them

use std::collections::BTreeMap;

use crate::domain::{Course, DomainError};

/// Search results keyed by display number (`0..n`, reference order).
///
/// Keys are only meaningful for the result set they were issued with.
pub type Matches = BTreeMap<usize, Course>;

/// Number matches `0..n` in iteration order.
pub fn number_matches<'a>(courses: impl IntoIterator<Item = &'a Course>) -> Matches {
    courses.into_iter().cloned().enumerate().collect()
}

/// A parsed selection token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Every match
    All,
    /// One match by key
    Key(usize),
}

impl Selection {
    /// Parse `"all"` (any case) or a numeric key.
    ///
    /// # Errors
    /// `DomainError::Selection` if the token is neither.
    pub fn parse(token: &str) -> Result<Self, DomainError> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        token
            .parse::<usize>()
            .map(Selection::Key)
            .map_err(|_| DomainError::Selection(format!("'{token}' is not 'all' or a key")))
    }

    /// Courses picked from `matches`.
    ///
    /// # Errors
    /// `DomainError::Selection` if a key is not present in `matches`.
    pub fn resolve(&self, matches: &Matches) -> Result<Vec<Course>, DomainError> {
        match self {
            Selection::All => Ok(matches.values().cloned().collect()),
            Selection::Key(key) => matches
                .get(key)
                .cloned()
                .map(|c| vec![c])
                .ok_or_else(|| DomainError::Selection(format!("no match with key {key}"))),
        }
    }
}
