//! Domain entities: core data structures

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Unique, sortable course identifier. Lower is better.
pub type Rank = u32;

/// Position of a course on the selection screen.
///
/// `row` and `col` locate the cup, `pos` is the slot inside that cup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
    pub pos: u8,
}

impl Coord {
    pub fn new(row: u8, col: u8, pos: u8) -> Self {
        Self { row, col, pos }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.row, self.col, self.pos)
    }
}

/// A selectable course.
///
/// Identity, hashing and ordering use `rank` only; the other fields are
/// descriptive and never interpreted by list operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique across the registry
    pub rank: Rank,
    /// Display name, e.g. "Rainbow Road"
    pub name: String,
    /// Selection screen position
    #[serde(default)]
    pub coord: Coord,
}

impl Course {
    pub fn new(rank: Rank, coord: Coord, name: impl Into<String>) -> Self {
        Self {
            rank,
            name: name.into(),
            coord,
        }
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
    }
}

impl PartialOrd for Course {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Course {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:02}) {}", self.coord, self.rank, self.name)
    }
}
