//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod course_list;
pub mod entities;
pub mod error;
pub mod history;
pub mod random;
pub mod search;
pub mod tiering;

pub use course_list::CourseList;
pub use entities::*;
pub use error::{DomainError, SizeError};
pub use history::{Action, History};
pub use random::{rng_from_seed, RandomSource};
pub use search::{number_matches, Matches, Selection};
pub use tiering::{
    chunk, repair, seed, RepairDecision, RepairNotice, TierOutcome, TierPlan, TieringProvenance,
};
