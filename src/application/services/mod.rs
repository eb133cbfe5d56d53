//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (Prompt, Searcher, SnapshotStore)
//! but are themselves concrete structs, not traits.

mod search;
mod snapshot;
mod tier;

pub use search::SearchService;
pub use snapshot::SnapshotService;
pub use tier::TierService;
