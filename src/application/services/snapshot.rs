//! Active list persistence
//!
//! Reconciles the persisted snapshot against the registry on startup. A
//! missing or unreadable snapshot is an expected first-run condition: the
//! store is re-initialised from the registry instead of failing.

use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::CourseList;
use crate::infrastructure::traits::SnapshotStore;

/// Service loading and saving the active list.
pub struct SnapshotService {
    store: Arc<dyn SnapshotStore>,
}

impl SnapshotService {
    /// Create a new snapshot service.
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Active list for `registry`, restored from the snapshot when possible.
    pub fn load_active(&self, registry: &CourseList) -> CourseList {
        match self.store.load() {
            Ok(Some(ranks)) => {
                let active = CourseList::reconcile(registry, &ranks);
                let unknown = ranks.iter().filter(|&&r| !registry.contains(r)).collect_vec();
                if !unknown.is_empty() {
                    warn!(
                        "snapshot: ignored rank(s) not in registry: {}",
                        unknown.iter().join(", ")
                    );
                }
                debug!("load_active: restored {} courses", active.len());
                active
            }
            Ok(None) => {
                info!("no snapshot found, starting from full registry");
                self.initialise(registry)
            }
            Err(e) => {
                warn!("snapshot unreadable ({e}), starting from full registry");
                self.initialise(registry)
            }
        }
    }

    /// Persist the active list.
    pub fn save(&self, active: &CourseList) -> ApplicationResult<()> {
        debug!("save: {} courses", active.len());
        self.store.save(active.courses()).with_context("save snapshot")
    }

    fn initialise(&self, registry: &CourseList) -> CourseList {
        let mut active = registry.clone();
        active.sort();
        if let Err(e) = self.store.save(active.courses()) {
            warn!("could not initialise snapshot: {e}");
        }
        active
    }
}
