//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::debug;

use crate::application::services::{SearchService, SnapshotService, TierService};
use crate::application::Session;
use crate::config::Settings;
use crate::domain::rng_from_seed;
use crate::infrastructure::registry::RegistryLoader;
use crate::infrastructure::snapshot::TomlSnapshotStore;
use crate::infrastructure::traits::{
    FileSystem, NameSearch, Prompt, RealFileSystem, Searcher, SnapshotStore, StdinPrompt,
};
use crate::infrastructure::InfraResult;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Terminal interaction
    pub prompt: Arc<dyn Prompt>,

    pub registry: RegistryLoader,
    pub search: SearchService,
    pub tier: TierService,
    pub snapshot: SnapshotService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let store = Arc::new(TomlSnapshotStore::new(
            fs.clone(),
            settings.snapshot_path.clone(),
        ));
        Self::with_deps(
            settings,
            fs,
            Arc::new(StdinPrompt),
            Arc::new(NameSearch),
            store,
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        prompt: Arc<dyn Prompt>,
        searcher: Arc<dyn Searcher>,
        store: Arc<dyn SnapshotStore>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            registry: RegistryLoader::new(fs.clone()),
            search: SearchService::new(searcher, prompt.clone()),
            tier: TierService::new(prompt.clone()),
            snapshot: SnapshotService::new(store),
            settings,
            fs,
            prompt,
        }
    }

    /// Load the registry and reconcile the persisted active list against it.
    pub fn open_session(&self) -> InfraResult<Session> {
        let registry = self.registry.load(&self.settings.registry_path)?;
        let active = self.snapshot.load_active(&registry);
        debug!(
            "open_session: registry={} active={}",
            registry.len(),
            active.len()
        );
        Ok(Session::new(registry, active))
    }

    /// Persist the session's active list and clear its dirty flag.
    pub fn save_session(&self, session: &mut Session) -> InfraResult<()> {
        self.snapshot.save(session.active())?;
        session.mark_saved();
        Ok(())
    }

    /// Random source: configured seed, otherwise OS entropy.
    pub fn rng(&self) -> StdRng {
        rng_from_seed(self.settings.seed)
    }
}
