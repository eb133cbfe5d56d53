//! Registry loading from TOML
//!
//! ```toml
//! [[courses]]
//! rank = 1
//! name = "Rainbow Road"
//! coord = { row = 3, col = 4, pos = 4 }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Course, CourseList};
use crate::infrastructure::traits::FileSystem;

/// Mario Kart 8 Deluxe courses, used while no registry file exists.
pub const BUNDLED_REGISTRY: &str = include_str!("../../data/mk8d.toml");

const BUNDLED_NAME: &str = "<bundled mk8d>";

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    courses: Vec<Course>,
}

/// Reads the full course registry.
pub struct RegistryLoader {
    fs: Arc<dyn FileSystem>,
}

impl RegistryLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and validate the registry at `path`, sorted by rank.
    ///
    /// Falls back to [`BUNDLED_REGISTRY`] when `path` does not exist.
    ///
    /// # Errors
    /// - The file cannot be read.
    /// - The content is not valid registry TOML.
    /// - Two courses share a rank.
    pub fn load(&self, path: &Path) -> ApplicationResult<CourseList> {
        if !self.fs.exists(path) {
            info!("no registry at {}, using bundled courses", path.display());
            return Self::bundled();
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read registry", path)?;
        let registry = Self::parse(&content, path)?;
        debug!("load: {} courses from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// The registry compiled into the binary.
    pub fn bundled() -> ApplicationResult<CourseList> {
        Self::parse(BUNDLED_REGISTRY, Path::new(BUNDLED_NAME))
    }

    /// Parse registry TOML; `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> ApplicationResult<CourseList> {
        let file: RegistryFile = toml::from_str(content).map_err(|e| ApplicationError::Registry {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut registry =
            CourseList::from_courses(file.courses).map_err(|e| ApplicationError::Registry {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        registry.sort();
        Ok(registry)
    }
}
