//! TOML-backed snapshot store

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Course, Rank};
use crate::infrastructure::traits::{FileSystem, SnapshotStore};

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    /// RFC 3339 time of the last save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
    ranks: Vec<Rank>,
}

/// Stores the active list's ranks in a TOML file.
pub struct TomlSnapshotStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl TomlSnapshotStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }
}

/// Names of the saves in `dir` (`*.toml` file stems), sorted.
///
/// A missing directory has no saves.
pub fn list_saves(fs: &dyn FileSystem, dir: &Path) -> io::Result<Vec<String>> {
    if !fs.exists(dir) {
        return Ok(Vec::new());
    }
    let mut names: Vec<String> = fs
        .read_dir(dir)?
        .into_iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    Ok(names)
}

impl SnapshotStore for TomlSnapshotStore {
    fn load(&self) -> io::Result<Option<Vec<Rank>>> {
        if !self.fs.exists(&self.path) {
            return Ok(None);
        }
        let content = self.fs.read_to_string(&self.path)?;
        let file: SnapshotFile = toml::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        debug!(
            "load: {} ranks from {} (saved_at={:?})",
            file.ranks.len(),
            self.path.display(),
            file.saved_at
        );
        Ok(Some(file.ranks))
    }

    fn save(&self, courses: &[Course]) -> io::Result<()> {
        let file = SnapshotFile {
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            ranks: courses.iter().map(|c| c.rank).collect(),
        };
        let content = toml::to_string_pretty(&file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        self.fs.ensure_parent(&self.path)?;
        self.fs.write(&self.path, &content)
    }
}
