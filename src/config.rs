//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coursetier/coursetier.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `COURSETIER_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

const APP_NAME: &str = "coursetier";

/// Unified configuration for coursetier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Registry TOML file with every course
    pub registry_path: PathBuf,
    /// Snapshot of the active list
    pub snapshot_path: PathBuf,
    /// Directory holding named saves
    pub saves_dir: PathBuf,
    /// Named save; when set the snapshot is `<saves_dir>/<save>.toml`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save: Option<String>,
    /// Fixed seed for reproducible draws (default: OS entropy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub registry_path: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
    pub saves_dir: Option<PathBuf>,
    pub save: Option<String>,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = data_dir();
        Self {
            registry_path: data_dir.join("registry.toml"),
            snapshot_path: data_dir.join("active.toml"),
            saves_dir: data_dir.join("saves"),
            save: None,
            seed: None,
        }
    }
}

/// Get the default data directory.
pub fn data_dir() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(format!("~/.{APP_NAME}")))
}

/// Get the XDG config directory for coursetier.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(format!("{APP_NAME}.toml")))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            registry_path: overlay
                .registry_path
                .clone()
                .unwrap_or_else(|| self.registry_path.clone()),
            snapshot_path: overlay
                .snapshot_path
                .clone()
                .unwrap_or_else(|| self.snapshot_path.clone()),
            saves_dir: overlay
                .saves_dir
                .clone()
                .unwrap_or_else(|| self.saves_dir.clone()),
            save: overlay.save.clone().or_else(|| self.save.clone()),
            seed: overlay.seed.or(self.seed),
        }
    }

    /// Expand shell variables and tilde in path fields.
    fn expand_paths(&mut self) {
        self.registry_path = expand_path(&self.registry_path);
        self.snapshot_path = expand_path(&self.snapshot_path);
        self.saves_dir = expand_path(&self.saves_dir);
    }

    /// Point the snapshot at the named save under `saves_dir`.
    ///
    /// # Errors
    /// `Config` if the name is empty or is not a plain file stem.
    pub fn select_save(&mut self, name: &str) -> Result<(), ApplicationError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !name.starts_with('.');
        if !valid {
            return Err(ApplicationError::Config {
                message: format!("invalid save name '{name}': use letters, digits, '-', '_' or '.'"),
            });
        }
        self.snapshot_path = self.saves_dir.join(format!("{name}.toml"));
        self.save = Some(name.to_string());
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        if let Some(name) = current.save.clone() {
            current.select_save(&name)?;
        }
        Ok(current)
    }

    /// Apply COURSETIER_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("COURSETIER").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("registry_path") {
            settings.registry_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("snapshot_path") {
            settings.snapshot_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("saves_dir") {
            settings.saves_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("save") {
            settings.save = Some(val);
        }
        if let Ok(val) = config.get_string("seed") {
            let seed = val.trim().parse::<u64>().map_err(|e| ApplicationError::Config {
                message: format!("COURSETIER_SEED={val}: {e}"),
            })?;
            settings.seed = Some(seed);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# coursetier configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/coursetier/coursetier.toml
#   File:   --config <path>
#   Env:    COURSETIER_* environment variables
#   Flags:  --registry, --snapshot, --save, --seed

# Registry of all courses ([[courses]] rank/name/coord tables);
# the bundled Mario Kart 8 Deluxe registry is used while this file is missing
# registry_path = "~/.local/share/coursetier/registry.toml"

# Snapshot of the active list, rewritten on save
# snapshot_path = "~/.local/share/coursetier/active.toml"

# Directory of named saves, and the save to use (<saves_dir>/<save>.toml)
# saves_dir = "~/.local/share/coursetier/saves"
# save = "weekly"

# Fixed seed for reproducible draws
# seed = 42
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_files_share_data_dir() {
        let settings = Settings::default();
        assert_eq!(
            settings.registry_path.parent(),
            settings.snapshot_path.parent()
        );
        assert!(settings.registry_path.ends_with("registry.toml"));
        assert!(settings.seed.is_none());
    }

    #[test]
    fn given_overlay_when_merging_then_specified_fields_win() {
        let base = Settings {
            registry_path: PathBuf::from("/base/registry.toml"),
            snapshot_path: PathBuf::from("/base/active.toml"),
            seed: Some(1),
            ..Settings::default()
        };
        let overlay = RawSettings {
            registry_path: Some(PathBuf::from("/other/registry.toml")),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.registry_path, PathBuf::from("/other/registry.toml"));
        assert_eq!(merged.snapshot_path, PathBuf::from("/base/active.toml"));
        assert_eq!(merged.seed, Some(1));
    }

    #[test]
    fn given_tilde_in_path_when_expanding_then_uses_home() {
        let mut settings = Settings {
            registry_path: PathBuf::from("~/courses/registry.toml"),
            snapshot_path: PathBuf::from("$HOME/courses/active.toml"),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.registry_path.starts_with(&home));
        assert!(settings.snapshot_path.starts_with(&home));
    }

    #[test]
    fn given_settings_when_serializing_then_template_keys_match() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("registry_path"));
        assert!(toml.contains("snapshot_path"));
        assert!(Settings::template().contains("registry_path"));
    }

    #[test]
    fn given_save_name_when_selecting_then_snapshot_under_saves_dir() {
        let mut settings = Settings {
            saves_dir: PathBuf::from("/data/saves"),
            ..Settings::default()
        };

        settings.select_save("weekly").unwrap();

        assert_eq!(settings.snapshot_path, PathBuf::from("/data/saves/weekly.toml"));
        assert_eq!(settings.save.as_deref(), Some("weekly"));
    }

    #[test]
    fn given_path_like_save_name_when_selecting_then_config_error() {
        let mut settings = Settings::default();
        for name in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(
                    settings.select_save(name),
                    Err(ApplicationError::Config { .. })
                ),
                "{name:?} should be rejected"
            );
        }
        assert_eq!(settings, Settings::default());
    }
}
