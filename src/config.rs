//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/yelist/yelist.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `YELIST_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Unified configuration for yelist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Yelp categories JSON export (default: ./categories.json)
    pub catalog: PathBuf,
    /// Maximum number of planned activities
    pub max_activities: usize,
    /// Input that moves one level up while picking a category
    pub back_keyword: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("categories.json"),
            max_activities: 10,
            back_keyword: "BACK".into(),
        }
    }
}

/// Raw settings for intermediate parsing (None = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog: Option<PathBuf>,
    pub max_activities: Option<usize>,
    pub back_keyword: Option<String>,
}

/// Get the XDG config directory for yelist.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "yelist").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("yelist.toml"))
}

/// Expand environment variables and `~` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
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

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog: overlay
                .catalog
                .clone()
                .unwrap_or_else(|| self.catalog.clone()),
            max_activities: overlay.max_activities.unwrap_or(self.max_activities),
            back_keyword: overlay
                .back_keyword
                .clone()
                .unwrap_or_else(|| self.back_keyword.clone()),
        }
    }

    /// Expand shell variables and tilde in the catalog path.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.catalog.to_string_lossy().as_ref());
        self.catalog = PathBuf::from(expanded);
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_activities == 0 {
            return Err(ApplicationError::Config {
                message: "max_activities must be at least 1".into(),
            });
        }
        if self.back_keyword.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "back_keyword must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), explicit)
    }

    /// Same as [`Settings::load`] with the global config path supplied by the caller.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            debug!("global config: {}", global_path.display());
            current = current.merge_with(&load_raw_settings(global_path)?);
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply YELIST_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("YELIST").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog") {
            settings.catalog = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("max_activities") {
            settings.max_activities = val.parse().map_err(|_| ApplicationError::Config {
                message: format!("YELIST_MAX_ACTIVITIES is not a number: {}", val),
            })?;
        }
        if let Ok(val) = config.get_string("back_keyword") {
            settings.back_keyword = val;
        }

        Ok(settings)
    }

    /// Replace the catalog with a command-line path, expanded like config values.
    pub fn with_catalog(mut self, catalog: &Path) -> Self {
        self.catalog = catalog.to_path_buf();
        self.expand_paths();
        self
    }

    /// Render as TOML for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_ten_activities_and_back() {
        let settings = Settings::default();

        assert_eq!(settings.max_activities, 10);
        assert_eq!(settings.back_keyword, "BACK");
        assert_eq!(settings.catalog, PathBuf::from("categories.json"));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified() {
        let overlay = RawSettings {
            max_activities: Some(3),
            ..Default::default()
        };

        let merged = Settings::default().merge_with(&overlay);

        assert_eq!(merged.max_activities, 3);
        assert_eq!(merged.back_keyword, "BACK");
    }

    #[test]
    fn given_tilde_catalog_override_when_applying_then_expanded() {
        let settings = Settings::default().with_catalog(Path::new("~/yelp/categories.json"));

        assert!(!settings.catalog.to_string_lossy().starts_with('~'));
        assert!(settings.catalog.ends_with("yelp/categories.json"));
    }

    #[test]
    fn given_zero_capacity_when_validating_then_errors() {
        let settings = Settings {
            max_activities: 0,
            ..Default::default()
        };

        assert!(settings.validate().is_err());
    }
}
