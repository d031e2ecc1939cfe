//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use mediadash_api::tmdb::CategoryWindows;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// TMDB API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Browse tuning.
    #[serde(default)]
    pub browse: BrowseConfig,
    /// Per-category date window configuration.
    #[serde(default)]
    pub windows: CategoryWindows,
}

/// TMDB API configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Bearer access token. Falls back to `TMDB_ACCESS_TOKEN` when empty.
    #[serde(default)]
    pub access_token: String,
    /// Response language for search queries.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            language: default_language(),
        }
    }
}

/// Browse and search tuning.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BrowseConfig {
    /// Popularity floor below which items are hidden.
    #[serde(default = "default_min_popularity")]
    pub min_popularity: f64,
    /// Minimum grid density one aggregation run backfills toward.
    #[serde(default = "default_min_results")]
    pub min_results: usize,
    /// Maximum backfill fetches beyond the first page of a run.
    #[serde(default = "default_max_page_advance")]
    pub max_page_advance: u32,
    /// Maximum suggestion rows shown in the search dropdown.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    /// Quiet period before a suggestion request fires, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            min_popularity: default_min_popularity(),
            min_results: default_min_results(),
            max_page_advance: default_max_page_advance(),
            suggestion_limit: default_suggestion_limit(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Default response language.
fn default_language() -> String {
    String::from("en")
}

/// Default popularity floor.
const fn default_min_popularity() -> f64 {
    1.0
}

/// Default minimum grid density.
const fn default_min_results() -> usize {
    12
}

/// Default backfill fetch budget.
const fn default_max_page_advance() -> u32 {
    5
}

/// Default suggestion dropdown size.
const fn default_suggestion_limit() -> usize {
    5
}

/// Default debounce delay in milliseconds.
const fn default_debounce_ms() -> u64 {
    300
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.api.access_token.is_empty());
        assert_eq!(config.api.language, "en");
        assert!((config.browse.min_popularity - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.browse.min_results, 12);
        assert_eq!(config.browse.max_page_advance, 5);
        assert_eq!(config.browse.suggestion_limit, 5);
        assert_eq!(config.browse.debounce_ms, 300);
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let config = AppConfig {
            api: ApiConfig {
                access_token: String::from("token123"),
                language: String::from("en"),
            },
            browse: BrowseConfig {
                min_popularity: 2.5,
                min_results: 20,
                max_page_advance: 3,
                suggestion_limit: 8,
                debounce_ms: 150,
            },
            windows: CategoryWindows::default(),
        };

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let path = Path::new("/tmp/mediadash_test_nonexistent_config.toml");

        // Act
        let config = AppConfig::load(path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = AppConfig {
            api: ApiConfig {
                access_token: String::from("secret"),
                language: String::from("en"),
            },
            ..AppConfig::default()
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange: only one key present, everything else defaulted
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[browse]\nmin_results = 24\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.browse.min_results, 24);
        assert_eq!(config.browse.max_page_advance, 5);
        assert_eq!(config.api.language, "en");
    }

    #[test]
    fn test_load_empty_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }
}
