//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::Result;

/// Pages shown before the user submits anything.
pub const DEFAULT_SEED_URLS: [&str; 2] = ["https://prayash.io", "https://apple.com"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// URLs the page list starts with
    pub seed_urls: Vec<String>,
    /// Filter used by `init_logging` when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("bowser.db"),
            seed_urls: DEFAULT_SEED_URLS.iter().map(|u| u.to_string()).collect(),
            log_filter: "info".to_string(),
        }
    }

    /// Per-user local data directory, `.bowser` when the platform has none.
    pub fn data_dir() -> PathBuf {
        directories::ProjectDirs::from("io", "prayash", "Bowser")
            .map(|d| d.data_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".bowser"))
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;

        if config.database_path.as_os_str().is_empty() {
            return Err(CoreError::Config(format!(
                "{}: database_path cannot be empty",
                path.display()
            )));
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_places_database_in_data_dir() {
        let config = Config::new(PathBuf::from("/tmp/bowser-data"));
        assert_eq!(
            config.database_path,
            PathBuf::from("/tmp/bowser-data/bowser.db")
        );
        assert_eq!(config.seed_urls.len(), 2);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_default_uses_data_dir() {
        let config = Config::default();
        assert_eq!(
            config.database_path,
            Config::data_dir().join("bowser.db")
        );
        assert!(config.database_path.ends_with("bowser.db"));
    }

    #[test]
    fn test_data_dir_is_project_scoped() {
        let dir = Config::data_dir();
        let expected = directories::ProjectDirs::from("io", "prayash", "Bowser")
            .map(|d| d.data_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".bowser"));
        assert_eq!(dir, expected);
        assert!(dir
            .components()
            .any(|c| c.as_os_str().to_string_lossy().to_lowercase().contains("bowser")));
    }

    #[test]
    fn test_load_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "database_path": "/var/lib/bowser/pages.db", "seed_urls": [] }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/var/lib/bowser/pages.db"));
        assert!(config.seed_urls.is_empty());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_load_rejects_empty_database_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "database_path": "" }"#).unwrap();

        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::load(&path), Err(CoreError::Serialization(_))));
    }
}
