use crate::error::CatalogError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Public sample catalog used when nothing else is configured.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/cederdorff/race/refs/heads/master/data/movies.json";

/// Persistent settings, read from `config.json` in the platform config dir.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog URL or local file path.
    pub source: String,
    /// Where log output goes; the terminal belongs to the TUI.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "movie-explorer", "movie-explorer")
}

impl Config {
    /// Default location of the config file, if a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load from `path`, or from [`Config::default_path`] when `None`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)?;
        serde_json::from_str(&text)
            .map_err(|e| CatalogError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Configured log file, falling back to the platform cache dir.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            project_dirs().map(|dirs| dirs.cache_dir().join("movie-explorer.log"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.log_level, "info");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "source": "./movies.json" }}"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.source, "./movies.json");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "source = nope").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn test_explicit_log_file_wins() {
        let config = Config {
            log_file: Some(PathBuf::from("/tmp/custom.log")),
            ..Config::default()
        };
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/custom.log")));
    }
}
