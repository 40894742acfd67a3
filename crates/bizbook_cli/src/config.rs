//! CLI configuration (`bizbook.toml`).
//!
//! # Responsibility
//! - Locate and parse the optional config file.
//! - Resolve data/log locations with platform defaults.
//!
//! # Invariants
//! - A missing config file is not an error unless passed explicitly.
//! - Resolved `log_dir` is always absolute (required by `init_logging`).

use bizbook_core::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "bizbook";
const CONFIG_FILE_NAME: &str = "bizbook.toml";
const DATA_FILE_NAME: &str = "bizbook.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Settings read from `bizbook.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// SQLite file holding the document slots.
    #[serde(default)]
    pub data_path: Option<PathBuf>,
    /// One of `trace|debug|info|warn|error`.
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    /// The platform reports no per-user data directory.
    NoDataDir,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::NoDataDir => write!(f, "no user data directory; set data_path and log_dir"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::NoDataDir => None,
        }
    }
}

impl CliConfig {
    /// First existing config file: `<config_dir>/bizbook/bizbook.toml`, then
    /// `./bizbook.toml`.
    pub fn find_config_path() -> Option<PathBuf> {
        let candidates = [
            dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME)),
            Some(PathBuf::from(CONFIG_FILE_NAME)),
        ];
        candidates
            .into_iter()
            .flatten()
            .find(|candidate| candidate.is_file())
    }

    /// Loads `explicit` when given, otherwise the first discovered file,
    /// otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit
            .map(Path::to_path_buf)
            .or_else(Self::find_config_path)
        {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn resolved_data_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_path {
            Some(path) => Ok(path.clone()),
            None => Ok(app_data_dir()?.join(DATA_FILE_NAME)),
        }
    }

    pub fn resolved_log_dir(&self) -> Result<PathBuf, ConfigError> {
        let dir = match &self.log_dir {
            Some(dir) => dir.clone(),
            None => app_data_dir()?.join(LOG_DIR_NAME),
        };
        if dir.is_absolute() {
            return Ok(dir);
        }
        let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(cwd.join(dir))
    }

    pub fn resolved_log_level(&self) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string())
    }
}

fn app_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(ConfigError::NoDataDir)
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, ConfigError};
    use std::path::PathBuf;

    #[test]
    fn parses_all_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bizbook.toml");
        std::fs::write(
            &path,
            "data_path = \"/srv/bizbook/data.sqlite3\"\nlog_level = \"warn\"\nlog_dir = \"/var/log/bizbook\"\n",
        )
        .unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(
            config.resolved_data_path().unwrap(),
            PathBuf::from("/srv/bizbook/data.sqlite3")
        );
        assert_eq!(config.resolved_log_level(), "warn");
        assert_eq!(
            config.resolved_log_dir().unwrap(),
            PathBuf::from("/var/log/bizbook")
        );
    }

    #[test]
    fn empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bizbook.toml");
        std::fs::write(&path, "").unwrap();

        let config = CliConfig::load_from_path(&path).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(
            config.resolved_log_level(),
            bizbook_core::default_log_level()
        );
    }

    #[test]
    fn relative_log_dir_is_made_absolute() {
        let config = CliConfig {
            log_dir: Some(PathBuf::from("logs")),
            ..CliConfig::default()
        };
        let resolved = config.resolved_log_dir().unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("logs"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bizbook.toml");
        std::fs::write(&path, "theme = \"dark\"\n").unwrap();

        let err = CliConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
