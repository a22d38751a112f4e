use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::debug;

use errscope_logs::{ERROR_TYPES, Paginator, timestamp::resolve_time_zone};

/// Settings read from `config.toml`; every key is optional
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Log file opened when no path is given on the command line
    pub log_path: Option<PathBuf>,

    pub per_page: usize,

    /// IANA zone for reading `YYYY-MM-DD` filter dates
    pub timezone: String,

    /// Severity values offered by the type filter
    pub error_types: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: None,
            per_page: Paginator::DEFAULT_PER_PAGE,
            timezone: "UTC".to_string(),
            error_types: ERROR_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Config {
    /// Default location: `<config_dir>/errscope/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("errscope").join("config.toml"))
    }

    /// Load configuration
    ///
    /// An explicit path must exist and parse. The default location is
    /// optional: when it is absent the defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the configured time zone
    pub fn time_zone(&self) -> Result<Tz> {
        Ok(resolve_time_zone(&self.timezone)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("per_page = 20\ntimezone = \"Asia/Jakarta\"\n").unwrap();
        assert_eq!(config.per_page, 20);
        assert_eq!(config.timezone, "Asia/Jakarta");
        assert_eq!(config.error_types.len(), ERROR_TYPES.len());
        assert!(config.log_path.is_none());
        assert_eq!(config.time_zone().unwrap(), chrono_tz::Asia::Jakarta);
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r#"
            log_path = "/var/log/php/error_log"
            per_page = 10
            timezone = "UTC"
            error_types = ["Warning", "Notice"]
            "#,
        )
        .unwrap();
        assert_eq!(config.log_path, Some(PathBuf::from("/var/log/php/error_log")));
        assert_eq!(config.error_types, vec!["Warning", "Notice"]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(Config::from_toml("per_page = \"many\"").is_err());
        assert!(Config::from_toml("colour = true").is_err());
    }

    #[test]
    fn test_bad_time_zone() {
        let config = Config {
            timezone: "Mars/Olympus".to_string(),
            ..Config::default()
        };
        assert!(config.time_zone().is_err());
    }

    #[test]
    fn test_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "per_page = 5").unwrap();
        assert_eq!(Config::load(Some(file.path())).unwrap().per_page, 5);

        let dir = tempfile::TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
