//! Server configuration
//!
//! Defaults, optionally overridden by a YAML file. The binaries layer their
//! command-line flags and environment variables on top.
//!
//! ```yaml
//! bind: 0.0.0.0:8080
//! candidates_path: /srv/recruit/candidates.json
//! assets_dir: /srv/recruit/assets
//! apify:
//!   actor_id: someone~lead-scraper
//!   timeout_secs: 120
//! ```

use crate::error::{Error, Result};
use crate::scraper::ApifyConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default HTTP listen address
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Recruit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the HTTP transport listens on
    pub bind: SocketAddr,
    /// JSON file with the existing candidate pipeline
    pub candidates_path: PathBuf,
    /// Directory of `*.html` widget templates
    pub assets_dir: PathBuf,
    /// Lead scraper settings
    pub apify: ApifyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: ([127, 0, 0, 1], 3000).into(),
            candidates_path: PathBuf::from("data").join("candidates.json"),
            assets_dir: PathBuf::from("assets"),
            apify: ApifyConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file. Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&raw)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a listen address given on the command line
    pub fn parse_bind(addr: &str) -> Result<SocketAddr> {
        addr.parse()
            .map_err(|e| Error::ConfigError(format!("Invalid bind address '{}': {}", addr, e)))
    }

    /// Reject settings that would only fail later at request time
    pub fn validate(&self) -> Result<()> {
        if self.apify.actor_id.trim().is_empty() {
            return Err(Error::ConfigError("apify.actor_id must not be empty".to_string()));
        }
        if self.apify.timeout_secs == 0 {
            return Err(Error::ConfigError(
                "apify.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.candidates_path, PathBuf::from("data/candidates.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("bind: 0.0.0.0:8080\napify:\n  timeout_secs: 60\n").unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.apify.timeout_secs, 60);
        assert_eq!(config.apify.actor_id, crate::scraper::DEFAULT_ACTOR_ID);
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_yaml("port: 80\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_yaml("apify:\n  timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        let err = Config::parse_bind("localhost").unwrap_err();
        assert!(err.to_string().contains("Invalid bind address"));
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recruit.yaml");
        std::fs::write(&path, "assets_dir: /srv/assets\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("/srv/assets"));

        let err = Config::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
