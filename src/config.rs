//! Config loading and persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::SpaceId;
use crate::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workspace to mirror. Required before any remote call.
    pub space_id: String,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Remote workspace API root, e.g. "https://workspace.example.com".
    pub base_url: String,
    /// File holding the bearer token; defaults to `token` next to the
    /// config file. Kept out of config.toml so the config stays shareable.
    pub token_file: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token_file: None,
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("space_id is not set; add it to {path} or set NF_SPACE_ID")]
    MissingSpaceId { path: PathBuf },

    #[error("api.base_url is not set; add it to {path} or set NF_BASE_URL")]
    MissingBaseUrl { path: PathBuf },

    #[error("no token: {path} is missing or empty (or set NF_TOKEN)")]
    MissingToken { path: PathBuf },
}

pub fn config_path() -> PathBuf {
    paths::config_dir().join("config.toml")
}

/// Load from an explicit path, or the default location. A missing default
/// config yields `Config::default()` (env overrides may still complete it);
/// a missing explicit path is an error.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (config_path(), false),
    };

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            let mut cfg = Config::default();
            apply_env_overrides(&mut cfg);
            return Ok(cfg);
        }
        Err(e) => return Err(ConfigError::Read { path, source: e }),
    };

    let mut cfg: Config =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("NF_SPACE_ID")
        && !v.trim().is_empty()
    {
        cfg.space_id = v;
    }
    if let Ok(v) = std::env::var("NF_BASE_URL")
        && !v.trim().is_empty()
    {
        cfg.api.base_url = v;
    }
    if let Ok(v) = std::env::var("NF_TOKEN_FILE")
        && !v.trim().is_empty()
    {
        cfg.api.token_file = Some(PathBuf::from(v));
    }
}

/// Write `cfg` if no config exists yet; returns the path either way.
pub fn init(cfg: &Config) -> Result<(PathBuf, bool), ConfigError> {
    let path = config_path();
    if path.exists() {
        return Ok((path, false));
    }
    write_config(&path, cfg)?;
    Ok((path, true))
}

pub fn write_config(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    let write_err = |source: io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .ok_or_else(|| write_err(io::Error::other("config path has no parent directory")))?;
    fs::create_dir_all(dir).map_err(write_err)?;

    let contents = toml::to_string_pretty(cfg).map_err(|e| write_err(io::Error::other(e)))?;
    let temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    fs::write(temp.path(), contents).map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// The validated workspace id, or the fatal setup error.
pub fn space_id(cfg: &Config) -> Result<SpaceId, ConfigError> {
    if cfg.space_id.trim().is_empty() {
        return Err(ConfigError::MissingSpaceId {
            path: config_path(),
        });
    }
    Ok(SpaceId::new(cfg.space_id.trim()))
}

/// The validated API root, or the fatal setup error.
pub fn base_url(cfg: &Config) -> Result<&str, ConfigError> {
    let url = cfg.api.base_url.trim();
    if url.is_empty() {
        return Err(ConfigError::MissingBaseUrl {
            path: config_path(),
        });
    }
    Ok(url)
}

/// Resolve the bearer token: `NF_TOKEN` wins, then the token file.
pub fn token(cfg: &Config) -> Result<String, ConfigError> {
    if let Ok(v) = std::env::var("NF_TOKEN")
        && !v.trim().is_empty()
    {
        return Ok(v.trim().to_string());
    }

    let path = cfg
        .api
        .token_file
        .clone()
        .unwrap_or_else(|| paths::config_dir().join("token"));
    let contents = fs::read_to_string(&path)
        .map_err(|_| ConfigError::MissingToken { path: path.clone() })?;
    let token = contents.trim();
    if token.is_empty() {
        return Err(ConfigError::MissingToken { path });
    }
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let cfg = Config {
            space_id: "space-1".to_string(),
            api: ApiConfig {
                base_url: "https://workspace.example.com".to_string(),
                token_file: Some(PathBuf::from("/secrets/token")),
                timeout_secs: 30,
            },
            logging: LoggingConfig {
                format: LogFormat::Json,
            },
        };

        write_config(&path, &cfg).expect("write");
        let loaded: Config =
            toml::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");

        assert_eq!(loaded.space_id, "space-1");
        assert_eq!(loaded.api.base_url, "https://workspace.example.com");
        assert_eq!(loaded.api.timeout_secs, 30);
        assert_eq!(loaded.logging.format, LogFormat::Json);
    }

    #[test]
    fn defaults_need_no_fields() {
        let cfg: Config = toml::from_str("").expect("parse empty");
        assert!(cfg.space_id.is_empty());
        assert_eq!(cfg.api.timeout_secs, 15);
        assert_eq!(cfg.logging.format, LogFormat::Compact);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn space_id_requires_content() {
        let mut cfg = Config::default();
        assert!(matches!(
            space_id(&cfg),
            Err(ConfigError::MissingSpaceId { .. })
        ));

        cfg.space_id = "space-9".to_string();
        assert_eq!(space_id(&cfg).expect("space id").as_str(), "space-9");
    }

    #[test]
    fn token_read_from_file_is_trimmed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let token_path = dir.path().join("token");
        fs::write(&token_path, "  secret-token\n").expect("write token");

        let cfg = Config {
            api: ApiConfig {
                token_file: Some(token_path),
                ..ApiConfig::default()
            },
            ..Config::default()
        };
        assert_eq!(token(&cfg).expect("token"), "secret-token");
    }

    #[test]
    fn empty_token_file_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let token_path = dir.path().join("token");
        fs::write(&token_path, "\n").expect("write token");

        let cfg = Config {
            api: ApiConfig {
                token_file: Some(token_path),
                ..ApiConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            token(&cfg),
            Err(ConfigError::MissingToken { .. })
        ));
    }
}
