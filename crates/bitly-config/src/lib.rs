//! Configuration for bitly-api consumers.
//!
//! Layers defaults, an optional TOML file, a `.env` file and `BITLY_*`
//! environment variables, then resolves the access token and builds a
//! ready-to-use [`BitlyClient`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use bitly_api::{BitlyClient, DEFAULT_BASE_URL, TransportConfig};

/// Prefix for environment overrides (`BITLY_TOKEN`, `BITLY_GROUP_GUID`, ...).
pub const ENV_PREFIX: &str = "BITLY_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no access token configured (set BITLY_TOKEN or `token` in {path})")]
    NoCredentials { path: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error(transparent)]
    Client(#[from] bitly_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

#[derive(Clone, Deserialize, Serialize)]
pub struct Config {
    /// Generic access token (40 hex characters). Prefer the env var.
    #[serde(default)]
    pub token: Option<String>,

    /// API root.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub organization_guid: Option<String>,

    /// Group new links are created in when the caller does not pick one.
    #[serde(default)]
    pub group_guid: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_api_url(),
            timeout: default_timeout(),
            organization_guid: None,
            group_guid: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("organization_guid", &self.organization_guid)
            .field("group_guid", &self.group_guid)
            .finish()
    }
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "bitly", "bitly-api").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("bitly-api");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load `.env` into the process environment, then the full Config from
/// the canonical file path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_dotenv();
    load_config_from(&config_path())
}

/// Load Config from an explicit TOML path + environment.
///
/// A missing file is not an error; defaults and env still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), ?config, "configuration loaded");
    Ok(config)
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "ignoring unreadable .env file"),
    }
}

// ── Token resolution & client construction ──────────────────────────

/// Check that a token looks like a Bitly generic access token.
pub fn validate_token(token: &str) -> Result<(), ConfigError> {
    let well_formed =
        token.len() == 40 && token.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    if well_formed {
        Ok(())
    } else {
        Err(ConfigError::Validation {
            field: "token".into(),
            reason: format!(
                "expected 40 lowercase hex characters, got {} characters",
                token.len()
            ),
        })
    }
}

impl Config {
    /// The configured token, validated and wrapped as a secret.
    pub fn resolve_token(&self) -> Result<SecretString, ConfigError> {
        let token = self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::NoCredentials {
                path: config_path().display().to_string(),
            })?;
        validate_token(token)?;
        Ok(SecretString::from(token.to_owned()))
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout(Duration::from_secs(self.timeout))
    }

    /// Open a client session from this configuration.
    pub fn build_client(&self) -> Result<BitlyClient, ConfigError> {
        let token = self.resolve_token()?;
        let client = BitlyClient::with_base_url(&self.api_url, &token, &self.transport())?;
        Ok(client)
    }
}
