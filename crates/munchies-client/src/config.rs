//! # Client Configuration
//!
//! Where the backend lives and where session carts are kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MUNCHIES_BACKEND_URL=https://api.munchies.example/                 │
//! │     MUNCHIES_SESSION_ID=3f2c9a…                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/munchies/client.toml (Linux)                             │
//! │     ~/Library/Application Support/com.munchies.client/client.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     local backend, the shared "default" session                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [backend]
//! url = "http://127.0.0.1:4943/"
//! request_timeout_secs = 30
//! max_retries = 3
//!
//! [session]
//! id = "3f2c9a1e-0c55-4d7a-9a43-5f1f5b3c2e10"
//! storage_dir = "/tmp/munchies-sessions"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Backend Settings
// =============================================================================

/// How to reach the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the RPC endpoint.
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Bearer token identifying the caller. Anonymous when unset.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Extra attempts for failed reads. Mutations are never retried.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff duration (milliseconds) between read attempts.
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff duration (seconds) between read attempts.
    #[serde(default = "default_max_backoff")]
    pub max_backoff_secs: u64,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:4943/".to_string()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_max_retries() -> u32 {
    3
}
fn default_initial_backoff() -> u64 {
    250
}
fn default_max_backoff() -> u64 {
    5
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            url: default_backend_url(),
            api_token: None,
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_secs: default_max_backoff(),
        }
    }
}

impl BackendSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }
}

// =============================================================================
// Session Settings
// =============================================================================

/// Which browsing session the cart belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Session to resume. Front ends pick their own fallback when unset.
    #[serde(default)]
    pub id: Option<String>,

    /// Root directory of session storage. Platform cache dir when unset.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl ClientConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = self.backend_url()?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "Backend URL must start with http:// or https://, got: {}",
                self.backend.url
            )));
        }

        if self.backend.request_timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if let Some(id) = &self.session.id {
            if id.trim().is_empty() {
                return Err(ClientError::InvalidConfig("session id must not be empty".into()));
            }
        }

        Ok(())
    }

    /// Parsed backend base URL, always ending in `/` so endpoints join under it.
    pub fn backend_url(&self) -> ClientResult<Url> {
        let mut url = Url::parse(&self.backend.url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MUNCHIES_BACKEND_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend.url = url;
        }

        if let Ok(token) = std::env::var("MUNCHIES_API_TOKEN") {
            self.backend.api_token = Some(token);
        }

        if let Ok(timeout) = std::env::var("MUNCHIES_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.backend.request_timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid MUNCHIES_TIMEOUT_SECS"),
            }
        }

        if let Ok(id) = std::env::var("MUNCHIES_SESSION_ID") {
            debug!(session_id = %id, "Overriding session id from environment");
            self.session.id = Some(id);
        }

        if let Ok(dir) = std::env::var("MUNCHIES_STORAGE_DIR") {
            self.session.storage_dir = Some(PathBuf::from(dir));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "munchies", "client")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.backend.max_retries, 3);
        assert!(config.session.id.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.backend.url = "ws://localhost:8080".into();
        assert!(config.validate().unwrap_err().is_config_error());

        config.backend.url = "not a url".into();
        assert!(config.validate().is_err());

        config.backend.url = "https://api.example.com".into();
        config.backend.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.backend.request_timeout_secs = 5;
        config.session.id = Some("  ".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_url_gets_trailing_slash() {
        let mut config = ClientConfig::default();
        config.backend.url = "https://api.example.com/v1".into();

        let url = config.backend_url().unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
        assert_eq!(
            url.join("rpc/getAllItems").unwrap().as_str(),
            "https://api.example.com/v1/rpc/getAllItems"
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ClientConfig::default();
        config.session.id = Some("session-42".into());

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[backend]"));
        assert!(toml_str.contains("[session]"));

        let parsed: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.session.id.as_deref(), Some("session-42"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: ClientConfig = toml::from_str("[backend]\nmax_retries = 0\n").unwrap();
        assert_eq!(parsed.backend.max_retries, 0);
        assert_eq!(parsed.backend.request_timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir()
            .join(format!("munchies-config-{}", std::process::id()))
            .join("client.toml");

        let mut config = ClientConfig::default();
        config.backend.max_retries = 7;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: ClientConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.backend.max_retries, 7);

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
