//! Configuration management for protectcard.
//!
//! Configuration is layered with figment: built-in defaults, an optional
//! TOML file, `PROTECTCARD_`-prefixed environment variables and finally the
//! bare `PORT` variable, which selects the server's listening port.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "protectcard";

/// Default preference database file name.
const PREFERENCES_FILE_NAME: &str = "preferences.db";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default geolocation fix timeout.
pub const DEFAULT_GEOLOCATION_TIMEOUT_SECS: u64 = 10;

/// Application configuration.
///
/// Loaded from (highest precedence first):
/// 1. `PORT` (server port only)
/// 2. Environment variables prefixed with `PROTECTCARD_` (`__` separates sections)
/// 3. TOML config file at `~/.config/protectcard/config.toml`
/// 4. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content server configuration.
    pub server: ServerConfig,
    /// Client session configuration.
    pub client: ClientConfig,
}

/// Content server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory of static assets; must contain `index.html`.
    pub public_dir: PathBuf,
    /// The scenarios JSON document served at `/api/scenarios`.
    pub content_path: PathBuf,
}

/// Client session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of a running content server. When unset the client reads
    /// `server.content_path` directly.
    pub content_url: Option<String>,
    /// Path to the preference database.
    /// Defaults to `~/.local/share/protectcard/preferences.db`
    pub preferences_path: Option<PathBuf>,
    /// Seconds to wait for a location fix before giving up.
    pub geolocation_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            public_dir: PathBuf::from("public"),
            content_path: PathBuf::from("content").join("scenarios.json"),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_url: None,
            preferences_path: None,
            geolocation_timeout_secs: DEFAULT_GEOLOCATION_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::from_figment(Self::figment(config_file))
    }

    /// Build the layered figment for the given config file.
    #[must_use]
    pub fn figment(config_file: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed("PROTECTCARD_").split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
    }

    /// Extract and validate a configuration from a prepared figment.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or validation fails.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::ConfigValidation {
                message: "server.port must be greater than 0".to_string(),
            });
        }

        if self.client.geolocation_timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "client.geolocation_timeout_secs must be greater than 0".to_string(),
            });
        }

        if let Some(url) = &self.client.content_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::ConfigValidation {
                    message: format!("client.content_url must be an http(s) URL: {url}"),
                });
            }
        }

        Ok(())
    }

    /// Socket address the content server binds.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.host` is not a valid IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|_| Error::ConfigValidation {
                message: format!("invalid server.host: {}", self.server.host),
            })
    }

    /// Path of the SPA shell served for unknown routes.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.server.public_dir.join("index.html")
    }

    /// Get the preference database path, resolving defaults if not set.
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.client
            .preferences_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(PREFERENCES_FILE_NAME))
    }

    /// Get the geolocation timeout as a Duration.
    #[must_use]
    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.client.geolocation_timeout_secs)
    }
}
