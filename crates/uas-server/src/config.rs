//! Server configuration document
//!
//! A small JSON document; every field has a default so partial documents
//! load cleanly:
//!
//! ```json
//! {
//!   "server": { "port": "5060", "log_level": "info", "bind_addr": "0.0.0.0" },
//!   "registrar": { "sweep_interval_secs": 30 }
//! }
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::net::lookup_host;

use crate::error::ConfigError;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub registrar: RegistrarConfig,
}

/// Listen socket and logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: String,
    pub log_level: String,
    pub bind_addr: String,
}

/// Registration expiry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    /// How often expired bindings are purged; `0` disables the sweep
    pub sweep_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: "5060".to_string(),
            log_level: "info".to_string(),
            bind_addr: "0.0.0.0".to_string(),
        }
    }
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 30,
        }
    }
}

impl Config {
    /// Loads the configuration at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the configuration to `path` as indented JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ServerConfig {
    /// Resolves `bind_addr:port` to a socket address
    ///
    /// `bind_addr` may be an IP literal or a host name; the first resolved
    /// address is used.
    pub async fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let port: u16 = self
            .port
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(format!("bad port '{}'", self.port)))?;

        lookup_host((self.bind_addr.as_str(), port))
            .await
            .map_err(|e| {
                ConfigError::InvalidAddress(format!(
                    "cannot resolve bind address '{}': {}",
                    self.bind_addr, e
                ))
            })?
            .next()
            .ok_or_else(|| {
                ConfigError::InvalidAddress(format!(
                    "bind address '{}' resolved to nothing",
                    self.bind_addr
                ))
            })
    }
}

impl RegistrarConfig {
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}
