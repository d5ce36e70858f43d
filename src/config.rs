//! Configuration loaded from `usergraph.toml`.
//!
//! Every key is optional; missing sections fall back to defaults.

use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, UserGraphError};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "usergraph.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub graphql: GraphQLConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, e.g. `127.0.0.1:4000`
    pub bind: String,
    /// Path the GraphQL endpoint is mounted on
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:4000".to_string(),
            path: "/graphql".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Snapshot file. `None` keeps the store in memory only.
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphQLConfig {
    pub depth_limit: usize,
    pub complexity_limit: usize,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            depth_limit: 10,
            complexity_limit: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `usergraph.toml` in the
    /// working directory is used if present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            UserGraphError::ConfigError(format!("{}: {}", path.display(), e))
        })?;
        let config = Self::parse(&text)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| UserGraphError::ConfigError(e.to_string()))?;
        config.bind_addr()?;
        if !config.server.path.starts_with('/') {
            return Err(UserGraphError::ConfigError(format!(
                "server.path must start with '/': {}",
                config.server.path
            )));
        }
        Ok(config)
    }

    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|e| {
            UserGraphError::ConfigError(format!("invalid bind address {:?}: {}", self.server.bind, e))
        })
    }
}
