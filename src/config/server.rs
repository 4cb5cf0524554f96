//! Server settings read from the environment.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

use crate::error::{EngineError, EngineResult};

/// Settings for the HTTP server binary.
///
/// Read from the environment; a `.env` file in the working directory is
/// loaded first if present.
///
/// | Variable      | Default     |
/// |---------------|-------------|
/// | `SERVER_HOST` | `127.0.0.1` |
/// | `SERVER_PORT` | `3000`      |
/// | `RULESET_DIR` | built-in IG Metall Hessen ruleset |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind to.
    pub server_host: String,
    /// Port to bind to.
    pub server_port: u16,
    /// Directory to load the ruleset from, if not using the built-in one.
    pub ruleset_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Reads the settings from the process environment.
    pub fn from_env() -> EngineResult<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the settings through a lookup function.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = match lookup("SERVER_PORT") {
            Some(port) => port.parse().map_err(|_| EngineError::InvalidConfig {
                message: format!("SERVER_PORT '{}' must be a valid port number", port),
            })?,
            None => 3000,
        };

        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port,
            ruleset_dir: lookup("RULESET_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Returns the `host:port` address to bind to.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
