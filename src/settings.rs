//! Environment-driven configuration

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Name of the variable holding the Gemini API key
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Runtime configuration, read once at startup
#[derive(Debug)]
pub struct Settings {
    /// Gemini API key
    pub api_key: SecretString,
    /// Address to bind the HTTP server to
    pub host: IpAddr,
    /// Port to bind the HTTP server to
    pub port: u16,
    /// Directory holding the built frontend
    pub static_dir: PathBuf,
}

/// Errors from reading the environment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The API key is absent or empty
    #[error(
        "GOOGLE_API_KEY environment variable not set. \
         Please set it in your .env file or environment."
    )]
    MissingApiKey,

    /// HOST did not parse as an IP address
    #[error("HOST must be a valid IP address, got: {0}")]
    InvalidHost(String),

    /// PORT did not parse as a port number
    #[error("PORT must be a valid port number, got: {0}")]
    InvalidPort(String),
}

impl Settings {
    /// Read configuration from the process environment
    ///
    /// `HOST`, `PORT` and `STATIC_DIR` fall back to defaults when unset;
    /// the API key is required. An empty key counts as unset.
    pub fn from_env() -> Result<Self, SettingsError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .map(SecretString::from)
            .ok_or(SettingsError::MissingApiKey)?;

        let host = match std::env::var("HOST") {
            Ok(val) => val
                .parse()
                .map_err(|_| SettingsError::InvalidHost(val.clone()))?,
            Err(_) => IpAddr::from([127, 0, 0, 1]),
        };

        let port = match std::env::var("PORT") {
            Ok(val) => val
                .parse()
                .map_err(|_| SettingsError::InvalidPort(val.clone()))?,
            Err(_) => 3030,
        };

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("build"));

        Ok(Self {
            api_key,
            host,
            port,
            static_dir,
        })
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
