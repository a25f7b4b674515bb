//! Configuration management for the RAX FTP client
//!
//! Connection options for a session, and loading of a complete client
//! configuration from `config.toml` with environment overrides.

use config::{Config, Environment, File};
use serde::Deserialize;

/// Options for one session. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ConnectionOptions {
    /// Login name (default `anonymous`)
    pub user: String,

    /// Login password (default `anonymous`)
    pub pass: String,

    /// Control connection port (default 21)
    pub port: u16,

    /// Explicit TLS via `AUTH TLS` + `PROT P`
    pub secure: bool,

    /// Accept any server certificate in secure mode
    pub accept_invalid_certs: bool,

    // ═══ ACTIVE MODE (reserved, not implemented) ═══
    /// Reserved; active mode (PORT) is not supported.
    pub active_port: u16,
    /// Reserved; active mode (PORT) is not supported.
    pub active_ip: String,
    /// Reserved; active mode (PORT) is not supported.
    pub active_ipv6: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            user: "anonymous".to_string(),
            pass: "anonymous".to_string(),
            port: 21,
            secure: false,
            accept_invalid_certs: false,
            active_port: 20,
            active_ip: "127.0.0.1".to_string(),
            active_ipv6: false,
        }
    }
}

/// Complete client configuration: the server plus its connection options
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// FTP server host name or address (required)
    pub host: String,

    #[serde(flatten)]
    pub options: ConnectionOptions,
}

impl ClientConfig {
    /// Load configuration from an optional config.toml with environment overrides
    ///
    /// Environment: `RAX_FTP__HOST`, `RAX_FTP__USER`, `RAX_FTP__PORT`, ...
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RAX_FTP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.host.trim().is_empty() {
            return Err(config::ConfigError::Message("host cannot be empty".into()));
        }

        if self.options.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        Ok(())
    }
}
