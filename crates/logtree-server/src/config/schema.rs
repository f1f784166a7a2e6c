use std::net::SocketAddr;
use std::time::Duration;

use logtree_core::error::{LogTreeError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub sink: SinkSection,

    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub server: HttpSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LogTreeError::UnsupportedVersion);
        }
        self.server.validate()?;
        Ok(())
    }
}

/// Where emitted records go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// One JSON line per record on stdout.
    #[default]
    Stdout,
    /// One `tracing` event per record.
    Tracing,
    /// Kept in process memory.
    Memory,
    /// Dropped.
    Null,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkSection {
    #[serde(default)]
    pub kind: SinkKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    /// Run the duplicate-address check before serving.
    #[serde(default = "default_validate_on_startup")]
    pub validate_on_startup: bool,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            validate_on_startup: default_validate_on_startup(),
        }
    }
}

fn default_validate_on_startup() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            flush_interval_ms: default_flush_interval_ms(),
        }
    }
}

impl HttpSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(100..=3_600_000).contains(&self.flush_interval_ms) {
            return Err(LogTreeError::BadConfig(
                "server.flush_interval_ms must be between 100 and 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            LogTreeError::BadConfig(format!("server.listen must be a socket address: {e}"))
        })
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:9090".into()
}
fn default_flush_interval_ms() -> u64 {
    10_000
}
