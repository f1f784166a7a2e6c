//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use logtree_core::error::{LogTreeError, Result};

pub use schema::{HttpSection, RegistrySection, ServerConfig, SinkKind, SinkSection};

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| LogTreeError::Internal(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| LogTreeError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
