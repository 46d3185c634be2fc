use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const ENV_BIND_ADDR: &str = "SHELF_BIND_ADDR";
pub const ENV_SEED: &str = "SHELF_SEED";
pub const ENV_MAX_BODY_BYTES: &str = "SHELF_MAX_BODY_BYTES";

/// Server settings. Missing keys in a config file take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Load the seed catalogue into the store at startup.
    pub seed: bool,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 5000)),
            seed: true,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Override settings from `SHELF_*` environment variables.
    pub fn apply_env(&mut self) -> ServerResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override settings from any key lookup using the `SHELF_*` names.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ServerResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = addr
                .parse()
                .map_err(|_| ServerError::Config(format!("{ENV_BIND_ADDR}: invalid address {addr:?}")))?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = parse_flag(&seed)
                .ok_or_else(|| ServerError::Config(format!("{ENV_SEED}: expected a boolean, got {seed:?}")))?;
        }
        if let Some(limit) = lookup(ENV_MAX_BODY_BYTES) {
            self.max_body_bytes = limit
                .parse()
                .map_err(|_| ServerError::Config(format!("{ENV_MAX_BODY_BYTES}: invalid size {limit:?}")))?;
        }
        Ok(())
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
