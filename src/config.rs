//! Server configuration.
//!
//! Values come from built-in defaults, optionally overlaid by a YAML file
//! named in `WEBROOT_CONFIG`, then by the `LISTEN` and `WEBROOT`
//! environment variables.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:50000";
pub const DEFAULT_ROOT: &str = "/srv/webroot";
pub const DEFAULT_BACKLOG: u32 = 5;
pub const DEFAULT_MAX_REQUEST_LINE: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds to, e.g. "127.0.0.1:50000"
    pub listen_addr: String,
    /// Directory every request target is resolved against
    pub root: PathBuf,
    /// Pending-connection queue length passed to listen(2)
    pub backlog: u32,
    /// Upper bound on bytes read while waiting for the request line
    pub max_request_line: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            root: PathBuf::from(DEFAULT_ROOT),
            backlog: DEFAULT_BACKLOG,
            max_request_line: DEFAULT_MAX_REQUEST_LINE,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` in place of the environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("WEBROOT_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(addr) = lookup("LISTEN") {
            cfg.listen_addr = addr;
        }
        if let Some(root) = lookup("WEBROOT") {
            cfg.root = PathBuf::from(root);
        }

        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }
}
