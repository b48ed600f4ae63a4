use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout: u64,
    pub retries: u32,
    /// Items requested per page from list endpoints.
    pub page_size: u32,
    pub service_id: u32,
    /// Advertise comments and bullet comments in the capability manifest.
    pub advertise_comments: bool,
    /// Refuse to build extractors for capabilities missing from the manifest.
    pub strict_capabilities: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: format!("nicopipe/{}", env!("CARGO_PKG_VERSION")),
            timeout: 30,
            retries: 3,
            page_size: 32,
            service_id: 6,
            advertise_comments: false,
            strict_capabilities: false,
        }
    }
}

impl Config {
    /// Reads a TOML file; missing keys keep their defaults. Without a path
    /// the defaults are returned as-is.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;

        if config.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        Ok(config)
    }
}
