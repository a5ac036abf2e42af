use std::{fs, net::SocketAddr, path::{Path, PathBuf}};
use serde::Deserialize;
use toml;
use anyhow::{self, Context};

use tally::{IdStrategy, DEFAULT_SLOT};

#[derive(Debug, Deserialize)]
pub struct ListenConfig {
    pub address: SocketAddr,
    /// Served for any path the API does not claim
    #[serde(default)]
    pub static_dir: Option<PathBuf>
}

fn default_slot() -> String {
    DEFAULT_SLOT.to_owned()
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub directory: PathBuf,
    #[serde(default = "default_slot")]
    pub slot: String,
    #[serde(default)]
    pub ids: IdStrategy
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ListenConfig,
    pub storage: StorageConfig
}

impl AppConfig {
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(filepath.as_ref())
            .with_context(|| format!("failed to read config file {}", filepath.as_ref().display()))?;
        return Self::parse(&file_content);
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str(content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }
}
