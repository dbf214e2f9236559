use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::analyzer::{DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};
use crate::registry::npm::DEFAULT_REGISTRY_URL;

/// Root configuration structure, deserialized from `.pkglens/config.toml`.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where and how registry metadata is fetched.
    pub registry: RegistryConfig,
    /// Limits applied while reading lockfiles.
    pub lockfile: LockfileConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of an npm-compatible registry.
    pub url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LockfileConfig {
    /// Deepest nesting accepted before a lockfile is rejected.
    pub max_depth: usize,
}

impl Default for LockfileConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))?;
    ensure!(
        config.lockfile.max_depth <= MAX_SUPPORTED_DEPTH,
        "Invalid config {}: lockfile.max_depth is {}, the largest supported value is {}",
        path.display(),
        config.lockfile.max_depth,
        MAX_SUPPORTED_DEPTH
    );
    Ok(config)
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<working_dir>/.pkglens/config.toml`
/// 3. `~/.config/pkglens/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = working_dir.join(".pkglens").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("pkglens").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}
