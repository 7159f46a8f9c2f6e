use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result};
use crate::license::{ResolverOptions, RetryPolicy};

/// Looked up in the current directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "oss-audit.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Defaults for `oss-audit bom`
    pub bom: BomConfig,

    /// Defaults for `oss-audit license`
    pub license: LicenseConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BomConfig {
    /// Approved packages list
    pub approved_list: Option<PathBuf>,

    /// Denied packages list
    pub denied_list: Option<PathBuf>,

    /// Fail the build when unsuppressed denied packages are used
    pub strict: bool,

    /// Denied packages that never fail the build
    pub suppress: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LicenseConfig {
    /// Total download attempts for retryable statuses
    pub attempts: u32,

    /// Seconds to wait between attempts
    pub backoff_secs: u64,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Verify TLS certificates of the artifact repository
    pub verify_tls: bool,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff_secs: 3,
            timeout_secs: 30,
            verify_tls: true,
        }
    }
}

impl LicenseConfig {
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            retry: RetryPolicy {
                attempts: self.attempts,
                backoff: Duration::from_secs(self.backoff_secs),
            },
            timeout: Duration::from_secs(self.timeout_secs),
            verify_tls: self.verify_tls,
        }
    }
}

/// Load configuration from an explicit path, or from `oss-audit.toml` in the
/// current directory. A missing default file yields the default configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let default_path = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE_NAME);

    if !default_path.exists() {
        return Ok(Config::default());
    }

    load_config_from(&default_path)
}

pub fn load_config_from<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}
