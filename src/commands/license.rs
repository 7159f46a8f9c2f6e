use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use oss_audit::config::Config;
use oss_audit::license::collect_license;

pub fn handle_license(
    url: &str,
    output: &Path,
    attempts: Option<u32>,
    backoff_secs: Option<u64>,
    insecure: bool,
    config: &Config,
) -> Result<()> {
    // CLI arguments override config values
    let mut license_config = config.license.clone();
    if let Some(attempts) = attempts {
        license_config.attempts = attempts;
    }
    if let Some(backoff_secs) = backoff_secs {
        license_config.backoff_secs = backoff_secs;
    }
    if insecure {
        license_config.verify_tls = false;
    }

    let license = collect_license(url, output, license_config.resolver_options())
        .with_context(|| format!("Failed to write license file: {}", output.display()))?;
    info!(%license, output = %output.display(), "wrote license");

    Ok(())
}
