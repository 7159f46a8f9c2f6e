use anyhow::{bail, Result};
use std::path::Path;
use oss_audit::config::load_config;

pub fn handle_config(path: Option<&Path>, show: bool, validate: bool, quiet: bool) -> Result<()> {
    if !show && !validate {
        bail!("Use --show or --validate");
    }

    let config = load_config(path)?;

    if show && !quiet {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    if validate && !quiet {
        println!("✅ Configuration is valid");
    }

    Ok(())
}
