mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{handle_bom, handle_config, handle_license, BomArgs};
use oss_audit::config::load_config;
use oss_audit::policy::GateStatus;

/// Strict mode found unsuppressed denied packages.
const EXIT_DENIED: u8 = 1;
/// Input could not be loaded, parsed or written.
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref(), cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn init_tracing(log_level: Option<&str>, verbose: bool) {
    let default_filter = match log_level {
        Some(level) => level.to_string(),
        None if verbose => "warn,oss_audit=debug".to_string(),
        None => "warn".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Bom {
            merged_manifests_path,
            bom_path,
            bom_issues_path,
            approved_list_path,
            denied_list_path,
            strict,
            suppress,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let args = BomArgs {
                merged_manifests_path,
                bom_path,
                bom_issues_path,
                approved_list_path,
                denied_list_path,
                strict,
                suppress,
            };
            match handle_bom(args, &config, cli.verbose, cli.quiet)? {
                GateStatus::Pass => Ok(ExitCode::SUCCESS),
                GateStatus::Fail => Ok(ExitCode::from(EXIT_DENIED)),
            }
        }
        Commands::License {
            url,
            output,
            attempts,
            backoff_secs,
            insecure,
        } => {
            let config = load_config(cli.config.as_deref())?;
            handle_license(&url, &output, attempts, backoff_secs, insecure, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { show, validate } => {
            handle_config(cli.config.as_deref(), show, validate, cli.quiet)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
