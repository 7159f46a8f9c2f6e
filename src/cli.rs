use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oss-audit")]
#[command(about = "Generate BOM files and validate open source package usage")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: ./oss-audit.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging and detailed output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log filter, e.g. "debug" or "oss_audit=trace" (RUST_LOG takes precedence)
    #[arg(long, global = true, alias = "log_level")]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the BOM and BOM-issues files and check for denied packages
    Bom {
        /// Path to the merged manifests file
        merged_manifests_path: PathBuf,

        /// Output path for the BOM yaml file
        bom_path: PathBuf,

        /// Output path for the BOM-issues yaml file
        bom_issues_path: PathBuf,

        /// Path to approved packages yaml
        #[arg(long, alias = "approved_list_path")]
        approved_list_path: Option<PathBuf>,

        /// Path to denied packages yaml
        #[arg(long, alias = "denied_list_path")]
        denied_list_path: Option<PathBuf>,

        /// Exit with an error when denied packages are used
        #[arg(long)]
        strict: bool,

        /// Denied package that should not fail the build (repeatable)
        #[arg(long = "suppress", value_name = "PACKAGE")]
        suppress: Vec<String>,
    },
    /// Fetch license metadata for an artifact from its sibling .pom file
    License {
        /// Artifact (jar) location url
        url: String,

        /// Output file
        output: PathBuf,

        /// Total download attempts for retryable HTTP statuses
        #[arg(long)]
        attempts: Option<u32>,

        /// Seconds to wait between attempts
        #[arg(long)]
        backoff_secs: Option<u64>,

        /// Skip TLS certificate verification
        #[arg(long)]
        insecure: bool,
    },
    /// Show or validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}
