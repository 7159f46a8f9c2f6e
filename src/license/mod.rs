use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use tracing::{debug, info};

pub mod descriptor;

pub use descriptor::{descriptor_url, LicenseParser};

/// Written whenever no license could be determined.
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// HTTP statuses worth another attempt.
pub const RETRY_STATUS_CODES: [u16; 4] = [429, 502, 503, 504];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    pub retry: RetryPolicy,
    pub timeout: Duration,
    pub verify_tls: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(30),
            verify_tls: true,
        }
    }
}

/// Reasons a license lookup falls back to [`UNKNOWN_LICENSE`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("cannot derive a descriptor location from '{0}'")]
    InvalidUrl(String),

    #[error("unable to download {url}: HTTP {status}")]
    Status { url: Url, status: StatusCode },

    #[error("unable to download descriptor: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid license pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub fn is_retryable(status: StatusCode) -> bool {
    RETRY_STATUS_CODES.contains(&status.as_u16())
}

/// Looks up the license of a published artifact from its sibling `.pom`.
#[derive(Debug, Clone)]
pub struct LicenseResolver {
    client: Client,
    parser: LicenseParser,
    options: ResolverOptions,
}

impl LicenseResolver {
    pub fn new(options: ResolverOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(!options.verify_tls)
            .user_agent(concat!("oss-audit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            parser: LicenseParser::new()?,
            options,
        })
    }

    /// License names joined with `;`, or [`UNKNOWN_LICENSE`]. Never fails.
    pub fn resolve(&self, artifact_url: &str) -> String {
        if artifact_url.trim().is_empty() {
            debug!("Empty url, setting license value to '{UNKNOWN_LICENSE}'");
            return UNKNOWN_LICENSE.to_string();
        }

        match self.try_resolve(artifact_url) {
            Ok(names) if !names.is_empty() => names.join(";"),
            Ok(_) => {
                debug!("No license metadata found in descriptor, setting license value to '{UNKNOWN_LICENSE}'");
                UNKNOWN_LICENSE.to_string()
            }
            Err(e) => {
                info!(reason = %e, "Setting license value to '{UNKNOWN_LICENSE}'");
                UNKNOWN_LICENSE.to_string()
            }
        }
    }

    fn try_resolve(&self, artifact_url: &str) -> Result<Vec<String>, FetchError> {
        let url = descriptor_url(artifact_url).ok_or_else(|| FetchError::InvalidUrl(artifact_url.to_string()))?;
        let document = self.fetch(&url)?;
        Ok(self.parser.parse(&document))
    }

    /// Download a descriptor, retrying throttling and gateway errors.
    pub fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let RetryPolicy { attempts, backoff } = self.options.retry;
        let attempts = attempts.max(1);
        let mut attempt = 1;

        loop {
            debug!(%url, attempt, "Downloading descriptor");
            let response = self.client.get(url.clone()).send().map_err(|e| {
                debug!(%url, error = %e, "Download failed");
                e
            })?;

            let status = response.status();
            if status.is_success() {
                return Ok(response.text()?);
            }

            debug!(%url, status = status.as_u16(), "Download failed");
            if !is_retryable(status) || attempt >= attempts {
                return Err(FetchError::Status {
                    url: url.clone(),
                    status,
                });
            }

            debug!("Retrying in {:?}...", backoff);
            thread::sleep(backoff);
            attempt += 1;
        }
    }
}

/// Resolve an artifact's license and write it, newline terminated, to `output`.
///
/// Lookup failures end up as [`UNKNOWN_LICENSE`]; only the write can fail.
pub fn collect_license<P: AsRef<Path>>(artifact_url: &str, output: P, options: ResolverOptions) -> std::io::Result<String> {
    let license = match LicenseResolver::new(options) {
        Ok(resolver) => resolver.resolve(artifact_url),
        Err(e) => {
            info!(reason = %e, "Setting license value to '{UNKNOWN_LICENSE}'");
            UNKNOWN_LICENSE.to_string()
        }
    };

    fs::write(output, format!("{license}\n"))?;
    Ok(license)
}
