use std::path::PathBuf;

/// Errors raised while loading, reconciling or writing package catalogs.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Malformed manifest entry '{key}': {message}")]
    Schema { key: String, message: String },

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AuditError>;
