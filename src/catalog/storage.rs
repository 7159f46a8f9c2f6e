use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use super::models::{scalar_string, PolicyEntry, PolicyList, UsedManifest};
use crate::error::{AuditError, Result};

/// Load a YAML mapping document. Empty and null documents load as the default value.
///
/// Scalar package keys such as `1234:` are read as strings.
fn load_document<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| AuditError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(T::default());
    }

    let parse_error = |message: String| AuditError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let document: Value = serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
    match document {
        Value::Null => Ok(T::default()),
        Value::Mapping(mapping) => {
            let mapping = stringify_keys(mapping).map_err(parse_error)?;
            serde_yaml::from_value(Value::Mapping(mapping)).map_err(|e| parse_error(e.to_string()))
        }
        _ => Err(parse_error("expected a mapping of package keys at top level".to_string())),
    }
}

fn stringify_keys(mapping: Mapping) -> std::result::Result<Mapping, String> {
    mapping
        .into_iter()
        .map(|(key, value)| match scalar_string(&key) {
            Some(key) => Ok((Value::String(key), value)),
            None => Err(format!("package keys must be scalars, found {key:?}")),
        })
        .collect()
}

/// Load the merged manifest of packages used by a project.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<UsedManifest> {
    let manifest: UsedManifest = load_document(&path)?;
    debug!(path = %path.as_ref().display(), packages = manifest.len(), "loaded manifest");
    Ok(manifest)
}

/// Load an approved or denied list. No path means an empty list.
pub fn load_policy_list<P: AsRef<Path>>(path: Option<P>) -> Result<PolicyList> {
    let Some(path) = path else {
        return Ok(PolicyList::new());
    };

    let entries: IndexMap<String, Option<PolicyEntry>> = load_document(&path)?;
    debug!(path = %path.as_ref().display(), packages = entries.len(), "loaded policy list");

    Ok(entries
        .into_iter()
        .map(|(key, entry)| (key, entry.unwrap_or_default()))
        .collect())
}

/// Write an already rendered catalog to disk.
pub fn save_catalog<P: AsRef<Path>>(path: P, rendered: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, rendered).map_err(|source| AuditError::Write {
        path: path.to_path_buf(),
        source,
    })
}
