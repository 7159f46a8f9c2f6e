use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{AuditError, Result};

/// Packages consumed by a project, exactly as declared in the merged manifest.
pub type UsedManifest = IndexMap<String, Value>;

/// Approved or denied packages keyed by package identifier.
pub type PolicyList = IndexMap<String, PolicyEntry>;

/// BOM and BOM-issues catalogs.
pub type PackageCatalog = IndexMap<String, PackageRecord>;

/// Fields filled in from the policy lists rather than the manifest.
pub const POLICY_FIELDS: [&str; 3] = ["copyright_notices", "interaction_types", "resolution"];

/// One package in the BOM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub version: String,
    /// Manifest fields this tool does not interpret, kept in input order.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
    #[serde(default)]
    pub copyright_notices: String,
    #[serde(default)]
    pub interaction_types: Vec<String>,
    #[serde(default)]
    pub resolution: String,
}

/// Attributes an approved or denied list contributes to a BOM record.
///
/// Every field is optional in the list file; a missing field resolves to an
/// empty value when copied into the BOM. Numbers and booleans in these free
/// text fields are taken as their text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyEntry {
    #[serde(deserialize_with = "free_text")]
    pub copyright_notices: Option<String>,
    #[serde(deserialize_with = "free_text_list")]
    pub interaction_types: Option<Vec<String>>,
    #[serde(deserialize_with = "free_text")]
    pub resolution: Option<String>,
}

impl PackageRecord {
    /// Build a record from a raw manifest entry, with empty policy attributes.
    pub fn from_manifest_entry(key: &str, entry: &Value) -> Result<Self> {
        let mapping = entry.as_mapping().ok_or_else(|| AuditError::Schema {
            key: key.to_string(),
            message: "expected a mapping of package fields".to_string(),
        })?;

        let version = mapping
            .get("version")
            .ok_or_else(|| AuditError::Schema {
                key: key.to_string(),
                message: "missing required field 'version'".to_string(),
            })
            .and_then(|value| {
                scalar_string(value).ok_or_else(|| AuditError::Schema {
                    key: key.to_string(),
                    message: "field 'version' must be a string or number".to_string(),
                })
            })?;

        let mut extra = IndexMap::new();
        for (field, value) in mapping {
            let field = field.as_str().ok_or_else(|| AuditError::Schema {
                key: key.to_string(),
                message: "field names must be strings".to_string(),
            })?;
            if field == "version" || POLICY_FIELDS.contains(&field) {
                continue;
            }
            extra.insert(field.to_string(), value.clone());
        }

        Ok(Self {
            version,
            extra,
            copyright_notices: String::new(),
            interaction_types: Vec::new(),
            resolution: String::new(),
        })
    }

    /// Overwrite the policy attributes with those of a list entry.
    pub fn apply_policy(&mut self, entry: &PolicyEntry) {
        self.copyright_notices = entry.copyright_notices.clone().unwrap_or_default();
        self.interaction_types = entry.interaction_types.clone().unwrap_or_default();
        self.resolution = entry.resolution.clone().unwrap_or_default();
    }
}

/// Text of a YAML scalar. Versions, package keys and policy text are always
/// rendered as strings, whatever scalar type the input used.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn free_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_string(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom("expected text, found a list or mapping")),
    }
}

fn free_text_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| scalar_string(item).ok_or_else(|| de::Error::custom("expected a list of text items")))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(de::Error::custom("expected a list of text items")),
    }
}
