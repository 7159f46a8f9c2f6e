use serde_yaml::Value;

use super::models::PackageCatalog;
use crate::error::Result;

/// Scalar formatting applied when a catalog is rendered to YAML.
///
/// Strings containing a line break are written as literal block scalars,
/// with carriage returns and surrounding whitespace dropped. Everything else
/// stays a plain or quoted flow scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YamlFormat;

impl YamlFormat {
    pub fn is_block_scalar(text: &str) -> bool {
        text.contains('\n')
    }

    /// Render a catalog. An empty catalog renders as `{}`.
    pub fn render(&self, catalog: &PackageCatalog) -> Result<String> {
        let mut document = serde_yaml::to_value(catalog)?;
        self.normalize(&mut document);
        Ok(serde_yaml::to_string(&document)?)
    }

    fn normalize(&self, value: &mut Value) {
        match value {
            Value::String(text) if Self::is_block_scalar(text.as_str()) => {
                *text = text.replace('\r', "").trim().to_string();
            }
            Value::Sequence(items) => {
                for item in items {
                    self.normalize(item);
                }
            }
            Value::Mapping(mapping) => {
                for (_, item) in mapping.iter_mut() {
                    self.normalize(item);
                }
            }
            Value::Tagged(tagged) => self.normalize(&mut tagged.value),
            _ => {}
        }
    }
}
