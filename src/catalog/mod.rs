pub mod format;
pub mod models;
pub mod storage;

pub use format::YamlFormat;
pub use models::{PackageCatalog, PackageRecord, PolicyEntry, PolicyList, UsedManifest};
pub use storage::{load_manifest, load_policy_list, save_catalog};
