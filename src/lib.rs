pub mod catalog;
pub mod config;
pub mod error;
pub mod license;
pub mod output;
pub mod policy;

// Re-export main types for easy access
pub use catalog::{PackageCatalog, PackageRecord, PolicyEntry, PolicyList, YamlFormat};
pub use error::AuditError;
pub use license::{LicenseResolver, ResolverOptions, UNKNOWN_LICENSE};
pub use policy::{build_bom, compute_issues, evaluate_gate, GateOutcome, GateStatus};
