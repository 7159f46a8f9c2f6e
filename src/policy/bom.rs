use tracing::debug;

use super::view::{PolicyView, Resolution};
use crate::catalog::{PackageCatalog, PackageRecord, PolicyList, UsedManifest};
use crate::error::Result;

/// Package counts by policy status
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BomSummary {
    pub total: usize,
    pub approved: usize,
    pub denied: usize,
    pub pending: usize,
}

/// Build the BOM: every used package, annotated from the policy lists.
///
/// Packages absent from both lists keep empty policy attributes. A manifest
/// entry without a usable `version` aborts the whole build.
pub fn build_bom(used: &UsedManifest, approved: &PolicyList, denied: &PolicyList) -> Result<PackageCatalog> {
    let view = PolicyView::new(approved, denied);
    let mut bom = PackageCatalog::with_capacity(used.len());

    for (key, entry) in used {
        let mut record = PackageRecord::from_manifest_entry(key, entry)?;
        match view.lookup(key) {
            Some(policy) => record.apply_policy(policy),
            None => debug!(package = %key, "package not found in approved or denied lists"),
        }
        bom.insert(key.clone(), record);
    }

    Ok(bom)
}

/// Packages that still need attention: everything not explicitly approved.
pub fn compute_issues(bom: &PackageCatalog, approved: &PolicyList) -> PackageCatalog {
    bom.iter()
        .filter(|(key, _)| !approved.contains_key(key.as_str()))
        .map(|(key, record)| (key.clone(), record.clone()))
        .collect()
}

pub fn summarize(bom: &PackageCatalog, view: &PolicyView<'_>) -> BomSummary {
    let mut summary = BomSummary {
        total: bom.len(),
        ..BomSummary::default()
    };
    for key in bom.keys() {
        match view.classify(key) {
            Resolution::Approved => summary.approved += 1,
            Resolution::Denied => summary.denied += 1,
            Resolution::Pending => summary.pending += 1,
        }
    }
    summary
}
