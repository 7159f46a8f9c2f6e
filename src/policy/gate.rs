use tracing::{info, warn};

use crate::catalog::{PackageCatalog, PolicyList};

/// Final verdict of the denial gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Pass,
    Fail,
}

/// A denied package found in the BOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeniedPackage {
    pub key: String,
    pub suppressed: bool,
}

/// Result of checking a BOM against the denied list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    /// Denied packages present in the BOM, in BOM order. Includes suppressed ones.
    pub denied: Vec<DeniedPackage>,
    pub strict: bool,
}

impl GateOutcome {
    pub fn has_denials(&self) -> bool {
        !self.denied.is_empty()
    }

    pub fn unsuppressed(&self) -> impl Iterator<Item = &DeniedPackage> {
        self.denied.iter().filter(|package| !package.suppressed)
    }

    /// Fails only in strict mode, and only for denials nobody suppressed.
    pub fn status(&self) -> GateStatus {
        if self.strict && self.unsuppressed().next().is_some() {
            GateStatus::Fail
        } else {
            GateStatus::Pass
        }
    }
}

/// Check which BOM packages are denied and whether that should fail the build.
///
/// Suppression is by exact package key.
pub fn evaluate_gate(bom: &PackageCatalog, denied: &PolicyList, suppressed: &[String], strict: bool) -> GateOutcome {
    let denied_present: Vec<DeniedPackage> = bom
        .keys()
        .filter(|key| denied.contains_key(key.as_str()))
        .map(|key| DeniedPackage {
            key: key.clone(),
            suppressed: suppressed.iter().any(|s| s == key),
        })
        .collect();

    for key in suppressed {
        if !denied_present.iter().any(|package| &package.key == key) {
            warn!(package = %key, "suppressed package is not a denied package in this build");
        }
    }

    let outcome = GateOutcome {
        denied: denied_present,
        strict,
    };
    if outcome.has_denials() {
        info!(
            denied = outcome.denied.len(),
            unsuppressed = outcome.unsuppressed().count(),
            strict,
            "denied packages found"
        );
    }
    outcome
}
