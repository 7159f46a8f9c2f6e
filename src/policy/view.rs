use crate::catalog::{PolicyEntry, PolicyList};

/// Where a package stands against the policy lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Approved,
    Denied,
    Pending,
}

impl Resolution {
    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Approved => "approved",
            Resolution::Denied => "denied",
            Resolution::Pending => "pending",
        }
    }
}

/// Combined read-only view over the approved and denied lists.
///
/// Lookups consult the denied list first, so a package listed in both
/// resolves to its denied entry.
#[derive(Debug, Clone, Copy)]
pub struct PolicyView<'a> {
    approved: &'a PolicyList,
    denied: &'a PolicyList,
}

impl<'a> PolicyView<'a> {
    pub fn new(approved: &'a PolicyList, denied: &'a PolicyList) -> Self {
        Self { approved, denied }
    }

    /// Policy attributes for a package, if either list mentions it.
    pub fn lookup(&self, key: &str) -> Option<&'a PolicyEntry> {
        self.denied.get(key).or_else(|| self.approved.get(key))
    }

    pub fn classify(&self, key: &str) -> Resolution {
        if self.denied.contains_key(key) {
            Resolution::Denied
        } else if self.approved.contains_key(key) {
            Resolution::Approved
        } else {
            Resolution::Pending
        }
    }
}
