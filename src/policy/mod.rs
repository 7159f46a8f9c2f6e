pub mod bom;
pub mod gate;
pub mod view;

// Re-export main types
pub use bom::{build_bom, compute_issues, summarize, BomSummary};
pub use gate::{evaluate_gate, DeniedPackage, GateOutcome, GateStatus};
pub use view::{PolicyView, Resolution};
