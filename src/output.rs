use std::path::Path;

use crate::catalog::PackageCatalog;
use crate::policy::{BomSummary, GateOutcome, PolicyView};

const ALERT_BANNER: &str = r"    _    _     _____ ____ _____
   / \  | |   | ____|  _ \_   _|
  / _ \ | |   |  _| | |_) || |
 / ___ \| |___| |___|  _ < | |
/_/   \_\_____|_____|_| \_\|_|
";

/// Diagnostic block for denied packages, or `None` when there are none.
pub fn format_denial_report(outcome: &GateOutcome, bom_path: &Path, denied_list_path: Option<&Path>) -> Option<String> {
    if !outcome.has_denials() {
        return None;
    }

    let packages: Vec<String> = outcome
        .denied
        .iter()
        .map(|package| {
            if package.suppressed {
                format!("{} (suppressed)", package.key)
            } else {
                package.key.clone()
            }
        })
        .collect();

    let denied_list = denied_list_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    let mut output = String::new();
    output.push_str(ALERT_BANNER);
    output.push('\n');
    output.push_str("The following open source libraries found in this build are not allowed for\n");
    output.push_str("use. They must be removed from product code in order for the build to comply\n");
    output.push_str("with legal and license requirements:\n\n");
    output.push_str(&format!("  {}\n\n", packages.join("\n  ")));
    output.push_str(&format!("Catalog of packages used by your build:\n  {}\n\n", bom_path.display()));
    output.push_str(&format!("Catalog of denied packages:\n  {}\n", denied_list));

    Some(output)
}

pub fn format_summary(summary: &BomSummary, issues: &PackageCatalog, view: &PolicyView<'_>, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("📦 BOM Summary ({} packages)\n", summary.total));
    output.push_str(&format!(
        "✅ {} approved  ⚠️ {} pending  🚫 {} denied\n",
        summary.approved, summary.pending, summary.denied
    ));

    if verbose {
        output.push('\n');
        if issues.is_empty() {
            output.push_str("✅ No issues found!\n");
        } else {
            output.push_str("⚠️  Issues Found:\n");
            output.push_str(&format_issue_table(issues, view));
        }
    }

    output
}

fn format_issue_table(issues: &PackageCatalog, view: &PolicyView<'_>) -> String {
    let mut output = String::new();

    // Table header
    output.push_str("┌───────────────────────────┬─────────────┬─────────┬─────────────────────┐\n");
    output.push_str("│ Package                   │ Version     │ Status  │ Resolution          │\n");
    output.push_str("├───────────────────────────┼─────────────┼─────────┼─────────────────────┤\n");

    // Table rows
    for (key, record) in issues {
        let name = truncate(key, 25);
        let version = truncate(&record.version, 11);
        let status = view.classify(key).label();
        let resolution = if record.resolution.is_empty() { "-" } else { record.resolution.as_str() };
        let resolution = truncate(resolution.lines().next().unwrap_or_default(), 19);

        output.push_str(&format!("│ {:<25} │ {:<11} │ {:<7} │ {:<19} │\n", name, version, status, resolution));
    }

    // Table footer
    output.push_str("└───────────────────────────┴─────────────┴─────────┴─────────────────────┘\n");

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{}…", head)
    }
}
