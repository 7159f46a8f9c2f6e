use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;
use oss_audit::catalog::{load_manifest, load_policy_list, save_catalog, YamlFormat};
use oss_audit::config::Config;
use oss_audit::output::{format_denial_report, format_summary};
use oss_audit::policy::{build_bom, compute_issues, evaluate_gate, summarize, GateStatus, PolicyView};

pub struct BomArgs {
    pub merged_manifests_path: PathBuf,
    pub bom_path: PathBuf,
    pub bom_issues_path: PathBuf,
    pub approved_list_path: Option<PathBuf>,
    pub denied_list_path: Option<PathBuf>,
    pub strict: bool,
    pub suppress: Vec<String>,
}

pub fn handle_bom(args: BomArgs, config: &Config, verbose: bool, quiet: bool) -> Result<GateStatus> {
    // CLI arguments override config values
    let approved_list_path = args.approved_list_path.or_else(|| config.bom.approved_list.clone());
    let denied_list_path = args.denied_list_path.or_else(|| config.bom.denied_list.clone());
    let strict = args.strict || config.bom.strict;
    let mut suppress = config.bom.suppress.clone();
    suppress.extend(args.suppress);

    // Everything is loaded before anything is written
    let approved = load_policy_list(approved_list_path.as_deref())?;
    let denied = load_policy_list(denied_list_path.as_deref())?;
    let used = load_manifest(&args.merged_manifests_path)?;

    // All packages that are included in a target, irrespective of package status
    let bom = build_bom(&used, &approved, &denied)?;
    // Packages that are denied or pending
    let issues = compute_issues(&bom, &approved);

    let format = YamlFormat;
    let bom_yaml = format.render(&bom).context("Failed to render BOM")?;
    let issues_yaml = format.render(&issues).context("Failed to render BOM-issues")?;
    save_catalog(&args.bom_path, &bom_yaml)?;
    save_catalog(&args.bom_issues_path, &issues_yaml)?;
    info!(
        bom = %args.bom_path.display(),
        bom_issues = %args.bom_issues_path.display(),
        packages = bom.len(),
        issues = issues.len(),
        "wrote BOM files"
    );

    if !quiet {
        let view = PolicyView::new(&approved, &denied);
        let summary = summarize(&bom, &view);
        print!("{}", format_summary(&summary, &issues, &view, verbose));
    }

    // Open source packages that are denied
    let outcome = evaluate_gate(&bom, &denied, &suppress, strict);
    if let Some(report) = format_denial_report(&outcome, &args.bom_path, denied_list_path.as_deref()) {
        eprint!("{}", report);
    }

    Ok(outcome.status())
}
