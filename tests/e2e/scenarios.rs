use super::helpers::{stderr, TestProject};
use oss_audit::PackageCatalog;

const MANIFEST: &str = r#"
zlib:
  version: 1.2
  license: Zlib
openssl:
  version: 1.1.1k
left-pad:
  version: 2
abseil:
  version: '20210324.2'
"#;

const APPROVED: &str = r#"
zlib:
  version: 1.2
  copyright_notices: |
    Copyright (C) 1995-2017 Jean-loup Gailly and Mark Adler
    Copyright (C) 2004 Cosmin Truta
  interaction_types:
    - Distribution - Static Linking
  resolution: Approved for release
left-pad:
  copyright_notices: Copyright left-pad authors
  interaction_types: []
  resolution: Approved
"#;

const DENIED: &str = r#"
left-pad:
  copyright_notices: Copyright left-pad authors
  interaction_types:
    - Internal Use Only
  resolution: Denied - incompatible license
openssl:
  copyright_notices: Copyright (c) 1998-2019 The OpenSSL Project
  interaction_types: []
  resolution: Denied
"#;

fn load(project: &TestProject, name: &str) -> PackageCatalog {
    serde_yaml::from_str(&project.read(name)).expect("output is a valid catalog")
}

fn gate_project(denied: &str) -> TestProject {
    let project = TestProject::new();
    project.write("manifest.yaml", "A:\n  version: v1\n");
    project.write("denied.yaml", denied);
    project
}

#[test]
fn test_strict_denial_fails_build() {
    let project = gate_project("A:\n  resolution: Denied\n");
    let output = project.run_bom(&["--denied-list-path", "denied.yaml", "--strict"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("\n  A\n"));
    assert!(stderr.contains("bom.yaml"));
    assert!(stderr.contains("denied.yaml"));
}

#[test]
fn test_strict_suppressed_denial_passes_with_diagnostic() {
    let project = gate_project("A:\n  resolution: Denied\n");
    let output = project.run_bom(&["--denied-list-path", "denied.yaml", "--strict", "--suppress", "A"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("\n  A (suppressed)\n"));
}

#[test]
fn test_non_strict_denial_passes_with_diagnostic() {
    let project = gate_project("A:\n  resolution: Denied\n");
    let output = project.run_bom(&["--denied-list-path", "denied.yaml"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("\n  A\n"));
}

#[test]
fn test_no_denials_passes_silently() {
    let project = gate_project("{}\n");
    let output = project.run_bom(&["--denied-list-path", "denied.yaml", "--strict"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(!stderr(&output).contains("not allowed"));
}

#[test]
fn test_denial_outputs_written_even_when_gate_fails() {
    let project = gate_project("A:\n  resolution: Denied\n");
    let output = project.run_bom(&["--denied-list-path", "denied.yaml", "--strict"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(load(&project, "bom.yaml")["A"].resolution, "Denied");
    assert!(load(&project, "bom-issues.yaml").contains_key("A"));
}

#[test]
fn test_empty_inputs_write_empty_mappings() {
    let project = TestProject::new();
    project.write("manifest.yaml", "");
    project.write("approved.yaml", "{}\n");
    project.write("denied.yaml", "");

    let output = project.run_bom(&[
        "--approved-list-path",
        "approved.yaml",
        "--denied-list-path",
        "denied.yaml",
    ]);

    assert!(output.status.success());
    assert_eq!(project.read("bom.yaml").trim(), "{}");
    assert_eq!(project.read("bom-issues.yaml").trim(), "{}");
}

#[test]
fn test_bom_reconciles_policy_lists() {
    let project = TestProject::new();
    project.write("manifest.yaml", MANIFEST);
    project.write("approved.yaml", APPROVED);
    project.write("denied.yaml", DENIED);

    let output = project.run_bom(&[
        "--approved-list-path",
        "approved.yaml",
        "--denied-list-path",
        "denied.yaml",
    ]);
    assert!(output.status.success());

    let bom = load(&project, "bom.yaml");
    let keys: Vec<&str> = bom.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zlib", "openssl", "left-pad", "abseil"]);

    // Versions are strings regardless of the manifest's scalar type
    assert_eq!(bom["zlib"].version, "1.2");
    assert_eq!(bom["left-pad"].version, "2");

    assert_eq!(bom["zlib"].resolution, "Approved for release");
    assert_eq!(bom["zlib"].extra["license"], serde_yaml::Value::String("Zlib".to_string()));
    // Denied attributes win over approved ones
    assert_eq!(bom["left-pad"].resolution, "Denied - incompatible license");
    assert_eq!(bom["left-pad"].interaction_types, vec!["Internal Use Only"]);
    // Unlisted packages carry empty attributes
    assert_eq!(bom["abseil"].resolution, "");
    assert!(bom["abseil"].interaction_types.is_empty());

    // Approval is the only exemption from the issues file
    let issues = load(&project, "bom-issues.yaml");
    let issue_keys: Vec<&str> = issues.keys().map(String::as_str).collect();
    assert_eq!(issue_keys, vec!["openssl", "abseil"]);

    let raw = project.read("bom.yaml");
    assert!(raw.contains("version: '2'") || raw.contains("version: \"2\""));
    assert!(raw.contains("copyright_notices: |"));
}

#[test]
fn test_output_is_idempotent() {
    let project = TestProject::new();
    project.write("manifest.yaml", MANIFEST);
    project.write("approved.yaml", APPROVED);
    project.write("denied.yaml", DENIED);
    let args = ["--approved-list-path", "approved.yaml", "--denied-list-path", "denied.yaml"];

    assert!(project.run_bom(&args).status.success());
    let first = (project.read("bom.yaml"), project.read("bom-issues.yaml"));

    assert!(project.run_bom(&args).status.success());
    let second = (project.read("bom.yaml"), project.read("bom-issues.yaml"));

    assert_eq!(first, second);
}

#[test]
fn test_missing_version_is_fatal_and_writes_nothing() {
    let project = TestProject::new();
    project.write("manifest.yaml", "zlib:\n  version: 1.2\nopenssl:\n  license: OpenSSL\n");

    let output = project.run_bom(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("openssl"));
    assert!(!project.path("bom.yaml").exists());
    assert!(!project.path("bom-issues.yaml").exists());
}

#[test]
fn test_unparseable_policy_list_is_fatal() {
    let project = TestProject::new();
    project.write("manifest.yaml", "zlib:\n  version: 1.2\n");
    project.write("denied.yaml", "zlib: [unterminated\n");

    let output = project.run_bom(&["--denied-list-path", "denied.yaml", "--strict"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(!project.path("bom.yaml").exists());
}

#[test]
fn test_missing_manifest_is_fatal() {
    let project = TestProject::new();
    let output = project.run_bom(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(!project.path("bom.yaml").exists());
}

#[test]
fn test_underscore_option_aliases() {
    let project = gate_project("A:\n  resolution: Denied\n");
    let output = project.run_bom(&["--denied_list_path", "denied.yaml", "--strict"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_file_supplies_policy_and_suppressions() {
    let project = gate_project("A:\n  resolution: Denied\n");
    project.write(
        "oss-audit.toml",
        "[bom]\ndenied_list = \"denied.yaml\"\nstrict = true\n",
    );

    let output = project.run_bom(&[]);
    assert_eq!(output.status.code(), Some(1));

    project.write(
        "oss-audit.toml",
        "[bom]\ndenied_list = \"denied.yaml\"\nstrict = true\nsuppress = [\"A\"]\n",
    );
    let output = project.run_bom(&[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("A (suppressed)"));
}

#[test]
fn test_cli_strict_and_suppressions_merge_with_config() {
    let project = TestProject::new();
    project.write("manifest.yaml", "A:\n  version: v1\nB:\n  version: v2\n");
    project.write("denied.yaml", "A:\n  resolution: Denied\nB:\n  resolution: Denied\n");
    project.write("oss-audit.toml", "[bom]\ndenied_list = \"denied.yaml\"\nsuppress = [\"A\"]\n");

    // File suppression alone leaves B failing once the CLI turns strict on
    let output = project.run_bom(&["--strict"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr_text = stderr(&output);
    assert!(stderr_text.contains("A (suppressed)"));
    assert!(stderr_text.contains("\n  B\n"));

    let output = project.run_bom(&["--strict", "--suppress", "B", "--suppress", "ghost"]);
    assert_eq!(output.status.code(), Some(0));
    let stderr_text = stderr(&output);
    assert!(stderr_text.contains("A (suppressed)"));
    assert!(stderr_text.contains("B (suppressed)"));
    assert!(stderr_text.contains("WARN"));
    assert!(stderr_text.contains("suppressed package is not a denied package in this build"));
    assert!(stderr_text.contains("ghost"));
}

#[test]
fn test_config_validate() {
    let project = TestProject::new();
    project.write("oss-audit.toml", "[license]\nattempts = 5\n");
    assert!(project.run_audit(&["config", "--validate"]).status.success());

    let show = project.run_audit(&["config", "--show"]);
    assert!(show.status.success());
    assert!(String::from_utf8_lossy(&show.stdout).contains("\"attempts\": 5"));

    project.write("oss-audit.toml", "[license]\nretries = 5\n");
    assert_eq!(project.run_audit(&["config", "--validate"]).status.code(), Some(2));
}
