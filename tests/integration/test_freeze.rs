//! Tests for the `freeze` command

use crate::helpers::*;
use anyhow::Result;
use serde_json::json;

const FREEZE_ENV: [(&str, &str); 5] = [
  ("NON_INTERACTIVE", "1"),
  ("DOCS_SUBDIR", "demo"),
  ("FREEZE_VERSION", "v0.6.0"),
  ("NEW_VERSION", "v0.7.0"),
  ("SKIP_SHEETS", "1"),
];

#[test]
fn test_freeze_end_to_end() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.with_release_notes_for("v0.6.0")?;
  let next_before = site.read_file("docs/demo/next/index.mdx")?;

  let output = run_docs_versioner_with_env(&site.path, &["freeze", "--no-fetch"], &FREEZE_ENV)?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("Version freeze completed successfully!"));
  assert!(stdout(&output).contains("Documentation copied to"));

  // Frozen tree with repointed links; next untouched
  let frozen = site.read_file("docs/demo/v0.6.0/index.mdx")?;
  assert!(frozen.contains("[setup](/docs/demo/v0.6.0/setup)"));
  assert!(frozen.contains("href=\"/docs/demo/v0.6.0/documentation/intro\""));
  assert!(!frozen.contains("/docs/demo/next/"));
  assert_eq!(
    site.read_file("docs/demo/v0.6.0/setup.mdx")?,
    "# Setup\n\nBack to [home](/docs/demo/v0.6.0/index).\n"
  );
  assert_eq!(site.read_file("docs/demo/v0.6.0/images/logo.svg")?, "<svg>/docs/demo/next/</svg>\n");
  assert_eq!(site.read_file("docs/demo/next/index.mdx")?, next_before);

  // Navigation: new entry at the front, pages rewritten
  let nav = site.read_json("docs.json")?;
  let versions = &nav["navigation"]["dropdowns"][0]["versions"];
  assert_eq!(versions[0]["version"], "v0.6.0");
  assert_eq!(versions[1]["version"], "next");
  assert_eq!(versions[2]["version"], "v0.5.0");
  assert_eq!(
    versions[0]["tabs"][0]["groups"][0]["pages"],
    json!(["docs/demo/v0.6.0/index", "docs/demo/v0.6.0/setup"])
  );
  assert_eq!(versions[1]["tabs"][0]["groups"][0]["pages"][0], "docs/demo/next/index");
  assert_eq!(nav["theme"], "mint");

  // Registry
  let registry = site.read_json("versions.json")?;
  let demo = &registry["products"]["demo"];
  assert_eq!(demo["versions"], json!(["next", "v0.6.0", "v0.5.0"]));
  assert_eq!(demo["defaultVersion"], "next");
  assert_eq!(demo["nextDev"], "v0.7.0");

  // Metadata sidecar and marker
  let metadata = site.read_json("docs/demo/v0.6.0/.version-metadata.json")?;
  assert_eq!(metadata["version"], "v0.6.0");
  assert_eq!(metadata["nextVersion"], "v0.7.0");
  assert_eq!(metadata["eipSheetTab"], "v0.6.0");
  let marker = site.read_file("docs/demo/v0.6.0/.version-frozen")?;
  assert!(marker.starts_with("v0.6.0 - Frozen on "));

  // Not the snapshot product
  assert!(!site.file_exists("docs/demo/v0.6.0/eip-data-snapshot.json"));

  Ok(())
}

#[test]
fn test_freeze_twice_converges() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.with_release_notes_for("v0.6.0")?;

  run_docs_versioner_with_env(&site.path, &["freeze", "--no-fetch"], &FREEZE_ENV)?;
  let nav = site.read_file("docs.json")?;
  let registry = site.read_file("versions.json")?;

  // A stale file in the frozen tree is dropped by the second copy
  site.write_file("docs/demo/v0.6.0/stale.mdx", "old")?;
  let output = run_docs_versioner_with_env(&site.path, &["freeze", "--no-fetch"], &FREEZE_ENV)?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("Documentation replaced at"));

  assert_eq!(site.read_file("docs.json")?, nav);
  assert_eq!(site.read_file("versions.json")?, registry);
  assert!(!site.file_exists("docs/demo/v0.6.0/stale.mdx"));

  Ok(())
}

#[test]
fn test_cli_flags_override_environment() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.with_release_notes_for("v0.6.1")?;

  let output = run_docs_versioner_with_env(
    &site.path,
    &["freeze", "--non-interactive", "--no-fetch", "--version", "v0.6.1", "--next-dev", "v0.8.x"],
    &[("DOCS_SUBDIR", "demo"), ("FREEZE_VERSION", "v0.6.0"), ("SKIP_SHEETS", "1")],
  )?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));

  assert!(site.file_exists("docs/demo/v0.6.1/index.mdx"));
  assert!(!site.file_exists("docs/demo/v0.6.0"));
  assert_eq!(site.read_json("versions.json")?["products"]["demo"]["nextDev"], "v0.8.x");

  Ok(())
}

#[test]
fn test_invalid_version_aborts_without_changes() -> Result<()> {
  let site = TestDocsSite::new()?;
  let nav_before = site.read_file("docs.json")?;

  let output = run_docs_versioner_with_env(
    &site.path,
    &["freeze", "--no-fetch"],
    &[
      ("NON_INTERACTIVE", "1"),
      ("DOCS_SUBDIR", "demo"),
      ("FREEZE_VERSION", "0.6.0"),
      ("NEW_VERSION", "v0.7.0"),
    ],
  )?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("Invalid freeze version format"));
  assert_eq!(site.read_file("docs.json")?, nav_before);
  assert!(!site.file_exists("docs/demo/0.6.0"));
  assert!(!site.file_exists("versions.json"));

  Ok(())
}

#[test]
fn test_missing_input_in_non_interactive_mode() -> Result<()> {
  let site = TestDocsSite::new()?;

  let output = run_docs_versioner_with_env(
    &site.path,
    &["freeze", "--no-fetch"],
    &[("NON_INTERACTIVE", "true"), ("DOCS_SUBDIR", "demo"), ("FREEZE_VERSION", "v0.6.0")],
  )?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("No new development version provided"));
  assert!(stderr(&output).contains("NEW_VERSION"));
  assert!(!site.file_exists("docs/demo/v0.6.0"));

  Ok(())
}

#[test]
fn test_missing_next_navigation_entry_is_fatal() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.write_json("docs.json", &navigation_with(&["OTHER"]))?;
  let nav_before = site.read_file("docs.json")?;

  let output = run_docs_versioner_with_env(&site.path, &["freeze", "--no-fetch"], &FREEZE_ENV)?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("No 'next' version found in navigation for dropdown DEMO"));
  assert_eq!(site.read_file("docs.json")?, nav_before);
  assert!(!site.file_exists("docs/demo/v0.6.0"));
  assert!(!site.file_exists("versions.json"));

  Ok(())
}

#[test]
fn test_freeze_with_root_flag() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.with_release_notes_for("v0.6.0")?;
  let elsewhere = tempfile::TempDir::new()?;
  let root = site.path.to_string_lossy().to_string();

  let output = run_docs_versioner_with_env(
    elsewhere.path(),
    &["--root", &root, "freeze", "--no-fetch"],
    &FREEZE_ENV,
  )?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(site.file_exists("docs/demo/v0.6.0/.version-metadata.json"));

  Ok(())
}
