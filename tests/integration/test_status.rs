//! Tests for the `status` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_status_reports_frozen_metadata() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.with_release_notes_for("v0.6.0")?;

  run_docs_versioner_with_env(
    &site.path,
    &["freeze", "--non-interactive", "--no-fetch", "--skip-sheets"],
    &[("DOCS_SUBDIR", "demo"), ("FREEZE_VERSION", "v0.6.0"), ("NEW_VERSION", "v0.7.0")],
  )?;

  let output = run_docs_versioner(&site.path, &["status", "--json"])?;
  let status: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let demo = &status[0];
  assert_eq!(demo["subdir"], "demo");
  assert_eq!(demo["repo"], "cosmos/evm");
  assert_eq!(demo["nextDev"], "v0.7.0");
  assert_eq!(demo["frozen"].as_array().map(Vec::len), Some(1));
  assert_eq!(demo["frozen"][0]["version"], "v0.6.0");

  let output = run_docs_versioner(&site.path, &["status"])?;
  assert!(stdout(&output).contains("📦 demo (cosmos/evm)"));
  assert!(stdout(&output).contains("next development: v0.7.0"));

  Ok(())
}

#[test]
fn test_status_uses_configured_repository() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.write_file("versioning.toml", "[products.demo]\nrepo = \"acme/demo\"\n")?;

  let output = run_docs_versioner(&site.path, &["status"])?;
  assert!(stdout(&output).contains("📦 demo (acme/demo)"));

  Ok(())
}
