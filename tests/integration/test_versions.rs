//! Tests for the `versions` commands

use crate::helpers::*;
use anyhow::Result;
use serde_json::json;

#[test]
fn test_list_scans_docs_tree_without_registry() -> Result<()> {
  let site = TestDocsSite::new()?;

  let output = run_docs_versioner(&site.path, &["versions", "list", "--json"])?;
  let listed: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(listed["demo"]["versions"], json!(["next", "v0.5.0"]));
  assert_eq!(listed["demo"]["defaultVersion"], "next");
  // listing never writes
  assert!(!site.file_exists("versions.json"));

  Ok(())
}

#[test]
fn test_add_and_remove_versions() -> Result<()> {
  let site = TestDocsSite::new()?;

  run_docs_versioner(&site.path, &["versions", "add", "demo", "v0.4.x"])?;
  run_docs_versioner(&site.path, &["versions", "add", "demo", "v0.5.1", "--make-default"])?;
  let registry = site.read_json("versions.json")?;
  assert_eq!(
    registry["products"]["demo"]["versions"],
    json!(["next", "v0.5.1", "v0.5.0", "v0.4.x"])
  );
  assert_eq!(registry["products"]["demo"]["defaultVersion"], "v0.5.1");

  // removing the default re-points it at next
  run_docs_versioner(&site.path, &["versions", "remove", "demo", "v0.5.1"])?;
  let registry = site.read_json("versions.json")?;
  assert_eq!(registry["products"]["demo"]["versions"], json!(["next", "v0.5.0", "v0.4.x"]));
  assert_eq!(registry["products"]["demo"]["defaultVersion"], "next");

  Ok(())
}

#[test]
fn test_remove_unknown_version_fails() -> Result<()> {
  let site = TestDocsSite::new()?;

  let output = run_docs_versioner_with_env(&site.path, &["versions", "remove", "demo", "v9.9.9"], &[])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("v9.9.9 is not registered for demo"));
  assert!(!site.file_exists("versions.json"));

  Ok(())
}

#[test]
fn test_add_rejects_bad_label() -> Result<()> {
  let site = TestDocsSite::new()?;

  let output = run_docs_versioner_with_env(&site.path, &["versions", "add", "demo", "stable"], &[])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(!site.file_exists("versions.json"));

  Ok(())
}

#[test]
fn test_legacy_registry_is_migrated() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.write_json("versions.json", &json!({"versions": ["main", "v0.5.0"], "defaultVersion": "main"}))?;

  run_docs_versioner(&site.path, &["versions", "add", "demo", "v0.4.0"])?;
  let registry = site.read_json("versions.json")?;
  assert_eq!(registry["products"]["demo"]["versions"], json!(["next", "v0.5.0", "v0.4.0"]));

  Ok(())
}

#[test]
fn test_path_like_subdir_is_rejected() -> Result<()> {
  let site = TestDocsSite::new()?;

  for args in [
    &["versions", "add", "../x", "v0.6.0"][..],
    &["versions", "remove", "../x", "v0.5.0"][..],
    &["versions", "list", "--subdir", "../x"][..],
    &["snapshot", "v0.5.0", "--subdir", "../x"][..],
  ] {
    let output = run_docs_versioner_with_env(&site.path, args, &[])?;
    assert_eq!(output.status.code(), Some(3), "{:?}", args);
  }
  assert!(!site.file_exists("versions.json"));
  assert!(!site.file_exists("x"));

  Ok(())
}
