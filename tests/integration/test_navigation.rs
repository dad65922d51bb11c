//! Tests for the `navigation` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_navigation_inserts_then_replaces() -> Result<()> {
  let site = TestDocsSite::new()?;

  let output = run_docs_versioner(&site.path, &["navigation", "v0.6.0", "--subdir", "demo"])?;
  assert!(stdout(&output).contains("Added v0.6.0"));
  let nav = site.read_json("docs.json")?;
  assert_eq!(nav["navigation"]["dropdowns"][0]["versions"][0]["version"], "v0.6.0");
  let first = site.read_file("docs.json")?;

  let output = run_docs_versioner(&site.path, &["navigation", "v0.6.0", "--subdir", "demo"])?;
  assert!(stdout(&output).contains("Refreshed v0.6.0"));
  assert_eq!(site.read_file("docs.json")?, first);

  Ok(())
}

#[test]
fn test_navigation_rejects_bad_label() -> Result<()> {
  let site = TestDocsSite::new()?;
  let before = site.read_file("docs.json")?;

  let output = run_docs_versioner_with_env(&site.path, &["navigation", "latest", "--subdir", "demo"], &[])?;
  assert_eq!(output.status.code(), Some(3));
  assert_eq!(site.read_file("docs.json")?, before);

  Ok(())
}

#[test]
fn test_navigation_without_docs_json_fails() -> Result<()> {
  let site = TestDocsSite::new()?;
  std::fs::remove_file(site.path.join("docs.json"))?;

  let output = run_docs_versioner_with_env(&site.path, &["navigation", "v0.6.0", "--subdir", "demo"], &[])?;
  assert!(!output.status.success());
  assert!(!site.file_exists("docs.json"));

  Ok(())
}

#[test]
fn test_navigation_rejects_path_like_subdir() -> Result<()> {
  let site = TestDocsSite::new()?;
  let before = site.read_file("docs.json")?;

  let output = run_docs_versioner_with_env(&site.path, &["navigation", "v0.6.0", "--subdir", "../x"], &[])?;
  assert_eq!(output.status.code(), Some(3));
  assert_eq!(site.read_file("docs.json")?, before);

  Ok(())
}
