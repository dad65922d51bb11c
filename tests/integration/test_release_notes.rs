//! Tests for the `release-notes` command (offline, via --from-file)

use crate::helpers::*;
use anyhow::Result;

const CHANGELOG: &str = r#"# CHANGELOG

## UNRELEASED

### FEATURES
- Work in progress

## [v0.6.0](https://github.com/cosmos/evm/releases/tag/v0.6.0) - 2026-10-01

### BUG FIXES
* [\#42](https://github.com/cosmos/evm/pull/42) Fix gas refund <!-- internal -->

### FEATURES
- [\#40](https://github.com/cosmos/evm/pull/40) Add precompile

## v0.5.0 - 2026-06-15

### API-BREAKING
- Rename module
"#;

#[test]
fn test_release_notes_from_file() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.write_file("CHANGELOG.md", CHANGELOG)?;

  let output = run_docs_versioner(&site.path, &["release-notes", "--subdir", "demo", "--from-file", "CHANGELOG.md"])?;
  assert!(stdout(&output).contains("Release notes updated"));
  assert!(stdout(&output).contains("of cosmos/evm"));

  let notes = site.read_file("docs/demo/next/changelog/release-notes.mdx")?;
  assert!(notes.starts_with("---\n"));
  assert!(notes.contains("description=\"v0.6.0\""));
  assert!(notes.contains("label=\"Oct 1, 2026\""));
  assert!(notes.contains("description=\"v0.5.0\""));
  assert!(notes.contains("{/* internal */}"));
  assert!(!notes.contains("<!--"));
  assert!(!notes.contains("Work in progress"));
  // newest first
  assert!(notes.find("v0.6.0").unwrap() < notes.find("v0.5.0").unwrap());

  Ok(())
}

#[test]
fn test_release_notes_subdir_from_environment() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.write_file("CHANGELOG.md", CHANGELOG)?;

  let output = run_docs_versioner_with_env(
    &site.path,
    &["release-notes", "--from-file", "CHANGELOG.md"],
    &[("DOCS_SUBDIR", "demo")],
  )?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(site.file_exists("docs/demo/next/changelog/release-notes.mdx"));

  Ok(())
}

#[test]
fn test_changelog_without_releases_keeps_existing_page() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.with_release_notes_for("v0.5.0")?;
  let before = site.read_file("docs/demo/next/changelog/release-notes.mdx")?;
  site.write_file("CHANGELOG.md", "# CHANGELOG\n\n## UNRELEASED\n\n### FEATURES\n- soon\n")?;

  let output = run_docs_versioner_with_env(
    &site.path,
    &["release-notes", "--subdir", "demo", "--from-file", "CHANGELOG.md"],
    &[],
  )?;
  assert!(!output.status.success());
  assert_eq!(site.read_file("docs/demo/next/changelog/release-notes.mdx")?, before);

  Ok(())
}

#[test]
fn test_missing_changelog_file_fails() -> Result<()> {
  let site = TestDocsSite::new()?;

  let output = run_docs_versioner_with_env(
    &site.path,
    &["release-notes", "--subdir", "demo", "--from-file", "NOPE.md"],
    &[],
  )?;
  assert!(!output.status.success());
  assert!(stderr(&output).contains("NOPE.md"));

  Ok(())
}

#[test]
fn test_path_like_subdir_is_rejected() -> Result<()> {
  let site = TestDocsSite::new()?;
  site.write_file("CHANGELOG.md", CHANGELOG)?;

  let output = run_docs_versioner_with_env(
    &site.path,
    &["release-notes", "--subdir", "../x", "--from-file", "CHANGELOG.md"],
    &[],
  )?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("not a docs subdirectory name"));
  assert!(!site.file_exists("x"));

  Ok(())
}
