//! Test helpers for integration tests

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables the binary reads; cleared so the host shell cannot leak in
const INPUT_VARS: [&str; 8] = [
  "DOCS_SUBDIR",
  "SUBDIR",
  "CURRENT_VERSION",
  "FREEZE_VERSION",
  "NEW_VERSION",
  "NON_INTERACTIVE",
  "SKIP_SHEETS",
  "RUST_LOG",
];

/// A throwaway docs site with one product (`demo`)
pub struct TestDocsSite {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestDocsSite {
  /// Site with `docs/demo/next`, a frozen `v0.5.0` and a DEMO navigation dropdown
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    let site = Self { _root: root, path };

    site.write_file(
      "docs/demo/next/index.mdx",
      "# Demo\n\nSee [setup](/docs/demo/next/setup) and <a href=\"/docs/documentation/intro\">intro</a>.\n",
    )?;
    site.write_file("docs/demo/next/setup.mdx", "# Setup\n\nBack to [home](/docs/demo/next/index).\n")?;
    site.write_file("docs/demo/next/images/logo.svg", "<svg>/docs/demo/next/</svg>\n")?;
    site.write_file("docs/demo/v0.5.0/index.mdx", "# Demo v0.5.0\n")?;
    site.write_json("docs.json", &navigation_with(&["DEMO"]))?;

    Ok(site)
  }

  /// Write a file relative to the site root, creating parent directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }

  pub fn write_json(&self, path: &str, value: &Value) -> Result<()> {
    self.write_file(path, &serde_json::to_string_pretty(value)?)
  }

  /// Mark `version` as already present in the demo release notes
  pub fn with_release_notes_for(&self, version: &str) -> Result<()> {
    self.write_file(
      "docs/demo/next/changelog/release-notes.mdx",
      &format!(
        "---\ntitle: \"Release Notes\"\n---\n\n<Update label=\"Oct 1, 2026\" description=\"{}\" tags={{[\"DEMO\", \"Release\"]}}>\n## Features\n* Thing\n</Update>\n",
        version
      ),
    )
  }

  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    std::fs::read_to_string(self.path.join(path)).with_context(|| format!("Failed to read {}", path))
  }

  pub fn read_json(&self, path: &str) -> Result<Value> {
    Ok(serde_json::from_str(&self.read_file(path)?)?)
  }
}

/// docs.json with one dropdown per label, each holding `next` and `v0.5.0`
pub fn navigation_with(labels: &[&str]) -> Value {
  let dropdowns: Vec<Value> = labels
    .iter()
    .map(|label| {
      let subdir = label.to_lowercase();
      json!({
        "dropdown": label,
        "versions": [
          {
            "version": "next",
            "tabs": [{"tab": "Docs", "groups": [{"group": "Start", "pages": [format!("docs/{}/next/index", subdir), format!("docs/{}/next/setup", subdir)]}]}]
          },
          {
            "version": "v0.5.0",
            "tabs": [{"tab": "Docs", "groups": [{"group": "Start", "pages": [format!("docs/{}/v0.5.0/index", subdir)]}]}]
          }
        ]
      })
    })
    .collect();

  json!({"theme": "mint", "name": "Demo Docs", "navigation": {"dropdowns": dropdowns}})
}

/// Run docs-versioner in `cwd` with a clean input environment plus `envs`.
/// Returns the output whether or not the command succeeded.
pub fn run_docs_versioner_with_env(cwd: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_docs-versioner");

  let mut command = Command::new(bin);
  command.current_dir(cwd).args(args);
  for var in INPUT_VARS {
    command.env_remove(var);
  }
  command.envs(envs.iter().copied());

  command.output().context("Failed to run docs-versioner")
}

/// Run docs-versioner and fail unless it exits successfully
pub fn run_docs_versioner(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_docs_versioner_with_env(cwd, args, &[])?;
  if !output.status.success() {
    anyhow::bail!(
      "docs-versioner command failed: docs-versioner {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      String::from_utf8_lossy(&output.stdout),
      String::from_utf8_lossy(&output.stderr)
    );
  }
  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
