//! Unified site context - build once, pass everywhere
//!
//! `SiteContext` resolves the site root and `versioning.toml` once in main.rs and
//! hands every command the same view of where docs, navigation and registry live.
//!
//! ```text
//! main.rs:
//!   SiteContext::build() -> &SiteContext
//!   |
//!   v
//! commands/freeze.rs, versions.rs, etc:
//!   fn run_*(ctx: &SiteContext, ...)
//! ```

use crate::core::config::DocsConfig;
use crate::core::error::{DocsError, DocsResult, ValidationError};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name of the in-development tree for every product
pub const NEXT_DIR: &str = "next";

/// Site-level paths and configuration shared by all commands.
#[derive(Debug, Clone)]
pub struct SiteContext {
  /// Site root directory (where docs.json lives)
  pub root: PathBuf,

  /// Loaded or default configuration
  pub config: DocsConfig,
}

impl SiteContext {
  /// Build the context for a site root, loading versioning.toml if present.
  pub fn build(root: &Path) -> DocsResult<Self> {
    let config = DocsConfig::load(root)?;
    Ok(Self::with_config(root, config))
  }

  /// Build a context around an explicit configuration
  pub fn with_config(root: &Path, config: DocsConfig) -> Self {
    Self {
      root: root.to_path_buf(),
      config,
    }
  }

  /// `<root>/docs`
  pub fn docs_root(&self) -> PathBuf {
    self.root.join(&self.config.paths.docs_root)
  }

  /// `<root>/docs.json`
  pub fn navigation_path(&self) -> PathBuf {
    self.root.join(&self.config.paths.navigation)
  }

  /// `<root>/versions.json`
  pub fn registry_path(&self) -> PathBuf {
    self.root.join(&self.config.paths.registry)
  }

  /// `<root>/docs/<subdir>`
  pub fn product_dir(&self, subdir: &str) -> PathBuf {
    self.docs_root().join(subdir)
  }

  /// `<root>/docs/<subdir>/next`
  pub fn next_dir(&self, subdir: &str) -> PathBuf {
    self.product_dir(subdir).join(NEXT_DIR)
  }

  /// `<root>/docs/<subdir>/<version>`
  pub fn version_dir(&self, subdir: &str, version: &str) -> PathBuf {
    self.product_dir(subdir).join(version)
  }

  /// Release notes page maintained in the `next` tree
  pub fn release_notes_path(&self, subdir: &str) -> PathBuf {
    self.next_dir(subdir).join("changelog").join("release-notes.mdx")
  }

  /// Product subdirectories under the docs root (hidden entries skipped, sorted)
  pub fn list_products(&self) -> DocsResult<Vec<String>> {
    list_subdirs(&self.docs_root())
  }
}

/// Names of visible subdirectories of `dir`, sorted. A missing directory yields none.
pub fn list_subdirs(dir: &Path) -> DocsResult<Vec<String>> {
  if !dir.is_dir() {
    return Ok(Vec::new());
  }

  let mut names = Vec::new();
  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    if !entry.file_type()?.is_dir() {
      continue;
    }
    let name = entry.file_name().to_string_lossy().to_string();
    if !name.starts_with('.') {
      names.push(name);
    }
  }
  names.sort();
  Ok(names)
}

/// Reject subdirectory names that would resolve outside `docs/<name>`
pub fn check_subdir(subdir: &str) -> DocsResult<()> {
  let plain = !subdir.is_empty() && !subdir.starts_with('.') && !subdir.contains(['/', '\\']);
  if plain {
    Ok(())
  } else {
    Err(DocsError::Validation(ValidationError::Unsupported {
      reason: format!("'{}' is not a docs subdirectory name", subdir),
    }))
  }
}
