use crate::core::error::{ConfigError, DocsError, DocsResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for docs-versioner
/// Searched in order: versioning.toml, .versioning.toml, .config/versioning.toml
///
/// Every section is optional; a site without a config file runs on the defaults below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsConfig {
  #[serde(default)]
  pub paths: PathsConfig,
  #[serde(default)]
  pub release_notes: ReleaseNotesConfig,
  #[serde(default)]
  pub products: BTreeMap<String, ProductConfig>,
  #[serde(default)]
  pub freeze: FreezeConfig,
  #[serde(default)]
  pub snapshot: SnapshotConfig,
}

/// Locations of the documents a freeze reads and writes, relative to the site root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
  #[serde(default = "default_docs_root")]
  pub docs_root: PathBuf,
  #[serde(default = "default_navigation")]
  pub navigation: PathBuf,
  #[serde(default = "default_registry")]
  pub registry: PathBuf,
}

fn default_docs_root() -> PathBuf {
  PathBuf::from("docs")
}

fn default_navigation() -> PathBuf {
  PathBuf::from("docs.json")
}

fn default_registry() -> PathBuf {
  PathBuf::from("versions.json")
}

impl Default for PathsConfig {
  fn default() -> Self {
    Self {
      docs_root: default_docs_root(),
      navigation: default_navigation(),
      registry: default_registry(),
    }
  }
}

/// Where changelogs are fetched from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseNotesConfig {
  /// Raw file host (default: https://raw.githubusercontent.com)
  #[serde(default = "default_raw_base_url")]
  pub raw_base_url: String,

  /// API host used to resolve `latest` (default: https://api.github.com)
  #[serde(default = "default_api_base_url")]
  pub api_base_url: String,

  /// Changelog paths tried in order; the first non-empty one wins
  #[serde(default = "default_candidates")]
  pub candidates: Vec<String>,

  /// Repository used for products without a `[products.<name>]` entry
  #[serde(default = "default_repo")]
  pub default_repo: String,

  /// Per-request timeout in seconds
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_raw_base_url() -> String {
  "https://raw.githubusercontent.com".to_string()
}

fn default_api_base_url() -> String {
  "https://api.github.com".to_string()
}

fn default_candidates() -> Vec<String> {
  [
    "CHANGELOG.md",
    "RELEASE_NOTES.md",
    "RELEASES.md",
    "CHANGELOG/CHANGELOG.md",
    "docs/CHANGELOG.md",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

fn default_repo() -> String {
  "cosmos/evm".to_string()
}

fn default_timeout_secs() -> u64 {
  30
}

impl Default for ReleaseNotesConfig {
  fn default() -> Self {
    Self {
      raw_base_url: default_raw_base_url(),
      api_base_url: default_api_base_url(),
      candidates: default_candidates(),
      default_repo: default_repo(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

/// Per-product settings, keyed by docs subdirectory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
  /// GitHub `owner/name` of the product repository
  pub repo: String,
  /// Display label (default: upper-cased subdirectory)
  #[serde(default)]
  pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreezeConfig {
  /// File extensions whose internal links are repointed after a copy
  #[serde(default = "default_content_extensions")]
  pub content_extensions: Vec<String>,
}

fn default_content_extensions() -> Vec<String> {
  vec!["mdx".to_string()]
}

impl Default for FreezeConfig {
  fn default() -> Self {
    Self {
      content_extensions: default_content_extensions(),
    }
  }
}

/// Tabular (spreadsheet) snapshot settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
  /// The only product that gets a snapshot step
  #[serde(default = "default_snapshot_product")]
  pub product: String,
  #[serde(default = "default_sheet_id")]
  pub sheet_id: String,
  #[serde(default = "default_sheet_base_url")]
  pub base_url: String,
  /// Rows whose key column coerces to 0 are dropped
  #[serde(default = "default_key_column")]
  pub key_column: String,
  #[serde(default = "default_integer_columns")]
  pub integer_columns: Vec<String>,
  #[serde(default = "default_boolean_columns")]
  pub boolean_columns: Vec<String>,
  #[serde(default = "default_dropped_columns")]
  pub dropped_columns: Vec<String>,
}

fn default_snapshot_product() -> String {
  "evm".to_string()
}

fn default_sheet_id() -> String {
  "1OGscheUSh-g15p7mNYjSaxI05E8O_3R3tDK0IwXaczk".to_string()
}

fn default_sheet_base_url() -> String {
  "https://docs.google.com/spreadsheets/d".to_string()
}

fn default_key_column() -> String {
  "eip".to_string()
}

fn default_integer_columns() -> Vec<String> {
  vec!["eip".to_string()]
}

fn default_boolean_columns() -> Vec<String> {
  vec!["critical".to_string()]
}

fn default_dropped_columns() -> Vec<String> {
  vec!["geth".to_string(), "priority".to_string(), "triage".to_string()]
}

impl Default for SnapshotConfig {
  fn default() -> Self {
    Self {
      product: default_snapshot_product(),
      sheet_id: default_sheet_id(),
      base_url: default_sheet_base_url(),
      key_column: default_key_column(),
      integer_columns: default_integer_columns(),
      boolean_columns: default_boolean_columns(),
      dropped_columns: default_dropped_columns(),
    }
  }
}

impl DocsConfig {
  /// Find config file in search order: versioning.toml, .versioning.toml, .config/versioning.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("versioning.toml"),
      path.join(".versioning.toml"),
      path.join(".config").join("versioning.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the site root, falling back to defaults when no file exists
  pub fn load(path: &Path) -> DocsResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(root = %path.display(), "no versioning.toml found, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: DocsConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.validate().map_err(|reason| {
      DocsError::Config(ConfigError::Invalid {
        path: config_path.clone(),
        reason,
      })
    })?;

    Ok(config)
  }

  fn validate(&self) -> Result<(), String> {
    if self.paths.docs_root.as_os_str().is_empty() {
      return Err("paths.docs_root must not be empty".to_string());
    }
    if self.release_notes.candidates.is_empty() {
      return Err("release_notes.candidates must list at least one changelog path".to_string());
    }
    if self.freeze.content_extensions.is_empty() {
      return Err("freeze.content_extensions must list at least one extension".to_string());
    }
    Ok(())
  }

  /// Repository for a product, falling back to `release_notes.default_repo`
  pub fn repo_for(&self, subdir: &str) -> &str {
    self
      .products
      .get(subdir)
      .map(|p| p.repo.as_str())
      .unwrap_or(&self.release_notes.default_repo)
  }

  /// Display label for a product (evm -> EVM)
  pub fn label_for(&self, subdir: &str) -> String {
    self
      .products
      .get(subdir)
      .and_then(|p| p.label.clone())
      .unwrap_or_else(|| subdir.to_uppercase())
  }
}
