//! Frozen version sidecar (`.version-metadata.json`) and `.version-frozen` marker

use crate::core::error::{DocsResult, ResultExt};
use crate::core::store;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const METADATA_FILE: &str = ".version-metadata.json";
pub const MARKER_FILE: &str = ".version-frozen";

/// Written once per freeze next to the frozen tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrozenVersionMetadata {
  pub version: String,
  /// `YYYY-MM-DD`
  pub frozen_date: String,
  /// RFC 3339, millisecond precision
  pub frozen_timestamp: String,
  /// Development label that continues in `next`
  pub next_version: String,
  /// Spreadsheet tab holding this version's EIP data
  pub eip_sheet_tab: String,
}

impl FrozenVersionMetadata {
  pub fn new(version: &str, next_version: &str, now: DateTime<Utc>) -> Self {
    Self {
      version: version.to_string(),
      frozen_date: now.format("%Y-%m-%d").to_string(),
      frozen_timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
      next_version: next_version.to_string(),
      eip_sheet_tab: version.to_string(),
    }
  }

  /// Marker line, e.g. `v0.6.0 - Frozen on 2026-10-19`
  pub fn marker(&self) -> String {
    format!("{} - Frozen on {}", self.version, self.frozen_date)
  }

  /// Write the sidecar and marker into `version_dir`
  pub fn write(&self, version_dir: &Path) -> DocsResult<PathBuf> {
    let path = version_dir.join(METADATA_FILE);
    store::write_json(&path, self)?;
    store::write_text(&version_dir.join(MARKER_FILE), &self.marker())?;
    Ok(path)
  }

  /// Read a sidecar back; `None` when the directory was never frozen
  pub fn read(version_dir: &Path) -> DocsResult<Option<Self>> {
    let path = version_dir.join(METADATA_FILE);
    if !path.exists() {
      return Ok(None);
    }
    let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let metadata =
      serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(metadata))
  }
}
