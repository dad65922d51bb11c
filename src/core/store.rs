//! Atomic document writes
//!
//! Shared JSON documents (docs.json, versions.json, metadata sidecars) are written to a
//! temporary file in the destination directory and renamed over the target, so an
//! interrupted run never leaves a half-written document behind.

use crate::core::error::{DocsResult, ResultExt};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Serialize `value` with 2-space indentation and a trailing newline
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> DocsResult<String> {
  let mut out = serde_json::to_string_pretty(value)?;
  out.push('\n');
  Ok(out)
}

/// Write `value` as pretty JSON, atomically
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> DocsResult<()> {
  let content = to_pretty_json(value)?;
  write_text(path, &content)
}

/// Write text content atomically, creating parent directories as needed
pub fn write_text(path: &Path, content: &str) -> DocsResult<()> {
  let parent = match path.parent() {
    Some(p) if !p.as_os_str().is_empty() => p,
    _ => Path::new("."),
  };
  fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;

  let mut tmp = tempfile::NamedTempFile::new_in(parent)
    .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
  tmp
    .write_all(content.as_bytes())
    .with_context(|| format!("Failed to write {}", path.display()))?;
  tmp.flush()?;
  tmp
    .persist(path)
    .with_context(|| format!("Failed to write {}", path.display()))?;

  tracing::debug!(path = %path.display(), bytes = content.len(), "document committed");
  Ok(())
}
