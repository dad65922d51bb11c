//! Site navigation (docs.json) maintenance
//!
//! The navigation document groups pages per product under `navigation.dropdowns[]`,
//! each dropdown holding a `versions[]` list. Every product keeps one `next` entry that
//! serves as the template for newly frozen versions.
//!
//! ```json
//! { "navigation": { "dropdowns": [
//!   { "dropdown": "EVM", "versions": [
//!     { "version": "next", "tabs": [ { "groups": [ { "pages": ["docs/evm/next/intro"] } ] } ] }
//!   ] }
//! ] } }
//! ```

pub mod rewrite;

use crate::core::context::{NEXT_DIR, SiteContext};
use crate::core::error::{DocsError, DocsResult, NavigationError, ResultExt};
use crate::core::store;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to the navigation entry of the frozen version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavChange {
  /// New entry placed at the front of the dropdown
  Inserted,
  /// An entry with the same version label was overwritten in place
  Replaced,
}

/// In-memory docs.json, committed with [`NavigationDocument::save`]
#[derive(Debug, Clone)]
pub struct NavigationDocument {
  path: PathBuf,
  doc: Value,
}

/// Dropdown label for a docs subdirectory (evm -> EVM, sdk -> SDK)
pub fn dropdown_label(subdir: &str) -> String {
  subdir.to_uppercase()
}

impl NavigationDocument {
  /// Read and parse docs.json. A missing or unparseable document is an error.
  pub fn load(path: &Path) -> DocsResult<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read navigation from {}", path.display()))?;
    let doc: Value =
      serde_json::from_str(&content).with_context(|| format!("Failed to parse navigation from {}", path.display()))?;

    if !doc.is_object() {
      return Err(DocsError::Navigation(NavigationError::Malformed {
        reason: format!("{} must contain a JSON object", path.display()),
      }));
    }

    Ok(Self::from_value(path, doc))
  }

  /// Wrap an already-parsed document
  pub fn from_value(path: &Path, doc: Value) -> Self {
    Self {
      path: path.to_path_buf(),
      doc,
    }
  }

  pub fn as_value(&self) -> &Value {
    &self.doc
  }

  /// Version labels listed under a product's dropdown, in display order
  pub fn versions_for(&self, subdir: &str) -> Vec<String> {
    let label = dropdown_label(subdir);
    self
      .doc
      .pointer("/navigation/dropdowns")
      .and_then(Value::as_array)
      .and_then(|dropdowns| {
        dropdowns
          .iter()
          .find(|d| d.get("dropdown").and_then(Value::as_str) == Some(label.as_str()))
      })
      .and_then(|d| d.get("versions"))
      .and_then(Value::as_array)
      .map(|versions| {
        versions
          .iter()
          .filter_map(|v| v.get("version").and_then(Value::as_str))
          .map(str::to_string)
          .collect()
      })
      .unwrap_or_default()
  }

  /// Derive the `version` entry from the product's `next` entry and place it in the
  /// dropdown. Fails without touching the document when no `next` entry exists.
  pub fn apply_freeze(&mut self, version: &str, subdir: &str) -> DocsResult<NavChange> {
    let label = dropdown_label(subdir);

    let versioned = {
      let next_entry = find_version_entry(&self.doc, &label, NEXT_DIR).ok_or_else(|| {
        DocsError::Navigation(NavigationError::MissingNext {
          dropdown: label.clone(),
          subdir: subdir.to_string(),
        })
      })?;

      let from = format!("docs/{}/{}/", subdir, NEXT_DIR);
      let to = format!("docs/{}/{}/", subdir, version);
      let mut entry = match rewrite::rewrite(next_entry, &from, &to) {
        Value::Object(map) => map,
        _ => Map::new(),
      };
      entry.shift_remove("version");
      entry.insert("version".to_string(), Value::String(version.to_string()));
      Value::Object(entry)
    };

    let versions = dropdown_versions_mut(&mut self.doc, &label)?;
    let existing = versions
      .iter()
      .position(|v| v.get("version").and_then(Value::as_str) == Some(version));

    match existing {
      Some(index) => {
        versions[index] = versioned;
        Ok(NavChange::Replaced)
      }
      None => {
        versions.insert(0, versioned);
        Ok(NavChange::Inserted)
      }
    }
  }

  /// Commit the document with stable 2-space formatting
  pub fn save(&self) -> DocsResult<()> {
    store::write_json(&self.path, self.as_value())
  }
}

fn find_version_entry<'a>(doc: &'a Value, label: &str, version: &str) -> Option<&'a Value> {
  doc
    .pointer("/navigation/dropdowns")?
    .as_array()?
    .iter()
    .find(|d| d.get("dropdown").and_then(Value::as_str) == Some(label))?
    .get("versions")?
    .as_array()?
    .iter()
    .find(|v| v.get("version").and_then(Value::as_str) == Some(version))
}

/// `navigation.dropdowns[label].versions`, creating any missing level
fn dropdown_versions_mut<'a>(doc: &'a mut Value, label: &str) -> DocsResult<&'a mut Vec<Value>> {
  let root = doc.as_object_mut().ok_or_else(|| {
    DocsError::Navigation(NavigationError::Malformed {
      reason: "document root is not an object".to_string(),
    })
  })?;

  let navigation = root
    .entry("navigation")
    .or_insert_with(|| Value::Object(Map::new()));
  if !navigation.is_object() {
    *navigation = Value::Object(Map::new());
  }
  let navigation = navigation.as_object_mut().ok_or("navigation is not an object")?;

  let dropdowns = navigation
    .entry("dropdowns")
    .or_insert_with(|| Value::Array(Vec::new()));
  if !dropdowns.is_array() {
    *dropdowns = Value::Array(Vec::new());
  }
  let dropdowns = dropdowns.as_array_mut().ok_or("dropdowns is not an array")?;

  let index = match dropdowns
    .iter()
    .position(|d| d.get("dropdown").and_then(Value::as_str) == Some(label))
  {
    Some(index) => index,
    None => {
      let mut fresh = Map::new();
      fresh.insert("dropdown".to_string(), Value::String(label.to_string()));
      fresh.insert("versions".to_string(), Value::Array(Vec::new()));
      dropdowns.push(Value::Object(fresh));
      dropdowns.len() - 1
    }
  };

  let dropdown = dropdowns[index]
    .as_object_mut()
    .ok_or_else(|| format!("dropdown {} is not an object", label))?;
  let versions = dropdown
    .entry("versions")
    .or_insert_with(|| Value::Array(Vec::new()));
  if !versions.is_array() {
    *versions = Value::Array(Vec::new());
  }
  Ok(versions.as_array_mut().ok_or("versions is not an array")?)
}

/// Load docs.json, place the frozen version entry and commit the document
pub fn update_navigation(ctx: &SiteContext, version: &str, subdir: &str) -> DocsResult<NavChange> {
  let mut nav = NavigationDocument::load(&ctx.navigation_path())?;
  let change = nav.apply_freeze(version, subdir)?;
  nav.save()?;
  tracing::debug!(version, subdir, ?change, "navigation updated");
  Ok(change)
}
