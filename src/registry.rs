//! Versions registry (versions.json)
//!
//! Per-product list of published versions plus the default and upcoming development
//! labels:
//!
//! ```json
//! { "products": { "evm": { "versions": ["next", "v0.5.0", "v0.4.x"], "defaultVersion": "next", "nextDev": "v0.6.0" } } }
//! ```
//!
//! Older sites kept a flat `{ "versions": [...] }` document. Anything that is not in the
//! per-product shape is rebuilt from the directories under the docs root.

use crate::core::context::{NEXT_DIR, SiteContext, list_subdirs};
use crate::core::error::{DocsError, DocsResult};
use crate::core::store;
use crate::version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Registry document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryData {
  #[serde(default)]
  pub products: BTreeMap<String, ProductVersions>,

  /// Unknown top-level keys, written back untouched
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// One product's entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVersions {
  #[serde(default)]
  pub versions: Vec<String>,

  #[serde(default = "default_version")]
  pub default_version: String,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub next_dev: Option<String>,

  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

fn default_version() -> String {
  NEXT_DIR.to_string()
}

impl Default for ProductVersions {
  fn default() -> Self {
    Self {
      versions: Vec::new(),
      default_version: default_version(),
      next_dev: None,
      extra: Map::new(),
    }
  }
}

impl ProductVersions {
  pub fn contains(&self, label: &str) -> bool {
    self.versions.iter().any(|v| v == label)
  }

  /// Record a freeze: keep `next` when its tree exists, add the frozen label, track the
  /// next development label when it is valid. Calling it twice changes nothing.
  pub fn record_freeze(&mut self, freeze_version: &str, new_dev: Option<&str>, has_next_tree: bool) {
    if has_next_tree && !self.contains(NEXT_DIR) {
      self.versions.push(NEXT_DIR.to_string());
    }
    if !freeze_version.is_empty() && !self.contains(freeze_version) {
      self.versions.push(freeze_version.to_string());
    }
    self.normalize();

    if let Some(dev) = new_dev
      && version::validate(dev)
    {
      self.next_dev = Some(dev.to_string());
    }
  }

  /// Add a label. Returns false when it was already listed.
  pub fn add(&mut self, label: &str, make_default: bool) -> bool {
    let added = !self.contains(label);
    if added {
      self.versions.push(label.to_string());
      self.normalize();
    }
    if make_default {
      self.default_version = label.to_string();
    }
    added
  }

  /// Remove a label, re-pointing the default if it was removed.
  pub fn remove(&mut self, label: &str) -> bool {
    let before = self.versions.len();
    self.versions.retain(|v| v != label);
    let removed = self.versions.len() != before;
    self.normalize();
    removed
  }

  /// Non-numeric labels keep their relative order up front; concrete versions follow
  /// newest-first. A default that is no longer listed falls back to `next`, then the
  /// newest version, and finally `next` again for an empty list.
  pub fn normalize(&mut self) {
    let mut seen = Vec::with_capacity(self.versions.len());
    for label in self.versions.drain(..) {
      if !seen.contains(&label) {
        seen.push(label);
      }
    }

    let (mut numbered, rest): (Vec<String>, Vec<String>) =
      seen.into_iter().partition(|v| v != NEXT_DIR && version::validate(v));
    numbered.sort_by(|a, b| version::compare_desc(a, b));

    self.versions = rest;
    self.versions.extend(numbered);
    self.ensure_default();
  }

  fn ensure_default(&mut self) {
    if self.contains(&self.default_version) {
      return;
    }
    let fallback = if self.contains(NEXT_DIR) {
      Some(NEXT_DIR)
    } else {
      version::newest(self.versions.iter().map(String::as_str)).or(self.versions.first().map(String::as_str))
    };
    self.default_version = fallback.unwrap_or(NEXT_DIR).to_string();
  }
}

/// How the registry in memory came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
  /// File was already in the per-product shape
  Current,
  /// Rebuilt from the docs tree (missing, legacy or corrupt file)
  Migrated,
}

/// Turn whatever versions.json held into the per-product shape.
///
/// Errors are unrecoverable documents (`products` present but unusable) or a docs tree
/// that cannot be scanned.
pub fn migrate(raw: &Value, docs_root: &Path) -> DocsResult<(RegistryData, LoadOutcome)> {
  if raw.get("products").is_some_and(Value::is_object) {
    let data: RegistryData = serde_json::from_value(raw.clone())
      .map_err(|e| DocsError::message(format!("versions.json has an unusable products map: {}", e)))?;
    return Ok((data, LoadOutcome::Current));
  }

  let mut products = BTreeMap::new();
  for subdir in list_subdirs(docs_root)? {
    let entries = list_subdirs(&docs_root.join(&subdir))?;
    let has_next = entries.iter().any(|e| e == NEXT_DIR);

    let mut product = ProductVersions::default();
    if has_next {
      product.versions.push(NEXT_DIR.to_string());
    }
    product
      .versions
      .extend(entries.into_iter().filter(|e| version::validate(e)));
    product.normalize();
    products.insert(subdir, product);
  }

  Ok((
    RegistryData {
      products,
      extra: Map::new(),
    },
    LoadOutcome::Migrated,
  ))
}

/// versions.json bound to a site
#[derive(Debug, Clone)]
pub struct VersionsRegistry {
  path: PathBuf,
  docs_root: PathBuf,
  outcome: LoadOutcome,
  pub data: RegistryData,
}

impl VersionsRegistry {
  /// Load the registry. A missing, unreadable or corrupt file is logged and replaced by
  /// a directory scan; only a failing scan is an error.
  pub fn load(ctx: &SiteContext) -> DocsResult<Self> {
    let path = ctx.registry_path();
    let docs_root = ctx.docs_root();

    let raw = match fs::read_to_string(&path) {
      Ok(text) => match serde_json::from_str::<Value>(&text) {
        Ok(value) => value,
        Err(e) => {
          tracing::warn!(path = %path.display(), error = %e, "versions registry is corrupt, rebuilding from docs tree");
          Value::Null
        }
      },
      Err(e) if e.kind() == io::ErrorKind::NotFound => Value::Null,
      Err(e) => {
        tracing::warn!(path = %path.display(), error = %e, "versions registry is unreadable, rebuilding from docs tree");
        Value::Null
      }
    };

    let (data, outcome) = match migrate(&raw, &docs_root) {
      Ok(migrated) => migrated,
      Err(e) => {
        tracing::warn!(path = %path.display(), error = %e, "discarding versions registry");
        migrate(&Value::Null, &docs_root)?
      }
    };
    tracing::debug!(path = %path.display(), ?outcome, products = data.products.len(), "versions registry loaded");

    Ok(Self {
      path,
      docs_root,
      outcome,
      data,
    })
  }

  pub fn outcome(&self) -> LoadOutcome {
    self.outcome
  }

  pub fn product(&self, subdir: &str) -> Option<&ProductVersions> {
    self.data.products.get(subdir)
  }

  /// Record a freeze for `subdir`, creating the product entry if needed
  pub fn update(&mut self, subdir: &str, freeze_version: &str, new_dev: Option<&str>) -> &ProductVersions {
    let has_next_tree = self.docs_root.join(subdir).join(NEXT_DIR).is_dir();
    let product = self.data.products.entry(subdir.to_string()).or_default();
    product.record_freeze(freeze_version, new_dev, has_next_tree);
    product
  }

  pub fn add(&mut self, subdir: &str, label: &str, make_default: bool) -> bool {
    self
      .data
      .products
      .entry(subdir.to_string())
      .or_default()
      .add(label, make_default)
  }

  /// Remove `label` from `subdir`; false when the product or label is unknown
  pub fn remove(&mut self, subdir: &str, label: &str) -> bool {
    self
      .data
      .products
      .get_mut(subdir)
      .is_some_and(|product| product.remove(label))
  }

  /// Write back with 2-space indentation and a trailing newline
  pub fn save(&self) -> DocsResult<()> {
    store::write_json(&self.path, &self.data)
  }
}

/// Load, record the freeze and save
pub fn update_registry(
  ctx: &SiteContext,
  subdir: &str,
  freeze_version: &str,
  new_dev: Option<&str>,
) -> DocsResult<ProductVersions> {
  let mut registry = VersionsRegistry::load(ctx)?;
  let product = registry.update(subdir, freeze_version, new_dev).clone();
  registry.save()?;
  Ok(product)
}
