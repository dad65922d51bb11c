use crate::core::context::{NEXT_DIR, SiteContext, check_subdir};
use crate::core::error::{DocsError, DocsResult, ValidationError};
use crate::registry::{LoadOutcome, ProductVersions, VersionsRegistry};
use crate::ui;
use crate::version;
use std::collections::BTreeMap;

/// Run `versions list`
pub fn run_versions_list(ctx: &SiteContext, subdir: Option<String>, json: bool) -> DocsResult<()> {
  if let Some(s) = &subdir {
    check_subdir(s)?;
  }
  let registry = VersionsRegistry::load(ctx)?;
  let products: BTreeMap<&String, &ProductVersions> = registry
    .data
    .products
    .iter()
    .filter(|(name, _)| subdir.as_ref().is_none_or(|s| s == *name))
    .collect();

  if json {
    println!("{}", serde_json::to_string_pretty(&products)?);
    return Ok(());
  }

  if registry.outcome() == LoadOutcome::Migrated {
    ui::warning("versions.json is missing or outdated; showing versions found under docs/");
  }
  if products.is_empty() {
    println!("No products registered");
    return Ok(());
  }

  for (name, product) in products {
    println!("📦 {}", name);
    for label in &product.versions {
      let marker = if *label == product.default_version { " (default)" } else { "" };
      println!("   - {}{}", label, marker);
    }
    if let Some(dev) = &product.next_dev {
      println!("   next development: {}", dev);
    }
  }
  Ok(())
}

fn check_label(label: &str) -> DocsResult<()> {
  if label == NEXT_DIR || version::validate(label) {
    Ok(())
  } else {
    Err(DocsError::Validation(ValidationError::VersionFormat {
      role: "registry",
      value: label.to_string(),
    }))
  }
}

/// Run `versions add`
pub fn run_versions_add(ctx: &SiteContext, subdir: String, label: String, make_default: bool) -> DocsResult<()> {
  check_subdir(&subdir)?;
  check_label(&label)?;

  let mut registry = VersionsRegistry::load(ctx)?;
  let added = registry.add(&subdir, &label, make_default);
  registry.save()?;

  if added {
    ui::success(format!("Added {} to {}", label, subdir));
  } else {
    ui::info(format!("{} already lists {}", subdir, label));
  }
  if make_default {
    ui::success(format!("Default version for {} is now {}", subdir, label));
  }
  Ok(())
}

/// Run `versions remove`
pub fn run_versions_remove(ctx: &SiteContext, subdir: String, label: String) -> DocsResult<()> {
  check_subdir(&subdir)?;
  let mut registry = VersionsRegistry::load(ctx)?;
  if !registry.remove(&subdir, &label) {
    return Err(DocsError::with_help(
      format!("{} is not registered for {}", label, subdir),
      "Run `docs-versioner versions list` to see registered versions.",
    ));
  }
  registry.save()?;

  ui::success(format!("Removed {} from {}", label, subdir));
  if let Some(product) = registry.product(&subdir) {
    ui::info(format!("Default version for {}: {}", subdir, product.default_version));
  }
  Ok(())
}
