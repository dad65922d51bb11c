use crate::core::context::SiteContext;
use crate::core::error::DocsResult;
use crate::freeze::metadata::FrozenVersionMetadata;
use crate::registry::VersionsRegistry;
use crate::version;
use serde::Serialize;

/// Status of a single product
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStatus {
  pub subdir: String,
  pub repo: String,
  pub versions: Vec<String>,
  pub default_version: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next_dev: Option<String>,
  /// Sidecars of frozen versions, newest first
  pub frozen: Vec<FrozenVersionMetadata>,
}

/// Gather per-product status from the registry and the frozen trees
pub fn collect_status(ctx: &SiteContext) -> DocsResult<Vec<ProductStatus>> {
  let registry = VersionsRegistry::load(ctx)?;

  let mut statuses = Vec::new();
  for (subdir, product) in &registry.data.products {
    let mut frozen = Vec::new();
    for label in product.versions.iter().filter(|v| version::validate(v)) {
      if let Some(metadata) = FrozenVersionMetadata::read(&ctx.version_dir(subdir, label))? {
        frozen.push(metadata);
      }
    }

    statuses.push(ProductStatus {
      subdir: subdir.clone(),
      repo: ctx.config.repo_for(subdir).to_string(),
      versions: product.versions.clone(),
      default_version: product.default_version.clone(),
      next_dev: product.next_dev.clone(),
      frozen,
    });
  }
  Ok(statuses)
}

/// Run the status command
pub fn run_status(ctx: &SiteContext, json: bool) -> DocsResult<()> {
  let statuses = collect_status(ctx)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&statuses)?);
    return Ok(());
  }

  if statuses.is_empty() {
    println!("No documented products found under {}", ctx.docs_root().display());
    return Ok(());
  }

  for status in &statuses {
    println!("📦 {} ({})", status.subdir, status.repo);
    println!("   versions: {}", status.versions.join(", "));
    println!("   default: {}", status.default_version);
    if let Some(dev) = &status.next_dev {
      println!("   next development: {}", dev);
    }
    for metadata in &status.frozen {
      println!(
        "   🧊 {} frozen on {} (next was {})",
        metadata.version, metadata.frozen_date, metadata.next_version
      );
    }
    println!();
  }
  Ok(())
}
