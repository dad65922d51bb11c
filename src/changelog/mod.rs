//! Release notes pipeline: fetch a changelog, parse it, render MDX
//!
//! - **parser**: Changelog text -> version changesets
//! - **render**: Changesets -> release-notes page
//! - **fetch**: Where changelog text comes from (GitHub, local file)

pub mod fetch;
pub mod parser;
pub mod render;

use crate::core::context::SiteContext;
use crate::core::error::{DocsError, DocsResult};
use crate::core::store;
use fetch::ChangelogSource;
use parser::{BulletStyle, ChangelogParser};
use render::RenderOptions;
use std::fs;
use std::path::PathBuf;

/// Result of regenerating a product's release notes
#[derive(Debug, Clone)]
pub struct ReleaseNotesUpdate {
  pub output: PathBuf,
  pub repo: String,
  /// Concrete ref the changelog was read at
  pub reference: String,
  /// Changelog path that produced the content
  pub changelog_path: String,
  /// Number of `<Update>` blocks written
  pub versions: usize,
}

/// Fetch, parse and render release notes for `subdir` into its `next` tree.
///
/// A changelog without any released version is an error and leaves the existing page alone.
pub fn update_release_notes(
  ctx: &SiteContext,
  subdir: &str,
  source: &str,
  changelog_source: &dyn ChangelogSource,
  style: BulletStyle,
) -> DocsResult<ReleaseNotesUpdate> {
  let repo = ctx.config.repo_for(subdir).to_string();
  let reference = changelog_source.resolve_ref(&repo, source);
  let fetched = changelog_source.fetch(&repo, &reference)?;
  tracing::debug!(
    repo = %repo,
    reference = %reference,
    path = %fetched.path,
    lines = fetched.content.lines().count(),
    "changelog fetched"
  );

  let changesets = ChangelogParser::new(style).parse(&fetched.content);
  tracing::debug!(
    versions = changesets.len(),
    entries = changesets.iter().map(|c| c.entry_count()).sum::<usize>(),
    "changelog parsed"
  );
  if changesets.is_empty() {
    return Err(DocsError::with_help(
      format!("No released versions found in {} ({})", fetched.path, reference),
      "Only version sections with at least one categorized entry are rendered.",
    ));
  }

  let opts = RenderOptions::new(ctx.config.label_for(subdir), repo.clone());
  let content = render::render(&changesets, &opts);
  let output = ctx.release_notes_path(subdir);
  store::write_text(&output, &content)?;

  Ok(ReleaseNotesUpdate {
    output,
    repo,
    reference,
    changelog_path: fetched.path,
    versions: changesets.len(),
  })
}

/// Whether the product's current release notes already mention `version`.
/// A missing page counts as "no".
pub fn release_notes_include(ctx: &SiteContext, subdir: &str, version: &str) -> bool {
  match fs::read_to_string(ctx.release_notes_path(subdir)) {
    Ok(content) => render::includes_version(&content, version),
    Err(_) => false,
  }
}
