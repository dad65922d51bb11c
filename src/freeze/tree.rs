//! Copy a product's `next` tree to a version directory and repoint its links
//!
//! The copy always starts from an empty target, so re-running a freeze produces the same
//! tree. The `next` source is only ever read.

use crate::core::context::{NEXT_DIR, SiteContext};
use crate::core::error::{DocsError, DocsResult, ResultExt, ValidationError};
use crate::ui::progress::FileProgress;
use crate::version;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a tree freeze did
#[derive(Debug, Clone)]
pub struct TreeReport {
  pub target: PathBuf,
  /// A previous copy of this version was removed first
  pub replaced: bool,
  pub files_copied: usize,
  /// Content files whose links changed
  pub files_rewritten: usize,
}

/// Repoint links inside one content file from the `next` tree to `version`.
///
/// Also fixes `href="/docs/documentation/` links, which predate per-product trees.
pub fn rewrite_links(content: &str, subdir: &str, version: &str) -> String {
  let from = format!("/docs/{}/{}/", subdir, NEXT_DIR);
  let to = format!("/docs/{}/{}/", subdir, version);
  let bare_href = "href=\"/docs/documentation/";
  let fixed_href = format!("href=\"/docs/{}/{}/documentation/", subdir, version);

  content.replace(&from, &to).replace(bare_href, &fixed_href)
}

/// Copies `docs/<subdir>/next` into `docs/<subdir>/<version>`
pub struct DocsTreeFreezer<'a> {
  ctx: &'a SiteContext,
}

impl<'a> DocsTreeFreezer<'a> {
  pub fn new(ctx: &'a SiteContext) -> Self {
    Self { ctx }
  }

  pub fn freeze(&self, version: &str, subdir: &str) -> DocsResult<TreeReport> {
    if version == NEXT_DIR || !version::validate(version) {
      return Err(DocsError::Validation(ValidationError::Unsupported {
        reason: format!("Refusing to freeze into '{}': not a version label", version),
      }));
    }

    let source = self.ctx.next_dir(subdir);
    if !source.is_dir() {
      return Err(DocsError::with_help(
        format!("No next tree at {}", source.display()),
        format!("Create docs/{}/{}/ before freezing.", subdir, NEXT_DIR),
      ));
    }

    let target = self.ctx.version_dir(subdir, version);
    let replaced = target.exists();
    if replaced {
      fs::remove_dir_all(&target).with_context(|| format!("Failed to remove {}", target.display()))?;
    }
    fs::create_dir_all(&target).with_context(|| format!("Failed to create {}", target.display()))?;

    let files = copy_tree(&source, &target)?;
    tracing::debug!(source = %source.display(), target = %target.display(), files = files.len(), "tree copied");

    let extensions = &self.ctx.config.freeze.content_extensions;
    let content_files: Vec<&PathBuf> = files.iter().filter(|p| has_extension(p, extensions)).collect();

    let progress = FileProgress::new(content_files.len(), format!("Repointing links in {}", version));
    let changed: Vec<bool> = content_files
      .par_iter()
      .map(|path| {
        let result = rewrite_file(path, subdir, version);
        progress.inc();
        result
      })
      .collect::<DocsResult<Vec<bool>>>()?;

    Ok(TreeReport {
      target,
      replaced,
      files_copied: files.len(),
      files_rewritten: changed.into_iter().filter(|c| *c).count(),
    })
  }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
  path
    .extension()
    .and_then(|e| e.to_str())
    .is_some_and(|ext| extensions.iter().any(|want| want.trim_start_matches('.') == ext))
}

/// Copy the contents of `source` into `target`, returning the copied file paths
fn copy_tree(source: &Path, target: &Path) -> DocsResult<Vec<PathBuf>> {
  let mut copied = Vec::new();
  for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
    let entry = entry?;
    let relative = entry.path().strip_prefix(source)?;
    let dest = target.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&dest).with_context(|| format!("Failed to create {}", dest.display()))?;
    } else {
      if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
      }
      fs::copy(entry.path(), &dest)
        .with_context(|| format!("Failed to copy {} to {}", entry.path().display(), dest.display()))?;
      copied.push(dest);
    }
  }
  Ok(copied)
}

fn rewrite_file(path: &Path, subdir: &str, version: &str) -> DocsResult<bool> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let rewritten = rewrite_links(&content, subdir, version);
  if rewritten == content {
    return Ok(false);
  }
  fs::write(path, rewritten).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(true)
}
