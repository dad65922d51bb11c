use crate::changelog::fetch::{ChangelogSource, GitHubSource, LocalFileSource};
use crate::changelog::parser::BulletStyle;
use crate::changelog::update_release_notes;
use crate::core::context::{SiteContext, check_subdir};
use crate::core::error::DocsResult;
use crate::freeze::input::SUBDIR_VARS;
use crate::ui;
use crate::utils;
use std::path::PathBuf;

/// Product used when neither `--subdir` nor the environment names one
pub const DEFAULT_SUBDIR: &str = "evm";

/// Run the release-notes command
///
/// `source` is `latest`, a tag or a branch of the product repository. `from_file` reads a
/// local changelog instead and never touches the network.
pub fn run_release_notes(
  ctx: &SiteContext,
  source: String,
  subdir: Option<String>,
  from_file: Option<PathBuf>,
  strict: bool,
) -> DocsResult<()> {
  let subdir = subdir
    .or_else(|| utils::env_first(&SUBDIR_VARS))
    .unwrap_or_else(|| DEFAULT_SUBDIR.to_string());
  check_subdir(&subdir)?;
  let style = if strict { BulletStyle::Strict } else { BulletStyle::Lenient };

  let changelog: Box<dyn ChangelogSource> = match &from_file {
    Some(path) => Box::new(LocalFileSource::new(path)),
    None => Box::new(GitHubSource::new(&ctx.config.release_notes)),
  };

  ui::info(format!(
    "Fetching changelog from {} ({})...",
    ctx.config.repo_for(&subdir),
    from_file
      .as_ref()
      .map(|p| p.display().to_string())
      .unwrap_or_else(|| source.clone())
  ));
  let update = update_release_notes(ctx, &subdir, &source, changelog.as_ref(), style)?;

  ui::success(format!(
    "Release notes updated at {} ({} versions from {} of {} @ {})",
    update.output.display(),
    update.versions,
    update.changelog_path,
    update.repo,
    update.reference
  ));
  Ok(())
}
