use crate::core::context::{SiteContext, check_subdir};
use crate::core::error::{DocsError, DocsResult, ValidationError};
use crate::sheets::{GvizSource, snapshot_version};
use crate::ui;
use crate::version;
use chrono::Utc;

/// Run the snapshot command against an already frozen version
pub fn run_snapshot(ctx: &SiteContext, version: String, subdir: Option<String>) -> DocsResult<()> {
  if !version::validate(&version) {
    return Err(DocsError::Validation(ValidationError::VersionFormat {
      role: "snapshot",
      value: version,
    }));
  }

  let subdir = subdir.unwrap_or_else(|| ctx.config.snapshot.product.clone());
  check_subdir(&subdir)?;
  let version_dir = ctx.version_dir(&subdir, &version);
  if !version_dir.is_dir() {
    return Err(DocsError::with_help(
      format!("{} has not been frozen (missing {})", version, version_dir.display()),
      "Run `docs-versioner freeze` first.",
    ));
  }

  ui::info(format!("Snapshotting EIP data for {}...", version));
  let source = GvizSource::new(&ctx.config.snapshot, ctx.config.release_notes.timeout_secs);
  let report = snapshot_version(ctx, &version, &subdir, &source, Utc::now())?;

  ui::success(format!(
    "Saved {} rows to {}",
    report.rows,
    report.snapshot_path.display()
  ));
  ui::success(format!("EIP reference written to {}", report.reference_path.display()));
  Ok(())
}
