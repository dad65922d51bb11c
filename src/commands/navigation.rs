use crate::core::context::{SiteContext, check_subdir};
use crate::core::error::{DocsError, DocsResult, ValidationError};
use crate::navigation::{NavChange, update_navigation};
use crate::ui;
use crate::version;

/// Run the navigation command: add (or refresh) `version` in the product's dropdown
pub fn run_navigation(ctx: &SiteContext, version: String, subdir: String) -> DocsResult<()> {
  check_subdir(&subdir)?;
  if !version::validate(&version) {
    return Err(DocsError::Validation(ValidationError::VersionFormat {
      role: "navigation",
      value: version,
    }));
  }

  match update_navigation(ctx, &version, &subdir)? {
    NavChange::Inserted => ui::success(format!("Added {} to the {} dropdown", version, subdir)),
    NavChange::Replaced => ui::success(format!("Refreshed {} in the {} dropdown", version, subdir)),
  }
  Ok(())
}
