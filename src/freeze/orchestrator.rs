//! The freeze workflow
//!
//! ```text
//! SelectProduct -> SelectFreezeVersion -> SelectNextDevVersion      (resolve_request)
//!   -> EnsureReleaseNotes -> FreezeContent -> [ExternalSnapshot]
//!   -> UpdateNavigation -> UpdateRegistry -> WriteMetadata -> Done   (Orchestrator::run)
//! ```
//!
//! All operator input is validated before the first write. Release notes and the EIP
//! snapshot are optional: their failures are reported and the freeze carries on. A missing
//! `next` navigation entry is checked up front and is fatal.

use super::input::{FREEZE_VERSION_VARS, NEW_VERSION_VAR, OperatorInput, SUBDIR_VARS};
use super::metadata::FrozenVersionMetadata;
use super::tree::{DocsTreeFreezer, TreeReport};
use crate::changelog::{self, fetch::ChangelogSource, parser::BulletStyle};
use crate::core::context::{NEXT_DIR, SiteContext, check_subdir};
use crate::core::error::{DocsError, DocsResult, NavigationError, ValidationError};
use crate::navigation::{NavChange, NavigationDocument, dropdown_label};
use crate::registry::{VersionsRegistry, update_registry};
use crate::sheets::{self, TabularSource};
use crate::ui;
use crate::version;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

/// Workflow states, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FreezeStep {
  SelectProduct,
  SelectFreezeVersion,
  SelectNextDevVersion,
  EnsureReleaseNotes,
  FreezeContent,
  ExternalSnapshot,
  UpdateNavigation,
  UpdateRegistry,
  WriteMetadata,
  Done,
}

impl FreezeStep {
  /// The state that follows this one
  pub fn next(self) -> Self {
    match self {
      FreezeStep::SelectProduct => FreezeStep::SelectFreezeVersion,
      FreezeStep::SelectFreezeVersion => FreezeStep::SelectNextDevVersion,
      FreezeStep::SelectNextDevVersion => FreezeStep::EnsureReleaseNotes,
      FreezeStep::EnsureReleaseNotes => FreezeStep::FreezeContent,
      FreezeStep::FreezeContent => FreezeStep::ExternalSnapshot,
      FreezeStep::ExternalSnapshot => FreezeStep::UpdateNavigation,
      FreezeStep::UpdateNavigation => FreezeStep::UpdateRegistry,
      FreezeStep::UpdateRegistry => FreezeStep::WriteMetadata,
      FreezeStep::WriteMetadata | FreezeStep::Done => FreezeStep::Done,
    }
  }
}

impl fmt::Display for FreezeStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      FreezeStep::SelectProduct => "select product",
      FreezeStep::SelectFreezeVersion => "select freeze version",
      FreezeStep::SelectNextDevVersion => "select next development version",
      FreezeStep::EnsureReleaseNotes => "ensure release notes",
      FreezeStep::FreezeContent => "freeze content",
      FreezeStep::ExternalSnapshot => "EIP snapshot",
      FreezeStep::UpdateNavigation => "update navigation",
      FreezeStep::UpdateRegistry => "update registry",
      FreezeStep::WriteMetadata => "write metadata",
      FreezeStep::Done => "done",
    };
    write!(f, "{}", name)
  }
}

/// Values given on the command line; they win over prompts and the environment
#[derive(Debug, Clone, Default)]
pub struct FreezeOptions {
  pub subdir: Option<String>,
  pub version: Option<String>,
  pub next_dev: Option<String>,
  /// Never fetch release notes
  pub no_fetch: bool,
  /// Never run the EIP snapshot
  pub skip_sheets: bool,
}

/// A fully validated freeze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreezeRequest {
  pub subdir: String,
  pub version: String,
  pub next_dev: String,
  pub fetch_release_notes: bool,
  pub run_snapshot: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn check_label(role: &'static str, value: &str) -> DocsResult<()> {
  if version::validate(value) {
    Ok(())
  } else {
    Err(DocsError::Validation(ValidationError::VersionFormat {
      role,
      value: value.to_string(),
    }))
  }
}

/// Run the selection states and validate everything before anything is written
pub fn resolve_request(
  ctx: &SiteContext,
  input: &mut dyn OperatorInput,
  opts: &FreezeOptions,
) -> DocsResult<FreezeRequest> {
  tracing::debug!(step = %FreezeStep::SelectProduct, "freeze step");
  let choices = ctx.list_products()?;
  let subdir = match non_empty(opts.subdir.clone()) {
    Some(s) => s,
    None => non_empty(input.product(&choices)?).ok_or_else(|| {
      DocsError::Validation(ValidationError::MissingInput {
        what: "docs subdirectory",
        env: SUBDIR_VARS[0],
      })
    })?,
  };
  check_subdir(&subdir)?;
  if !choices.contains(&subdir) {
    ui::warning(format!("Subdirectory \"{}\" not found under docs/. Proceeding anyway.", subdir));
  }

  let registry = VersionsRegistry::load(ctx)?;
  let product = registry.product(&subdir).cloned();
  match &product {
    Some(p) => {
      println!("\n📦 Product versions (from versions.json):");
      println!("   - versions: {}", p.versions.join(", "));
      println!("   - defaultVersion: {}", p.default_version);
      if let Some(dev) = &p.next_dev {
        println!("   - nextDev: {}", dev);
      }
      println!();
    }
    None => ui::warning("No product entry found in versions.json for this subdir. A new entry will be created."),
  }

  tracing::debug!(step = %FreezeStep::SelectFreezeVersion, subdir = %subdir, "freeze step");
  let version = match non_empty(opts.version.clone()) {
    Some(v) => v,
    None => non_empty(input.freeze_version()?).ok_or_else(|| {
      DocsError::Validation(ValidationError::MissingInput {
        what: "freeze version",
        env: FREEZE_VERSION_VARS[1],
      })
    })?,
  };
  check_label("freeze", &version)?;

  tracing::debug!(step = %FreezeStep::SelectNextDevVersion, version = %version, "freeze step");
  let suggested = product.as_ref().and_then(|p| p.next_dev.clone());
  let next_dev = match non_empty(opts.next_dev.clone()) {
    Some(v) => v,
    None => non_empty(input.next_dev_version(suggested.as_deref())?).ok_or_else(|| {
      DocsError::Validation(ValidationError::MissingInput {
        what: "new development version",
        env: NEW_VERSION_VAR,
      })
    })?,
  };
  check_label("new development", &next_dev)?;

  let fetch_release_notes = !opts.no_fetch && input.fetch_release_notes()?;
  let run_snapshot = subdir == ctx.config.snapshot.product && !opts.skip_sheets && input.run_snapshot()?;

  Ok(FreezeRequest {
    subdir,
    version,
    next_dev,
    fetch_release_notes,
    run_snapshot,
  })
}

/// How an optional step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
  Completed,
  Skipped,
  /// Step failed softly; the freeze continued
  Failed(String),
}

/// What a freeze did, step by step
#[derive(Debug, Clone)]
pub struct FreezeSummary {
  pub request: FreezeRequest,
  pub release_notes: StepStatus,
  pub tree: Option<TreeReport>,
  pub snapshot: StepStatus,
  pub navigation: Option<NavChange>,
  pub registry: bool,
  pub metadata: Option<PathBuf>,
}

impl FreezeSummary {
  fn new(request: FreezeRequest) -> Self {
    Self {
      request,
      release_notes: StepStatus::Skipped,
      tree: None,
      snapshot: StepStatus::Skipped,
      navigation: None,
      registry: false,
      metadata: None,
    }
  }

  /// Steps that finished, in order
  pub fn completed_steps(&self) -> Vec<FreezeStep> {
    let mut steps = Vec::new();
    if self.release_notes == StepStatus::Completed {
      steps.push(FreezeStep::EnsureReleaseNotes);
    }
    if self.tree.is_some() {
      steps.push(FreezeStep::FreezeContent);
    }
    if self.snapshot == StepStatus::Completed {
      steps.push(FreezeStep::ExternalSnapshot);
    }
    if self.navigation.is_some() {
      steps.push(FreezeStep::UpdateNavigation);
    }
    if self.registry {
      steps.push(FreezeStep::UpdateRegistry);
    }
    if self.metadata.is_some() {
      steps.push(FreezeStep::WriteMetadata);
    }
    steps
  }
}

/// Sequences the mutating states of a freeze
pub struct Orchestrator<'a> {
  ctx: &'a SiteContext,
  changelog: &'a dyn ChangelogSource,
  sheets: &'a dyn TabularSource,
  now: DateTime<Utc>,
}

impl<'a> Orchestrator<'a> {
  pub fn new(
    ctx: &'a SiteContext,
    changelog: &'a dyn ChangelogSource,
    sheets: &'a dyn TabularSource,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      ctx,
      changelog,
      sheets,
      now,
    }
  }

  pub fn run(&self, request: FreezeRequest) -> DocsResult<FreezeSummary> {
    let subdir = request.subdir.clone();
    let version = request.version.clone();
    let mut summary = FreezeSummary::new(request);

    let mut nav = self.preflight(&subdir)?;

    let mut step = FreezeStep::EnsureReleaseNotes;
    while step != FreezeStep::Done {
      tracing::debug!(%step, subdir = %subdir, version = %version, "freeze step");
      match step {
        FreezeStep::EnsureReleaseNotes => summary.release_notes = self.ensure_release_notes(&summary.request),
        FreezeStep::FreezeContent => {
          ui::info("Creating version directory and updating internal links...");
          let report = DocsTreeFreezer::new(self.ctx)
            .freeze(&version, &subdir)
            .map_err(|e| e.context(format!("Version freeze failed during {}", step)))?;
          ui::success(format!(
            "Documentation {} {} ({} files, {} with repointed links)",
            if report.replaced { "replaced at" } else { "copied to" },
            report.target.display(),
            report.files_copied,
            report.files_rewritten
          ));
          summary.tree = Some(report);
        }
        FreezeStep::ExternalSnapshot => summary.snapshot = self.external_snapshot(&summary.request),
        FreezeStep::UpdateNavigation => {
          let change = nav.apply_freeze(&version, &subdir)?;
          nav
            .save()
            .map_err(|e| e.context(format!("Version freeze failed during {}", step)))?;
          ui::success(format!("Navigation updated for version {}", version));
          summary.navigation = Some(change);
        }
        FreezeStep::UpdateRegistry => {
          let product = update_registry(self.ctx, &subdir, &version, Some(&summary.request.next_dev))
            .map_err(|e| e.context(format!("Version freeze failed during {}", step)))?;
          ui::success(format!(
            "Versions registry updated for {} (default: {})",
            subdir, product.default_version
          ));
          summary.registry = true;
        }
        FreezeStep::WriteMetadata => {
          let metadata = FrozenVersionMetadata::new(&version, &summary.request.next_dev, self.now);
          let path = metadata
            .write(&self.ctx.version_dir(&subdir, &version))
            .map_err(|e| e.context(format!("Version freeze failed during {}", step)))?;
          ui::success("Version metadata created");
          summary.metadata = Some(path);
        }
        FreezeStep::SelectProduct
        | FreezeStep::SelectFreezeVersion
        | FreezeStep::SelectNextDevVersion
        | FreezeStep::Done => {}
      }
      step = step.next();
    }

    Ok(summary)
  }

  /// Structural checks that must pass before anything is written
  fn preflight(&self, subdir: &str) -> DocsResult<NavigationDocument> {
    let nav = NavigationDocument::load(&self.ctx.navigation_path())?;
    if !nav.versions_for(subdir).iter().any(|v| v == NEXT_DIR) {
      return Err(DocsError::Navigation(NavigationError::MissingNext {
        dropdown: dropdown_label(subdir),
        subdir: subdir.to_string(),
      }));
    }

    let next_dir = self.ctx.next_dir(subdir);
    if !next_dir.is_dir() {
      return Err(DocsError::with_help(
        format!("No next tree at {}", next_dir.display()),
        format!("Create docs/{}/{}/ before freezing.", subdir, NEXT_DIR),
      ));
    }
    Ok(nav)
  }

  fn ensure_release_notes(&self, request: &FreezeRequest) -> StepStatus {
    let (subdir, version) = (request.subdir.as_str(), request.version.as_str());
    if changelog::release_notes_include(self.ctx, subdir, version) {
      ui::success(format!("Release notes already include {}", version));
      return StepStatus::Completed;
    }
    if !request.fetch_release_notes {
      ui::warning("Skipping automatic release notes fetch.");
      return StepStatus::Skipped;
    }

    ui::info(format!(
      "Release notes missing for {} in {}. Fetching from {}...",
      version,
      subdir,
      self.ctx.config.repo_for(subdir)
    ));
    if let Err(e) = changelog::update_release_notes(self.ctx, subdir, "latest", self.changelog, BulletStyle::Lenient)
    {
      ui::warning(format!("Failed to fetch release notes automatically: {}. Proceeding.", e));
      return StepStatus::Failed(e.to_string());
    }

    if changelog::release_notes_include(self.ctx, subdir, version) {
      ui::success("Release notes updated.");
      StepStatus::Completed
    } else {
      let reason = format!("{} still not found in release notes after fetch", version);
      ui::warning(&reason);
      StepStatus::Failed(reason)
    }
  }

  fn external_snapshot(&self, request: &FreezeRequest) -> StepStatus {
    if !request.run_snapshot || request.subdir != self.ctx.config.snapshot.product {
      ui::info("Skipping EIP snapshot and reference page");
      return StepStatus::Skipped;
    }

    ui::info("Snapshotting EIP data and generating the versioned EIP reference...");
    match sheets::snapshot_version(self.ctx, &request.version, &request.subdir, self.sheets, self.now) {
      Ok(report) => {
        ui::success(format!(
          "EIP snapshot saved ({} rows); reference page uses sheetTab=\"{}\"",
          report.rows, request.version
        ));
        StepStatus::Completed
      }
      Err(e) => {
        ui::error(format!("EIP snapshot failed: {}", e));
        StepStatus::Failed(e.to_string())
      }
    }
  }
}
