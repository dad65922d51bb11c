use crate::changelog::fetch::GitHubSource;
use crate::core::context::SiteContext;
use crate::core::error::DocsResult;
use crate::freeze::input::{self, EnvInput, PromptInput};
use crate::freeze::orchestrator::{FreezeSummary, StepStatus};
use crate::freeze::{FreezeOptions, Orchestrator, resolve_request};
use crate::sheets::GvizSource;
use crate::ui;
use chrono::Utc;

/// Run the freeze command
///
/// Prompts for anything not given on the command line unless `non_interactive` is set
/// or `NON_INTERACTIVE` is truthy, in which case the environment is read instead.
pub fn run_freeze(ctx: &SiteContext, opts: FreezeOptions, non_interactive: bool) -> DocsResult<()> {
  println!("🧊 Documentation version freeze");
  println!("{}", ui::rule());

  let request = if non_interactive || input::non_interactive_from_env() {
    resolve_request(ctx, &mut EnvInput::from_env(), &opts)?
  } else {
    resolve_request(ctx, &mut PromptInput, &opts)?
  };

  println!("\n📋 Version Configuration:");
  println!("   - Product: {}", ui::highlight(&request.subdir));
  println!("   - Freezing version: {}", ui::highlight(&request.version));
  println!("   - New development version: {}", ui::highlight(&request.next_dev));
  println!();

  let changelog = GitHubSource::new(&ctx.config.release_notes);
  let sheets = GvizSource::new(&ctx.config.snapshot, ctx.config.release_notes.timeout_secs);
  let summary = Orchestrator::new(ctx, &changelog, &sheets, Utc::now()).run(request)?;

  print_summary(ctx, &summary);
  Ok(())
}

fn print_summary(ctx: &SiteContext, summary: &FreezeSummary) {
  let request = &summary.request;
  println!("\n{}", ui::rule());
  ui::success("Version freeze completed successfully!");
  println!("{}", ui::rule());

  println!("\n📊 Summary:");
  println!("   - Frozen version: {}", request.version);
  println!("   - New development version: {}", request.next_dev);
  println!("   - Product: {}", request.subdir);
  println!(
    "   - Location: {}",
    ctx.version_dir(&request.subdir, &request.version).display()
  );
  let steps: Vec<String> = summary.completed_steps().iter().map(|s| s.to_string()).collect();
  println!("   - Completed: {}", steps.join(", "));
  for (step, status) in [
    ("Release notes", &summary.release_notes),
    ("EIP snapshot", &summary.snapshot),
  ] {
    match status {
      StepStatus::Completed => println!("   - {}: done", step),
      StepStatus::Skipped => println!("   - {}: skipped", step),
      StepStatus::Failed(reason) => println!("   - {}: failed ({})", step, reason),
    }
  }

  println!("\n📝 Next steps:");
  println!("   1. Review the changes: git status");
  println!("   2. Commit the frozen version and navigation updates");
  println!("   3. Continue development in docs/{}/next/", request.subdir);
}
