mod changelog;
mod commands;
mod core;
mod freeze;
mod navigation;
mod registry;
mod sheets;
mod ui;
mod utils;
mod version;

use clap::{Parser, Subcommand};
use core::error::{DocsError, print_error};
use freeze::FreezeOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Freeze in-development docs into versioned snapshots
#[derive(Parser)]
#[command(name = "docs-versioner")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Site root containing docs.json (default: current directory)
  #[arg(long, global = true)]
  root: Option<PathBuf>,

  /// More diagnostic output on stderr (-v debug, -vv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Freeze docs/<subdir>/next into a versioned tree
  Freeze {
    /// Docs subdirectory (product) to freeze
    #[arg(long)]
    subdir: Option<String>,
    /// Version label to freeze, e.g. v0.5.0 or v0.4.x
    #[arg(long)]
    version: Option<String>,
    /// Version label that continues in next
    #[arg(long)]
    next_dev: Option<String>,
    /// Read answers from the environment instead of prompting
    #[arg(long)]
    non_interactive: bool,
    /// Do not fetch release notes when the version is missing from them
    #[arg(long)]
    no_fetch: bool,
    /// Skip the EIP snapshot and reference page
    #[arg(long)]
    skip_sheets: bool,
  },

  /// Regenerate a product's release notes from its changelog
  ReleaseNotes {
    /// Tag, branch or `latest`
    #[arg(default_value = "latest")]
    source: String,
    /// Docs subdirectory (default: DOCS_SUBDIR, SUBDIR or evm)
    #[arg(long)]
    subdir: Option<String>,
    /// Read a local changelog instead of fetching
    #[arg(long)]
    from_file: Option<PathBuf>,
    /// Only accept `- ` bullets
    #[arg(long)]
    strict: bool,
  },

  /// Add a frozen version to the product's navigation dropdown
  Navigation {
    /// Version label
    version: String,
    /// Docs subdirectory
    #[arg(long)]
    subdir: String,
  },

  /// Inspect or edit versions.json
  #[command(subcommand)]
  Versions(VersionsCommands),

  /// Snapshot EIP data for an already frozen version
  Snapshot {
    /// Frozen version label
    version: String,
    /// Docs subdirectory (default: [snapshot].product)
    #[arg(long)]
    subdir: Option<String>,
  },

  /// Show products, versions and frozen metadata
  Status {
    /// Output status in JSON format
    #[arg(long)]
    json: bool,
  },
}

#[derive(Subcommand)]
enum VersionsCommands {
  /// List registered versions
  List {
    /// Only this docs subdirectory
    #[arg(long)]
    subdir: Option<String>,
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Register a version for a product
  Add {
    /// Docs subdirectory
    subdir: String,
    /// Version label
    version: String,
    /// Also make it the default version
    #[arg(long)]
    make_default: bool,
  },

  /// Unregister a version
  Remove {
    /// Docs subdirectory
    subdir: String,
    /// Version label
    version: String,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// RUST_LOG wins; otherwise `-v` picks the level
fn init_tracing(verbose: u8) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    EnvFilter::new(match verbose {
      0 => "warn",
      1 => "debug",
      _ => "trace",
    })
  });

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let root = match cli.root {
    Some(root) => root,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => handle_error(DocsError::from(e).context("Failed to get current directory")),
    },
  };

  let ctx = match core::context::SiteContext::build(&root) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Freeze {
      subdir,
      version,
      next_dev,
      non_interactive,
      no_fetch,
      skip_sheets,
    } => commands::run_freeze(
      &ctx,
      FreezeOptions {
        subdir,
        version,
        next_dev,
        no_fetch,
        skip_sheets,
      },
      non_interactive,
    ),
    Commands::ReleaseNotes {
      source,
      subdir,
      from_file,
      strict,
    } => commands::run_release_notes(&ctx, source, subdir, from_file, strict),
    Commands::Navigation { version, subdir } => commands::run_navigation(&ctx, version, subdir),
    Commands::Versions(versions_cmd) => match versions_cmd {
      VersionsCommands::List { subdir, json } => commands::run_versions_list(&ctx, subdir, json),
      VersionsCommands::Add {
        subdir,
        version,
        make_default,
      } => commands::run_versions_add(&ctx, subdir, version, make_default),
      VersionsCommands::Remove { subdir, version } => commands::run_versions_remove(&ctx, subdir, version),
    },
    Commands::Snapshot { version, subdir } => commands::run_snapshot(&ctx, version, subdir),
    Commands::Status { json } => commands::run_status(&ctx, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: DocsError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
