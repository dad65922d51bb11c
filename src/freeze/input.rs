//! Operator input for a freeze: interactive prompts or environment variables

use crate::core::error::DocsResult;
use crate::utils::{env_flag, first_present, is_truthy};
use inquire::{Confirm, Select, Text};
use std::collections::HashMap;

pub const SUBDIR_VARS: [&str; 2] = ["DOCS_SUBDIR", "SUBDIR"];
pub const FREEZE_VERSION_VARS: [&str; 2] = ["CURRENT_VERSION", "FREEZE_VERSION"];
pub const NEW_VERSION_VAR: &str = "NEW_VERSION";
pub const NON_INTERACTIVE_VAR: &str = "NON_INTERACTIVE";
pub const SKIP_SHEETS_VAR: &str = "SKIP_SHEETS";

/// Answers to the questions a freeze asks. `None` means "not provided".
pub trait OperatorInput {
  fn product(&mut self, choices: &[String]) -> DocsResult<Option<String>>;

  fn freeze_version(&mut self) -> DocsResult<Option<String>>;

  /// `suggested` is the product's recorded `nextDev`, if any
  fn next_dev_version(&mut self, suggested: Option<&str>) -> DocsResult<Option<String>>;

  /// Fetch release notes when the frozen version is missing from them
  fn fetch_release_notes(&mut self) -> DocsResult<bool>;

  /// Run the EIP snapshot step
  fn run_snapshot(&mut self) -> DocsResult<bool>;
}

/// Whether the run should read the environment instead of prompting
pub fn non_interactive_from_env() -> bool {
  env_flag(NON_INTERACTIVE_VAR)
}

/// Values from environment variables (`NON_INTERACTIVE=1` runs)
#[derive(Debug, Clone, Default)]
pub struct EnvInput {
  vars: HashMap<String, String>,
}

impl EnvInput {
  /// Capture the relevant variables from the process environment
  pub fn from_env() -> Self {
    Self::from_pairs(
      SUBDIR_VARS
        .into_iter()
        .chain(FREEZE_VERSION_VARS)
        .chain([NEW_VERSION_VAR, SKIP_SHEETS_VAR])
        .filter_map(|name| std::env::var(name).ok().map(|v| (name, v))),
    )
  }

  pub fn from_pairs<I, K, V>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Self {
      vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
  }

  fn first(&self, names: &[&str]) -> Option<String> {
    first_present(names, |name| self.vars.get(name).cloned())
  }
}

impl OperatorInput for EnvInput {
  fn product(&mut self, _choices: &[String]) -> DocsResult<Option<String>> {
    Ok(self.first(&SUBDIR_VARS))
  }

  fn freeze_version(&mut self) -> DocsResult<Option<String>> {
    Ok(self.first(&FREEZE_VERSION_VARS))
  }

  fn next_dev_version(&mut self, _suggested: Option<&str>) -> DocsResult<Option<String>> {
    Ok(self.first(&[NEW_VERSION_VAR]))
  }

  fn fetch_release_notes(&mut self) -> DocsResult<bool> {
    Ok(true)
  }

  fn run_snapshot(&mut self) -> DocsResult<bool> {
    Ok(!self.vars.get(SKIP_SHEETS_VAR).is_some_and(|v| is_truthy(v)))
  }
}

/// Interactive prompts
#[derive(Debug, Default)]
pub struct PromptInput;

impl OperatorInput for PromptInput {
  fn product(&mut self, choices: &[String]) -> DocsResult<Option<String>> {
    let answer = if choices.is_empty() {
      Text::new("Docs subdirectory to version:").prompt()?
    } else {
      Select::new("Docs subdirectory to version:", choices.to_vec())
        .with_help_message("↑↓ to move, enter to select, ESC to cancel")
        .prompt()?
    };
    Ok(Some(answer.trim().to_string()).filter(|s| !s.is_empty()))
  }

  fn freeze_version(&mut self) -> DocsResult<Option<String>> {
    let answer = Text::new("Version to freeze:")
      .with_placeholder("v0.4.x")
      .prompt()?;
    Ok(Some(answer.trim().to_string()).filter(|s| !s.is_empty()))
  }

  fn next_dev_version(&mut self, suggested: Option<&str>) -> DocsResult<Option<String>> {
    let mut prompt = Text::new("New development version:").with_placeholder("v0.5.0 or v0.5.x");
    if let Some(default) = suggested {
      prompt = prompt.with_default(default);
    }
    let answer = prompt.prompt()?;
    Ok(Some(answer.trim().to_string()).filter(|s| !s.is_empty()))
  }

  fn fetch_release_notes(&mut self) -> DocsResult<bool> {
    Ok(
      Confirm::new("If release notes are missing, fetch them from the product repository?")
        .with_default(true)
        .prompt()?,
    )
  }

  fn run_snapshot(&mut self) -> DocsResult<bool> {
    Ok(
      Confirm::new("Create the EIP data snapshot and versioned EIP reference?")
        .with_default(!env_flag(SKIP_SHEETS_VAR))
        .prompt()?,
    )
  }
}
