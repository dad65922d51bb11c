//! Error types for docs-versioner with contextual messages and exit codes
//!
//! Every failure is categorized so the freeze workflow can tell a fatal validation
//! problem from a filesystem failure, and so `main` can pick the process exit code.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for docs-versioner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (filesystem, network, I/O)
  System = 2,
  /// Validation or structural precondition failure
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for docs-versioner
#[derive(Debug)]
pub enum DocsError {
  /// Configuration errors
  Config(ConfigError),

  /// Operator input that failed validation
  Validation(ValidationError),

  /// Navigation document preconditions
  Navigation(NavigationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl DocsError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    DocsError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    DocsError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// I/O errors stay I/O errors (exit code 2); the context is prefixed to their message.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      DocsError::Message { message, context, help } => DocsError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      DocsError::Io(e) => DocsError::Io(io::Error::new(e.kind(), format!("{}: {}", ctx_str, e))),
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      DocsError::Config(_) => ExitCode::User,
      DocsError::Validation(_) => ExitCode::Validation,
      DocsError::Navigation(_) => ExitCode::Validation,
      DocsError::Io(_) => ExitCode::System,
      DocsError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      DocsError::Config(e) => e.help_message(),
      DocsError::Validation(e) => e.help_message(),
      DocsError::Navigation(e) => e.help_message(),
      DocsError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for DocsError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DocsError::Config(e) => write!(f, "{}", e),
      DocsError::Validation(e) => write!(f, "{}", e),
      DocsError::Navigation(e) => write!(f, "{}", e),
      DocsError::Io(e) => write!(f, "I/O error: {}", e),
      DocsError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for DocsError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      DocsError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for DocsError {
  fn from(err: io::Error) -> Self {
    DocsError::Io(err)
  }
}

impl From<String> for DocsError {
  fn from(msg: String) -> Self {
    DocsError::message(msg)
  }
}

impl From<&str> for DocsError {
  fn from(msg: &str) -> Self {
    DocsError::message(msg)
  }
}

impl From<serde_json::Error> for DocsError {
  fn from(err: serde_json::Error) -> Self {
    DocsError::message(format!("JSON error: {}", err))
  }
}

impl From<toml_edit::de::Error> for DocsError {
  fn from(err: toml_edit::de::Error) -> Self {
    DocsError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<walkdir::Error> for DocsError {
  fn from(err: walkdir::Error) -> Self {
    DocsError::message(format!("Directory traversal error: {}", err))
  }
}

impl From<tempfile::PersistError> for DocsError {
  fn from(err: tempfile::PersistError) -> Self {
    DocsError::message(format!("Failed to move temporary file into place: {}", err.error))
  }
}

impl From<std::path::StripPrefixError> for DocsError {
  fn from(err: std::path::StripPrefixError) -> Self {
    DocsError::message(format!("Path strip prefix error: {}", err))
  }
}

impl From<ureq::Error> for DocsError {
  fn from(err: ureq::Error) -> Self {
    match err {
      ureq::Error::Status(code, response) => {
        DocsError::message(format!("HTTP {} from {}", code, response.get_url()))
      }
      ureq::Error::Transport(transport) => DocsError::message(format!("Network error: {}", transport)),
    }
  }
}

impl From<inquire::InquireError> for DocsError {
  fn from(err: inquire::InquireError) -> Self {
    match err {
      inquire::InquireError::OperationCanceled | inquire::InquireError::OperationInterrupted => {
        DocsError::Validation(ValidationError::Cancelled)
      }
      other => DocsError::message(format!("Prompt error: {}", other)),
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file exists but cannot be used
  Invalid { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { .. } => {
        Some("Fix the file or delete it to fall back to the built-in defaults.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), reason)
      }
    }
  }
}

/// Operator input errors. Always raised before anything is written.
#[derive(Debug)]
pub enum ValidationError {
  /// A version label does not match `vMAJOR.MINOR[.PATCH|.x]`
  VersionFormat { role: &'static str, value: String },

  /// A required input was not supplied
  MissingInput { what: &'static str, env: &'static str },

  /// Operator aborted an interactive prompt
  Cancelled,

  /// Requested operation is structurally impossible
  Unsupported { reason: String },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::VersionFormat { .. } => {
        Some("Use a label like v0.5.0, v0.5.x or v0.5 (leading 'v' required).".to_string())
      }
      ValidationError::MissingInput { env, .. } => Some(format!(
        "Pass it on the command line or set {} when running with NON_INTERACTIVE=1.",
        env
      )),
      _ => None,
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::VersionFormat { role, value } => {
        write!(f, "Invalid {} version format: '{}'", role, value)
      }
      ValidationError::MissingInput { what, .. } => write!(f, "No {} provided", what),
      ValidationError::Cancelled => write!(f, "Operation cancelled by user"),
      ValidationError::Unsupported { reason } => write!(f, "{}", reason),
    }
  }
}

/// Navigation document errors
#[derive(Debug)]
pub enum NavigationError {
  /// The product dropdown has no `next` entry to derive from
  MissingNext { dropdown: String, subdir: String },

  /// docs.json has an unexpected shape
  Malformed { reason: String },
}

impl NavigationError {
  fn help_message(&self) -> Option<String> {
    match self {
      NavigationError::MissingNext { subdir, .. } => Some(format!(
        "Add a 'next' entry for {} in docs.json before freezing.",
        subdir
      )),
      NavigationError::Malformed { .. } => None,
    }
  }
}

impl fmt::Display for NavigationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NavigationError::MissingNext { dropdown, .. } => {
        write!(f, "No 'next' version found in navigation for dropdown {}", dropdown)
      }
      NavigationError::Malformed { reason } => write!(f, "Malformed navigation document: {}", reason),
    }
  }
}

/// Result type alias for docs-versioner
pub type DocsResult<T> = Result<T, DocsError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> DocsResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> DocsResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<DocsError>,
{
  fn context(self, ctx: impl Into<String>) -> DocsResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> DocsResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &DocsError) {
  eprintln!("\n✗ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

impl From<anyhow::Error> for DocsError {
  fn from(err: anyhow::Error) -> Self {
    DocsError::message(err.to_string())
  }
}
