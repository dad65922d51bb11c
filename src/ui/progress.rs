//! Progress indicators for long-running operations
//!
//! Uses `linya` progress bars. Bars are only drawn when stderr is a terminal so piped
//! and CI output stays clean.

use linya::{Bar, Progress};
use std::io::IsTerminal;
use std::sync::{Arc, Mutex};

/// Progress bar for per-file work, shareable across rayon workers
#[derive(Clone)]
pub struct FileProgress {
  inner: Option<Arc<Mutex<(Progress, Bar)>>>,
}

impl FileProgress {
  /// Create a bar for `total` files; a no-op when stderr is not a terminal or `total` is 0
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    if total == 0 || !std::io::stderr().is_terminal() {
      return Self::hidden();
    }
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self {
      inner: Some(Arc::new(Mutex::new((progress, bar)))),
    }
  }

  /// A bar that never draws
  pub fn hidden() -> Self {
    Self { inner: None }
  }

  /// Increment progress by 1
  pub fn inc(&self) {
    if let Some(inner) = &self.inner
      && let Ok(mut guard) = inner.lock()
    {
      let (progress, bar) = &mut *guard;
      progress.inc_and_draw(bar, 1);
    }
  }
}
