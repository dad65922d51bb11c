//! Operator-facing status lines
//!
//! Every freeze step reports one line: info, success, warning or error. Colour is only
//! emitted when stdout is a terminal.

pub mod progress;

use anstyle::{AnsiColor, Color, Style};
use std::io::IsTerminal;

/// Kind of status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Info,
  Success,
  Warning,
  Error,
}

impl Level {
  fn marker(self) -> &'static str {
    match self {
      Level::Info => "ℹ",
      Level::Success => "✓",
      Level::Warning => "⚠",
      Level::Error => "✗",
    }
  }

  fn style(self) -> Style {
    let color = match self {
      Level::Info => AnsiColor::Blue,
      Level::Success => AnsiColor::Green,
      Level::Warning => AnsiColor::Yellow,
      Level::Error => AnsiColor::Red,
    };
    Style::new().bold().fg_color(Some(Color::Ansi(color)))
  }
}

/// Render a status line, coloured or plain
pub fn format_line(level: Level, msg: &str, color: bool) -> String {
  if color {
    let style = level.style();
    format!("{}{}{} {}", style.render(), level.marker(), style.render_reset(), msg)
  } else {
    format!("{} {}", level.marker(), msg)
  }
}

fn print(level: Level, msg: &str) {
  println!("{}", format_line(level, msg, std::io::stdout().is_terminal()));
}

pub fn info(msg: impl AsRef<str>) {
  print(Level::Info, msg.as_ref());
}

pub fn success(msg: impl AsRef<str>) {
  print(Level::Success, msg.as_ref());
}

pub fn warning(msg: impl AsRef<str>) {
  print(Level::Warning, msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
  print(Level::Error, msg.as_ref());
}

/// Emphasize a value inside a message (version labels, paths)
pub fn highlight(value: &str) -> String {
  if !std::io::stdout().is_terminal() {
    return value.to_string();
  }
  let style = Style::new().bold();
  format!("{}{}{}", style.render(), value, style.render_reset())
}

/// `==================================================` banner rule
pub fn rule() -> String {
  "=".repeat(50)
}
