//! Changelog parsing into per-version changesets
//!
//! Understands the "keep a changelog" dialect used by the product repositories:
//!
//! ```text
//! ## UNRELEASED
//! ### FEATURES
//! - [#501](https://github.com/org/repo/pull/501) Not released yet
//!
//! ## [v0.4.1] - 2024-10-11
//! ### BUG FIXES
//! - [#459](https://github.com/org/repo/pull/459) Fix thing
//! ```
//!
//! Unreleased content is dropped. Unknown `###` categories are skipped. Nothing in a
//! changelog is ever an error; lines that match no rule are ignored.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static VERSION_HEADER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^##\s+\[?([vV]\d+\.\d+[\w.\-]*)\]?(.*)$").expect("version header regex"));

static UNRELEASED_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)^##\s+\[?unreleased\]?\s*$").expect("unreleased regex"));

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("date regex"));

static PR_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[-*]\s*\[\\?#(\d+)\]\((https?://[^)]+)\)\s*(.+)$").expect("pull request entry regex")
});

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s*").expect("bullet regex"));

/// Recognized changelog categories, declared in release-notes display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
  Features,
  Improvements,
  BugFixes,
  Dependencies,
  StateBreaking,
  ApiBreaking,
}

impl Category {
  /// All categories in display order
  pub const ORDERED: [Category; 6] = [
    Category::Features,
    Category::Improvements,
    Category::BugFixes,
    Category::Dependencies,
    Category::StateBreaking,
    Category::ApiBreaking,
  ];

  /// Match a `###` header against the allow-list, ignoring case and `-`/`_` separators
  pub fn from_header(name: &str) -> Option<Self> {
    let normalized = name
      .trim()
      .to_uppercase()
      .replace(['-', '_'], " ")
      .split_whitespace()
      .collect::<Vec<_>>()
      .join(" ");

    match normalized.as_str() {
      "FEATURES" => Some(Self::Features),
      "IMPROVEMENTS" => Some(Self::Improvements),
      "BUG FIXES" => Some(Self::BugFixes),
      "DEPENDENCIES" => Some(Self::Dependencies),
      "STATE BREAKING" => Some(Self::StateBreaking),
      "API BREAKING" => Some(Self::ApiBreaking),
      _ => None,
    }
  }

  /// Canonical changelog header
  pub fn key(&self) -> &'static str {
    match self {
      Self::Features => "FEATURES",
      Self::Improvements => "IMPROVEMENTS",
      Self::BugFixes => "BUG FIXES",
      Self::Dependencies => "DEPENDENCIES",
      Self::StateBreaking => "STATE BREAKING",
      Self::ApiBreaking => "API-BREAKING",
    }
  }

  /// Section title used in rendered release notes
  pub fn label(&self) -> &'static str {
    match self {
      Self::Features => "Features",
      Self::Improvements => "Improvements",
      Self::BugFixes => "Bug Fixes",
      Self::Dependencies => "Dependencies",
      Self::StateBreaking => "State Breaking",
      Self::ApiBreaking => "API Breaking",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.key())
  }
}

/// Issue or pull request referenced at the start of an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRef {
  pub number: u64,
  pub url: String,
}

/// One bullet of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
  /// Line as it appeared in the changelog (trimmed, bullet included)
  pub raw: String,
  pub reference: Option<IssueRef>,
  /// Text following the reference, when there is one
  pub description: Option<String>,
}

impl ChangeRecord {
  pub fn from_raw(raw: impl Into<String>) -> Self {
    let raw = raw.into();
    let (reference, description) = match PR_ENTRY_RE.captures(&raw) {
      Some(caps) => match caps[1].parse() {
        Ok(number) => (
          Some(IssueRef {
            number,
            url: caps[2].to_string(),
          }),
          Some(caps[3].trim().to_string()),
        ),
        Err(_) => (None, None),
      },
      None => (None, None),
    };
    Self {
      raw,
      reference,
      description,
    }
  }

  /// `- [#N](url) description` becomes `description ([#N](url))`; anything else only
  /// loses its bullet marker.
  pub fn formatted(&self) -> String {
    match (&self.reference, &self.description) {
      (Some(r), Some(desc)) => format!("{} ([#{}]({}))", desc, r.number, r.url),
      _ => BULLET_RE.replace(&self.raw, "").to_string(),
    }
  }
}

/// Entries of one released version, grouped by category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionChangeset {
  pub version: String,
  /// `YYYY-MM-DD`, or empty when the header carried no date
  pub date: String,
  pub categories: BTreeMap<Category, Vec<ChangeRecord>>,
}

impl VersionChangeset {
  pub fn new(version: impl Into<String>, date: impl Into<String>) -> Self {
    Self {
      version: version.into(),
      date: date.into(),
      categories: BTreeMap::new(),
    }
  }

  /// True when at least one category holds an entry
  pub fn has_entries(&self) -> bool {
    self.categories.values().any(|entries| !entries.is_empty())
  }

  pub fn entry_count(&self) -> usize {
    self.categories.values().map(Vec::len).sum()
  }

  /// Non-empty categories in display order
  pub fn sections(&self) -> impl Iterator<Item = (Category, &[ChangeRecord])> {
    Category::ORDERED.into_iter().filter_map(|c| {
      self
        .categories
        .get(&c)
        .filter(|entries| !entries.is_empty())
        .map(|entries| (c, entries.as_slice()))
    })
  }
}

/// Which lines count as entries inside an active category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletStyle {
  /// Only `- ` bullets
  #[default]
  Strict,
  /// `- ` and `* ` bullets; indented prose continues the previous entry
  Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
  OutsideVersion,
  InVersion,
  InCategory(Category),
}

/// Line-oriented changelog parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangelogParser {
  style: BulletStyle,
}

impl ChangelogParser {
  pub fn new(style: BulletStyle) -> Self {
    Self { style }
  }

  /// Parse a changelog into released versions, in document order
  pub fn parse(&self, content: &str) -> Vec<VersionChangeset> {
    let mut out = Vec::new();
    let mut state = ParseState::OutsideVersion;
    let mut current: Option<VersionChangeset> = None;

    for line in content.lines() {
      let trimmed = line.trim();

      if let Some(caps) = VERSION_HEADER_RE.captures(trimmed) {
        flush(&mut current, &mut out);
        let date = DATE_RE
          .captures(caps.get(2).map_or("", |m| m.as_str()))
          .map(|d| d[1].to_string())
          .unwrap_or_default();
        // `V0.4.1` is published as `v0.4.1`
        current = Some(VersionChangeset::new(format!("v{}", &caps[1][1..]), date));
        state = ParseState::InVersion;
        continue;
      }

      if UNRELEASED_RE.is_match(trimmed) {
        flush(&mut current, &mut out);
        state = ParseState::OutsideVersion;
        continue;
      }

      if let Some(name) = trimmed.strip_prefix("### ") {
        if state != ParseState::OutsideVersion {
          state = match Category::from_header(name) {
            Some(category) => ParseState::InCategory(category),
            None => ParseState::InVersion,
          };
        }
        continue;
      }

      let ParseState::InCategory(category) = state else {
        continue;
      };
      if trimmed.is_empty() || matches!(trimmed, "---" | "___" | "***") || trimmed.starts_with('#') {
        continue;
      }
      let Some(changeset) = current.as_mut() else {
        continue;
      };
      let entries = changeset.categories.entry(category).or_default();

      if self.is_bullet(trimmed) {
        entries.push(ChangeRecord::from_raw(trimmed));
      } else if self.style == BulletStyle::Lenient
        && line.starts_with(char::is_whitespace)
        && let Some(last) = entries.last_mut()
      {
        *last = ChangeRecord::from_raw(format!("{} {}", last.raw, trimmed));
      }
    }

    flush(&mut current, &mut out);
    out
  }

  fn is_bullet(&self, trimmed: &str) -> bool {
    match self.style {
      BulletStyle::Strict => trimmed.starts_with("- "),
      BulletStyle::Lenient => trimmed.starts_with("- ") || trimmed.starts_with("* "),
    }
  }
}

fn flush(current: &mut Option<VersionChangeset>, out: &mut Vec<VersionChangeset>) {
  if let Some(changeset) = current.take()
    && changeset.has_entries()
  {
    out.push(changeset);
  }
}
