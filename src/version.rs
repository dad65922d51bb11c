//! Documentation version labels
//!
//! Labels look like `v0.5.0`, `v0.5.x` or `v0.5`. `main` and `next` are sentinels that
//! always sort ahead of numbered versions in newest-first listings.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static LABEL_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^v(\d+)\.(\d+)(?:\.(\d+|x))?$").expect("version label regex"));

/// Labels that name an unversioned tree rather than a release
pub const SENTINELS: [&str; 2] = ["next", "main"];

/// Patch component of a version label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch {
  /// Concrete patch; an absent patch parses as `Number(0)`
  Number(u64),
  /// `x`: any/latest patch of this minor
  Wildcard,
}

/// Parsed `(major, minor, patch)` of a version label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionTuple {
  pub major: u64,
  pub minor: u64,
  pub patch: Patch,
}

impl VersionTuple {
  /// `x` patch, matching every concrete patch of its minor line
  pub fn is_wildcard(&self) -> bool {
    matches!(self.patch, Patch::Wildcard)
  }

  /// Numeric patch, `None` standing in for the +infinity of a wildcard
  pub fn patch_number(&self) -> Option<u64> {
    match self.patch {
      Patch::Number(n) => Some(n),
      Patch::Wildcard => None,
    }
  }

  /// Newest-first comparison. At equal major.minor a concrete patch sorts ahead of `x`.
  pub fn cmp_desc(&self, other: &Self) -> Ordering {
    other
      .major
      .cmp(&self.major)
      .then_with(|| other.minor.cmp(&self.minor))
      .then_with(|| match (self.patch, other.patch) {
        (Patch::Number(a), Patch::Number(b)) => b.cmp(&a),
        (Patch::Number(_), Patch::Wildcard) => Ordering::Less,
        (Patch::Wildcard, Patch::Number(_)) => Ordering::Greater,
        (Patch::Wildcard, Patch::Wildcard) => Ordering::Equal,
      })
  }
}

impl fmt::Display for VersionTuple {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.patch {
      Patch::Number(n) => write!(f, "v{}.{}.{}", self.major, self.minor, n),
      Patch::Wildcard => write!(f, "v{}.{}.x", self.major, self.minor),
    }
  }
}

/// True iff `label` matches `v<major>.<minor>[.<patch>|.x]`
pub fn validate(label: &str) -> bool {
  parse_tuple(label).is_some()
}

/// Parse a label into its numeric parts
pub fn parse_tuple(label: &str) -> Option<VersionTuple> {
  let caps = LABEL_RE.captures(label)?;
  let major = caps[1].parse().ok()?;
  let minor = caps[2].parse().ok()?;
  let patch = match caps.get(3).map(|m| m.as_str()) {
    None => Patch::Number(0),
    Some("x") => Patch::Wildcard,
    Some(n) => Patch::Number(n.parse().ok()?),
  };
  Some(VersionTuple { major, minor, patch })
}

/// True for `next`/`main`
pub fn is_sentinel(label: &str) -> bool {
  SENTINELS.contains(&label)
}

/// Sort key: sentinels first, then numbered versions, then anything unparseable
enum SortKey {
  Sentinel,
  Numbered(VersionTuple),
  Other,
}

fn sort_key(label: &str) -> SortKey {
  if is_sentinel(label) {
    SortKey::Sentinel
  } else if let Some(tuple) = parse_tuple(label) {
    SortKey::Numbered(tuple)
  } else {
    SortKey::Other
  }
}

/// Newest-first comparison over arbitrary labels, usable with `sort_by`.
pub fn compare_desc(a: &str, b: &str) -> Ordering {
  match (sort_key(a), sort_key(b)) {
    (SortKey::Numbered(x), SortKey::Numbered(y)) => x.cmp_desc(&y),
    (SortKey::Sentinel, SortKey::Sentinel) | (SortKey::Other, SortKey::Other) => Ordering::Equal,
    (SortKey::Sentinel, _) => Ordering::Less,
    (_, SortKey::Sentinel) => Ordering::Greater,
    (SortKey::Numbered(_), SortKey::Other) => Ordering::Less,
    (SortKey::Other, SortKey::Numbered(_)) => Ordering::Greater,
  }
}

/// Newest numbered label of `labels`, ignoring sentinels and junk
pub fn newest<'a, I>(labels: I) -> Option<&'a str>
where
  I: IntoIterator<Item = &'a str>,
{
  labels
    .into_iter()
    .filter(|l| validate(l))
    .min_by(|a, b| compare_desc(a, b))
}
