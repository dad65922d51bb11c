//! Release notes rendering (Mintlify MDX)

use super::parser::VersionChangeset;
use crate::version::parse_tuple;
use chrono::NaiveDate;
use regex::Regex;

/// Product-specific parts of the rendered page
#[derive(Debug, Clone)]
pub struct RenderOptions {
  /// Display label, e.g. `EVM`
  pub product_label: String,
  /// GitHub `owner/name`
  pub repo: String,
  /// Recorded in an MDX comment when set; the only time-dependent output
  pub snapshot_date: Option<NaiveDate>,
}

impl RenderOptions {
  pub fn new(product_label: impl Into<String>, repo: impl Into<String>) -> Self {
    Self {
      product_label: product_label.into(),
      repo: repo.into(),
      snapshot_date: None,
    }
  }
}

/// Render changesets into a release-notes page, one `<Update>` block per changeset
pub fn render(changesets: &[VersionChangeset], opts: &RenderOptions) -> String {
  let repo_url = format!("https://github.com/{}", opts.repo);
  let mut out = String::new();

  out.push_str("---\n");
  out.push_str("title: \"Release Notes\"\n");
  out.push_str(&format!(
    "description: \"Release history and changelog for {}\"\n",
    opts.product_label
  ));
  out.push_str("---\n\n");

  if let Some(date) = opts.snapshot_date {
    out.push_str(&format!("{{/* Snapshot date: {} */}}\n\n", date.format("%Y-%m-%d")));
  }

  out.push_str("<Info>\n");
  out.push_str(&format!(
    "  This page tracks all releases and changes from the [{}]({}) repository.\n",
    opts.repo, repo_url
  ));
  out.push_str(&format!(
    "  For the latest development updates, see the [UNRELEASED]({}/blob/main/CHANGELOG.md#unreleased) section.\n",
    repo_url
  ));
  out.push_str("</Info>\n\n");

  for changeset in changesets {
    let mut body = String::new();
    for (category, entries) in changeset.sections() {
      body.push_str(&format!("## {}\n\n", category.label()));
      for entry in entries {
        body.push_str(&format!("* {}\n", sanitize(&entry.formatted())));
      }
      body.push('\n');
    }
    if body.is_empty() {
      continue;
    }

    out.push_str(&format!(
      "<Update label=\"{}\" description=\"{}\" tags={{[\"{}\", \"Release\"]}}>\n",
      date_label(&changeset.date),
      changeset.version,
      opts.product_label
    ));
    out.push_str(body.trim_end());
    out.push_str("\n</Update>\n\n");
  }

  out.push_str("---\n\n");
  out.push_str("<CardGroup cols={2}>\n");
  out.push_str(&format!(
    "  <Card title=\"View Full Changelog\" icon=\"github\" href=\"{}/blob/main/CHANGELOG.md\">\n",
    repo_url
  ));
  out.push_str("    See the complete changelog on GitHub\n");
  out.push_str("  </Card>\n");
  out.push_str(&format!(
    "  <Card title=\"Report Issues\" icon=\"bug\" href=\"{}/issues\">\n",
    repo_url
  ));
  out.push_str("    Report bugs or request features\n");
  out.push_str("  </Card>\n");
  out.push_str("</CardGroup>\n");

  out
}

/// HTML comments are invalid MDX; turn them into MDX expression comments
pub fn sanitize(line: &str) -> String {
  line.replace("<!--", "{/*").replace("-->", "*/}")
}

/// `2024-10-11` -> `Oct 11, 2024`; other values pass through, empty becomes `Release`
pub fn date_label(date: &str) -> String {
  if date.is_empty() {
    return "Release".to_string();
  }
  match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
    Ok(d) => d.format("%b %-d, %Y").to_string(),
    Err(_) => date.to_string(),
  }
}

/// Whether a rendered release-notes page already has an `<Update>` for `version`.
///
/// `v0.5.x` accepts any patch of 0.5, `v0.5` accepts 0.5 with or without a patch, and
/// a full label must match exactly. Both `version="..."` and `description="..."`
/// attributes are recognized.
pub fn includes_version(content: &str, version: &str) -> bool {
  if content.is_empty() || version.is_empty() {
    return false;
  }
  let Some(tuple) = parse_tuple(version) else {
    return content.contains(&format!("\"{}\"", version));
  };

  let minor_only = version.matches('.').count() == 1;
  let (major, minor) = (tuple.major, tuple.minor);
  let version_pattern = match tuple.patch_number() {
    _ if tuple.is_wildcard() => format!(r"{}\.{}\.(?:\d+|x)", major, minor),
    Some(patch) if !minor_only => format!(r"{}\.{}\.{}", major, minor, patch),
    _ => format!(r"{}\.{}(?:\.\d+)?", major, minor),
  };
  let pattern = format!(r#"<Update[^>]*(?:version|description)="[vV]?{}""#, version_pattern);

  match Regex::new(&pattern) {
    Ok(re) => re.is_match(content),
    Err(e) => {
      tracing::warn!(error = %e, "release notes pattern failed to compile");
      false
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::changelog::parser::ChangelogParser;

  fn opts() -> RenderOptions {
    RenderOptions::new("EVM", "cosmos/evm")
  }

  #[test]
  fn test_render_example_changeset() {
    let text = "## v0.4.1 - 2024-10-11\n### BUG FIXES\n- [#459](https://x/pull/459) Fix thing\n";
    let changesets = ChangelogParser::default().parse(text);
    let out = render(&changesets, &opts());

    assert!(out.starts_with("---\ntitle: \"Release Notes\"\n"));
    assert!(out.contains("description: \"Release history and changelog for EVM\""));
    assert!(out.contains("<Update label=\"Oct 11, 2024\" description=\"v0.4.1\" tags={[\"EVM\", \"Release\"]}>"));
    assert!(out.contains("## Bug Fixes\n\n* Fix thing ([#459](https://x/pull/459))\n</Update>"));
    assert!(out.contains("<CardGroup cols={2}>"));
    assert!(out.contains("https://github.com/cosmos/evm/issues"));
  }

  #[test]
  fn test_render_category_order_and_input_order() {
    let text = "## v2.0.0\n### DEPENDENCIES\n- dep\n### FEATURES\n- feat\n## v1.0.0\n### API-BREAKING\n- api\n";
    let out = render(&ChangelogParser::default().parse(text), &opts());

    let features = out.find("## Features").unwrap();
    let deps = out.find("## Dependencies").unwrap();
    let api = out.find("## API Breaking").unwrap();
    assert!(features < deps && deps < api);
    assert!(out.find("description=\"v2.0.0\"").unwrap() < out.find("description=\"v1.0.0\"").unwrap());
    assert!(out.contains("<Update label=\"Release\" description=\"v1.0.0\""));
  }

  #[test]
  fn test_render_is_deterministic() {
    let text = "## v1.0.0 - 2025-01-15\n### FEATURES\n- a\n### IMPROVEMENTS\n- b\n";
    let changesets = ChangelogParser::default().parse(text);
    assert_eq!(render(&changesets, &opts()), render(&changesets, &opts()));
    assert!(!render(&changesets, &opts()).contains("Snapshot date"));
  }

  #[test]
  fn test_render_snapshot_date() {
    let mut options = opts();
    options.snapshot_date = NaiveDate::from_ymd_opt(2026, 10, 19);
    let out = render(&[], &options);
    assert!(out.contains("{/* Snapshot date: 2026-10-19 */}"));
  }

  #[test]
  fn test_html_comments_sanitized() {
    let text = "## v1.0.0\n### FEATURES\n- thing <!-- hidden -->\n";
    let out = render(&ChangelogParser::default().parse(text), &opts());
    assert!(out.contains("* thing {/* hidden */}"));
    assert!(!out.contains("<!--"));
  }

  #[test]
  fn test_date_label() {
    assert_eq!(date_label("2024-10-01"), "Oct 1, 2024");
    assert_eq!(date_label(""), "Release");
    assert_eq!(date_label("soon"), "soon");
  }

  #[test]
  fn test_includes_version_exact() {
    let content = "<Update label=\"Oct 11, 2024\" description=\"v0.4.1\" tags={[\"EVM\"]}>";
    assert!(includes_version(content, "v0.4.1"));
    assert!(!includes_version(content, "v0.4.2"));
    assert!(!includes_version(content, "v0.4.10"));
  }

  #[test]
  fn test_includes_version_wildcard_and_minor_only() {
    let content = "<Update version=\"v0.4.3\" date=\"2024-10-11\">";
    assert!(includes_version(content, "v0.4.x"));
    assert!(includes_version(content, "v0.4"));
    assert!(!includes_version(content, "v0.5.x"));
    assert!(!includes_version(content, "v0.40"));

    let bare = "<Update version=\"0.5\" date=\"\">";
    assert!(includes_version(bare, "v0.5"));
  }

  #[test]
  fn test_uppercase_header_is_found_after_render() {
    let text = "## V0.4.1 - 2024-10-11\n### BUG FIXES\n- Fix thing\n";
    let out = render(&ChangelogParser::default().parse(text), &opts());
    assert!(out.contains("description=\"v0.4.1\""));
    assert!(includes_version(&out, "v0.4.1"));

    let legacy = "<Update label=\"Release\" description=\"V0.4.1\">";
    assert!(includes_version(legacy, "v0.4.1"));
  }

  #[test]
  fn test_includes_version_requires_update_tag() {
    assert!(!includes_version("mentions v0.4.1 in prose", "v0.4.1"));
    assert!(!includes_version("", "v0.4.1"));
    assert!(includes_version("<Card tab=\"main\">", "main"));
  }
}
