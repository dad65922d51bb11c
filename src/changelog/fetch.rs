//! Changelog retrieval
//!
//! A product repository keeps its changelog at one of a handful of well-known paths.
//! Candidates are tried in order with a single attempt each; the first non-empty
//! document wins.

use crate::core::config::ReleaseNotesConfig;
use crate::core::error::{DocsError, DocsResult, ResultExt};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Ref used when the latest release tag cannot be resolved
pub const FALLBACK_REF: &str = "main";

/// A changelog document and where it came from
#[derive(Debug, Clone)]
pub struct FetchedChangelog {
  /// Candidate path (or local file) that produced the content
  pub path: String,
  pub content: String,
}

/// Anything that can hand back a changelog for a repository at a ref
pub trait ChangelogSource {
  /// Turn a user-facing source (`latest`, a tag, a branch) into a concrete ref
  fn resolve_ref(&self, repo: &str, source: &str) -> String;

  /// Fetch the changelog for `repo` at `reference`
  fn fetch(&self, repo: &str, reference: &str) -> DocsResult<FetchedChangelog>;
}

/// Try `candidates` in order and return the first one whose content is non-blank.
///
/// Every failure is recorded so the final error names what was tried.
pub fn first_non_empty<F>(candidates: &[String], mut get: F) -> Result<FetchedChangelog, Vec<String>>
where
  F: FnMut(&str) -> DocsResult<String>,
{
  let mut errors = Vec::new();
  for candidate in candidates {
    match get(candidate) {
      Ok(content) if !content.trim().is_empty() => {
        return Ok(FetchedChangelog {
          path: candidate.clone(),
          content,
        });
      }
      Ok(_) => errors.push(format!("{}: empty", candidate)),
      Err(e) => errors.push(format!("{}: {}", candidate, e)),
    }
  }
  Err(errors)
}

#[derive(Deserialize)]
struct LatestRelease {
  tag_name: Option<String>,
}

/// Raw-file host + releases API (GitHub by default)
pub struct GitHubSource {
  agent: ureq::Agent,
  raw_base_url: String,
  api_base_url: String,
  candidates: Vec<String>,
}

impl GitHubSource {
  pub fn new(config: &ReleaseNotesConfig) -> Self {
    let agent = ureq::AgentBuilder::new()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(concat!("docs-versioner/", env!("CARGO_PKG_VERSION")))
      .build();

    Self {
      agent,
      raw_base_url: config.raw_base_url.trim_end_matches('/').to_string(),
      api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
      candidates: config.candidates.clone(),
    }
  }

  fn latest_tag(&self, repo: &str) -> DocsResult<String> {
    let url = format!("{}/repos/{}/releases/latest", self.api_base_url, repo);
    let release: LatestRelease = self
      .agent
      .get(&url)
      .call()?
      .into_json()
      .with_context(|| format!("Failed to decode release from {}", url))?;

    release
      .tag_name
      .filter(|t| !t.is_empty())
      .ok_or_else(|| DocsError::message(format!("No tag_name in {}", url)))
  }

  fn get_text(&self, url: &str) -> DocsResult<String> {
    let response = self.agent.get(url).call()?;
    Ok(response.into_string()?)
  }
}

impl ChangelogSource for GitHubSource {
  fn resolve_ref(&self, repo: &str, source: &str) -> String {
    if source != "latest" {
      return source.to_string();
    }
    match self.latest_tag(repo) {
      Ok(tag) => tag,
      Err(e) => {
        tracing::warn!(repo, error = %e, "could not resolve latest release, falling back to {}", FALLBACK_REF);
        FALLBACK_REF.to_string()
      }
    }
  }

  fn fetch(&self, repo: &str, reference: &str) -> DocsResult<FetchedChangelog> {
    first_non_empty(&self.candidates, |candidate| {
      let url = format!("{}/{}/{}/{}", self.raw_base_url, repo, reference, candidate);
      tracing::debug!(%url, "fetching changelog candidate");
      self.get_text(&url)
    })
    .map_err(|tried| {
      DocsError::with_help(
        format!("Failed to fetch changelog from {}. Tried: {}", repo, tried.join("; ")),
        "Check the ref exists, or pass --from-file with a local CHANGELOG.md.",
      )
    })
  }
}

/// A changelog already on disk
pub struct LocalFileSource {
  path: PathBuf,
}

impl LocalFileSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl ChangelogSource for LocalFileSource {
  fn resolve_ref(&self, _repo: &str, source: &str) -> String {
    source.to_string()
  }

  fn fetch(&self, _repo: &str, _reference: &str) -> DocsResult<FetchedChangelog> {
    let content =
      fs::read_to_string(&self.path).with_context(|| format!("Failed to read changelog {}", self.path.display()))?;
    if content.trim().is_empty() {
      return Err(DocsError::message(format!("Changelog {} is empty", self.path.display())));
    }
    Ok(FetchedChangelog {
      path: self.path.display().to_string(),
      content,
    })
  }
}
