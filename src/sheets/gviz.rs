//! Public Google Visualization (gviz) JSON endpoint of a spreadsheet
//!
//! The endpoint answers with JavaScript, not JSON:
//!
//! ```text
//! /*O_o*/
//! google.visualization.Query.setResponse({"table": {"cols": [...], "rows": [...]}});
//! ```

use super::{Row, TabularSource};
use crate::core::config::SnapshotConfig;
use crate::core::error::{DocsError, DocsResult, ResultExt};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use std::time::Duration;

static RESPONSE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)google\.visualization\.Query\.setResponse\((.*)\);?\s*$").expect("gviz response regex")
});

/// Strip the `setResponse(...)` wrapper and parse the payload
pub fn parse_response(body: &str) -> DocsResult<Value> {
  let caps = RESPONSE_RE
    .captures(body)
    .ok_or_else(|| DocsError::message("Invalid response format from Google Sheets"))?;
  serde_json::from_str(&caps[1]).context("Failed to parse Google Sheets payload")
}

/// Rows of a gviz table keyed by column label (column id when the label is blank).
/// Missing cells become `null`.
pub fn table_rows(payload: &Value) -> DocsResult<Vec<Row>> {
  let table = payload
    .get("table")
    .ok_or_else(|| DocsError::message("Google Sheets payload has no table"))?;

  let labels: Vec<String> = table
    .get("cols")
    .and_then(Value::as_array)
    .map(|cols| {
      cols
        .iter()
        .map(|col| {
          col
            .get("label")
            .and_then(Value::as_str)
            .filter(|l| !l.is_empty())
            .or_else(|| col.get("id").and_then(Value::as_str))
            .unwrap_or_default()
            .to_string()
        })
        .collect()
    })
    .unwrap_or_default();

  let rows = table.get("rows").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();

  Ok(
    rows
      .iter()
      .map(|row| {
        let cells = row.get("c").and_then(Value::as_array);
        let mut out = Map::new();
        for (index, label) in labels.iter().enumerate() {
          let value = cells
            .and_then(|c| c.get(index))
            .and_then(|cell| cell.get("v"))
            .cloned()
            .unwrap_or(Value::Null);
          out.insert(label.clone(), value);
        }
        out
      })
      .collect(),
  )
}

/// Fetches the first sheet of a public spreadsheet
pub struct GvizSource {
  agent: ureq::Agent,
  sheet_id: String,
  url: String,
}

impl GvizSource {
  pub fn new(config: &SnapshotConfig, timeout_secs: u64) -> Self {
    let agent = ureq::AgentBuilder::new()
      .timeout(Duration::from_secs(timeout_secs))
      .user_agent(concat!("docs-versioner/", env!("CARGO_PKG_VERSION")))
      .build();
    let url = format!(
      "{}/{}/gviz/tq?tqx=out:json",
      config.base_url.trim_end_matches('/'),
      config.sheet_id
    );
    Self {
      agent,
      sheet_id: config.sheet_id.clone(),
      url,
    }
  }
}

impl TabularSource for GvizSource {
  fn source_id(&self) -> &str {
    &self.sheet_id
  }

  fn fetch_rows(&self) -> DocsResult<Vec<Row>> {
    tracing::debug!(url = %self.url, "fetching sheet");
    let body = self.agent.get(&self.url).call()?.into_string()?;
    table_rows(&parse_response(&body)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const BODY: &str = "/*O_o*/\ngoogle.visualization.Query.setResponse({\"version\":\"0.6\",\"table\":{\"cols\":[{\"id\":\"A\",\"label\":\"eip\",\"type\":\"number\"},{\"id\":\"B\",\"label\":\"\",\"type\":\"string\"},{\"id\":\"C\",\"label\":\"critical\",\"type\":\"boolean\"}],\"rows\":[{\"c\":[{\"v\":155.0},{\"v\":\"Replay protection\"},{\"v\":true}]},{\"c\":[{\"v\":1559.0},null]}]}});";

  #[test]
  fn test_parse_response_strips_wrapper() {
    let payload = parse_response(BODY).unwrap();
    assert_eq!(payload["version"], "0.6");
  }

  #[test]
  fn test_parse_response_rejects_plain_json() {
    assert!(parse_response("{\"table\": {}}").is_err());
  }

  #[test]
  fn test_table_rows_use_labels_and_ids() {
    let rows = table_rows(&parse_response(BODY).unwrap()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["eip"], 155.0);
    assert_eq!(rows[0]["B"], "Replay protection");
    assert_eq!(rows[0]["critical"], true);
    assert_eq!(rows[1]["B"], Value::Null);
    assert_eq!(rows[1]["critical"], Value::Null);
  }
}
