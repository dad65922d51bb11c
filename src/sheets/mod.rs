//! EIP compatibility snapshot for a frozen version
//!
//! The EIP table lives in a spreadsheet. Freezing pins a copy of its rows into the
//! frozen tree (`eip-data-snapshot.json`) and points the version's EIP reference page at
//! a spreadsheet tab named after the version.

pub mod gviz;

use crate::core::config::SnapshotConfig;
use crate::core::context::SiteContext;
use crate::core::error::DocsResult;
use crate::core::store;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

pub use gviz::GvizSource;

/// One row of named columns
pub type Row = Map<String, Value>;

pub const SNAPSHOT_FILE: &str = "eip-data-snapshot.json";

/// Anything that returns rows of named columns
pub trait TabularSource {
  /// Identifier recorded in the snapshot (spreadsheet id)
  fn source_id(&self) -> &str;

  fn fetch_rows(&self) -> DocsResult<Vec<Row>>;
}

/// Column coercion applied to raw rows
#[derive(Debug, Clone)]
pub struct ColumnRules {
  pub key: String,
  pub integer: Vec<String>,
  pub boolean: Vec<String>,
  pub dropped: Vec<String>,
}

impl ColumnRules {
  pub fn from_config(config: &SnapshotConfig) -> Self {
    Self {
      key: config.key_column.clone(),
      integer: config.integer_columns.clone(),
      boolean: config.boolean_columns.clone(),
      dropped: config.dropped_columns.clone(),
    }
  }

  /// Coerce every row and drop the ones whose key is empty or zero
  pub fn apply(&self, rows: Vec<Row>) -> Vec<Row> {
    rows
      .into_iter()
      .map(|row| self.coerce(row))
      .filter(|row| row.get(&self.key).is_some_and(is_present))
      .collect()
  }

  fn coerce(&self, row: Row) -> Row {
    let mut out = Map::new();
    for (column, value) in row {
      if self.dropped.contains(&column) {
        continue;
      }
      let coerced = if self.integer.contains(&column) {
        Value::from(to_integer(&value))
      } else if self.boolean.contains(&column) {
        Value::Bool(to_bool(&value))
      } else if !is_present(&value) {
        Value::String(String::new())
      } else {
        value
      };
      out.insert(column, coerced);
    }
    out
  }
}

/// Leading integer of a cell; anything unparseable is 0
fn to_integer(value: &Value) -> i64 {
  match value {
    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)).unwrap_or(0),
    Value::String(s) => {
      let s = s.trim();
      let end = s
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
      s[..end].parse().unwrap_or(0)
    }
    _ => 0,
  }
}

fn to_bool(value: &Value) -> bool {
  match value {
    Value::Bool(b) => *b,
    Value::String(s) => s == "TRUE",
    _ => false,
  }
}

fn is_present(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

/// `eip-data-snapshot.json`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EipSnapshot {
  pub version: String,
  pub timestamp: String,
  pub source_sheet: String,
  pub data: Vec<Row>,
}

/// EIP reference page pinned to the version's spreadsheet tab
pub fn eip_reference_mdx(version: &str, now: DateTime<Utc>) -> String {
  format!(
    r#"---
title: "EIP Reference"
description: "A complete list of Ethereum Mainnet \"Final\" EIPs and details on their implementation with Cosmos-EVM"
mode: "custom"
keywords: ['eip', 'ethereum improvement proposals', 'compatibility', 'support', 'implementation', 'cosmos evm', 'matrix', 'table']
---

import EIPCompatibilityTable from '/snippets/eip-compatibility-table.jsx'

{{/*
  This is a frozen snapshot of EIP compatibility data for version {version}
  Data source: Google Sheets tab "{version}"
  Snapshot date: {date}
*/}}

<EIPCompatibilityTable sheetTab="{version}" />

---

*This page displays a frozen snapshot of EIP compatibility data for version {version}.*
"#,
    version = version,
    date = now.format("%B %-d, %Y"),
  )
}

/// What a snapshot wrote
#[derive(Debug, Clone)]
pub struct SnapshotReport {
  pub snapshot_path: PathBuf,
  pub reference_path: PathBuf,
  pub rows: usize,
}

/// Fetch rows, write the snapshot into the frozen tree and regenerate the EIP reference page
pub fn snapshot_version(
  ctx: &SiteContext,
  version: &str,
  subdir: &str,
  source: &dyn TabularSource,
  now: DateTime<Utc>,
) -> DocsResult<SnapshotReport> {
  let rules = ColumnRules::from_config(&ctx.config.snapshot);
  let data = rules.apply(source.fetch_rows()?);
  tracing::debug!(rows = data.len(), source = source.source_id(), "sheet rows retrieved");

  let version_dir = ctx.version_dir(subdir, version);
  let snapshot = EipSnapshot {
    version: version.to_string(),
    timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    source_sheet: source.source_id().to_string(),
    data,
  };
  let snapshot_path = version_dir.join(SNAPSHOT_FILE);
  store::write_json(&snapshot_path, &snapshot)?;

  let reference_path = version_dir
    .join("documentation")
    .join("evm-compatibility")
    .join("eip-reference.mdx");
  store::write_text(&reference_path, &eip_reference_mdx(version, now))?;

  Ok(SnapshotReport {
    snapshot_path,
    reference_path,
    rows: snapshot.data.len(),
  })
}
