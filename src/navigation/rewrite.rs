//! Path prefix rewriting over navigation values
//!
//! Navigation entries nest pages under arbitrary keys (`groups`, `pages`, `tabs`,
//! `anchors`, ...), so the rewrite walks every value of every object instead of a
//! safelist of keys. Only strings that *start* with the prefix are touched.

use serde_json::{Map, Value};

/// Return a copy of `value` with every string starting with `from` re-prefixed with `to`.
pub fn rewrite(value: &Value, from: &str, to: &str) -> Value {
  match value {
    Value::String(s) => Value::String(rewrite_str(s, from, to)),
    Value::Array(items) => Value::Array(items.iter().map(|v| rewrite(v, from, to)).collect()),
    Value::Object(map) => {
      let rewritten: Map<String, Value> = map.iter().map(|(k, v)| (k.clone(), rewrite(v, from, to))).collect();
      Value::Object(rewritten)
    }
    Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
  }
}

fn rewrite_str(s: &str, from: &str, to: &str) -> String {
  match s.strip_prefix(from) {
    Some(rest) if !from.is_empty() => format!("{}{}", to, rest),
    _ => s.to_string(),
  }
}
