//! Environment input helpers for non-interactive runs

use std::env;

/// `1`, `true` and `yes` (any case) switch a flag on; everything else leaves it off
pub fn is_truthy(value: &str) -> bool {
  matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

/// Whether the environment variable `name` is set to a truthy value
pub fn env_flag(name: &str) -> bool {
  env::var(name).is_ok_and(|v| is_truthy(&v))
}

/// First non-empty value among `names`, looked up with `lookup`
pub fn first_present<F>(names: &[&str], lookup: F) -> Option<String>
where
  F: Fn(&str) -> Option<String>,
{
  names
    .iter()
    .filter_map(|name| lookup(name))
    .map(|v| v.trim().to_string())
    .find(|v| !v.is_empty())
}

/// First non-empty environment variable among `names`
pub fn env_first(names: &[&str]) -> Option<String> {
  first_present(names, |name| env::var(name).ok())
}
