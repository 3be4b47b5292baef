//! Frontmatter extraction from YAML (`---`) or TOML (`+++`) fences.
//!
//! The mapping shape is caller-defined, so values land in a
//! `serde_json::Map` rather than a fixed struct.

use anyhow::Result;
use serde_json::{Map, Value};

/// Extracted frontmatter mapping.
pub type Frontmatter = Map<String, Value>;

/// Extract frontmatter and return `(mapping, body)`.
///
/// A document with no frontmatter fence yields an empty mapping and the
/// whole source as body.
pub fn extract_frontmatter(content: &str) -> Result<(Frontmatter, &str)> {
    match detect_frontmatter(content) {
        Some((fm, body, true)) => Ok((parse_toml(fm)?, body)),
        Some((fm, body, false)) => Ok((parse_yaml_like(fm), body)),
        None => Ok((Frontmatter::new(), content)),
    }
}

/// Detect and extract frontmatter.
/// Returns `(frontmatter, body, is_toml)` if found.
fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start();

    // YAML: ---...---
    if trimmed.starts_with("---")
        && let Some(end) = trimmed[3..].find("\n---")
    {
        let fm = trimmed[3..3 + end].trim();
        let body = trimmed[3 + end + 4..].trim_start_matches('\n');
        return Some((fm, body, false));
    }

    // TOML: +++...+++
    if trimmed.starts_with("+++")
        && let Some(end) = trimmed[3..].find("\n+++")
    {
        let fm = trimmed[3..3 + end].trim();
        let body = trimmed[3 + end + 4..].trim_start_matches('\n');
        return Some((fm, body, true));
    }

    None
}

/// Parse simple YAML-like frontmatter (key: value) into a mapping.
fn parse_yaml_like(content: &str) -> Frontmatter {
    let mut map = Frontmatter::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            map.insert(key.trim().to_string(), parse_yaml_value(value.trim()));
        }
    }

    map
}

/// Parse TOML frontmatter into a mapping.
fn parse_toml(content: &str) -> Result<Frontmatter> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| anyhow::anyhow!("invalid TOML frontmatter: {e}"))?;
    let Value::Object(map) = serde_json::to_value(table)? else {
        anyhow::bail!("TOML frontmatter is not a table");
    };
    Ok(map)
}

/// Parse a YAML-like value string to a JSON value
///
/// Supports:
/// - Quoted strings: `"Hello, World"` (kept verbatim, quotes stripped)
/// - Booleans: `true`, `false`
/// - Numbers: `123`, `3.14`
/// - Arrays: `a, b, c` -> `["a", "b", "c"]`
/// - Strings: everything else
fn parse_yaml_value(s: &str) -> Value {
    // A quoted value is always a plain string, no coercion applies.
    if let Some(rest) = s.strip_prefix('"')
        && let Some(inner) = rest.strip_suffix('"')
    {
        return Value::String(inner.to_string());
    }

    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }

    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }

    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }

    if s.contains(',') {
        let arr: Vec<Value> = s
            .split(',')
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect();
        return Value::Array(arr);
    }

    Value::String(s.to_string())
}

// =============================================================================
// Tests
// =============================================================================
