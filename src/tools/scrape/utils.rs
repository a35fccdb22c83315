use scraper::Html;
use serde_json::Value;

use crate::selectors::JSONLD_SELECTOR;
use crate::tools::types::Jsonld;

pub(super) fn scrape_jsonld_scripts(doc: &Html) -> Jsonld {
    let mut out = Vec::new();
    for (idx, el) in doc.select(&JSONLD_SELECTOR).enumerate() {
        let raw = el.text().collect::<String>();
        match parse_jsonld_block(&raw) {
            Some(values) => out.extend(values),
            None => tracing::debug!(block = idx, "skipping unparseable JSON-LD block"),
        }
    }
    out
}

/// Parse one script body into flattened JSON-LD objects.
///
/// Some sites emit several objects separated by commas without brackets, so a
/// bracketed retry is attempted before giving up.
pub fn parse_jsonld_block(txt: &str) -> Option<Vec<Value>> {
    let txt = txt.trim();
    if txt.is_empty() {
        return None;
    }

    if let Ok(v) = serde_json::from_str::<Value>(txt) {
        return Some(flatten_jsonld(v));
    }
    let bracketed = format!("[{}]", txt);
    if let Ok(v) = serde_json::from_str::<Value>(&bracketed) {
        return Some(flatten_jsonld(v));
    }
    None
}

fn flatten_jsonld(value: Value) -> Vec<Value> {
    match value {
        Value::Array(arr) => arr.into_iter().flat_map(flatten_jsonld).collect(),
        Value::Object(mut obj) => {
            if let Some(graph) = obj.remove("@graph") {
                let mut out = flatten_jsonld(graph);
                // Keep the wrapper too when it carries its own type
                if obj.contains_key("@type") {
                    out.insert(0, Value::Object(obj));
                }
                return out;
            }
            vec![Value::Object(obj)]
        }
        _ => Vec::new(),
    }
}

/// True when `@type` equals `name`, or is an array containing it.
pub fn has_schema_type(value: &Value, name: &str) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t == name,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(name)),
        _ => false,
    }
}
