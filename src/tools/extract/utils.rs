use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use serde_json::Value;

use crate::tools::clean::clean;

// A unit may run straight into the next number ("1h30m").
static HOURS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:hours|hour|hrs|hr|h)(?:\b|\d)").expect("valid regex")
});
static MINUTES_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:minutes|minute|mins|min|m)(?:\b|\d)").expect("valid regex")
});
static BARE_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*$").expect("valid regex"));

/// Scalar JSON as text: strings verbatim, numbers formatted, anything else empty.
pub(super) fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Text of a field that may be a scalar or a list (first element wins).
pub(super) fn json_first_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items.first().map(json_first_text).unwrap_or_default(),
        other => json_text(other),
    }
}

/// Image URL from a string, an `ImageObject`, or a list of either.
pub(super) fn json_image(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.first().map(json_image).unwrap_or_default(),
        Value::Object(obj) => obj
            .get("url")
            .or_else(|| obj.get("contentUrl"))
            .map(json_text)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Non-empty strings of a JSON list, in order. A lone string counts as one entry.
pub(super) fn json_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(json_text)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Cleaned text content of an element.
pub(super) fn element_text(el: &ElementRef) -> String {
    clean(&el.text().collect::<String>())
}

/// Convert an on-page duration ("1 hr 10 mins", "1h30m", "1.5 hours") to `PT#H#M`.
///
/// Fractional hours carry into minutes. Text without recognizable numbers, or
/// with fractional minutes, is returned cleaned but otherwise as-is.
pub fn parse_duration_text(text: &str) -> String {
    let text = clean(text);
    let hours = capture_number(&HOURS_REGEX, &text);
    let minutes =
        capture_number(&MINUTES_REGEX, &text).or_else(|| capture_number(&BARE_NUMBER_REGEX, &text));

    if minutes.is_some_and(|m| m.fract() != 0.0) {
        return text;
    }
    let mut whole_hours = hours.map(|h| h.trunc() as u32);
    let mut whole_minutes = minutes.map(|m| m as u32);
    if let Some(fraction) = hours.map(f64::fract).filter(|f| *f > 0.0) {
        let carried = (fraction * 60.0).round() as u32;
        whole_minutes = Some(whole_minutes.unwrap_or(0) + carried);
        whole_hours = whole_hours.filter(|h| *h > 0);
    }

    match (whole_hours, whole_minutes) {
        (None, None) => text,
        (Some(h), None) => format!("PT{h}H"),
        (None, Some(m)) => format!("PT{m}M"),
        (Some(h), Some(m)) => format!("PT{h}H{m}M"),
    }
}

fn capture_number(regex: &Regex, text: &str) -> Option<f64> {
    regex
        .captures(text)
        .and_then(|c| c[1].parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duration_minutes_only() {
        assert_eq!(parse_duration_text("25 mins"), "PT25M");
        assert_eq!(parse_duration_text("45"), "PT45M");
    }

    #[test]
    fn duration_hours_and_minutes() {
        assert_eq!(parse_duration_text("1 hr 10 mins"), "PT1H10M");
        assert_eq!(parse_duration_text("2 hours"), "PT2H");
    }

    #[test]
    fn duration_compact_units() {
        assert_eq!(parse_duration_text("1h30m"), "PT1H30M");
        assert_eq!(parse_duration_text("2hrs15mins"), "PT2H15M");
    }

    #[test]
    fn duration_fractional_hours_carry_into_minutes() {
        assert_eq!(parse_duration_text("1.5 hours"), "PT1H30M");
        assert_eq!(parse_duration_text("0.5 hr"), "PT30M");
        assert_eq!(parse_duration_text("1.25 hours 5 mins"), "PT1H20M");
    }

    #[test]
    fn duration_fractional_minutes_stay_raw() {
        assert_eq!(parse_duration_text("2.5 mins"), "2.5 mins");
    }

    #[test]
    fn duration_without_numbers_is_raw() {
        assert_eq!(parse_duration_text("  overnight "), "overnight");
    }

    #[test]
    fn image_handles_lists_and_objects() {
        assert_eq!(json_image(&json!(["a.jpg", "b.jpg"])), "a.jpg");
        assert_eq!(json_image(&json!({"@type": "ImageObject", "url": "c.jpg"})), "c.jpg");
        assert_eq!(json_image(&json!([{"url": "d.jpg"}])), "d.jpg");
        assert_eq!(json_image(&json!(null)), "");
    }

    #[test]
    fn first_text_of_yield_variants() {
        assert_eq!(json_first_text(&json!(2)), "2");
        assert_eq!(json_first_text(&json!(["2", "2 servings"])), "2");
        assert_eq!(json_first_text(&json!("4 people")), "4 people");
    }
}
