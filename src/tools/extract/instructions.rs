//! Instruction normalization.
//!
//! `recipeInstructions` shows up as a narrative string, a flat list of
//! strings or `HowToStep`s, or a list of `HowToSection`s. All of them end up
//! as a `Vec<Step>`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::types::Step;
use super::utils::json_text;
use crate::tools::scrape::has_schema_type;
use crate::types::NormalizeOptions;

static SENTENCE_END_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));
static STEP_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d{1,2}[.)]|Step\s+\d{1,2}\b)").expect("valid regex"));

/// Normalize a `recipeInstructions` value into steps.
pub fn normalize_instructions(value: &Value, opts: &NormalizeOptions) -> Vec<Step> {
    match value {
        Value::String(text) => normalize_narrative(text, opts),
        Value::Array(entries) => normalize_list(entries),
        Value::Object(_) => normalize_list(std::slice::from_ref(value)),
        _ => Vec::new(),
    }
}

fn normalize_narrative(text: &str, opts: &NormalizeOptions) -> Vec<Step> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    if opts.split_narrative {
        let pieces = split_narrative(text, &opts.boundary_phrases);
        if pieces.len() > 1 {
            return pieces.into_iter().map(|p| Step::untitled(vec![p])).collect();
        }
    }
    vec![Step::untitled(vec![text.to_string()])]
}

/// Consecutive flat entries share one untitled step; every section is its own step.
fn normalize_list(entries: &[Value]) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for entry in entries {
        if is_section(entry) {
            if !pending.is_empty() {
                steps.push(Step::untitled(std::mem::take(&mut pending)));
            }
            steps.push(section_step(entry));
        } else {
            let text = entry_text(entry);
            if !text.trim().is_empty() {
                pending.push(text);
            }
        }
    }
    if !pending.is_empty() {
        steps.push(Step::untitled(pending));
    }
    steps
}

fn is_section(entry: &Value) -> bool {
    has_schema_type(entry, "HowToSection")
        || entry
            .get("itemListElement")
            .map(Value::is_array)
            .unwrap_or(false)
}

fn section_step(section: &Value) -> Step {
    let title = section.get("name").map(json_text).unwrap_or_default();
    let items = match section.get("itemListElement") {
        Some(Value::Array(items)) => items
            .iter()
            .map(entry_text)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Some(other) => vec![entry_text(other)],
        None => Vec::new(),
    };
    Step::titled(title, items)
}

/// Text of a list entry: a bare string, or a `HowToStep`'s `text` then `name`.
fn entry_text(entry: &Value) -> String {
    match entry {
        Value::String(s) => s.clone(),
        Value::Object(obj) => obj
            .get("text")
            .map(json_text)
            .filter(|t| !t.is_empty())
            .or_else(|| obj.get("name").map(json_text))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Best-effort split of narrative text into pseudo-steps.
///
/// A cut happens after a sentence end when the next sentence opens with one of
/// `phrases` (whole word) or with a step number such as `2.` or `Step 3`.
/// Text with no such boundary comes back as a single piece.
pub fn split_narrative(text: &str, phrases: &[String]) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END_REGEX.find_iter(text) {
        let rest = &text[m.end()..];
        if opens_step(rest, phrases) {
            let piece = text[start..m.start() + 1].trim();
            if !piece.is_empty() {
                pieces.push(piece.to_string());
            }
            start = m.end();
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        pieces.push(tail.to_string());
    }
    pieces
}

fn opens_step(rest: &str, phrases: &[String]) -> bool {
    if STEP_NUMBER_REGEX.is_match(rest) {
        return true;
    }
    phrases.iter().any(|phrase| {
        rest.strip_prefix(phrase.as_str())
            .map(|after| {
                after
                    .chars()
                    .next()
                    .map(|c| !c.is_alphanumeric())
                    .unwrap_or(true)
            })
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts(split: bool) -> NormalizeOptions {
        NormalizeOptions {
            split_narrative: split,
            ..Default::default()
        }
    }

    #[test]
    fn narrative_string_is_one_untitled_step() {
        let steps = normalize_instructions(&json!("Step one. Step two."), &opts(false));
        assert_eq!(steps, vec![Step::untitled(vec!["Step one. Step two.".into()])]);
    }

    #[test]
    fn narrative_without_boundaries_stays_whole_when_splitting() {
        let steps = normalize_instructions(&json!("Step one. Step two."), &opts(true));
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].items, vec!["Step one. Step two."]);
    }

    #[test]
    fn narrative_splits_at_boundary_phrases() {
        let text = "Preheat the oven. Meanwhile, slice the onion. Once golden, add the rice.";
        let steps = normalize_instructions(&json!(text), &opts(true));
        let items: Vec<&str> = steps.iter().map(|s| s.items[0].as_str()).collect();
        assert_eq!(
            items,
            vec![
                "Preheat the oven.",
                "Meanwhile, slice the onion.",
                "Once golden, add the rice."
            ]
        );
        assert!(steps.iter().all(|s| s.title.is_empty()));
    }

    #[test]
    fn boundary_phrase_must_be_whole_word() {
        let phrases = vec!["Once".to_string()];
        let pieces = split_narrative("Stir well. Onceover the pan.", &phrases);
        assert_eq!(pieces.len(), 1);
    }

    #[test]
    fn numbered_sentences_split() {
        let pieces = split_narrative("1. Boil water. 2. Add pasta.", &[]);
        assert_eq!(pieces, vec!["1. Boil water.", "2. Add pasta."]);
    }

    #[test]
    fn flat_list_is_one_step_in_order() {
        let value = json!([
            "Heat the oil.",
            {"@type": "HowToStep", "text": "Fry the garlic."},
            {"@type": "HowToStep", "name": "Serve."}
        ]);
        let steps = normalize_instructions(&value, &opts(false));
        assert_eq!(steps.len(), 1);
        assert_eq!(
            steps[0].items,
            vec!["Heat the oil.", "Fry the garlic.", "Serve."]
        );
        assert!(steps[0].title.is_empty());
    }

    #[test]
    fn sections_become_titled_steps() {
        let value = json!([
            {"@type": "HowToSection", "name": "Prep", "itemListElement": [
                {"@type": "HowToStep", "text": "Chop"},
                {"@type": "HowToStep", "text": "Rinse"}
            ]},
            {"@type": "HowToSection", "name": "Cook", "itemListElement": [
                {"@type": "HowToStep", "text": "Roast"}
            ]}
        ]);
        let steps = normalize_instructions(&value, &opts(false));
        assert_eq!(
            steps,
            vec![
                Step::titled("Prep", vec!["Chop".into(), "Rinse".into()]),
                Step::titled("Cook", vec!["Roast".into()]),
            ]
        );
    }

    #[test]
    fn mixed_list_keeps_order() {
        let value = json!([
            "Wash hands.",
            {"@type": "HowToSection", "name": "Sauce", "itemListElement": ["Whisk"]},
            "Plate up."
        ]);
        let steps = normalize_instructions(&value, &opts(false));
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], Step::untitled(vec!["Wash hands.".into()]));
        assert_eq!(steps[1].title, "Sauce");
        assert_eq!(steps[2], Step::untitled(vec!["Plate up.".into()]));
    }

    #[test]
    fn empty_values_yield_no_steps() {
        assert!(normalize_instructions(&json!(""), &opts(false)).is_empty());
        assert!(normalize_instructions(&json!([]), &opts(false)).is_empty());
        assert!(normalize_instructions(&json!(null), &opts(false)).is_empty());
    }
}
