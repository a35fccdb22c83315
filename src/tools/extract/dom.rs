//! Positional DOM queries, used when structured data is missing or incomplete.

use scraper::{ElementRef, Html, Selector};

use super::types::{Nutrient, RecipeCandidate, Step};
use super::utils::{element_text, parse_duration_text};
use crate::selectors::{compile, compile_all, H2_SELECTOR, LIST_ITEM_SELECTOR};
use crate::tools::clean::clean_label;
use crate::types::{FallbackSelectors, Sel};

pub(super) fn recipe_from_dom(doc: &Html, sels: &FallbackSelectors) -> RecipeCandidate {
    let mut recipe = RecipeCandidate {
        name: first_text(doc, &sels.name),
        description: first_text(doc, &sels.description),
        image: first_attr(doc, &sels.image, "src"),
        ingredients: all_texts(doc, &sels.ingredients),
        instructions: labeled_instructions(doc, &sels.instructions_label),
        serving_size: checked_serving(doc, &sels.serving_option, &sels.serving_label),
        ..Default::default()
    };

    if recipe.instructions.is_empty() {
        recipe.instructions = sectioned_instructions(doc, sels);
    }
    scan_info_region(doc, sels, &mut recipe);
    recipe
}

fn first_text(doc: &Html, sels: &[Sel]) -> String {
    compile_all(sels)
        .iter()
        .flat_map(|sel| doc.select(sel).map(|el| element_text(&el)))
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

fn first_attr(doc: &Html, sels: &[Sel], attr: &str) -> String {
    compile_all(sels)
        .iter()
        .flat_map(|sel| doc.select(sel).filter_map(|el| el.value().attr(attr)))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Texts of the first selector that matches anything.
fn all_texts(doc: &Html, sels: &[Sel]) -> Vec<String> {
    for sel in compile_all(sels) {
        let texts: Vec<String> = doc
            .select(&sel)
            .map(|el| element_text(&el))
            .filter(|t| !t.is_empty())
            .collect();
        if !texts.is_empty() {
            return texts;
        }
    }
    Vec::new()
}

/// The `h2` carrying `label` and its following siblings, up to the next `h2`.
fn labeled_instructions(doc: &Html, label: &str) -> Vec<Step> {
    let label = clean_label(label);
    if label.is_empty() {
        return Vec::new();
    }
    let Some(heading) = doc
        .select(&H2_SELECTOR)
        .find(|h| clean_label(&h.text().collect::<String>()) == label)
    else {
        return Vec::new();
    };

    let mut block = StepBuilder::default();
    for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
        if H2_SELECTOR.matches(&sibling) {
            break;
        }
        block.visit(sibling);
    }
    block.finish()
}

/// Accumulates steps from a run of elements: `h3`/`h4` open a titled step,
/// lists contribute one item per entry, other leaves contribute their text.
#[derive(Default)]
struct StepBuilder {
    steps: Vec<Step>,
    current: Step,
}

impl StepBuilder {
    fn visit(&mut self, el: ElementRef) {
        match el.value().name() {
            "h3" | "h4" => {
                self.flush();
                self.current.title = element_text(&el);
            }
            "ul" | "ol" => {
                for li in el.select(&LIST_ITEM_SELECTOR) {
                    self.push(element_text(&li));
                }
            }
            "p" | "li" => self.push(element_text(&el)),
            _ if has_own_text(el) => self.push(element_text(&el)),
            _ => {
                let mut children = el.children().filter_map(ElementRef::wrap).peekable();
                if children.peek().is_none() {
                    self.push(element_text(&el));
                } else {
                    for child in children {
                        self.visit(child);
                    }
                }
            }
        }
    }

    fn push(&mut self, text: String) {
        if !text.is_empty() {
            self.current.items.push(text);
        }
    }

    fn flush(&mut self) {
        let step = std::mem::take(&mut self.current);
        if !step.title.is_empty() || !step.items.is_empty() {
            self.steps.push(step);
        }
    }

    fn finish(mut self) -> Vec<Step> {
        self.flush();
        self.steps
    }
}

/// Mixed content (`Heat to <strong>200C</strong> now`) is one step, not a wrapper.
fn has_own_text(el: ElementRef) -> bool {
    el.children()
        .filter_map(|node| node.value().as_text())
        .any(|text| !text.trim().is_empty())
}

fn sectioned_instructions(doc: &Html, sels: &FallbackSelectors) -> Vec<Step> {
    let (Some(title_sel), Some(items_sel)) =
        (compile(&sels.section_title), compile(&sels.section_items))
    else {
        return Vec::new();
    };

    for container_sel in compile_all(&sels.instruction_sections) {
        let steps: Vec<Step> = doc
            .select(&container_sel)
            .map(|section| {
                let title = section
                    .select(&title_sel)
                    .next()
                    .map(|h| element_text(&h))
                    .unwrap_or_default();
                let items = section
                    .select(&items_sel)
                    .map(|el| element_text(&el))
                    .filter(|t| !t.is_empty())
                    .collect();
                Step::titled(title, items)
            })
            .filter(|s| !s.title.is_empty() || !s.items.is_empty())
            .collect();
        if !steps.is_empty() {
            return steps;
        }
    }
    Vec::new()
}

/// Label of the checked serving option, looked up within the input's parent.
fn checked_serving(doc: &Html, options: &[Sel], label: &Sel) -> String {
    let Some(label_sel) = compile(label) else {
        return String::new();
    };
    compile_all(options)
        .iter()
        .flat_map(|sel| doc.select(sel))
        .filter_map(|input| input.parent().and_then(ElementRef::wrap))
        .filter_map(|parent| parent.select(&label_sel).next())
        .map(|el| element_text(&el))
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

/// Key/value scan: a label element whose next element sibling is a value.
///
/// The first value seen for a key wins. "Serves" only applies when no
/// checked serving option was found.
fn scan_info_region(doc: &Html, sels: &FallbackSelectors, recipe: &mut RecipeCandidate) {
    let Some(value_sel) = compile(&sels.info_value) else {
        return;
    };

    for label_sel in compile_all(&sels.info_label) {
        for label_el in doc.select(&label_sel) {
            let label = clean_label(&label_el.text().collect::<String>());
            if let Some(value) = next_value(label_el, &value_sel) {
                apply_info(recipe, &label, value);
            }
        }
    }
}

fn next_value(label: ElementRef, value_sel: &Selector) -> Option<String> {
    label
        .next_siblings()
        .find_map(ElementRef::wrap)
        .filter(|sibling| value_sel.matches(sibling))
        .map(|sibling| element_text(&sibling))
        .filter(|v| !v.is_empty())
}

fn apply_info(recipe: &mut RecipeCandidate, label: &str, value: String) {
    if let Some(nutrient) = Nutrient::from_label(label) {
        if recipe.nutrition.get(nutrient).is_empty() {
            recipe.nutrition.set(nutrient, value);
        }
        return;
    }

    let slot = match label.split_whitespace().next().unwrap_or_default() {
        "prep" | "preparation" => &mut recipe.prep_time,
        "cook" | "cooking" => &mut recipe.cook_time,
        "total" => &mut recipe.total_time,
        "serves" | "servings" | "serving" => {
            if recipe.serving_size.is_empty() {
                recipe.serving_size = value;
            }
            return;
        }
        _ => return,
    };
    if slot.is_empty() {
        *slot = parse_duration_text(&value);
    }
}
