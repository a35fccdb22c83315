//! Serialization of a [`Recipe`] into the fixed HTML fragment.

mod sanitize;

pub use sanitize::sanitize_html;

use crate::tools::extract::{Recipe, Step};
use std::fmt::Write;

/// Render `recipe` in fixed section order, omitting empty sections.
///
/// Values are inserted verbatim; pass the result through [`sanitize_html`]
/// before handing it to anything that displays untrusted markup.
pub fn render_html(recipe: &Recipe) -> String {
    let mut out = String::new();

    if !recipe.name.is_empty() {
        let _ = write!(out, "<h1>{}</h1>", recipe.name);
    }
    if !recipe.description.is_empty() {
        let _ = write!(out, "<p>{}</p>", recipe.description);
    }
    if !recipe.image.is_empty() {
        let _ = write!(
            out,
            r#"<img src="{}" style="max-width:100%"><br>"#,
            recipe.image
        );
    }
    if !recipe.ingredients.is_empty() {
        out.push_str("<h2>Ingredients</h2><ul>");
        for ingredient in &recipe.ingredients {
            let _ = write!(out, "<li>{ingredient}</li>");
        }
        out.push_str("</ul>");
    }

    for (heading, value) in [
        ("Serving Size", &recipe.serving_size),
        ("Prep Time", &recipe.prep_time),
        ("Cook Time", &recipe.cook_time),
        ("Total Time", &recipe.total_time),
    ] {
        if !value.is_empty() {
            let _ = write!(out, "<h2>{heading}</h2><p>{value}</p>");
        }
    }

    if !recipe.instructions.is_empty() {
        out.push_str("<h2>Cooking Instructions</h2>");
        for step in &recipe.instructions {
            render_step(&mut out, step);
        }
    }

    if !recipe.nutrition.is_empty() {
        out.push_str("<h2>Nutrition (per serving)</h2><ul>");
        for (nutrient, value) in recipe.nutrition.entries() {
            let _ = write!(out, "<li><strong>{}:</strong> {value}</li>", nutrient.key());
        }
        out.push_str("</ul>");
    }

    out
}

fn render_step(out: &mut String, step: &Step) {
    if !step.title.is_empty() {
        let _ = write!(out, "<h3>{}</h3>", step.title);
    }
    match step.items.as_slice() {
        [] => {}
        [only] => {
            let _ = write!(out, "<p>{only}</p>");
        }
        items => {
            out.push_str("<ol>");
            for item in items {
                let _ = write!(out, "<li>{item}</li>");
            }
            out.push_str("</ol>");
        }
    }
}

/// Embed a fragment in a standalone HTML document.
pub fn wrap_document(name: &str, html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
        }}
        img {{ max-width: 100%; height: auto; }}
        h1 {{ margin-top: 0; }}
    </style>
</head>
<body>
    {html}
</body>
</html>
"#,
        title = html_escape::encode_text(name),
    )
}
