use ammonia::Builder;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

const ALLOWED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "ul", "ol", "li", "strong", "em", "br", "img",
];
const IMG_ATTRIBUTES: &[&str] = &["src", "alt", "style"];
const ALLOWED_STYLES: &[&str] = &["width", "max-width"];

static SANITIZER: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .tag_attributes(HashMap::from([(
            "img",
            IMG_ATTRIBUTES.iter().copied().collect::<HashSet<_>>(),
        )]))
        .generic_attributes(HashSet::new())
        .link_rel(None)
        .attribute_filter(|element, attribute, value| {
            if element == "img" && attribute == "style" {
                filter_style(value).map(Cow::Owned)
            } else {
                Some(Cow::Borrowed(value))
            }
        });
    builder
});

/// Allow-list sanitization of a rendered fragment.
///
/// Keeps headings, paragraphs, lists, emphasis, line breaks and images. Images
/// keep `src`, `alt`, and a `style` reduced to `width`/`max-width` of `100%`.
pub fn sanitize_html(html: &str) -> String {
    SANITIZER.clean(html).to_string()
}

/// Keep only full-width sizing declarations; `None` drops the attribute.
fn filter_style(style: &str) -> Option<String> {
    let kept: Vec<String> = style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim().to_ascii_lowercase();
            let value: String = value.chars().filter(|c| !c.is_whitespace()).collect();
            (ALLOWED_STYLES.contains(&prop.as_str()) && value == "100%")
                .then(|| format!("{prop}:{value}"))
        })
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join(";"))
    }
}
