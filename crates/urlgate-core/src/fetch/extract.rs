//! Visible-text extraction from fetched HTML.
//!
//! Takes the text of `<body>`, drops non-rendered elements (script, style,
//! noscript, template) and collapses whitespace to single spaces.

use scraper::{ElementRef, Html, Selector};

const HIDDEN: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements that start a new line when rendered; their text must not glue to neighbours.
const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Human-visible text of an HTML document (or of plain text passed as-is).
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::with_capacity(html.len() / 2);

    let body = Selector::parse("body")
        .ok()
        .and_then(|s| document.select(&s).next());
    match body {
        Some(body) => collect_text(body, &mut raw),
        None => collect_text(document.root_element(), &mut raw),
    }

    normalize_whitespace(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }
        let Some(child_el) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child_el.value().name();
        if HIDDEN.contains(&name) {
            continue;
        }
        let block = BLOCK.contains(&name);
        if block {
            out.push(' ');
        }
        collect_text(child_el, out);
        if block {
            out.push(' ');
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
