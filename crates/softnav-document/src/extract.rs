//! Region and metadata extraction from parsed documents

use scraper::{Html, Selector};

use crate::error::DocumentError;
use crate::root::Markup;
use crate::Result;

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| DocumentError::InvalidSelector(selector.to_string()))
}

/// Inner markup of the first element matching `selector`
pub fn extract_region(doc: &Html, selector: &Selector) -> Option<Markup> {
    doc.select(selector)
        .next()
        .map(|el| Markup::new(el.inner_html()))
}

/// Document title with whitespace collapsed, as `document.title` reports it.
/// An empty title counts as absent.
pub fn extract_title(doc: &Html) -> Option<String> {
    let sel = Selector::parse("title").ok()?;
    let el = doc.select(&sel).next()?;
    let text = el.text().collect::<Vec<_>>().join("");
    let cleaned = normalize_whitespace(&text);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// `content` of the description meta tag, if present and non-empty
pub fn extract_description(doc: &Html) -> Option<String> {
    let sel = Selector::parse("meta[name='description']").ok()?;
    doc.select(&sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
