//! Serializable view of a session's document state

use serde::Serialize;
use softnav_decorate::Decoration;
use softnav_document::{DocumentView, HeadlessDocument, ScrollPosition};

#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    /// `None` when the document has no content root
    pub root_classes: Option<String>,
    pub content: Option<String>,
    /// Nav links currently marked `aria-current="page"`
    pub current_links: Vec<String>,
    pub history: Vec<String>,
    pub history_index: usize,
    pub scroll: ScrollPosition,
    pub scroll_target: Option<String>,
    pub full_navigations: Vec<String>,
    /// `aria-expanded` of the nav menu toggle
    pub menu_expanded: &'static str,
    pub body_class: Option<&'static str>,
    pub decoration: Option<Decoration>,
}

impl PageSnapshot {
    pub fn capture(doc: &HeadlessDocument, decoration: Option<Decoration>) -> Self {
        let root = doc.content_root();

        Self {
            url: doc.location().to_string(),
            title: doc.title().to_string(),
            description: doc.description().map(str::to_string),
            root_classes: root.map(|r| r.classes.to_string()),
            content: root.map(|r| r.inner_html().as_str().trim().to_string()),
            current_links: doc
                .nav_links()
                .iter()
                .filter(|link| link.is_current_page())
                .map(|link| link.href.clone())
                .collect(),
            history: doc
                .history()
                .entries()
                .iter()
                .map(|entry| entry.url.to_string())
                .collect(),
            history_index: doc.history().index(),
            scroll: doc.scroll(),
            scroll_target: doc.scroll_target().map(|t| t.target.clone()),
            full_navigations: doc.full_navigations().iter().map(|u| u.to_string()).collect(),
            menu_expanded: doc.menu().aria_expanded(),
            body_class: doc.menu().body_class(),
            decoration,
        }
    }
}
