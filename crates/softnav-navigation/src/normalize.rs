//! Page identity
//!
//! Two URLs name the same page iff their canonical paths (a trailing `/`
//! expanded to `/index.html`) and non-empty queries match. The page key, the
//! last segment of the canonical path, only drives the active-link indicator.

use serde::{Deserialize, Serialize};
use url::Url;

/// How a navigation from one URL to another must be carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    /// Same page, same query, no hash: nothing to load
    Refresh,
    /// Same page, same query, hash present: in-page anchor scroll
    Anchor,
    /// Different page or different query: full content swap
    Swap,
}

pub fn canonical_path(url: &Url) -> String {
    let path = url.path();
    if path.ends_with('/') {
        format!("{}index.html", path)
    } else {
        path.to_string()
    }
}

pub fn page_key(url: &Url) -> String {
    canonical_path(url)
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// A non-empty fragment. `page.html#` has no hash.
pub fn has_hash(url: &Url) -> bool {
    url.fragment().is_some_and(|f| !f.is_empty())
}

fn search(url: &Url) -> Option<&str> {
    url.query().filter(|q| !q.is_empty())
}

pub fn classify(current: &Url, target: &Url) -> NavigationKind {
    let same_page =
        canonical_path(current) == canonical_path(target) && search(current) == search(target);

    match (same_page, has_hash(target)) {
        (true, false) => NavigationKind::Refresh,
        (true, true) => NavigationKind::Anchor,
        (false, _) => NavigationKind::Swap,
    }
}
