//! Active-link indicator
//!
//! Marks the nav links pointing at the current page with `aria-current="page"`.
//! Must be re-run after every swap and every history or hash event, since the
//! set of links may have changed with the content.

use softnav_document::NavLink;
use url::Url;

use crate::normalize::page_key;

/// Set or clear `aria-current` on every nav link except button-styled ones.
///
/// Link hrefs are resolved against `base`, the document location.
pub fn update_active_link_indicator(
    links: &mut [NavLink],
    base: &Url,
    target: &Url,
    button_class: &str,
) {
    let current = page_key(target);

    for link in links.iter_mut() {
        if link.classes.contains(button_class) {
            continue;
        }

        let is_current = base
            .join(&link.href)
            .map(|resolved| page_key(&resolved) == current)
            .unwrap_or(false);

        link.aria_current = is_current.then(|| "page".to_string());
    }
}
