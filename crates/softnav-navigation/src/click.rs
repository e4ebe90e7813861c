//! Link click filtering
//!
//! Decides whether a click becomes a soft navigation or is left to the browser.
//! Only plain primary clicks on same-origin document links are taken over;
//! assets, mail links, external links and new-window requests stay native.

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub meta: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.meta || self.ctrl || self.shift || self.alt
    }
}

/// A click whose target resolved to an anchor element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkClick {
    /// Raw `href` attribute
    pub href: String,
    /// 0 is the primary button
    pub button: u16,
    pub modifiers: Modifiers,
    /// `target` attribute, if any
    pub target: Option<String>,
    /// Link carries a `download` attribute
    pub download: bool,
    /// Someone else already called `preventDefault`
    pub default_prevented: bool,
}

impl LinkClick {
    /// Plain primary-button click on a link
    pub fn primary(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            button: 0,
            modifiers: Modifiers::default(),
            target: None,
            download: false,
            default_prevented: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeReason {
    AlreadyHandled,
    NotPrimaryButton,
    ModifierKey,
    OtherBrowsingContext,
    Download,
    /// `href="#..."`, native scrolling handles it
    FragmentOnly,
    InvalidHref,
    CrossOrigin,
    NotADocument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickDecision {
    Intercept(Url),
    Native(NativeReason),
}

/// Filter a click against the document location.
///
/// `page_extension` is the document extension eligible for soft navigation
/// (e.g. `.html`); the bare root path `/` is always eligible.
pub fn intercept(click: &LinkClick, location: &Url, page_extension: &str) -> ClickDecision {
    use ClickDecision::Native;

    if click.default_prevented {
        return Native(NativeReason::AlreadyHandled);
    }
    if click.button != 0 {
        return Native(NativeReason::NotPrimaryButton);
    }
    if click.modifiers.any() {
        return Native(NativeReason::ModifierKey);
    }
    if let Some(target) = click.target.as_deref() {
        if !target.is_empty() && target != "_self" {
            return Native(NativeReason::OtherBrowsingContext);
        }
    }
    if click.download {
        return Native(NativeReason::Download);
    }
    if click.href.starts_with('#') {
        return Native(NativeReason::FragmentOnly);
    }

    let url = match location.join(&click.href) {
        Ok(url) => url,
        Err(_) => return Native(NativeReason::InvalidHref),
    };

    if url.origin() != location.origin() {
        return Native(NativeReason::CrossOrigin);
    }
    if url.path() != "/" && !url.path().ends_with(page_extension) {
        return Native(NativeReason::NotADocument);
    }

    ClickDecision::Intercept(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Url {
        Url::parse("https://site.test/index.html").unwrap()
    }

    fn decide(click: LinkClick) -> ClickDecision {
        intercept(&click, &location(), ".html")
    }

    #[test]
    fn test_intercepts_same_origin_pages() {
        assert_eq!(
            decide(LinkClick::primary("/docs/guide.html")),
            ClickDecision::Intercept(Url::parse("https://site.test/docs/guide.html").unwrap())
        );
        assert_eq!(
            decide(LinkClick::primary("https://site.test/")),
            ClickDecision::Intercept(Url::parse("https://site.test/").unwrap())
        );
        assert_eq!(
            decide(LinkClick::primary("about.html?tab=team")),
            ClickDecision::Intercept(Url::parse("https://site.test/about.html?tab=team").unwrap())
        );
        assert!(matches!(
            decide(LinkClick::primary("/index.html#pricing")),
            ClickDecision::Intercept(_)
        ));
    }

    #[test]
    fn test_leaves_native_clicks_alone() {
        let mut click = LinkClick::primary("/a.html");
        click.default_prevented = true;
        assert_eq!(decide(click), ClickDecision::Native(NativeReason::AlreadyHandled));

        let mut click = LinkClick::primary("/a.html");
        click.button = 1;
        assert_eq!(decide(click), ClickDecision::Native(NativeReason::NotPrimaryButton));

        let mut click = LinkClick::primary("/a.html");
        click.modifiers.ctrl = true;
        assert_eq!(decide(click), ClickDecision::Native(NativeReason::ModifierKey));

        let mut click = LinkClick::primary("/a.html");
        click.target = Some("_blank".to_string());
        assert_eq!(decide(click), ClickDecision::Native(NativeReason::OtherBrowsingContext));

        let mut click = LinkClick::primary("/a.html");
        click.target = Some("_self".to_string());
        assert!(matches!(decide(click), ClickDecision::Intercept(_)));

        let mut click = LinkClick::primary("/a.html");
        click.download = true;
        assert_eq!(decide(click), ClickDecision::Native(NativeReason::Download));
    }

    #[test]
    fn test_leaves_other_targets_alone() {
        assert_eq!(
            decide(LinkClick::primary("#pricing")),
            ClickDecision::Native(NativeReason::FragmentOnly)
        );
        assert_eq!(
            decide(LinkClick::primary("https://other.test/a.html")),
            ClickDecision::Native(NativeReason::CrossOrigin)
        );
        assert_eq!(
            decide(LinkClick::primary("mailto:team@site.test")),
            ClickDecision::Native(NativeReason::CrossOrigin)
        );
        assert_eq!(
            decide(LinkClick::primary("/assets/logo.svg")),
            ClickDecision::Native(NativeReason::NotADocument)
        );
        assert_eq!(
            decide(LinkClick::primary("/docs/")),
            ClickDecision::Native(NativeReason::NotADocument)
        );
        assert_eq!(
            decide(LinkClick::primary("http://[::1")),
            ClickDecision::Native(NativeReason::InvalidHref)
        );
    }
}
