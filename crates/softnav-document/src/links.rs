//! In-page navigational links

use crate::class_list::ClassList;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Raw `href` attribute, resolved against the document location when compared
    pub href: String,
    pub classes: ClassList,
    /// `aria-current` attribute value
    pub aria_current: Option<String>,
}

impl NavLink {
    pub fn new(href: impl Into<String>, classes: ClassList) -> Self {
        Self {
            href: href.into(),
            classes,
            aria_current: None,
        }
    }

    pub fn is_current_page(&self) -> bool {
        self.aria_current.as_deref() == Some("page")
    }
}
