//! The document view capability

use serde::{Deserialize, Serialize};
use url::Url;

use crate::class_list::ClassList;
use crate::history::HistoryState;
use crate::links::NavLink;
use crate::root::{ContentRoot, Markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Jump instantly
    Auto,
    Smooth,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub x: i64,
    pub y: i64,
}

/// Everything the navigation core needs from a live document.
///
/// Implementations own the rendering tree; the core only asks for these
/// operations and never inspects markup itself.
pub trait DocumentView {
    /// Current address bar location
    fn location(&self) -> &Url;

    fn content_root(&self) -> Option<&ContentRoot>;

    fn content_root_mut(&mut self) -> Option<&mut ContentRoot>;

    /// Edit the content root's class list in place. Returns false when there is no root.
    fn edit_root_classes(&mut self, edit: &mut dyn FnMut(&mut ClassList)) -> bool;

    /// In-page navigational links as currently present in the document
    fn nav_links_mut(&mut self) -> &mut [NavLink];

    /// Swap the content root's inner markup. Returns false when there is no root.
    fn replace_region(&mut self, markup: Markup) -> bool;

    /// Update title and description. `None` leaves the current value untouched;
    /// an existing description is never removed.
    fn set_metadata(&mut self, title: Option<&str>, description: Option<&str>);

    fn has_element(&self, id: &str) -> bool;

    /// Scroll the element with this id to the viewport's leading edge.
    /// Returns false, doing nothing, when no such element exists.
    fn scroll_into_view(&mut self, id: &str, behavior: ScrollBehavior) -> bool;

    fn scroll_to_origin(&mut self);

    /// `history.pushState`: records a new entry and updates the location
    fn push_history(&mut self, state: HistoryState, url: &Url);

    /// Full browser navigation, like `location.assign`
    fn assign(&mut self, url: &Url);

    fn close_nav_menu(&mut self);
}

/// Re-attaches interactive behavior to a freshly swapped-in content root.
///
/// Called once per swap. Implementations must tolerate a repeated call on the
/// same subtree without binding twice.
pub trait DecorationHook {
    fn decorate(&self, root: &mut ContentRoot);
}

impl<F> DecorationHook for F
where
    F: Fn(&mut ContentRoot),
{
    fn decorate(&self, root: &mut ContentRoot) {
        self(root)
    }
}
