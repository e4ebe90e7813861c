//! Softnav Document View
//!
//! The navigation core never touches a rendering tree directly. It works against
//! the [`DocumentView`] capability:
//! - `replace_region` swaps the content root's markup
//! - `set_metadata` updates title / description
//! - history, scroll and full-navigation requests
//!
//! [`HeadlessDocument`] implements the capability over parsed markup.

mod class_list;
mod error;
mod extract;
mod headless;
mod history;
mod links;
mod menu;
mod root;
mod view;

pub use class_list::ClassList;
pub use error::DocumentError;
pub use extract::{extract_description, extract_region, extract_title, parse_selector};
pub use headless::{DocumentSettings, HeadlessDocument, ScrollRecord};
pub use history::{HistoryEntry, HistoryState, PopState, SessionHistory};
pub use links::NavLink;
pub use menu::NavMenu;
pub use root::{ContentRoot, Markup};
pub use view::{DecorationHook, DocumentView, ScrollBehavior, ScrollPosition};

pub type Result<T> = std::result::Result<T, DocumentError>;
