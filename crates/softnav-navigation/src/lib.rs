//! Softnav Navigation
//!
//! Soft navigation state machine:
//! - Link clicks are filtered down to same-origin document pages
//! - Same page without hash → indicator refresh only
//! - Same page with hash → anchor scroll, no fetch
//! - Anything else → exit animation, fetch, swap, enter animation
//!
//! At most one navigation runs at a time. Triggers arriving while one is in
//! flight are dropped, not queued. Any failure hands control back to a full
//! browser navigation.

mod anchor;
mod click;
mod controller;
mod event;
mod indicator;
mod normalize;
mod state;

pub use anchor::{decode_fragment, scroll_to_hash};
pub use click::{intercept, ClickDecision, LinkClick, Modifiers, NativeReason};
pub use controller::{NavigateOptions, NavigationController, NavigationSettings};
pub use event::{route, Fallback, NavEvent, Outcome, Route};
pub use indicator::update_active_link_indicator;
pub use normalize::{canonical_path, classify, has_hash, page_key, NavigationKind};
pub use state::NavigationState;
