//! Softnav Decoration
//!
//! Re-attaches in-page behavior to a content root after it is swapped in:
//! - Reveal targets: which elements animate into view, and with what delay
//! - Credits estimator: the `[data-credits-calc]` block, bound and computed
//!
//! [`PageDecorator`] is the [`softnav_document::DecorationHook`] handed to the
//! navigation controller. It decorates a given root at most once.

mod decorator;
mod estimator;
mod reveal;

pub use decorator::{Decoration, PageDecorator};
pub use estimator::{
    estimate, format_thousands, profile, CreditsEstimator, DeviceProfile, Estimate, PROFILES,
};
pub use reveal::{RevealPlanner, RevealTarget, REVEAL_STEP};
