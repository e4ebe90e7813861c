//! Softnav Core
//!
//! Wires the components into one headless browsing session:
//! [`Config`] → [`Site`] (document + page source + decorator + controller).

mod config;
mod error;
mod site;
mod snapshot;

pub use config::{Config, ENV_ANIMATION_BUDGET_MS, ENV_REDUCED_MOTION};
pub use error::CoreError;
pub use site::Site;
pub use snapshot::PageSnapshot;

// Re-export the pieces a driver needs
pub use softnav_decorate::{Decoration, Estimate, PageDecorator};
pub use softnav_document::{DocumentView, HeadlessDocument};
pub use softnav_fetch::{FetchError, HttpPageSource, PageSource, StaticPageSource};
pub use softnav_navigation::{Fallback, LinkClick, NativeReason, NavEvent, Outcome};
pub use softnav_transition::MotionSignal;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
