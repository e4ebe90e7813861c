//! Navigation triggers and their results
//!
//! [`route`] is the pure half of event handling: given an event and the current
//! location it decides what should happen, without touching any state.

use softnav_document::PopState;
use softnav_fetch::FetchError;
use url::Url;

use crate::click::{intercept, ClickDecision, LinkClick, NativeReason};

#[derive(Debug, Clone)]
pub enum NavEvent {
    /// Click on an anchor element
    Click(LinkClick),
    /// Back/forward traversal; the location has already changed
    PopState(PopState),
    /// The browser already jumped to a new fragment
    HashChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Leave the event to the browser
    Native(NativeReason),
    Navigate { url: Url, push: bool },
    /// Only bookkeeping and indicators follow the new location
    SyncLocation(Url),
}

pub fn route(event: &NavEvent, location: &Url, page_extension: &str) -> Route {
    match event {
        NavEvent::Click(click) => match intercept(click, location, page_extension) {
            ClickDecision::Intercept(url) => Route::Navigate { url, push: true },
            ClickDecision::Native(reason) => Route::Native(reason),
        },
        NavEvent::PopState(pop) => {
            let url = pop
                .history_state()
                .and_then(|state| location.join(&state.url).ok())
                .unwrap_or_else(|| location.clone());
            Route::Navigate { url, push: false }
        }
        NavEvent::HashChange => Route::SyncLocation(location.clone()),
    }
}

/// Why a navigation was handed to the browser
#[derive(Debug)]
pub enum Fallback {
    /// The live document has nothing to swap
    MissingContentRoot,
    Fetch(FetchError),
}

/// Result of handling one event
#[derive(Debug)]
pub enum Outcome {
    /// Not a soft navigation; the browser handles it
    Ignored(NativeReason),
    /// Another navigation was in flight
    Dropped,
    /// Same page: indicators and bookkeeping only
    Refreshed,
    /// In-page anchor, no fetch
    Anchored,
    /// Content swapped
    Swapped,
    /// Full browser navigation requested
    FellBack(Fallback),
    /// Location change after a native fragment jump
    Synced,
}

impl Outcome {
    /// The document now shows the target URL without a reload
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            Outcome::Refreshed | Outcome::Anchored | Outcome::Swapped | Outcome::Synced
        )
    }
}
