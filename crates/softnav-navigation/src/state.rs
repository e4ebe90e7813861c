//! Navigation state and the single-flight guard

use parking_lot::Mutex;
use url::Url;

/// Process-wide navigation bookkeeping, owned by the controller
#[derive(Debug, Clone)]
pub struct NavigationState {
    /// Single-flight guard
    pub is_navigating: bool,
    /// Last confirmed page identity
    pub current_url: Url,
}

impl NavigationState {
    pub fn new(current_url: Url) -> Self {
        Self {
            is_navigating: false,
            current_url,
        }
    }
}

/// Holds the guard for the lifetime of one navigation sequence.
///
/// Released on drop, so every exit path lets go of it: normal completion,
/// fallback, early return, or the navigation future being dropped mid-await.
pub(crate) struct InFlight<'a> {
    state: &'a Mutex<NavigationState>,
}

impl<'a> InFlight<'a> {
    /// Take the guard, or `None` if a navigation is already running
    pub(crate) fn begin(state: &'a Mutex<NavigationState>) -> Option<Self> {
        let mut guard = state.lock();
        if guard.is_navigating {
            return None;
        }
        guard.is_navigating = true;
        Some(Self { state })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.lock().is_navigating = false;
    }
}
