//! Navigation controller
//!
//! ```text
//! IDLE
//!   ↓ navigate (guard taken, menu closed)
//! NAVIGATING
//!   ├─ no content root        → full navigation
//!   ├─ same page, no hash     → indicators only
//!   ├─ same page, hash        → push?, indicators, anchor scroll
//!   └─ other page             → animate out → fetch
//!                                  ├─ failure → full navigation
//!                                  └─ swap → decorate → indicators → push? → scroll → animate in
//!   ↓ guard released on every exit
//! IDLE
//! ```

use parking_lot::Mutex;
use softnav_document::{ClassList, DecorationHook, DocumentView, HistoryState};
use softnav_fetch::{PageSource, PendingResponse};
use softnav_transition::{TransitionPhase, TransitionSequencer};
use std::sync::Arc;
use url::Url;

use crate::anchor::scroll_to_hash;
use crate::event::{route, Fallback, NavEvent, Outcome, Route};
use crate::indicator::update_active_link_indicator;
use crate::normalize::{classify, has_hash, NavigationKind};
use crate::state::{InFlight, NavigationState};

#[derive(Debug, Clone)]
pub struct NavigationSettings {
    /// Class list the content root is reset to after a swap
    pub baseline_class: String,
    /// Nav links with this class never receive the active indicator
    pub button_class: String,
    /// Document extension eligible for soft navigation
    pub page_extension: String,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            baseline_class: "page".to_string(),
            button_class: "btn".to_string(),
            page_extension: ".html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Push a history entry for the target
    pub push: bool,
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self { push: true }
    }
}

pub struct NavigationController<D, S, H> {
    document: Arc<Mutex<D>>,
    source: S,
    decorator: H,
    sequencer: TransitionSequencer,
    state: Mutex<NavigationState>,
    settings: NavigationSettings,
}

impl<D, S, H> NavigationController<D, S, H>
where
    D: DocumentView,
    S: PageSource,
    H: DecorationHook,
{
    pub fn new(
        document: D,
        source: S,
        decorator: H,
        sequencer: TransitionSequencer,
        settings: NavigationSettings,
    ) -> Self {
        let current_url = document.location().clone();
        Self {
            document: Arc::new(Mutex::new(document)),
            source,
            decorator,
            sequencer,
            state: Mutex::new(NavigationState::new(current_url)),
            settings,
        }
    }

    pub fn document(&self) -> &Arc<Mutex<D>> {
        &self.document
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn decorator(&self) -> &H {
        &self.decorator
    }

    pub fn sequencer(&self) -> &TransitionSequencer {
        &self.sequencer
    }

    pub fn is_navigating(&self) -> bool {
        self.state.lock().is_navigating
    }

    pub fn current_url(&self) -> Url {
        self.state.lock().current_url.clone()
    }

    /// Initialise a freshly loaded document: mark the root entered, decorate it,
    /// and start bookkeeping from its location.
    pub fn page_loaded(&self) {
        let mut doc = self.document.lock();
        let baseline = self.settings.baseline_class.as_str();
        doc.edit_root_classes(&mut |classes: &mut ClassList| {
            for class in baseline.split_whitespace() {
                classes.add(class);
            }
            classes.add(TransitionPhase::Entered.class_name());
        });
        if let Some(root) = doc.content_root_mut() {
            self.decorator.decorate(root);
        }

        let location = doc.location().clone();
        self.refresh_indicator(&mut *doc, &location);
        self.state.lock().current_url = location.clone();

        tracing::info!(url = %location, "Page loaded");
    }

    /// Handle one trigger from the platform
    pub async fn handle(&self, event: NavEvent) -> Outcome {
        let location = self.document.lock().location().clone();

        match route(&event, &location, &self.settings.page_extension) {
            Route::Native(reason) => {
                tracing::trace!(?reason, "Leaving event to the browser");
                Outcome::Ignored(reason)
            }
            Route::Navigate { url, push } => self.navigate(url, NavigateOptions { push }).await,
            Route::SyncLocation(url) => {
                let mut doc = self.document.lock();
                self.refresh_indicator(&mut *doc, &url);
                self.state.lock().current_url = url;
                Outcome::Synced
            }
        }
    }

    /// Run one navigation sequence to `url`
    pub async fn navigate(&self, url: Url, options: NavigateOptions) -> Outcome {
        let Some(_in_flight) = InFlight::begin(&self.state) else {
            tracing::trace!(url = %url, "Navigation in flight, dropping request");
            return Outcome::Dropped;
        };

        {
            let mut doc = self.document.lock();
            doc.close_nav_menu();

            if doc.content_root().is_none() {
                tracing::warn!(url = %url, "No content root, falling back to full navigation");
                doc.assign(&url);
                return Outcome::FellBack(Fallback::MissingContentRoot);
            }
        }

        let current = self.current_url();
        match classify(&current, &url) {
            NavigationKind::Refresh => {
                let mut doc = self.document.lock();
                self.refresh_indicator(&mut *doc, &url);
                self.state.lock().current_url = url;
                return Outcome::Refreshed;
            }
            NavigationKind::Anchor => {
                let mut doc = self.document.lock();
                if options.push {
                    doc.push_history(HistoryState::new(&url), &url);
                }
                self.refresh_indicator(&mut *doc, &url);
                scroll_to_hash(&mut *doc, &url, self.sequencer.gate());
                self.state.lock().current_url = url;
                return Outcome::Anchored;
            }
            NavigationKind::Swap => {}
        }

        tracing::debug!(from = %current, to = %url, "Starting content swap");

        self.sequencer.animate_out(&*self.document).await;

        let page = match self.source.fetch_page(&url).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "Fetch failed, falling back to full navigation");
                self.document.lock().assign(&url);
                return Outcome::FellBack(Fallback::Fetch(err));
            }
        };

        self.swap(&url, page, options.push);

        self.sequencer.animate_in(&*self.document).await;

        // Measure the anchor only once the new layout has settled
        if has_hash(&url) {
            scroll_to_hash(&mut *self.document.lock(), &url, self.sequencer.gate());
        }

        tracing::info!(url = %url, "Content swapped");
        Outcome::Swapped
    }

    fn swap(&self, url: &Url, page: PendingResponse, push: bool) {
        let mut doc = self.document.lock();

        doc.replace_region(page.content);
        let baseline = self.settings.baseline_class.as_str();
        doc.edit_root_classes(&mut |classes: &mut ClassList| classes.reset(baseline));
        doc.set_metadata(page.title.as_deref(), page.description.as_deref());

        if let Some(root) = doc.content_root_mut() {
            self.decorator.decorate(root);
        }

        self.refresh_indicator(&mut *doc, url);
        self.state.lock().current_url = url.clone();

        if push {
            doc.push_history(HistoryState::new(url), url);
        }
        if !has_hash(url) {
            doc.scroll_to_origin();
        }
    }

    fn refresh_indicator(&self, doc: &mut D, target: &Url) {
        let base = doc.location().clone();
        update_active_link_indicator(
            doc.nav_links_mut(),
            &base,
            target,
            &self.settings.button_class,
        );
    }
}
