//! Headless site session
//!
//! Owns one document and one navigation controller, and plays the browser's
//! part around them: delivering events, and completing a full navigation
//! whenever the controller falls back to one.

use softnav_decorate::PageDecorator;
use softnav_document::{DocumentView, HeadlessDocument};
use softnav_fetch::PageSource;
use softnav_navigation::{LinkClick, NavEvent, NavigationController, Outcome};
use softnav_transition::{MotionGate, MotionSignal};
use url::Url;

use crate::config::Config;
use crate::snapshot::PageSnapshot;
use crate::Result;

pub struct Site<S> {
    config: Config,
    controller: NavigationController<HeadlessDocument, S, PageDecorator>,
    motion: MotionSignal,
}

impl<S: PageSource> Site<S> {
    /// Full load of `start`, then initial decoration
    pub async fn open(config: Config, source: S, start: Url) -> Result<Self> {
        config.validate()?;

        let html = source.load_document(&start).await?;
        let document = HeadlessDocument::load(&html, start.clone(), config.document_settings())?;

        let (motion, gate) = MotionGate::channel(config.reduced_motion);
        let decorator = PageDecorator::new(gate.clone())?;
        let controller = NavigationController::new(
            document,
            source,
            decorator,
            config.sequencer(gate),
            config.navigation_settings(),
        );
        controller.page_loaded();

        tracing::info!(url = %start, reduced_motion = config.reduced_motion, "Site opened");

        Ok(Self {
            config,
            controller,
            motion,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn controller(&self) -> &NavigationController<HeadlessDocument, S, PageDecorator> {
        &self.controller
    }

    /// Environment side of the reduced-motion preference
    pub fn motion(&self) -> &MotionSignal {
        &self.motion
    }

    pub fn location(&self) -> Url {
        self.controller.document().lock().location().clone()
    }

    /// Plain primary click on a link
    pub async fn click(&self, href: &str) -> Result<Outcome> {
        self.click_with(LinkClick::primary(href)).await
    }

    pub async fn click_with(&self, click: LinkClick) -> Result<Outcome> {
        self.dispatch(NavEvent::Click(click)).await
    }

    /// Browser back button. `None` at the start of history.
    pub async fn back(&self) -> Result<Option<Outcome>> {
        let pop = self.controller.document().lock().go_back();
        match pop {
            Some(pop) => self.dispatch(NavEvent::PopState(pop)).await.map(Some),
            None => Ok(None),
        }
    }

    /// Browser forward button. `None` at the end of history.
    pub async fn forward(&self) -> Result<Option<Outcome>> {
        let pop = self.controller.document().lock().go_forward();
        match pop {
            Some(pop) => self.dispatch(NavEvent::PopState(pop)).await.map(Some),
            None => Ok(None),
        }
    }

    /// Native jump to `#fragment`. `None` when the fragment did not change.
    pub async fn jump_to_hash(&self, fragment: &str) -> Result<Option<Outcome>> {
        let fragment = fragment.trim_start_matches('#');
        let changed = self.controller.document().lock().jump_to_fragment(fragment);
        if !changed {
            return Ok(None);
        }
        self.dispatch(NavEvent::HashChange).await.map(Some)
    }

    /// Click on the nav menu toggle button. Returns whether the menu is now open.
    pub fn toggle_menu(&self) -> bool {
        let mut doc = self.controller.document().lock();
        doc.menu_mut().toggle();
        doc.menu().is_open()
    }

    /// Key press anywhere in the page. Returns whether the menu is still open.
    pub fn press_key(&self, key: &str) -> bool {
        let mut doc = self.controller.document().lock();
        doc.menu_mut().handle_key(key);
        doc.menu().is_open()
    }

    /// Click on plain page content, outside the menu and its toggle
    pub fn click_outside(&self) -> bool {
        let mut doc = self.controller.document().lock();
        doc.menu_mut().handle_click(false, false, false);
        doc.menu().is_open()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let decoration = self.controller.decorator().current();
        PageSnapshot::capture(&self.controller.document().lock(), decoration)
    }

    async fn dispatch(&self, event: NavEvent) -> Result<Outcome> {
        let outcome = self.controller.handle(event).await;
        if let Outcome::FellBack(reason) = &outcome {
            tracing::debug!(?reason, "Completing full navigation");
            self.complete_full_navigation().await?;
        }
        Ok(outcome)
    }

    /// The browser side of `location.assign`: load the whole document
    async fn complete_full_navigation(&self) -> Result<()> {
        let url = self.location();
        let html = self.controller.source().load_document(&url).await?;

        self.controller.document().lock().reload(&html);
        self.controller.page_loaded();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use softnav_fetch::StaticPageSource;
    use softnav_navigation::Fallback;
    use tokio::time::Instant;

    const INDEX: &str = r#"<html><head><title>Home</title></head><body>
<nav class="nav"><a href="/index.html">Home</a><a href="/pricing.html">Pricing</a></nav>
<main id="main" class="page"><section class="hero"><div class="hero-inner"><div>Hi</div></div></section>
<section id="faq"><h2>FAQ</h2></section></main></body></html>"#;

    const PRICING: &str = r#"<html><head><title>Pricing</title><meta name="description" content="Credits"></head><body>
<nav class="nav"><a href="/index.html">Home</a><a href="/pricing.html">Pricing</a></nav>
<main id="main" class="page"><div class="calc" data-credits-calc>
<select id="device"><option value="laptop">Laptop</option></select>
<input id="hours" type="range" value="4">
<span id="hoursOut"></span><span id="creditsOut"></span><span id="tokensOut"></span><span id="noteOut"></span>
</div></main></body></html>"#;

    const PLAIN: &str = r#"<html><head><title>Legal</title></head><body><p>Terms</p></body></html>"#;

    fn url(path: &str) -> Url {
        Url::parse("https://site.test/").unwrap().join(path).unwrap()
    }

    fn source() -> StaticPageSource {
        StaticPageSource::new("#main")
            .unwrap()
            .with_page("/index.html", INDEX)
            .with_page("/pricing.html", PRICING)
            .with_page("/legal.html", PLAIN)
    }

    async fn open(config: Config, source: StaticPageSource) -> Site<StaticPageSource> {
        Site::open(config, source, url("/")).await.unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_decorates_start_page() {
        let site = open(Config::default(), source()).await;

        let snap = site.snapshot();
        assert_eq!(snap.title, "Home");
        assert_eq!(snap.root_classes.as_deref(), Some("page is-entered"));
        assert_eq!(snap.current_links, vec!["/index.html".to_string()]);

        let decoration = snap.decoration.unwrap();
        assert_eq!(decoration.reveals.len(), 1);
        assert_eq!(decoration.reveals[0].delay_ms, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_and_back() {
        let site = open(Config::default(), source()).await;

        let outcome = site.click("/pricing.html").await.unwrap();
        assert!(matches!(outcome, Outcome::Swapped));

        let snap = site.snapshot();
        assert_eq!(snap.title, "Pricing");
        assert_eq!(snap.description.as_deref(), Some("Credits"));
        assert_eq!(snap.current_links, vec!["/pricing.html".to_string()]);
        let calc = snap.decoration.unwrap().estimator.unwrap();
        assert_eq!(calc.output().tokens, "103,680 tokens/day");

        let outcome = site.back().await.unwrap();
        assert!(matches!(outcome, Some(Outcome::Swapped)));
        assert_eq!(site.snapshot().title, "Home");
        assert_eq!(site.snapshot().history_index, 0);

        assert!(site.back().await.unwrap().is_none());
        assert!(matches!(site.forward().await.unwrap(), Some(Outcome::Swapped)));
        assert!(site.forward().await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_loads_full_document() {
        let site = open(Config::default(), source().with_status("/pricing.html", 500, PRICING)).await;

        let outcome = site.click("/pricing.html").await.unwrap();
        assert!(matches!(outcome, Outcome::FellBack(Fallback::Fetch(_))));

        let snap = site.snapshot();
        assert_eq!(snap.url, "https://site.test/pricing.html");
        assert_eq!(snap.title, "Pricing");
        assert_eq!(snap.root_classes.as_deref(), Some("page is-entered"));
        assert_eq!(snap.full_navigations, vec![snap.url.clone()]);
        assert!(!site.controller().is_navigating());
        assert_eq!(site.controller().current_url(), url("/pricing.html"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_without_root_then_navigate() {
        let site = open(Config::default(), source()).await;

        site.click("/legal.html").await.unwrap();
        let snap = site.snapshot();
        assert_eq!(snap.title, "Legal");
        assert!(snap.root_classes.is_none());

        let outcome = site.click("/index.html").await.unwrap();
        assert!(matches!(outcome, Outcome::FellBack(Fallback::MissingContentRoot)));
        assert_eq!(site.snapshot().title, "Home");
        assert_eq!(site.snapshot().full_navigations.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hash_jump_syncs() {
        let site = open(Config::default(), source()).await;

        let outcome = site.jump_to_hash("#faq").await.unwrap();
        assert!(matches!(outcome, Some(Outcome::Synced)));
        assert_eq!(site.controller().current_url(), url("/#faq"));
        assert!(site.jump_to_hash("faq").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_motion_preference_is_live() {
        let site = open(Config::default(), source()).await;
        site.motion().set(true);

        let start = Instant::now();
        site.click("/pricing.html").await.unwrap();
        assert_eq!(start.elapsed(), std::time::Duration::ZERO);

        let snap = site.snapshot();
        assert!(snap.decoration.unwrap().reveals.iter().all(|r| r.visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_menu_closes_on_escape_and_outside_click() {
        let site = open(Config::default(), source()).await;

        assert!(site.toggle_menu());
        let snap = site.snapshot();
        assert_eq!(snap.menu_expanded, "true");
        assert_eq!(snap.body_class, Some("nav-open"));

        assert!(site.press_key("Tab"));
        assert!(!site.press_key("Escape"));
        assert_eq!(site.snapshot().menu_expanded, "false");

        assert!(site.toggle_menu());
        assert!(!site.click_outside());
        assert_eq!(site.snapshot().body_class, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_closes_open_menu() {
        let site = open(Config::default(), source()).await;
        site.toggle_menu();

        site.click("/pricing.html").await.unwrap();
        assert_eq!(site.snapshot().menu_expanded, "false");
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_serializes() {
        let site = open(Config::default(), source()).await;
        let value = serde_json::to_value(site.snapshot()).unwrap();

        assert_eq!(value["title"], "Home");
        assert_eq!(value["scroll"]["y"], 0);
    }

    #[tokio::test]
    async fn test_open_rejects_invalid_config() {
        let config = Config {
            page_extension: "html".to_string(),
            ..Config::default()
        };
        assert!(Site::open(config, source(), url("/")).await.is_err());
    }
}
