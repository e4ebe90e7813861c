//! Headless document
//!
//! A [`DocumentView`] over parsed markup, with no layout or script engine.
//! Everything the navigation core does to it is observable afterwards:
//! root class states, history, scroll requests and full navigations.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::class_list::ClassList;
use crate::extract::{extract_description, extract_title, parse_selector};
use crate::history::{HistoryState, PopState, SessionHistory};
use crate::links::NavLink;
use crate::menu::NavMenu;
use crate::root::{ContentRoot, Markup};
use crate::view::{DocumentView, ScrollBehavior, ScrollPosition};
use crate::Result;

#[derive(Debug, Clone)]
pub struct DocumentSettings {
    /// Selector identifying the content root
    pub content_selector: String,
    /// Selector for in-page navigational links
    pub nav_link_selector: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            content_selector: "#main".to_string(),
            nav_link_selector: ".nav a".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRecord {
    pub target: String,
    pub behavior: ScrollBehavior,
}

pub struct HeadlessDocument {
    settings: DocumentSettings,
    content_selector: Selector,
    link_selector: Selector,
    location: Url,
    title: String,
    description: Option<String>,
    root: Option<ContentRoot>,
    /// Shell links first, then links found inside the content root
    links: Vec<NavLink>,
    shell_link_count: usize,
    shell_ids: HashSet<String>,
    content_ids: HashSet<String>,
    menu: NavMenu,
    history: SessionHistory,
    scroll: ScrollPosition,
    scroll_target: Option<ScrollRecord>,
    root_class_log: Vec<String>,
    full_navigations: Vec<Url>,
}

impl HeadlessDocument {
    /// Parse a full document served at `location`
    pub fn load(html: &str, location: Url, settings: DocumentSettings) -> Result<Self> {
        let content_selector = parse_selector(&settings.content_selector)?;
        let link_selector = parse_selector(&settings.nav_link_selector)?;

        let mut doc = Self {
            settings,
            content_selector,
            link_selector,
            history: SessionHistory::new(location.clone()),
            location,
            title: String::new(),
            description: None,
            root: None,
            links: Vec::new(),
            shell_link_count: 0,
            shell_ids: HashSet::new(),
            content_ids: HashSet::new(),
            menu: NavMenu::new(),
            scroll: ScrollPosition::default(),
            scroll_target: None,
            root_class_log: Vec::new(),
            full_navigations: Vec::new(),
        };
        doc.parse_into(html);
        Ok(doc)
    }

    /// Replace the whole document after a full navigation, keeping session history
    pub fn reload(&mut self, html: &str) {
        self.parse_into(html);
        self.menu.close();
        self.scroll = ScrollPosition::default();
        self.scroll_target = None;
        self.root_class_log.clear();

        tracing::debug!(url = %self.location, "Document reloaded");
    }

    fn parse_into(&mut self, html: &str) {
        let parsed = Html::parse_document(html);

        self.title = extract_title(&parsed).unwrap_or_default();
        self.description = extract_description(&parsed);

        let root_el = parsed.select(&self.content_selector).next();
        self.root = root_el.map(|el| {
            let id = el
                .value()
                .attr("id")
                .unwrap_or(self.settings.content_selector.as_str())
                .trim_start_matches('#')
                .to_string();
            let classes = ClassList::parse(el.value().attr("class").unwrap_or(""));
            ContentRoot::new(id, classes, Markup::new(el.inner_html()))
        });

        let inside_root = |el: &ElementRef<'_>| match root_el {
            Some(root) => el.ancestors().any(|node| node.id() == root.id()),
            None => false,
        };

        self.links = parsed
            .select(&self.link_selector)
            .filter(|el| !inside_root(el))
            .filter_map(nav_link)
            .collect();
        self.shell_link_count = self.links.len();

        self.shell_ids = match Selector::parse("[id]") {
            Ok(sel) => parsed
                .select(&sel)
                .filter(|el| !inside_root(el))
                .filter_map(|el| el.value().attr("id").map(str::to_string))
                .collect(),
            Err(_) => HashSet::new(),
        };

        self.refresh_content_index();
    }

    /// Re-read links and ids living inside the content root
    fn refresh_content_index(&mut self) {
        self.links.truncate(self.shell_link_count);
        self.content_ids.clear();

        let Some(root) = &self.root else {
            return;
        };

        let fragment = Html::parse_fragment(root.inner_html().as_str());
        self.links
            .extend(fragment.select(&self.link_selector).filter_map(nav_link));

        if let Ok(sel) = Selector::parse("[id]") {
            self.content_ids = fragment
                .select(&sel)
                .filter_map(|el| el.value().attr("id").map(str::to_string))
                .collect();
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn nav_links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn menu(&self) -> &NavMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut NavMenu {
        &mut self.menu
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn scroll(&self) -> ScrollPosition {
        self.scroll
    }

    /// User scrolling
    pub fn set_scroll(&mut self, position: ScrollPosition) {
        self.scroll = position;
    }

    /// Last element scrolled into view, cleared by a scroll to the origin
    pub fn scroll_target(&self) -> Option<&ScrollRecord> {
        self.scroll_target.as_ref()
    }

    /// Every class list the content root went through, in order
    pub fn root_class_log(&self) -> &[String] {
        &self.root_class_log
    }

    /// Full browser navigations requested so far
    pub fn full_navigations(&self) -> &[Url] {
        &self.full_navigations
    }

    /// Browser back button. The location changes before the event is delivered.
    pub fn go_back(&mut self) -> Option<PopState> {
        let pop = self.history.back()?;
        self.location = pop.url.clone();
        Some(pop)
    }

    pub fn go_forward(&mut self) -> Option<PopState> {
        let pop = self.history.forward()?;
        self.location = pop.url.clone();
        Some(pop)
    }

    /// Native fragment navigation: the browser jumps to the anchor and pushes an
    /// entry on its own. Returns false when the fragment did not change.
    pub fn jump_to_fragment(&mut self, fragment: &str) -> bool {
        let mut url = self.location.clone();
        url.set_fragment(Some(fragment));
        if url == self.location {
            return false;
        }

        self.history.push(url.clone(), None);
        self.location = url;
        if self.has_element(fragment) {
            self.scroll_target = Some(ScrollRecord {
                target: fragment.to_string(),
                behavior: ScrollBehavior::Auto,
            });
        }
        true
    }
}

fn nav_link(el: ElementRef<'_>) -> Option<NavLink> {
    let href = el.value().attr("href")?;
    let classes = ClassList::parse(el.value().attr("class").unwrap_or(""));
    Some(NavLink::new(href, classes))
}

impl DocumentView for HeadlessDocument {
    fn location(&self) -> &Url {
        &self.location
    }

    fn content_root(&self) -> Option<&ContentRoot> {
        self.root.as_ref()
    }

    fn content_root_mut(&mut self) -> Option<&mut ContentRoot> {
        self.root.as_mut()
    }

    fn edit_root_classes(&mut self, edit: &mut dyn FnMut(&mut ClassList)) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        edit(&mut root.classes);
        let snapshot = root.classes.to_string();
        self.root_class_log.push(snapshot);
        true
    }

    fn nav_links_mut(&mut self) -> &mut [NavLink] {
        &mut self.links
    }

    fn replace_region(&mut self, markup: Markup) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        root.replace_inner(markup);
        self.refresh_content_index();
        true
    }

    fn set_metadata(&mut self, title: Option<&str>, description: Option<&str>) {
        if let Some(title) = title {
            self.title = title.to_string();
        }
        if let Some(description) = description {
            self.description = Some(description.to_string());
        }
    }

    fn has_element(&self, id: &str) -> bool {
        self.shell_ids.contains(id) || self.content_ids.contains(id)
    }

    fn scroll_into_view(&mut self, id: &str, behavior: ScrollBehavior) -> bool {
        if !self.has_element(id) {
            return false;
        }
        self.scroll_target = Some(ScrollRecord {
            target: id.to_string(),
            behavior,
        });
        true
    }

    fn scroll_to_origin(&mut self) {
        self.scroll = ScrollPosition::default();
        self.scroll_target = None;
    }

    fn push_history(&mut self, state: HistoryState, url: &Url) {
        self.history.push(url.clone(), Some(state.to_value()));
        self.location = url.clone();
    }

    fn assign(&mut self, url: &Url) {
        tracing::debug!(url = %url, "Full navigation requested");
        self.history.push(url.clone(), None);
        self.location = url.clone();
        self.full_navigations.push(url.clone());
    }

    fn close_nav_menu(&mut self) {
        self.menu.close();
    }
}
