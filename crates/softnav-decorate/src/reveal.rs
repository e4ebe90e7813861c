//! Reveal targets
//!
//! Elements that fade in as they scroll into view. Hero items are staggered by
//! position, grouped items by their index inside the group (capped at 4), and
//! everything else appears without a delay. Elements already carrying the
//! `reveal` class are left as they are but still take part.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use softnav_document::parse_selector;
use std::time::Duration;

/// Delay added per stagger index
pub const REVEAL_STEP: Duration = Duration::from_millis(80);

const MAX_STAGGER: usize = 4;
const REVEAL_CLASS: &str = "reveal";
const VISIBLE_CLASS: &str = "is-visible";

const PLAIN_TARGETS: &str =
    ".section-head, .callout, .cta-strip, .calc, .output, .bullets, .hero-actions, .art-card";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealTarget {
    /// Tag, id and classes of the element, e.g. `div.card`
    pub element: String,
    /// `--reveal-delay` in milliseconds, if the element has one
    pub delay_ms: Option<u64>,
    /// Shown without waiting to scroll into view
    pub visible: bool,
}

impl RevealTarget {
    pub fn delay(&self) -> Option<Duration> {
        self.delay_ms.map(Duration::from_millis)
    }
}

pub struct RevealPlanner {
    hero: Selector,
    hero_items: Selector,
    plain: Selector,
    /// (container, item) pairs staggered per container
    groups: Vec<(Selector, Selector)>,
    any: Selector,
}

impl RevealPlanner {
    pub fn new() -> softnav_document::Result<Self> {
        Ok(Self {
            hero: parse_selector(".hero")?,
            hero_items: parse_selector(".hero-inner > div, .hero-inner > aside")?,
            plain: parse_selector(PLAIN_TARGETS)?,
            groups: vec![
                (parse_selector(".cards")?, parse_selector(".card")?),
                (parse_selector(".steps")?, parse_selector("li")?),
                (parse_selector(".flow")?, parse_selector(".flow-box")?),
                (parse_selector(".timeline")?, parse_selector(".milestone")?),
            ],
            any: parse_selector("*")?,
        })
    }

    /// Reveal targets of a content fragment, in document order.
    ///
    /// Under reduced motion every target starts visible.
    pub fn plan(&self, fragment: &Html, reduced_motion: bool) -> Vec<RevealTarget> {
        let mut marks = Marks::default();

        if let Some(hero) = fragment.select(&self.hero).next() {
            for (index, item) in hero.select(&self.hero_items).enumerate() {
                marks.mark(item, Some(index));
            }
        }

        for item in fragment.select(&self.plain) {
            marks.mark(item, None);
        }

        for (container, item) in &self.groups {
            for group in fragment.select(container) {
                for (index, el) in group.select(item).enumerate() {
                    marks.mark(el, Some(index.min(MAX_STAGGER)));
                }
            }
        }

        fragment
            .select(&self.any)
            .filter_map(|el| {
                let delay = if has_class(el, REVEAL_CLASS) {
                    None
                } else {
                    marks.delay_of(el)?
                };
                Some(RevealTarget {
                    element: describe(el),
                    delay_ms: delay.map(|index| REVEAL_STEP.as_millis() as u64 * index as u64),
                    visible: reduced_motion || has_class(el, VISIBLE_CLASS),
                })
            })
            .collect()
    }
}

/// Elements marked during one pass. The first mark wins.
#[derive(Default)]
struct Marks<'a> {
    items: Vec<(ElementRef<'a>, Option<usize>)>,
}

impl<'a> Marks<'a> {
    fn mark(&mut self, el: ElementRef<'a>, delay_index: Option<usize>) {
        if has_class(el, REVEAL_CLASS) || self.items.iter().any(|(seen, _)| seen.id() == el.id()) {
            return;
        }
        self.items.push((el, delay_index));
    }

    /// `None` when unmarked, `Some(None)` when marked without delay
    fn delay_of(&self, el: ElementRef<'_>) -> Option<Option<usize>> {
        self.items
            .iter()
            .find(|(seen, _)| seen.id() == el.id())
            .map(|(_, delay)| *delay)
    }
}

fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn describe(el: ElementRef<'_>) -> String {
    let value = el.value();
    let mut out = value.name().to_string();
    if let Some(id) = value.id() {
        out.push('#');
        out.push_str(id);
    }
    for class in value.classes() {
        out.push('.');
        out.push_str(class);
    }
    out
}
