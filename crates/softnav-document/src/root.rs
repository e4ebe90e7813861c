//! The content root: the one subtree swapped between pages

use serde::{Deserialize, Serialize};

use crate::class_list::ClassList;

/// Inner markup of a content region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup(String);

impl Markup {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct ContentRoot {
    /// Identifying attribute value (`id`), stable across pages
    pub id: String,
    pub classes: ClassList,
    inner_html: Markup,
    /// Bumped on every swap; a new generation is a brand new subtree
    generation: u64,
    decorated: bool,
}

impl ContentRoot {
    pub fn new(id: impl Into<String>, classes: ClassList, inner_html: Markup) -> Self {
        Self {
            id: id.into(),
            classes,
            inner_html,
            generation: 0,
            decorated: false,
        }
    }

    pub fn inner_html(&self) -> &Markup {
        &self.inner_html
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the subtree. Bindings attached to the old subtree are gone.
    pub fn replace_inner(&mut self, markup: Markup) {
        self.inner_html = markup;
        self.generation += 1;
        self.decorated = false;
    }

    /// Claim this subtree for decoration. Returns false if it was already claimed.
    pub fn claim_decoration(&mut self) -> bool {
        if self.decorated {
            return false;
        }
        self.decorated = true;
        true
    }
}
