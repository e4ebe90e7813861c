//! Extraction result for one navigation attempt

use scraper::{Html, Selector};
use softnav_document::{
    extract_description, extract_region, extract_title, parse_selector, Markup,
};

use crate::error::FetchError;
use crate::Result;

/// Selector of the content region, kept with its source text for error reporting
#[derive(Debug, Clone)]
pub struct Region {
    source: String,
    selector: Selector,
}

impl Region {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self {
            source: source.to_string(),
            selector: parse_selector(source)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// What a swap needs from a fetched page. Dropped once the swap is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingResponse {
    /// Inner markup of the fetched content region
    pub content: Markup,
    /// `None` leaves the host title unchanged
    pub title: Option<String>,
    /// `None` leaves the host description unchanged
    pub description: Option<String>,
}

impl PendingResponse {
    /// Parse a full document and extract the region matching `region`
    pub fn from_document(body: &str, region: &Region) -> Result<Self> {
        let doc = Html::parse_document(body);

        let content = extract_region(&doc, &region.selector)
            .ok_or_else(|| FetchError::MissingRegion(region.source.clone()))?;

        Ok(Self {
            content,
            title: extract_title(&doc),
            description: extract_description(&doc),
        })
    }
}

/// Whether a `Content-Type` value can be parsed as an HTML document.
/// A missing header is given the benefit of the doubt.
pub(crate) fn is_document_type(content_type: Option<&str>) -> bool {
    let Some(value) = content_type else {
        return true;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    matches!(mime.as_str(), "" | "text/html" | "application/xhtml+xml")
}
