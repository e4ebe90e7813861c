//! In-memory and on-disk page source
//!
//! Serves a static site without a server. Paths ending in `/` resolve to
//! `index.html`, the way static hosts do.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;
use crate::page::{PendingResponse, Region};
use crate::source::PageSource;
use crate::Result;

#[derive(Debug, Clone)]
struct StaticPage {
    status: u16,
    body: String,
}

/// One request served by a [`StaticPageSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRecord {
    pub url: Url,
    /// Sent as a soft-navigation fetch
    pub tagged: bool,
}

#[derive(Debug, Clone)]
pub struct StaticPageSource {
    pages: HashMap<String, StaticPage>,
    region: Region,
    latency: Duration,
    requests: Arc<Mutex<Vec<FetchRecord>>>,
}

impl StaticPageSource {
    pub fn new(content_selector: &str) -> Result<Self> {
        Ok(Self {
            pages: HashMap::new(),
            region: Region::parse(content_selector)?,
            latency: Duration::ZERO,
            requests: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Serve every `.html` file below `dir`
    pub fn from_dir(dir: &Path, content_selector: &str) -> Result<Self> {
        let mut source = Self::new(content_selector)?;
        collect_pages(dir, dir, &mut source)?;

        tracing::info!(dir = %dir.display(), pages = source.pages.len(), "Loaded static site");

        Ok(source)
    }

    pub fn with_page(self, path: &str, html: impl Into<String>) -> Self {
        self.with_status(path, 200, html)
    }

    pub fn with_status(mut self, path: &str, status: u16, html: impl Into<String>) -> Self {
        self.pages.insert(
            page_path(path),
            StaticPage {
                status,
                body: html.into(),
            },
        );
        self
    }

    /// Delay every response, simulating a slow network
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn requests(&self) -> Vec<FetchRecord> {
        self.requests.lock().clone()
    }

    /// Number of soft-navigation fetches served
    pub fn fetch_count(&self) -> usize {
        self.requests.lock().iter().filter(|r| r.tagged).count()
    }

    async fn serve(&self, url: &Url, tagged: bool) -> Option<StaticPage> {
        self.requests.lock().push(FetchRecord {
            url: url.clone(),
            tagged,
        });

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.pages.get(&page_path(url.path())).cloned()
    }
}

impl PageSource for StaticPageSource {
    async fn fetch_page(&self, url: &Url) -> Result<PendingResponse> {
        let page = self.serve(url, true).await.ok_or(FetchError::Status(404))?;
        if !(200..300).contains(&page.status) {
            return Err(FetchError::Status(page.status));
        }
        PendingResponse::from_document(&page.body, &self.region)
    }

    async fn load_document(&self, url: &Url) -> Result<String> {
        self.serve(url, false)
            .await
            .map(|page| page.body)
            .ok_or_else(|| FetchError::NotFound(url.path().to_string()))
    }
}

fn page_path(path: &str) -> String {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    if path.ends_with('/') {
        format!("{}index.html", path)
    } else {
        path
    }
}

fn collect_pages(root: &Path, dir: &Path, source: &mut StaticPageSource) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_pages(root, &path, source)?;
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("html") {
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let body = std::fs::read_to_string(&path)?;
        source.pages.insert(
            page_path(&key),
            StaticPage { status: 200, body },
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUIDE: &str =
        r#"<html><head><title>Guide</title></head><body><main id="main"><p>Guide</p></main></body></html>"#;

    fn url(path: &str) -> Url {
        Url::parse("https://site.test/").unwrap().join(path).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_page() {
        let source = StaticPageSource::new("#main")
            .unwrap()
            .with_page("/docs/guide.html", GUIDE);

        let page = source.fetch_page(&url("/docs/guide.html")).await.unwrap();
        assert_eq!(page.content.as_str(), "<p>Guide</p>");
        assert_eq!(page.title.as_deref(), Some("Guide"));
        assert_eq!(source.fetch_count(), 1);
        assert!(source.requests()[0].tagged);
    }

    #[tokio::test]
    async fn test_status_and_missing() {
        let source = StaticPageSource::new("#main")
            .unwrap()
            .with_status("/broken.html", 500, GUIDE);

        assert!(matches!(
            source.fetch_page(&url("/broken.html")).await,
            Err(FetchError::Status(500))
        ));
        assert!(matches!(
            source.fetch_page(&url("/nope.html")).await,
            Err(FetchError::Status(404))
        ));

        // Full loads render whatever the server sent
        let body = source.load_document(&url("/broken.html")).await.unwrap();
        assert_eq!(body, GUIDE);
        assert_eq!(source.fetch_count(), 2);
        assert_eq!(source.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_directory_index() {
        let source = StaticPageSource::new("#main")
            .unwrap()
            .with_page("index.html", GUIDE);

        assert!(source.fetch_page(&url("/")).await.is_ok());
        assert!(source.fetch_page(&url("/index.html?ref=nav")).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency() {
        let source = StaticPageSource::new("#main")
            .unwrap()
            .with_page("/a.html", GUIDE)
            .with_latency(Duration::from_millis(300));

        let start = tokio::time::Instant::now();
        source.fetch_page(&url("/a.html")).await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[test]
    fn test_from_dir() {
        let dir = std::env::temp_dir().join(format!("softnav-static-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("docs")).unwrap();
        std::fs::write(dir.join("index.html"), GUIDE).unwrap();
        std::fs::write(dir.join("docs/guide.html"), GUIDE).unwrap();
        std::fs::write(dir.join("docs/logo.svg"), "<svg/>").unwrap();

        let source = StaticPageSource::from_dir(&dir, "#main").unwrap();
        assert!(source.pages.contains_key("/index.html"));
        assert!(source.pages.contains_key("/docs/guide.html"));
        assert_eq!(source.pages.len(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
