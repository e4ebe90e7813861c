//! HTTP page source

use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;
use crate::page::{is_document_type, PendingResponse, Region};
use crate::source::PageSource;
use crate::Result;

pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Selector of the content region in fetched documents
    pub content_selector: String,
    /// Value sent in the `X-Requested-With` header
    pub requested_with: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            content_selector: "#main".to_string(),
            requested_with: "pjax".to_string(),
            timeout: Duration::from_secs(12),
            user_agent: concat!("softnav/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
    region: Region,
    requested_with: String,
}

impl HttpPageSource {
    pub fn new(settings: FetchSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(5))
            .timeout(settings.timeout)
            .user_agent(settings.user_agent)
            .build()?;

        Ok(Self {
            client,
            region: Region::parse(&settings.content_selector)?,
            requested_with: settings.requested_with,
        })
    }
}

impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &Url) -> Result<PendingResponse> {
        let resp = self
            .client
            .get(url.clone())
            .header(REQUESTED_WITH_HEADER, self.requested_with.as_str())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Page fetch rejected");
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if !is_document_type(content_type.as_deref()) {
            return Err(FetchError::Unparsable(content_type.unwrap_or_default()));
        }

        let body = resp.text().await?;
        PendingResponse::from_document(&body, &self.region)
    }

    async fn load_document(&self, url: &Url) -> Result<String> {
        let resp = self.client.get(url.clone()).send().await?;
        Ok(resp.text().await?)
    }
}
