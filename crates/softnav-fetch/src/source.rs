//! Page source abstraction

use std::future::Future;
use url::Url;

use crate::page::PendingResponse;
use crate::Result;

/// Where pages come from.
pub trait PageSource {
    /// Soft-navigation fetch: tagged GET, success status required, region extracted.
    fn fetch_page(&self, url: &Url) -> impl Future<Output = Result<PendingResponse>> + Send;

    /// Plain GET completing a full navigation. The body is returned whatever the
    /// status, the way a browser renders an error page.
    fn load_document(&self, url: &Url) -> impl Future<Output = Result<String>> + Send;
}
