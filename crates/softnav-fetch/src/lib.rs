//! Softnav Content Fetcher
//!
//! Fetches the destination page in the background and pulls out the three
//! things a swap needs: content region markup, title and description.
//!
//! Requests are tagged with `X-Requested-With` so a server may recognise a soft
//! navigation. Nothing relies on the server honouring it: the response is always
//! parsed as a full document.

mod error;
mod http;
mod page;
mod source;
mod static_site;

pub use error::FetchError;
pub use http::{FetchSettings, HttpPageSource, REQUESTED_WITH_HEADER};
pub use page::{PendingResponse, Region};
pub use source::PageSource;
pub use static_site::{FetchRecord, StaticPageSource};

pub type Result<T> = std::result::Result<T, FetchError>;
