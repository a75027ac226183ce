//! Google Search Console API access.
//!
//! The batch runner only depends on [`InspectionApi`]; [`SearchConsoleClient`]
//! is the HTTP implementation used by the binary. It also covers Indexing API
//! notifications, Search Analytics queries and the sites list.

mod search_console;
mod types;

pub use search_console::SearchConsoleClient;
pub use types::{
    Dimension, NotificationMetadata, NotificationType, SearchAnalyticsQuery,
    SearchAnalyticsResponse, SearchAnalyticsRow, SiteEntry, UrlNotification,
};

use crate::classification::RawIndexStatus;
use crate::error_handling::ApiError;

/// Source of raw index-status fields for a URL.
#[allow(async_fn_in_trait)]
pub trait InspectionApi {
    /// Inspects `url` within the Search Console property `site_url`.
    async fn inspect(&self, url: &str, site_url: &str) -> Result<RawIndexStatus, ApiError>;
}
