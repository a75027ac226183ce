//! Wire types for the URL Inspection, Indexing and Webmasters APIs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::classification::RawIndexStatus;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InspectRequest<'a> {
    pub inspection_url: &'a str,
    pub site_url: &'a str,
    pub language_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InspectResponse {
    pub inspection_result: Option<InspectionResultBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InspectionResultBody {
    pub index_status_result: Option<RawIndexStatus>,
}

/// Google's JSON error envelope: `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

/// Indexing API notification type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum NotificationType {
    #[serde(rename = "URL_UPDATED")]
    #[strum(serialize = "URL_UPDATED")]
    Updated,
    #[serde(rename = "URL_DELETED")]
    #[strum(serialize = "URL_DELETED")]
    Deleted,
}

#[derive(Debug, Serialize)]
pub(crate) struct PublishRequest<'a> {
    pub url: &'a str,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PublishResponse {
    pub url_notification_metadata: Option<NotificationMetadata>,
}

/// What the Indexing API recorded for a URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMetadata {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_update: Option<UrlNotification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_remove: Option<UrlNotification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlNotification {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type")]
    pub notification_type: Option<NotificationType>,
    #[serde(default)]
    pub notify_time: Option<String>,
}

/// Grouping dimension for a Search Analytics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Dimension {
    Query,
    Page,
    Country,
    Device,
    Date,
    SearchAppearance,
}

/// Body of `searchAnalytics.query`. Dates are inclusive, in Pacific time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalyticsQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalyticsResponse {
    #[serde(default)]
    pub rows: Vec<SearchAnalyticsRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_aggregation_type: Option<String>,
}

/// One row of Search Analytics data; `keys` follow the requested dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchAnalyticsRow {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub clicks: f64,
    #[serde(default)]
    pub impressions: f64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub position: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SitesListResponse {
    #[serde(default)]
    pub site_entry: Vec<SiteEntry>,
}

/// A Search Console property the token can see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntry {
    pub site_url: String,
    #[serde(default)]
    pub permission_level: String,
}
