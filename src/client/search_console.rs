//! HTTP client for the Search Console URL Inspection, Indexing and
//! Webmasters APIs.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::types::{
    ErrorEnvelope, InspectRequest, InspectResponse, NotificationMetadata, NotificationType,
    PublishRequest, PublishResponse, SearchAnalyticsQuery, SearchAnalyticsResponse, SiteEntry,
    SitesListResponse,
};
use super::InspectionApi;
use crate::classification::RawIndexStatus;
use crate::config::{
    INDEXING_PUBLISH_ENDPOINT, INSPECTION_LANGUAGE_CODE, URL_INSPECTION_ENDPOINT,
    WEBMASTERS_ENDPOINT,
};
use crate::error_handling::ApiError;

/// Authenticated client for the Google Search Console APIs.
///
/// Takes a ready OAuth2 bearer token; obtaining one is up to the caller.
pub struct SearchConsoleClient {
    http: Client,
    access_token: String,
    inspection_endpoint: String,
    publish_endpoint: String,
    webmasters_endpoint: String,
}

impl SearchConsoleClient {
    pub fn new(http: Client, access_token: impl Into<String>) -> Self {
        Self {
            http,
            access_token: access_token.into(),
            inspection_endpoint: URL_INSPECTION_ENDPOINT.to_string(),
            publish_endpoint: INDEXING_PUBLISH_ENDPOINT.to_string(),
            webmasters_endpoint: WEBMASTERS_ENDPOINT.to_string(),
        }
    }

    /// Points the client at different endpoints (proxies, test servers).
    pub fn with_endpoints(
        mut self,
        inspection_endpoint: impl Into<String>,
        publish_endpoint: impl Into<String>,
    ) -> Self {
        self.inspection_endpoint = inspection_endpoint.into();
        self.publish_endpoint = publish_endpoint.into();
        self
    }

    /// Base URL for the sites and Search Analytics calls.
    pub fn with_webmasters_endpoint(mut self, base: impl Into<String>) -> Self {
        self.webmasters_endpoint = base.into();
        self
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.bearer_auth(&self.access_token).send().await?;
        let response = check_status(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.http.post(endpoint).json(body)).await
    }

    /// Webmasters URL for `segments` below the base; each segment is
    /// percent-encoded, so a site URL stays a single segment.
    fn webmasters_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.webmasters_endpoint)
            .map_err(|e| ApiError::Transport(format!("invalid endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Transport("endpoint cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Runs `searchAnalytics.query` for the property `site_url`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` for transport failures and non-2xx responses.
    pub async fn search_analytics(
        &self,
        site_url: &str,
        query: &SearchAnalyticsQuery,
    ) -> Result<SearchAnalyticsResponse, ApiError> {
        let url = self.webmasters_url(&["sites", site_url, "searchAnalytics", "query"])?;
        self.post_json(url.as_str(), query).await
    }

    /// Lists the Search Console properties visible to the token (`sites.list`).
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` for transport failures and non-2xx responses.
    pub async fn list_sites(&self) -> Result<Vec<SiteEntry>, ApiError> {
        let url = self.webmasters_url(&["sites"])?;
        let response: SitesListResponse = self.send_json(self.http.get(url)).await?;
        Ok(response.site_entry)
    }

    /// Sends an Indexing API notification for `url`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` for transport failures and non-2xx responses.
    pub async fn publish(
        &self,
        url: &str,
        notification_type: NotificationType,
    ) -> Result<NotificationMetadata, ApiError> {
        let response: PublishResponse = self
            .post_json(
                &self.publish_endpoint,
                &PublishRequest {
                    url,
                    notification_type,
                },
            )
            .await?;
        Ok(response.url_notification_metadata.unwrap_or_default())
    }
}

/// Converts a non-success response into `ApiError::Status`, preferring
/// Google's error message over the bare status text.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .ok()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });
    Err(ApiError::Status {
        code: status.as_u16(),
        message,
    })
}

impl InspectionApi for SearchConsoleClient {
    async fn inspect(&self, url: &str, site_url: &str) -> Result<RawIndexStatus, ApiError> {
        let response: InspectResponse = self
            .post_json(
                &self.inspection_endpoint,
                &InspectRequest {
                    inspection_url: url,
                    site_url,
                    language_code: INSPECTION_LANGUAGE_CODE,
                },
            )
            .await?;
        response
            .inspection_result
            .and_then(|result| result.index_status_result)
            .ok_or(ApiError::MissingIndexStatus)
    }
}
