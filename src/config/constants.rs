//! Configuration constants.

use std::time::Duration;

// Quota table defaults (Search Console API usage limits)
/// URL Inspection: queries per day per site
pub const URL_INSPECTION_QPD: u32 = 2000;
/// URL Inspection: queries per minute per site
pub const URL_INSPECTION_QPM: u32 = 600;
/// Search Analytics: queries per minute per site
pub const SEARCH_ANALYTICS_QPM: u32 = 1200;
/// Indexing API: publish requests per day
pub const INDEXING_QPD: u32 = 200;
/// Indexing API: requests per minute
pub const INDEXING_QPM: u32 = 60;
/// Any other Search Console call: queries per minute
pub const OTHER_QPM: u32 = 200;
/// Any other Search Console call: queries per second
pub const OTHER_QPS: u32 = 20;

// Batch processing
/// Largest URL list accepted by a single batch run
pub const DEFAULT_MAX_BATCH_SIZE: usize = 500;
/// Upper bound accepted for `max_batch_size`
pub const MAX_BATCH_SIZE_LIMIT: usize = 10_000;
/// Attempts per URL (initial + retries) before a soft failure is recorded
pub const RETRY_MAX_ATTEMPTS: u32 = 3;
/// Upper bound accepted for `max_attempts`
pub const RETRY_MAX_ATTEMPTS_LIMIT: u32 = 10;
/// Backoff base delay in seconds (doubles per retry)
pub const RETRY_BACKOFF_BASE_SECS: u64 = 1;
/// Times a per-minute quota refusal is waited out before the batch gives up
pub const QUOTA_WAIT_MAX: u32 = 5;

// HTTP
/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Language for localized inspection messages
pub const INSPECTION_LANGUAGE_CODE: &str = "en-US";
pub const URL_INSPECTION_ENDPOINT: &str =
    "https://searchconsole.googleapis.com/v1/urlInspection/index:inspect";
pub const INDEXING_PUBLISH_ENDPOINT: &str =
    "https://indexing.googleapis.com/v3/urlNotifications:publish";
/// Base of the Webmasters v3 API (sites, Search Analytics)
pub const WEBMASTERS_ENDPOINT: &str = "https://www.googleapis.com/webmasters/v3";
/// Search Analytics caps a single response at this many rows
pub const SEARCH_ANALYTICS_MAX_ROWS: u32 = 25_000;
pub const USER_AGENT: &str = concat!("gsc_status/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the OAuth2 bearer token
pub const ACCESS_TOKEN_ENV: &str = "GSC_ACCESS_TOKEN";

// URL validation
/// Maximum URL length accepted from input files
pub const MAX_URL_LENGTH: usize = 2048;
