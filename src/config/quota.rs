//! API families and their fixed quota table.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

use super::constants::*;

/// Google API family a request is charged against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiFamily {
    UrlInspection,
    SearchAnalytics,
    Indexing,
    Other,
}

impl ApiFamily {
    /// Families whose quotas are tracked per Search Console property.
    pub fn is_site_scoped(self) -> bool {
        matches!(self, ApiFamily::UrlInspection | ApiFamily::SearchAnalytics)
    }
}

/// Limits for one family. `None` means the axis is not limited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyQuota {
    pub qpd: Option<u32>,
    pub qpm: Option<u32>,
    pub qps: Option<u32>,
}

/// Immutable per-family quota configuration injected into the rate limiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaTable {
    url_inspection: FamilyQuota,
    search_analytics: FamilyQuota,
    indexing: FamilyQuota,
    other: FamilyQuota,
}

impl QuotaTable {
    pub fn get(&self, family: ApiFamily) -> FamilyQuota {
        match family {
            ApiFamily::UrlInspection => self.url_inspection,
            ApiFamily::SearchAnalytics => self.search_analytics,
            ApiFamily::Indexing => self.indexing,
            ApiFamily::Other => self.other,
        }
    }

    /// Replaces one family's limits (used to build custom tables).
    pub fn set(&mut self, family: ApiFamily, quota: FamilyQuota) {
        let slot = match family {
            ApiFamily::UrlInspection => &mut self.url_inspection,
            ApiFamily::SearchAnalytics => &mut self.search_analytics,
            ApiFamily::Indexing => &mut self.indexing,
            ApiFamily::Other => &mut self.other,
        };
        *slot = quota;
    }
}

impl Default for QuotaTable {
    fn default() -> Self {
        Self {
            url_inspection: FamilyQuota {
                qpd: Some(URL_INSPECTION_QPD),
                qpm: Some(URL_INSPECTION_QPM),
                qps: None,
            },
            search_analytics: FamilyQuota {
                qpd: None,
                qpm: Some(SEARCH_ANALYTICS_QPM),
                qps: None,
            },
            indexing: FamilyQuota {
                qpd: Some(INDEXING_QPD),
                qpm: Some(INDEXING_QPM),
                qps: None,
            },
            other: FamilyQuota {
                qpd: None,
                qpm: Some(OTHER_QPM),
                qps: Some(OTHER_QPS),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = QuotaTable::default();
        assert_eq!(
            table.get(ApiFamily::UrlInspection),
            FamilyQuota {
                qpd: Some(2000),
                qpm: Some(600),
                qps: None
            }
        );
        assert_eq!(table.get(ApiFamily::SearchAnalytics).qpm, Some(1200));
        assert_eq!(table.get(ApiFamily::SearchAnalytics).qpd, None);
        assert_eq!(table.get(ApiFamily::Indexing).qpd, Some(200));
        assert_eq!(table.get(ApiFamily::Indexing).qpm, Some(60));
        assert_eq!(table.get(ApiFamily::Other).qps, Some(20));
        assert_eq!(table.get(ApiFamily::Other).qpm, Some(200));
    }

    #[test]
    fn test_family_names() {
        assert_eq!(ApiFamily::UrlInspection.to_string(), "URL_INSPECTION");
        assert_eq!(ApiFamily::SearchAnalytics.to_string(), "SEARCH_ANALYTICS");
        assert!(ApiFamily::UrlInspection.is_site_scoped());
        assert!(!ApiFamily::Indexing.is_site_scoped());
    }
}
