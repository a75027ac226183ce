//! Quota enforcement per API family.

use std::collections::HashMap;
use std::sync::Arc;

use strum::IntoEnumIterator;

use super::bucket::TokenBucket;
use super::clock::{Clock, DateSource, MonotonicClock, UtcDate};
use super::daily::DailyBudget;
use crate::config::{ApiFamily, QuotaTable};
use crate::error_handling::{QuotaExceeded, QuotaKind};

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Limits configured for one family, checked in field order.
struct FamilyLimits {
    daily: Option<DailyBudget>,
    per_second: Option<TokenBucket>,
    per_minute: Option<TokenBucket>,
}

impl FamilyLimits {
    fn consume(&mut self, key: &str) -> Result<(), QuotaExceeded> {
        if let Some(daily) = self.daily.as_mut() {
            daily.consume(key)?;
        }
        if let Some(per_second) = self.per_second.as_mut() {
            per_second.consume(key)?;
        }
        if let Some(per_minute) = self.per_minute.as_mut() {
            per_minute.consume(key)?;
        }
        Ok(())
    }
}

/// Rate limiter composing daily budgets and token buckets per API family.
///
/// Quota state lives in memory for the lifetime of the limiter; keys are
/// created lazily on first use. Not internally synchronized: wrap it in a
/// mutex if it has to be shared.
pub struct RateLimiter {
    limits: HashMap<ApiFamily, FamilyLimits>,
}

impl RateLimiter {
    pub fn new(table: &QuotaTable, clock: Arc<dyn Clock>, dates: Arc<dyn DateSource>) -> Self {
        let limits = ApiFamily::iter()
            .map(|family| {
                let quota = table.get(family);
                let limits = FamilyLimits {
                    daily: quota.qpd.map(|qpd| DailyBudget::new(qpd, Arc::clone(&dates))),
                    per_second: quota
                        .qps
                        .map(|qps| TokenBucket::per_period(QuotaKind::Qps, qps, 1.0, Arc::clone(&clock))),
                    per_minute: quota.qpm.map(|qpm| {
                        TokenBucket::per_period(
                            QuotaKind::Qpm,
                            qpm,
                            SECONDS_PER_MINUTE,
                            Arc::clone(&clock),
                        )
                    }),
                };
                (family, limits)
            })
            .collect();
        Self { limits }
    }

    /// Limiter on the real monotonic clock and UTC calendar.
    pub fn with_system_clock(table: &QuotaTable) -> Self {
        Self::new(table, Arc::new(MonotonicClock::new()), Arc::new(UtcDate))
    }

    /// Quota key for a request: site-scoped families use `FAMILY:site` when a
    /// site is given, everything else shares one key per family.
    pub fn key_for(family: ApiFamily, site_url: Option<&str>) -> String {
        match site_url {
            Some(site) if family.is_site_scoped() && !site.is_empty() => {
                format!("{}:{}", family, site)
            }
            _ => family.to_string(),
        }
    }

    /// Records one request against the family's quotas.
    ///
    /// The daily budget is checked first, then the per-second and per-minute
    /// buckets; a refusal stops before later checks consume anything.
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` tagged with the refusing limit.
    pub fn consume(&mut self, family: ApiFamily, site_url: Option<&str>) -> Result<(), QuotaExceeded> {
        let key = Self::key_for(family, site_url);
        match self.limits.get_mut(&family) {
            Some(limits) => limits.consume(&key),
            None => Ok(()),
        }
    }
}
