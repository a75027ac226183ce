//! Per-key daily request budget.

use std::collections::HashMap;
use std::sync::Arc;

use super::clock::DateSource;
use crate::error_handling::{QuotaExceeded, QuotaKind};

#[derive(Debug, Clone)]
struct DayCount {
    date: String,
    count: u32,
}

/// Counts requests per key per day; the count resets whenever the date
/// string differs from the stored one.
pub struct DailyBudget {
    daily_limit: u32,
    dates: Arc<dyn DateSource>,
    counts: HashMap<String, DayCount>,
}

impl DailyBudget {
    pub fn new(daily_limit: u32, dates: Arc<dyn DateSource>) -> Self {
        Self {
            daily_limit,
            dates,
            counts: HashMap::new(),
        }
    }

    /// Counts one request for `key`.
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` (kind `qpd`, no retry-after) once today's count
    /// has reached the limit.
    pub fn consume(&mut self, key: &str) -> Result<(), QuotaExceeded> {
        let today = self.dates.today();
        let entry = self.counts.entry(key.to_string()).or_insert_with(|| DayCount {
            date: today.clone(),
            count: 0,
        });

        if entry.date != today {
            log::debug!("Daily budget for {} reset ({} -> {})", key, entry.date, today);
            entry.date = today;
            entry.count = 0;
        }

        if entry.count >= self.daily_limit {
            log::debug!(
                "Daily budget exhausted for {} ({}/{})",
                key,
                entry.count,
                self.daily_limit
            );
            return Err(QuotaExceeded::new(QuotaKind::Qpd, None));
        }

        entry.count += 1;
        Ok(())
    }

    /// Requests counted for `key` on the stored date.
    pub fn used(&self, key: &str) -> u32 {
        self.counts.get(key).map(|entry| entry.count).unwrap_or(0)
    }
}
