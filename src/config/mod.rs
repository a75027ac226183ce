//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (quotas, retry limits, endpoints)
//! - The per-family quota table
//! - CLI option types and parsing

mod cli;
mod constants;
mod quota;
mod types;

pub use cli::{
    AnalyticsArgs, Cli, ClassifyArgs, Command, CompareArgs, InspectArgs, SitesArgs, SubmitArgs,
};
pub use constants::*;
pub use quota::{ApiFamily, FamilyQuota, QuotaTable};
pub use types::{Config, ConfigValidationError, LogFormat, LogLevel};
