//! Index-status classification.
//!
//! This module provides:
//! - Reason-code mapping from raw URL Inspection fields
//! - The classification engine (STRICT and BEST_EFFORT decision paths)
//! - Static recommendation texts per reason code

mod engine;
mod reason;
mod recommendations;
mod types;

pub use engine::classify;
pub use reason::{map_reason_codes, ReasonCode};
pub use recommendations::{recommendation_text, recommendations_for};
pub use types::{
    ClassificationResult, Confidence, IndexingStatus, OperatingMode, RawIndexStatus, SourceType,
};
