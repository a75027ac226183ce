//! Shared helpers: retry backoff with injectable sleeping, and
//! order-preserving deduplication.

mod backoff;
mod dedup;

pub use backoff::{Backoff, Jitter, RecordingSleeper, Sleeper, TokioSleeper};
pub use dedup::dedup_preserving_order;
