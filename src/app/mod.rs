//! Main application modules.
//!
//! This module provides URL list reading and statistics printing used by the
//! main application.

pub mod statistics;
pub mod url;

// Re-export public API
pub use statistics::{print_batch_summary, print_comparison, print_error_statistics};
pub use url::{
    is_stdin_path, load_url_list, parse_url_list, read_url_list, validate_and_normalize_url,
};
