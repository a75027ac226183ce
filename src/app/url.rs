//! URL list parsing and validation.

use std::path::Path;

use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::MAX_URL_LENGTH;
use crate::utils::dedup_preserving_order;

/// Validates and normalizes a page URL before it is sent for inspection.
///
/// Adds an https:// prefix if missing, then checks that the URL parses and
/// uses an http/https scheme. URLs longer than `MAX_URL_LENGTH` are rejected.
/// Logs a warning and returns `None` when the URL is skipped.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            url.chars().take(50).collect::<String>()
        );
        return None;
    }

    let has_http_scheme = url.starts_with("http://") || url.starts_with("https://");
    if !has_http_scheme && url.contains("://") {
        warn!("Skipping unsupported scheme for URL: {url}");
        return None;
    }

    let normalized = if !has_http_scheme {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping normalized URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => Some(normalized),
            _ => {
                warn!("Skipping unsupported URL: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {url}");
            None
        }
    }
}

/// Parses a newline-separated URL list.
///
/// Blank lines and lines starting with `#` are ignored. Invalid URLs are
/// skipped with a warning. Duplicates keep their first position.
pub fn parse_url_list(contents: &str) -> Vec<String> {
    let urls = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(validate_and_normalize_url);
    dedup_preserving_order(urls)
}

/// Reads every line from `reader` and parses them as a URL list.
pub async fn read_url_list<R: AsyncBufRead + Unpin>(reader: R) -> std::io::Result<Vec<String>> {
    let mut lines = reader.lines();
    let mut contents = String::new();
    while let Some(line) = lines.next_line().await? {
        contents.push_str(&line);
        contents.push('\n');
    }
    Ok(parse_url_list(&contents))
}

/// True when `path` names standard input (`-`).
pub fn is_stdin_path(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Loads the URL list from `path`, or from stdin when `path` is `-`.
pub async fn load_url_list(path: &Path) -> std::io::Result<Vec<String>> {
    if is_stdin_path(path) {
        info!("Reading URLs from stdin");
        read_url_list(BufReader::new(tokio::io::stdin())).await
    } else {
        let file = tokio::fs::File::open(path).await?;
        read_url_list(BufReader::new(file)).await
    }
}
