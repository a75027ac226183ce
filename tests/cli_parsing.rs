//! Tests for CLI subcommand parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gsc_status::classification::OperatingMode;
use gsc_status::client::Dimension;
use gsc_status::config::{
    Cli, Command, LogFormat, DEFAULT_MAX_BATCH_SIZE, RETRY_BACKOFF_BASE_SECS, RETRY_MAX_ATTEMPTS,
};

#[test]
fn test_inspect_defaults() {
    let cli = Cli::try_parse_from([
        "gsc_status",
        "inspect",
        "urls.txt",
        "--site",
        "sc-domain:example.com",
        "--access-token",
        "token",
    ])
    .unwrap();

    let Command::Inspect(args) = cli.command else {
        panic!("expected inspect subcommand");
    };
    let config = args.into_config();
    assert_eq!(config.file, PathBuf::from("urls.txt"));
    assert_eq!(config.site_url, "sc-domain:example.com");
    assert_eq!(config.mode, OperatingMode::Strict);
    assert_eq!(config.max_batch_size, DEFAULT_MAX_BATCH_SIZE);
    assert_eq!(config.max_attempts, RETRY_MAX_ATTEMPTS);
    assert_eq!(config.backoff_base_secs, RETRY_BACKOFF_BASE_SECS);
    assert!(config.jitter);
    assert_eq!(config.output, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_inspect_overrides() {
    let cli = Cli::try_parse_from([
        "gsc_status",
        "--log-format",
        "json",
        "inspect",
        "urls.txt",
        "--site",
        "https://example.com/",
        "--mode",
        "best-effort",
        "--output",
        "run.json",
        "--max-batch-size",
        "50",
        "--max-attempts",
        "5",
        "--backoff-base",
        "2",
        "--no-jitter",
        "--timeout-seconds",
        "10",
        "--access-token",
        "token",
    ])
    .unwrap();

    assert!(matches!(cli.log_format, LogFormat::Json));
    let Command::Inspect(args) = cli.command else {
        panic!("expected inspect subcommand");
    };
    let config = args.into_config();
    assert_eq!(config.mode, OperatingMode::BestEffort);
    assert_eq!(config.output, Some(PathBuf::from("run.json")));
    assert_eq!(config.max_batch_size, 50);
    assert_eq!(config.max_attempts, 5);
    assert_eq!(config.backoff_base_secs, 2);
    assert!(!config.jitter);
    assert_eq!(config.timeout, Duration::from_secs(10));
}

#[test]
fn test_inspect_requires_site() {
    let result = Cli::try_parse_from(["gsc_status", "inspect", "urls.txt", "--access-token", "t"]);
    assert!(result.is_err());
}

#[test]
fn test_inspect_rejects_unknown_mode() {
    let result = Cli::try_parse_from([
        "gsc_status",
        "inspect",
        "urls.txt",
        "--site",
        "sc-domain:example.com",
        "--mode",
        "optimistic",
        "--access-token",
        "t",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_invalid_config_values_fail_validation() {
    let cli = Cli::try_parse_from([
        "gsc_status",
        "inspect",
        "urls.txt",
        "--site",
        "sc-domain:example.com",
        "--max-batch-size",
        "0",
        "--access-token",
        "t",
    ])
    .unwrap();
    let Command::Inspect(args) = cli.command else {
        panic!("expected inspect subcommand");
    };
    let err = args.into_config().validate().unwrap_err();
    assert_eq!(err.field, "max_batch_size");
}

#[test]
fn test_classify_and_compare() {
    let cli = Cli::try_parse_from(["gsc_status", "classify", "raw.json", "--mode", "best-effort"])
        .unwrap();
    match cli.command {
        Command::Classify(args) => {
            assert_eq!(args.file, PathBuf::from("raw.json"));
            assert_eq!(args.mode, OperatingMode::BestEffort);
        }
        other => panic!("expected classify, got {other:?}"),
    }

    let cli = Cli::try_parse_from(["gsc_status", "compare", "old.json", "new.json"]).unwrap();
    match cli.command {
        Command::Compare(args) => {
            assert_eq!(args.previous, PathBuf::from("old.json"));
            assert_eq!(args.current, PathBuf::from("new.json"));
            assert_eq!(args.top, 5);
        }
        other => panic!("expected compare, got {other:?}"),
    }
}

#[test]
fn test_submit_flags() {
    let cli = Cli::try_parse_from([
        "gsc_status",
        "submit",
        "https://example.com/page",
        "--deleted",
        "--access-token",
        "token",
    ])
    .unwrap();
    match cli.command {
        Command::Submit(args) => {
            assert_eq!(args.url, "https://example.com/page");
            assert!(args.deleted);
            assert_eq!(args.timeout_seconds, 30);
        }
        other => panic!("expected submit, got {other:?}"),
    }
}

#[test]
fn test_analytics_args() {
    let cli = Cli::try_parse_from([
        "gsc_status",
        "analytics",
        "--site",
        "sc-domain:example.com",
        "--start-date",
        "2024-04-01",
        "--end-date",
        "2024-04-30",
        "--dimension",
        "page,query",
        "--row-limit",
        "100",
        "--access-token",
        "token",
    ])
    .unwrap();

    let Command::Analytics(args) = cli.command else {
        panic!("expected analytics subcommand");
    };
    let query = args.query();
    assert_eq!(query.start_date.to_string(), "2024-04-01");
    assert_eq!(query.end_date.to_string(), "2024-04-30");
    assert_eq!(query.dimensions, vec![Dimension::Page, Dimension::Query]);
    assert_eq!(query.row_limit, Some(100));
}

#[test]
fn test_analytics_rejects_bad_input() {
    let base = [
        "gsc_status",
        "analytics",
        "--site",
        "sc-domain:example.com",
        "--access-token",
        "token",
        "--end-date",
        "2024-04-30",
    ];
    let with = |extra: &[&str]| Cli::try_parse_from(base.iter().chain(extra.iter()).copied());

    assert!(with(&["--start-date", "April 1"]).is_err());
    assert!(with(&["--start-date", "2024-04-01", "--row-limit", "0"]).is_err());
    assert!(with(&["--start-date", "2024-04-01", "--row-limit", "25001"]).is_err());
    assert!(with(&["--start-date", "2024-04-01", "--dimension", "browser"]).is_err());
    assert!(with(&["--start-date", "2024-04-01"]).is_ok());
}

#[test]
fn test_sites_subcommand() {
    let cli = Cli::try_parse_from(["gsc_status", "sites", "--access-token", "token"]).unwrap();
    let Command::Sites(args) = cli.command else {
        panic!("expected sites subcommand");
    };
    assert_eq!(args.timeout_seconds, 30);
    assert_eq!(args.access_token, "token");
}
