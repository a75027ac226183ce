//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `gsc_status` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::io;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use gsc_status::client::{NotificationType, SearchConsoleClient};
use gsc_status::config::QuotaTable;
use gsc_status::export::write_results_jsonl;
use gsc_status::initialization::{init_client, init_logger_with, init_rate_limiter};
use gsc_status::{
    classify_file, compare_files, list_sites, query_search_analytics, run_inspection, submit_url,
    Cli, Command,
};

fn api_client(timeout_seconds: u64, access_token: &str) -> Result<SearchConsoleClient> {
    let http = init_client(Duration::from_secs(timeout_seconds))
        .context("Failed to initialize HTTP client")?;
    Ok(SearchConsoleClient::new(http, access_token))
}

async fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Inspect(args) => {
            let batch = run_inspection(args.into_config()).await?;
            println!(
                "Inspected {} URL{}: {} indexed, {} not indexed, {} unknown",
                batch.aggregation.total(),
                if batch.aggregation.total() == 1 { "" } else { "s" },
                batch.aggregation.indexed_count,
                batch.aggregation.not_indexed_count,
                batch.aggregation.unknown_count
            );
        }
        Command::Classify(args) => {
            let batch = classify_file(&args.file, args.mode)?;
            write_results_jsonl(&batch.results, &mut io::stdout().lock())
                .context("Failed to write classification results")?;
        }
        Command::Compare(args) => {
            let comparison = compare_files(&args.previous, &args.current, args.top)?;
            println!(
                "{} change{} between runs",
                comparison.changes.len(),
                if comparison.changes.len() == 1 { "" } else { "s" }
            );
        }
        Command::Submit(args) => {
            let notification_type = if args.deleted {
                NotificationType::Deleted
            } else {
                NotificationType::Updated
            };
            let metadata = submit_url(
                &args.url,
                notification_type,
                Duration::from_secs(args.timeout_seconds),
                &args.access_token,
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Command::Analytics(args) => {
            let client = api_client(args.timeout_seconds, &args.access_token)?;
            let mut limiter = init_rate_limiter(&QuotaTable::default());
            let response =
                query_search_analytics(&client, &mut limiter, &args.site, &args.query()).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Sites(args) => {
            let client = api_client(args.timeout_seconds, &args.access_token)?;
            let mut limiter = init_rate_limiter(&QuotaTable::default());
            for site in list_sites(&client, &mut limiter).await? {
                println!("{}\t{}", site.site_url, site.permission_level);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load GSC_ACCESS_TOKEN and friends from .env, current directory first,
    // then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.into(), cli.log_format)
        .context("Failed to initialize logger")?;

    if let Err(e) = dispatch(cli.command).await {
        eprintln!("gsc_status error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
