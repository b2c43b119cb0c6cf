//! geocode-cli: resolve a list of addresses to coordinates.
//!
//! Usage:
//!   geocode-cli [<file>|-] [--batch-size N] [--delay-ms N]
//!
//! Reads one address per line (blank lines skipped) and prints a JSON object
//! mapping each resolved address to `{lat, lng, formatted}`.

use anyhow::Context;
use batch_geocoder::{BatchReport, CancellationToken, GeocoderBuilder, GeocoderConfig};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

struct Options {
    input: Option<PathBuf>,
    batch_size: Option<usize>,
    delay_ms: Option<u64>,
}

fn print_usage() {
    println!(
        r#"geocode-cli: batch address geocoder

USAGE:
    geocode-cli [<file>|-] [OPTIONS]

ARGS:
    <file>                  File with one address per line (default: stdin)

OPTIONS:
    --batch-size <N>        Addresses resolved concurrently per batch (default 10)
    --delay-ms <N>          Pause between batches in milliseconds (default 100)
    -h, --help              Show this help message
    -V, --version           Show version information

ENVIRONMENT:
    GEOCODER_API_KEY        Provider API key (or GOOGLE_MAPS_API_KEY)
    GEOCODER_BASE_URL       Provider base URL
    RUST_LOG                Log filter (default: info)"#
    );
}

fn parse_args(args: &[String]) -> anyhow::Result<Option<Options>> {
    let mut opts = Options {
        input: None,
        batch_size: None,
        delay_ms: None,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("geocode-cli {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--batch-size" => {
                let v = iter.next().context("--batch-size needs a value")?;
                opts.batch_size = Some(v.parse().with_context(|| format!("invalid batch size: {v}"))?);
            }
            "--delay-ms" => {
                let v = iter.next().context("--delay-ms needs a value")?;
                opts.delay_ms = Some(v.parse().with_context(|| format!("invalid delay: {v}"))?);
            }
            "-" => opts.input = None,
            other if other.starts_with("--") => anyhow::bail!("unknown option: {other}"),
            path => opts.input = Some(PathBuf::from(path)),
        }
    }
    Ok(Some(opts))
}

fn read_addresses(input: Option<&PathBuf>) -> batch_geocoder::Result<Vec<String>> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(text
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect())
}

fn write_results(report: &BatchReport) -> batch_geocoder::Result<()> {
    let sorted: BTreeMap<_, _> = report.results.iter().collect();
    let json = serde_json::to_string_pretty(&sorted)?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{json}")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(opts) = parse_args(&args)? else {
        return Ok(());
    };

    let mut config = GeocoderConfig::from_env();
    if let Some(n) = opts.batch_size {
        config.batch.batch_size = n;
    }
    if let Some(ms) = opts.delay_ms {
        config.batch.inter_batch_delay = Duration::from_millis(ms);
    }

    let addresses = read_addresses(opts.input.as_ref()).context("failed to read addresses")?;
    let geocoder = GeocoderBuilder::new()
        .config(config)
        .build()
        .context("failed to set up geocoder")?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping after the current batch");
            on_signal.cancel();
        }
    });

    let report = geocoder
        .batch_geocode_report(&addresses, Some(&cancel), |event| {
            tracing::info!(
                progress = event.percent(),
                resolved = event.resolved,
                "geocoding progress"
            );
        })
        .await;

    write_results(&report)?;

    let snapshot = geocoder.snapshot();
    eprintln!(
        "Resolved {} of {} unique addresses ({} unresolved, {} provider calls, {} failures)",
        report.resolved(),
        report.resolved() + report.unresolved,
        report.unresolved,
        report.stats.provider_calls,
        report.stats.failures,
    );
    if snapshot.all_lookups_failed() {
        eprintln!("Warning: every lookup failed; check the API key and provider URL.");
    }
    if !report.is_completed() {
        std::process::exit(130);
    }
    Ok(())
}
