mod hosts;
mod monitor;
mod sort;
mod tui;

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::hosts::HostFileError;
use crate::sort::SortKey;
use crate::tui::{MAX_INTERVAL_SECS, MIN_INTERVAL_SECS};

const LOG_FILE: &str = "mping.log";

/// Live terminal ping dashboard.
#[derive(Debug, Parser)]
#[command(name = "mping", version, about)]
struct Args {
    /// Host list file, one `address[,description]` per line
    #[arg(short = 'f', long = "file", default_value = "hosts.txt")]
    hosts_file: PathBuf,

    /// Poll interval in seconds (0.5 to 5)
    #[arg(short, long, default_value_t = 5.0)]
    interval: f64,

    /// Initial sort key
    #[arg(short, long, value_enum, default_value_t = SortKey::Name)]
    sort: SortKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    // A missing file is not an error: start empty and let the user add
    // hosts from inside the dashboard.
    let hosts = match hosts::load(&args.hosts_file) {
        Ok(hosts) => hosts,
        Err(HostFileError::Read(e)) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("loading hosts from {}", args.hosts_file.display()));
        }
    };

    let interval =
        Duration::from_secs_f64(args.interval.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS));

    tracing::info!(
        hosts = hosts.len(),
        interval_secs = interval.as_secs_f64(),
        sort = %args.sort,
        "starting dashboard"
    );

    tui::run(hosts, args.hosts_file, interval, args.sort).await
}

/// Route tracing to a log file; the terminal belongs to the dashboard. The
/// subscriber is only installed when RUST_LOG is set, so a plain run leaves
/// no log file behind.
fn init_tracing() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let file = std::fs::File::create(LOG_FILE).context("creating log file")?;
    let log_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_ansi(false)
        .with_writer(file)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(log_layer).init();
    Ok(())
}
