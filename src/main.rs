use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, time::Duration};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use walkthrough_conversion::{convert_with_source, FetchConfig, HttpSheetSource};

/// Convert a publicly viewable Google Sheet into a SQLite database.
#[derive(Parser, Debug)]
#[command(
    version,
    after_help = "Example:\n  walkthrough-conversion https://docs.google.com/spreadsheets/d/xxx/edit output.db"
)]
struct Cli {
    /// Sheet URL or bare sheet ID
    sheet_url: String,

    /// Destination database file (replaced if it exists)
    output: PathBuf,

    /// Root of the CSV export endpoint
    #[arg(
        long,
        env = "WALKTHROUGH_EXPORT_BASE",
        default_value = walkthrough_conversion::config::DEFAULT_EXPORT_BASE
    )]
    export_base: String,

    /// Give up on the download after this many seconds
    #[arg(long, env = "WALKTHROUGH_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(?cli, "startup");

    // ─── 2) build the HTTP source ────────────────────────────────────
    let config = FetchConfig::default()
        .with_export_base(cli.export_base)
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));
    let source = HttpSheetSource::new(config)?;

    // ─── 3) run the pipeline, echoing milestones ─────────────────────
    let progress = |status: &str| println!("{status}");
    if let Err(err) = convert_with_source(&source, &cli.sheet_url, &cli.output, &progress) {
        error!(kind = err.kind().as_str(), "conversion failed");
        return Err(err).with_context(|| {
            format!("converting {} into {}", cli.sheet_url, cli.output.display())
        });
    }

    Ok(())
}
