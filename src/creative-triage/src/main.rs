//! Creative Triage — tags winning, losing, and unclear ad creatives per
//! ad group, with an optional label-change report.
//!
//! Main entry point: one synchronous run-to-completion pass, fail-fast on
//! any platform error.

use clap::Parser;
use tracing::{info, warn};
use triage_core::config::AppConfig;
use triage_core::types::DateRange;
use triage_platform::InMemoryAdsPlatform;
use triage_reporting::{CsvReportSink, ReportWriter};

#[derive(Parser, Debug)]
#[command(name = "creative-triage")]
#[command(about = "Classifies ad creatives into winners, losers, and unclear, and labels them")]
#[command(version)]
struct Cli {
    /// Minimum creatives per ad group (overrides config)
    #[arg(long, env = "CREATIVE_TRIAGE__MIN_ADS_PER_GROUP")]
    min_ads: Option<usize>,

    /// Stats window, e.g. LAST_30_DAYS (overrides config)
    #[arg(long, env = "CREATIVE_TRIAGE__DATE_RANGE")]
    date_range: Option<DateRange>,

    /// Minimum group winners for a winners/losers split (overrides config)
    #[arg(long, env = "CREATIVE_TRIAGE__WINNERS_THRESHOLD")]
    winners_threshold: Option<usize>,

    /// Build the label-change report
    #[arg(long, default_value_t = false)]
    report: bool,

    /// Report output path for the CSV sink (overrides config)
    #[arg(long)]
    report_path: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "creative_triage=info,triage_engine=info,triage_platform=info,triage_reporting=info".into()
                }),
        )
        .init();

    let cli = Cli::parse();

    info!("Creative Triage starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(min_ads) = cli.min_ads {
        config.min_ads_per_group = min_ads;
    }
    if let Some(date_range) = cli.date_range {
        config.date_range = date_range;
    }
    if let Some(threshold) = cli.winners_threshold {
        config.winners_threshold = threshold;
    }
    if cli.report {
        config.report.enabled = true;
    }
    if let Some(path) = cli.report_path {
        config.report.output_path = path;
    }

    info!(
        min_ads_per_group = config.min_ads_per_group,
        date_range = %config.date_range,
        winners_threshold = config.winners_threshold,
        report = config.report.enabled,
        "Configuration loaded"
    );

    // Development mode: a seeded in-memory account stands in for the live
    // ads platform.
    let platform = InMemoryAdsPlatform::with_demo_data();

    let result = triage_engine::run(&config, &platform, &platform)?;

    if config.report.enabled {
        info!(path = %config.report.output_path, "Building report");
        let mut sink = CsvReportSink::new(&config.report.output_path);
        ReportWriter::new(&mut sink).write(&result, &config.labels)?;
        sink.finish()?;
    }

    info!("Creative Triage complete");

    Ok(())
}
