#![forbid(unsafe_code)]

mod constants;
mod controller;
mod gui;
mod layout;
mod metrics;
mod resize;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use metrics::Period;

/// KPI dashboard for branch managers with a draggable card grid.
#[derive(Debug, Parser)]
#[command(name = "branchboard", version)]
struct Args {
    /// Branch to show; the customized layout is stored per branch
    #[arg(long, default_value = "main")]
    branch: String,

    /// Reporting period for the metric cards
    #[arg(long, value_enum, default_value = "monthly")]
    period: Period,
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    info!(branch = %args.branch, period = ?args.period, "Starting dashboard");

    gui::run_gui(args.branch, args.period)
}
