use clap::{Parser, ValueEnum};
use coupon_cart::application::checkout::Checkout;
use coupon_cart::interfaces::csv::event_reader::EventReader;
use coupon_cart::interfaces::{csv, json};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input CSV file of cart events
    input: PathBuf,

    /// Output format for the cart summaries
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Log filter used when RUST_LOG is not set (e.g. "debug", "coupon_cart=trace")
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .into_diagnostic()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let mut checkout = Checkout::new();

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);
    for event_result in reader.events() {
        match event_result {
            Ok(event) => {
                if let Err(e) = checkout.process_event(event) {
                    warn!("Error processing cart event: {}", e);
                }
            }
            Err(e) => {
                warn!("Error reading cart event: {}", e);
            }
        }
    }

    let summaries = checkout.into_results();

    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Csv => csv::summary_writer::SummaryWriter::new(stdout.lock())
            .write_summaries(summaries)
            .into_diagnostic()?,
        OutputFormat::Json => json::summary_writer::SummaryWriter::new(stdout.lock())
            .write_summaries(summaries)
            .into_diagnostic()?,
    }

    Ok(())
}
