//! Best-bets command: high-confidence BUY and STRONG BUY picks across a feed.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::commands::input::{load_events, sport_label};
use bet_edge_analysis::{Analyzer, ReportFormatter};
use bet_edge_core::{AppConfig, ReportConfig};

/// Arguments for the best-bets command.
#[derive(Args, Debug, Clone)]
pub struct BestBetsArgs {
    /// Odds feed JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Minimum confidence, 0.0 to 1.0 (defaults to the configured value)
    #[arg(long, value_parser = parse_confidence)]
    pub min_confidence: Option<Decimal>,
}

impl BestBetsArgs {
    fn report_config(&self, config: &ReportConfig) -> ReportConfig {
        ReportConfig {
            min_confidence: self.min_confidence.unwrap_or(config.min_confidence),
            ..config.clone()
        }
    }
}

fn parse_confidence(s: &str) -> Result<Decimal, String> {
    let value: Decimal = s
        .parse()
        .map_err(|e| format!("invalid confidence '{s}': {e}"))?;
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(format!("confidence must be between 0 and 1, got {value}"));
    }
    Ok(value)
}

/// Runs the best-bets command.
///
/// # Errors
/// Returns an error if the feed cannot be loaded.
pub fn run_best_bets(args: BestBetsArgs, config: &AppConfig) -> Result<()> {
    let events = load_events(&args.input)?;
    let report = args.report_config(&config.report);

    // Only the events the report can show are analyzed.
    let scanned = &events[..events.len().min(report.max_events)];
    tracing::info!(
        events = scanned.len(),
        min_confidence = %report.min_confidence,
        "Scanning for best bets"
    );

    let analyzed = Analyzer::from_config(&config.analysis).analyze_events(scanned);
    print!(
        "{}",
        ReportFormatter::best_bets(&sport_label(&events), &analyzed, &report)
    );
    Ok(())
}
