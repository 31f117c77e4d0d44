//! Arbitrage command: scans every event of a feed for guaranteed-profit splits.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::commands::input::{load_events, sport_label};
use bet_edge_analysis::{Analyzer, ReportFormatter};
use bet_edge_core::{AnalysisConfig, AppConfig};

/// Arguments for the arbitrage command.
#[derive(Args, Debug, Clone)]
pub struct ArbitrageArgs {
    /// Odds feed JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Total stake split across the legs (defaults to the configured value)
    #[arg(long, value_parser = parse_positive_stake)]
    pub total_stake: Option<Decimal>,
}

impl ArbitrageArgs {
    fn analysis_config(&self, config: &AnalysisConfig) -> AnalysisConfig {
        AnalysisConfig {
            arbitrage_total_stake: self
                .total_stake
                .unwrap_or(config.arbitrage_total_stake),
            ..config.clone()
        }
    }
}

fn parse_positive_stake(s: &str) -> Result<Decimal, String> {
    let stake: Decimal = s.parse().map_err(|e| format!("invalid stake '{s}': {e}"))?;
    if stake <= Decimal::ZERO {
        return Err(format!("stake must be positive, got {stake}"));
    }
    Ok(stake)
}

/// Runs the arbitrage command.
///
/// # Errors
/// Returns an error if the feed cannot be loaded.
pub fn run_arbitrage(args: ArbitrageArgs, config: &AppConfig) -> Result<()> {
    let events = load_events(&args.input)?;
    let analysis = args.analysis_config(&config.analysis);
    tracing::info!(total_stake = %analysis.arbitrage_total_stake, "Scanning for arbitrage");

    let analyzed = Analyzer::from_config(&analysis).analyze_events(&events);
    print!(
        "{}",
        ReportFormatter::find_arbitrage(&sport_label(&events), &analyzed)
    );
    Ok(())
}
