//! Analyze command: detailed per-market analysis, as text or JSON.
//!
//! # Usage
//!
//! ```bash
//! # Every event in the feed
//! bet-edge analyze --input odds.json
//!
//! # One event, machine-readable
//! bet-edge analyze --input odds.json --event-id e912304de2b2ce35 --format json
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::input::load_events;
use bet_edge_analysis::{AnalysisResult, Analyzer, EventAnalysis, MarketFault, ReportFormatter};
use bet_edge_core::{find_event, AppConfig, Event};

/// Output format for the analyze command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable market breakdown
    #[default]
    Text,
    /// Analysis results as JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Odds feed JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Restrict the analysis to one event
    #[arg(short, long)]
    pub event_id: Option<String>,

    /// Output format: text or json
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

/// JSON shape of one analyzed event.
#[derive(Debug, Serialize)]
struct EventReport<'a> {
    event_id: &'a str,
    sport: &'a str,
    matchup: String,
    start_time: DateTime<Utc>,
    results: Vec<AnalysisResult>,
    faults: Vec<MarketFault>,
}

/// Runs the analyze command.
///
/// # Errors
/// Returns an error if the feed cannot be loaded, the requested event is
/// missing, or JSON encoding fails.
pub fn run_analyze(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let events = load_events(&args.input)?;
    let selected: Vec<&Event> = match &args.event_id {
        Some(id) => vec![find_event(&events, id)?],
        None => events.iter().collect(),
    };

    tracing::info!(events = selected.len(), format = %args.format, "Analyzing events");

    let analyzer = Analyzer::from_config(&config.analysis);
    let timestamp = Utc::now();
    let analyzed: Vec<(&Event, EventAnalysis)> = selected
        .into_iter()
        .map(|event| (event, analyzer.analyze_event_detailed_at(event, timestamp)))
        .collect();

    match args.format {
        OutputFormat::Json => {
            let reports: Vec<EventReport<'_>> = analyzed
                .into_iter()
                .map(|(event, analysis)| EventReport {
                    event_id: &event.id,
                    sport: &event.sport,
                    matchup: event.matchup(),
                    start_time: event.start_time,
                    results: analysis.results,
                    faults: analysis.faults,
                })
                .collect();
            let json =
                serde_json::to_string_pretty(&reports).context("failed to encode analysis")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            for (event, analysis) in &analyzed {
                print!("{}", ReportFormatter::market_analysis(event, &analysis.results));
                for fault in &analysis.faults {
                    println!("Skipped {} market: {}", fault.market, fault.reason);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
