//! Compare command: best price and recommendation per market of one event.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::commands::input::load_events;
use bet_edge_analysis::{Analyzer, ReportFormatter};
use bet_edge_core::{find_event, AppConfig};

/// Arguments for the compare command.
#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Odds feed JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Event to analyze
    #[arg(short, long)]
    pub event_id: String,
}

/// Runs the compare command.
///
/// # Errors
/// Returns an error if the feed cannot be loaded or the event is not in it.
pub fn run_compare(args: CompareArgs, config: &AppConfig) -> Result<()> {
    let events = load_events(&args.input)?;
    let event = find_event(&events, &args.event_id)?;

    let results = Analyzer::from_config(&config.analysis).analyze_event(event);
    print!("{}", ReportFormatter::compare_odds(event, &results));
    Ok(())
}
