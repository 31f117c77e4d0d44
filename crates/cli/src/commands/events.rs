//! Events command: lists the upcoming events of a feed.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::commands::input::{load_events, sport_label};
use bet_edge_analysis::ReportFormatter;
use bet_edge_core::AppConfig;

/// Arguments for the events command.
#[derive(Args, Debug, Clone)]
pub struct EventsArgs {
    /// Odds feed JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Maximum number of events listed (defaults to the configured value)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl EventsArgs {
    fn limit(&self, config: &AppConfig) -> usize {
        self.limit.unwrap_or(config.report.max_listed_events)
    }
}

/// Runs the events command.
///
/// # Errors
/// Returns an error if the feed cannot be loaded.
pub fn run_events(args: EventsArgs, config: &AppConfig) -> Result<()> {
    let events = load_events(&args.input)?;
    let limit = args.limit(config);

    print!(
        "{}",
        ReportFormatter::events(&sport_label(&events), &events, limit)
    );
    Ok(())
}
