//! Odds feed file loading shared by every command.

use anyhow::{Context, Result};
use std::path::Path;

use bet_edge_core::{parse_events, Event};

/// Reads and decodes an odds feed file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid odds feed.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read odds feed {}", path.display()))?;
    let events = parse_events(&json)
        .with_context(|| format!("failed to decode odds feed {}", path.display()))?;

    tracing::info!(path = %path.display(), events = events.len(), "Loaded odds feed");
    Ok(events)
}

/// Sport label for multi-event reports: the distinct sport keys in feed order.
pub fn sport_label(events: &[Event]) -> String {
    let sports = events.iter().fold(Vec::<&str>::new(), |mut acc, event| {
        if !acc.contains(&event.sport.as_str()) {
            acc.push(&event.sport);
        }
        acc
    });

    if sports.is_empty() {
        "the odds feed".to_string()
    } else {
        sports.join(", ")
    }
}
