//! Odds feed decoding.
//!
//! The odds provider returns a JSON array of event snapshots (one element per
//! upcoming event). A single snapshot object, as returned by per-event
//! lookups, is accepted too.

use crate::error::OddsFeedError;
use crate::types::{Event, OddsSnapshot};
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    Many(Vec<OddsSnapshot>),
    One(Box<OddsSnapshot>),
}

/// Decodes an odds feed document into snapshots, preserving feed order.
///
/// # Errors
///
/// Returns [`OddsFeedError::Decode`] if the document is neither a snapshot
/// nor an array of snapshots.
pub fn parse_snapshots(json: &str) -> Result<Vec<OddsSnapshot>, OddsFeedError> {
    let snapshots = match serde_json::from_str::<FeedDocument>(json)? {
        FeedDocument::Many(snapshots) => snapshots,
        FeedDocument::One(snapshot) => vec![*snapshot],
    };

    debug!(count = snapshots.len(), "Decoded odds feed");
    Ok(snapshots)
}

/// Decodes an odds feed document straight into events, one per snapshot.
///
/// # Errors
///
/// Returns [`OddsFeedError::Decode`] on malformed JSON.
pub fn parse_events(json: &str) -> Result<Vec<Event>, OddsFeedError> {
    Ok(parse_snapshots(json)?
        .into_iter()
        .map(Event::from_snapshot)
        .collect())
}

/// Finds an event by id.
///
/// # Errors
///
/// Returns [`OddsFeedError::EventNotFound`] if no event has that id.
pub fn find_event<'a>(events: &'a [Event], event_id: &str) -> Result<&'a Event, OddsFeedError> {
    events
        .iter()
        .find(|event| event.id == event_id)
        .ok_or_else(|| OddsFeedError::EventNotFound {
            event_id: event_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FEED: &str = r#"[
        {
            "id": "e912304de2b2ce35b473ce2ecd3d1502",
            "sport_key": "americanfootball_nfl",
            "sport_title": "NFL",
            "commence_time": "2024-09-08T17:00:00Z",
            "home_team": "Kansas City Chiefs",
            "away_team": "Baltimore Ravens",
            "bookmakers": [
                {
                    "key": "draftkings",
                    "title": "DraftKings",
                    "last_update": "2024-09-07T12:00:00Z",
                    "markets": [
                        {
                            "key": "h2h",
                            "outcomes": [
                                {"name": "Baltimore Ravens", "price": 2.3},
                                {"name": "Kansas City Chiefs", "price": 1.65}
                            ]
                        },
                        {
                            "key": "spreads",
                            "last_update": "2024-09-07T12:00:00Z",
                            "outcomes": [
                                {"name": "Baltimore Ravens", "price": 1.91, "point": 3.5},
                                {"name": "Kansas City Chiefs", "price": 1.91, "point": -3.5}
                            ]
                        }
                    ]
                }
            ]
        }
    ]"#;

    #[test]
    fn parses_feed_array() {
        let snapshots = parse_snapshots(FEED).unwrap();
        assert_eq!(snapshots.len(), 1);

        let snap = &snapshots[0];
        assert_eq!(snap.sport_key, "americanfootball_nfl");
        assert_eq!(snap.bookmakers[0].key, "draftkings");

        let spreads = snap.bookmakers[0].market("spreads").unwrap();
        assert_eq!(spreads.outcomes[0].price, dec!(1.91));
        assert_eq!(spreads.outcomes[0].point, Some(dec!(3.5)));
        assert_eq!(spreads.outcomes[1].point, Some(dec!(-3.5)));

        let h2h = snap.bookmakers[0].market("h2h").unwrap();
        assert_eq!(h2h.outcomes[0].price, dec!(2.3));
        assert_eq!(h2h.outcomes[0].point, None);
    }

    #[test]
    fn parses_single_snapshot_object() {
        let object = FEED.trim().trim_start_matches('[').trim_end_matches(']');
        let snapshots = parse_snapshots(object).unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].home_team, "Kansas City Chiefs");
    }

    #[test]
    fn parses_events_and_finds_by_id() {
        let events = parse_events(FEED).unwrap();
        let event = find_event(&events, "e912304de2b2ce35b473ce2ecd3d1502").unwrap();
        assert_eq!(event.league, "NFL");

        let missing = find_event(&events, "nope").unwrap_err();
        assert!(matches!(missing, OddsFeedError::EventNotFound { .. }));
    }

    #[test]
    fn empty_feed_is_not_an_error() {
        assert!(parse_events("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_document() {
        let err = parse_snapshots(r#"{"id": 7}"#).unwrap_err();
        assert!(matches!(err, OddsFeedError::Decode(_)));
    }
}
