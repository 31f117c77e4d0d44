//! Error types for odds feed handling.

use thiserror::Error;

/// Errors raised while decoding or querying an odds feed.
#[derive(Debug, Error)]
pub enum OddsFeedError {
    /// The document is not valid odds feed JSON.
    #[error("invalid odds feed: {0}")]
    Decode(#[from] serde_json::Error),

    /// No event in the feed has the requested id.
    #[error("event not found: {event_id}")]
    EventNotFound {
        /// The id that was looked up.
        event_id: String,
    },
}
