//! Error types for market analysis.

use bet_edge_core::MarketKind;
use thiserror::Error;

/// A fault confined to one market of one event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Bookmakers list the market but none quotes a price above 1.0.
    #[error("no priced outcome in {market} market")]
    NoPricedOutcome {
        /// The market that could not be priced.
        market: MarketKind,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
