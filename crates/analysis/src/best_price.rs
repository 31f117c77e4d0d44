//! Best available price across bookmakers.

use bet_edge_core::Outcome;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{AnalysisError, Result};
use crate::indexer::MarketTable;

/// The single highest price quoted for any outcome of a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestOdds {
    /// Outcome the price is for.
    pub outcome: String,
    /// Bookmaker quoting it.
    pub bookmaker: String,
    /// Decimal odds.
    pub price: Decimal,
    /// `1 / price`.
    pub implied_probability: Decimal,
}

/// Finds the highest valid price in the table.
///
/// Only a strictly higher price replaces the running best, so on equal
/// prices the bookmaker (and outcome) seen first in table order wins.
///
/// # Errors
///
/// Returns [`AnalysisError::NoPricedOutcome`] if no outcome has a price
/// above 1.0, including when the table is empty.
pub fn select_best_price(table: &MarketTable<'_>) -> Result<BestOdds> {
    let best = table
        .priced_quotes()
        .fold(None, |best: Option<(&str, &Outcome)>, quote| match best {
            Some(current) if quote.1.price <= current.1.price => Some(current),
            _ => Some(quote),
        });

    let (bookmaker, outcome) = best.ok_or(AnalysisError::NoPricedOutcome {
        market: table.kind(),
    })?;
    let implied_probability = outcome
        .implied_probability()
        .ok_or(AnalysisError::NoPricedOutcome {
            market: table.kind(),
        })?;

    trace!(
        market = %table.kind(),
        bookmaker,
        outcome = %outcome.name,
        price = %outcome.price,
        "Best price selected"
    );

    Ok(BestOdds {
        outcome: outcome.name.clone(),
        bookmaker: bookmaker.to_string(),
        price: outcome.price,
        implied_probability,
    })
}
