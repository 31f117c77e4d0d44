//! Odds data model shared by the analysis pipeline.
//!
//! Prices are decimal odds (a 2.10 price returns 2.10 per 1 staked, stake
//! included). Every reciprocal in the workspace goes through
//! [`implied_probability`], which rejects prices that are not strictly above
//! 1.0 instead of dividing by them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Converts decimal odds into the bookmaker's implied win probability.
///
/// Returns `None` for a price at or below 1.0. Such a price is malformed:
/// it would imply a probability of 100% or more, and `price - 1` (the net
/// odds used by Kelly sizing) would be zero or negative. A price so large
/// that its reciprocal rounds to zero is rejected too.
///
/// # Examples
/// ```
/// use bet_edge_core::types::implied_probability;
/// use rust_decimal::Decimal;
///
/// let p = implied_probability(Decimal::new(2, 0)).unwrap();
/// assert_eq!(p, Decimal::new(5, 1));
/// assert!(implied_probability(Decimal::ONE).is_none());
/// ```
#[must_use]
pub fn implied_probability(price: Decimal) -> Option<Decimal> {
    if price <= Decimal::ONE {
        return None;
    }
    let probability = Decimal::ONE / price;
    (probability > Decimal::ZERO).then_some(probability)
}

// =============================================================================
// Market Kinds
// =============================================================================

/// The wagering markets the analyzer covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketKind {
    /// Head to head (moneyline).
    H2h,
    /// Point spread / handicap.
    Spreads,
    /// Over/under totals.
    Totals,
}

impl MarketKind {
    /// Every market kind in analysis order. Output ordering follows this list.
    pub const ALL: [MarketKind; 3] = [MarketKind::H2h, MarketKind::Spreads, MarketKind::Totals];

    /// Wire key used by the odds feed.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            MarketKind::H2h => "h2h",
            MarketKind::Spreads => "spreads",
            MarketKind::Totals => "totals",
        }
    }

    /// Parses a wire key. Unknown keys (e.g. `outrights`) return `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Feed Entities
// =============================================================================

/// One priced outcome inside a bookmaker's market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Outcome label (team name, "Over", "Under", "Draw").
    pub name: String,
    /// Decimal odds.
    pub price: Decimal,
    /// Spread or total line, absent for head-to-head markets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<Decimal>,
}

impl Outcome {
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            point: None,
        }
    }

    /// Sets the spread/total line.
    #[must_use]
    pub fn with_point(mut self, point: Decimal) -> Self {
        self.point = Some(point);
        self
    }

    /// Implied probability of this outcome, `None` if the price is malformed.
    #[must_use]
    pub fn implied_probability(&self) -> Option<Decimal> {
        implied_probability(self.price)
    }

    /// Returns true if the price has a usable implied probability.
    #[must_use]
    pub fn has_valid_price(&self) -> bool {
        self.implied_probability().is_some()
    }
}

/// A single bookmaker's market. Its outcomes are mutually exclusive and
/// collectively exhaustive for the market type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Market key: `h2h`, `spreads` or `totals` (other keys are carried but ignored).
    pub key: String,
    /// Outcomes in feed order.
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

impl Market {
    #[must_use]
    pub fn new(kind: MarketKind, outcomes: Vec<Outcome>) -> Self {
        Self {
            key: kind.key().to_string(),
            outcomes,
        }
    }

    /// Parsed market kind, `None` for keys outside the analyzed set.
    #[must_use]
    pub fn kind(&self) -> Option<MarketKind> {
        MarketKind::from_key(&self.key)
    }
}

/// Odds quoted by one bookmaker for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmakerOdds {
    /// Stable bookmaker key (e.g. `draftkings`).
    pub key: String,
    /// Display name.
    pub title: String,
    /// When the bookmaker last updated these odds.
    pub last_update: DateTime<Utc>,
    #[serde(default)]
    pub markets: Vec<Market>,
}

impl BookmakerOdds {
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>, last_update: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            last_update,
            markets: Vec::new(),
        }
    }

    /// Adds a market.
    #[must_use]
    pub fn with_market(mut self, market: Market) -> Self {
        self.markets.push(market);
        self
    }

    /// First market with the given key.
    #[must_use]
    pub fn market(&self, key: &str) -> Option<&Market> {
        self.markets.iter().find(|market| market.key == key)
    }
}

/// One odds fetch for one event, in the odds feed's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsSnapshot {
    pub id: String,
    pub sport_key: String,
    pub sport_title: String,
    pub commence_time: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    /// Bookmakers in feed order. Ties between equal prices resolve to the
    /// bookmaker listed first.
    #[serde(default)]
    pub bookmakers: Vec<BookmakerOdds>,
}

/// A sporting event with every odds snapshot collected for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub sport: String,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
    /// Snapshots in fetch order.
    pub odds: Vec<OddsSnapshot>,
}

impl Event {
    /// Builds an event from a single odds snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: OddsSnapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            sport: snapshot.sport_key.clone(),
            league: snapshot.sport_title.clone(),
            home_team: snapshot.home_team.clone(),
            away_team: snapshot.away_team.clone(),
            start_time: snapshot.commence_time,
            odds: vec![snapshot],
        }
    }

    /// "Home vs Away" label used in reports and logs.
    #[must_use]
    pub fn matchup(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    /// Iterates every bookmaker across all snapshots, in snapshot then feed order.
    pub fn bookmakers(&self) -> impl Iterator<Item = &BookmakerOdds> {
        self.odds.iter().flat_map(|snapshot| snapshot.bookmakers.iter())
    }
}
