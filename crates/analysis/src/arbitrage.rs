//! Arbitrage detection across bookmakers.
//!
//! Taking the best price for every outcome of a market, the stakes
//!
//! ```text
//! stake_i = (total_stake / price_i) / Σ(1 / price_j)
//! ```
//!
//! return the same payout `total_stake / Σ(1 / price_j)` whichever outcome
//! wins. When the summed implied probability is below 1.0 that payout
//! exceeds the total stake and the profit is locked in:
//!
//! ```text
//! Book A: Home @ 2.10      Book B: Away @ 2.10
//! Σ(1/p) = 0.9524          stakes 50.00 / 50.00
//! payout = 105.00          profit = 100 * (1 - 0.9524) = 4.76
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, trace};

use crate::indexer::MarketTable;
use bet_edge_core::AnalysisConfig;

/// Decimal places kept on computed stakes. Bounds the scale of every stake so
/// the remainder leg is computed without mantissa overflow.
const STAKE_DP: u32 = 12;

// =============================================================================
// Opportunity
// =============================================================================

/// One outcome's share of an arbitrage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrageLeg {
    pub outcome: String,
    pub bookmaker: String,
    /// Best price for the outcome.
    pub price: Decimal,
    /// Amount to stake on this leg.
    pub stake: Decimal,
}

impl ArbitrageLeg {
    /// Return if this leg's outcome wins.
    #[must_use]
    pub fn payout(&self) -> Decimal {
        self.stake * self.price
    }
}

/// A guaranteed-profit stake split over every outcome of a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    /// Always true; unguaranteed splits are never reported.
    pub guaranteed: bool,
    /// Locked-in profit in currency units.
    pub profit: Decimal,
    /// Legs in order of first appearance of each outcome.
    pub legs: Vec<ArbitrageLeg>,
    /// Stake per bookmaker (a bookmaker best on several outcomes is summed).
    pub stakes: BTreeMap<String, Decimal>,
    /// Sum of all stakes.
    pub total_stake: Decimal,
    /// Σ(1 / price) over the legs, below 1.0.
    pub total_implied_probability: Decimal,
}

impl ArbitrageOpportunity {
    /// Payout common to every outcome, `total_stake / Σ(1 / price)`.
    ///
    /// Slightly above `total_stake + profit`: `profit` is quoted as
    /// `total_stake * (1 - Σ)`.
    #[must_use]
    pub fn payout(&self) -> Decimal {
        if self.total_implied_probability == Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_stake / self.total_implied_probability
    }

    /// Profit as a percentage of the total stake.
    #[must_use]
    pub fn roi_pct(&self) -> Decimal {
        if self.total_stake == Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.profit / self.total_stake * dec!(100)
    }
}

// =============================================================================
// Detector
// =============================================================================

/// Detects riskless stake splits in a market table.
#[derive(Debug, Clone)]
pub struct ArbitrageDetector {
    total_stake: Decimal,
}

impl Default for ArbitrageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ArbitrageDetector {
    /// Creates a detector splitting the default $100 stake.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }

    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            total_stake: config.arbitrage_total_stake,
        }
    }

    /// Sets the total stake to split.
    #[must_use]
    pub fn with_total_stake(mut self, total_stake: Decimal) -> Self {
        self.total_stake = total_stake;
        self
    }

    #[must_use]
    pub fn total_stake(&self) -> Decimal {
        self.total_stake
    }

    /// Returns the arbitrage available in `table`, if any.
    ///
    /// `None` when fewer than two distinct outcomes are validly priced, when
    /// the best prices sum to an implied probability outside (0, 1), or when
    /// the configured stake is not positive.
    #[must_use]
    pub fn detect(&self, table: &MarketTable<'_>) -> Option<ArbitrageOpportunity> {
        if self.total_stake <= Decimal::ZERO {
            trace!(total_stake = %self.total_stake, "Non-positive stake, skipping arbitrage");
            return None;
        }

        // Best (outcome, bookmaker, price) per outcome name, first seen wins ties.
        let best = table
            .priced_quotes()
            .fold(Vec::<(&str, &str, Decimal)>::new(), |mut best, (bookmaker, outcome)| {
                match best.iter_mut().find(|(name, _, _)| *name == outcome.name) {
                    Some(entry) if outcome.price > entry.2 => {
                        *entry = (outcome.name.as_str(), bookmaker, outcome.price);
                    }
                    Some(_) => {}
                    None => best.push((outcome.name.as_str(), bookmaker, outcome.price)),
                }
                best
            });

        if best.len() < 2 {
            trace!(
                market = %table.kind(),
                outcomes = best.len(),
                "Fewer than two priced outcomes, no arbitrage"
            );
            return None;
        }

        let total_implied_probability: Decimal = best
            .iter()
            .filter_map(|(_, _, price)| bet_edge_core::implied_probability(*price))
            .sum();

        if total_implied_probability <= Decimal::ZERO || total_implied_probability >= Decimal::ONE {
            trace!(
                market = %table.kind(),
                total_implied_probability = %total_implied_probability,
                "No arbitrage - implied probability outside (0, 1)"
            );
            return None;
        }

        let last = best.len() - 1;
        let mut allocated = Decimal::ZERO;
        let legs: Vec<ArbitrageLeg> = best
            .iter()
            .enumerate()
            .map(|(i, (outcome, bookmaker, price))| {
                // The last leg takes the remainder so the stakes sum exactly.
                let stake = if i == last {
                    self.total_stake - allocated
                } else {
                    ((self.total_stake / *price) / total_implied_probability).round_dp(STAKE_DP)
                };
                allocated += stake;
                ArbitrageLeg {
                    outcome: (*outcome).to_string(),
                    bookmaker: (*bookmaker).to_string(),
                    price: *price,
                    stake,
                }
            })
            .collect();

        let mut stakes = BTreeMap::new();
        for leg in &legs {
            *stakes.entry(leg.bookmaker.clone()).or_insert(Decimal::ZERO) += leg.stake;
        }

        let profit = self.total_stake * (Decimal::ONE - total_implied_probability);

        info!(
            market = %table.kind(),
            legs = legs.len(),
            total_implied_probability = %total_implied_probability,
            profit = %(profit.round_dp(2)),
            "Arbitrage opportunity detected"
        );

        Some(ArbitrageOpportunity {
            guaranteed: true,
            profit,
            legs,
            stakes,
            total_stake: self.total_stake,
            total_implied_probability,
        })
    }
}
