//! Value estimation and Kelly sizing for the best available price.
//!
//! The fair probability of the best-priced outcome is the consensus of every
//! bookmaker quoting that outcome, discounted by a fixed vig factor:
//!
//! ```text
//! p      = mean(1 / price_k) * vig_discount
//! EV     = best_price * p - 1
//! kelly  = max(0, (b*p - q) / b)     where b = best_price - 1, q = 1 - p
//! ```
//!
//! Confidence reflects how much the bookmakers agree: `1 - 2σ` of the
//! implied probabilities, clamped to [0, 1], and 0 with fewer than two quotes.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::best_price::BestOdds;
use crate::indexer::MarketTable;
use bet_edge_core::AnalysisConfig;

// =============================================================================
// Recommendation
// =============================================================================

/// Recommendation tier. The set is closed; presentation code must not invent
/// other labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "WEAK BUY")]
    WeakBuy,
    #[serde(rename = "AVOID")]
    Avoid,
    #[serde(rename = "HOLD")]
    Hold,
}

impl Recommendation {
    /// Applies the decision table; the first matching row wins.
    ///
    /// | expected value | kelly  | confidence | tier       |
    /// |----------------|--------|------------|------------|
    /// | > 0.10         | > 0.05 | > 0.70     | STRONG BUY |
    /// | > 0.05         | > 0.02 | > 0.50     | BUY        |
    /// | > 0.00         |        | > 0.30     | WEAK BUY   |
    /// | < -0.05        |        |            | AVOID      |
    /// | otherwise      |        |            | HOLD       |
    #[must_use]
    pub fn from_metrics(expected_value: Decimal, kelly: Decimal, confidence: Decimal) -> Self {
        if expected_value > dec!(0.10) && kelly > dec!(0.05) && confidence > dec!(0.70) {
            Recommendation::StrongBuy
        } else if expected_value > dec!(0.05) && kelly > dec!(0.02) && confidence > dec!(0.50) {
            Recommendation::Buy
        } else if expected_value > Decimal::ZERO && confidence > dec!(0.30) {
            Recommendation::WeakBuy
        } else if expected_value < dec!(-0.05) {
            Recommendation::Avoid
        } else {
            Recommendation::Hold
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "STRONG BUY",
            Recommendation::Buy => "BUY",
            Recommendation::WeakBuy => "WEAK BUY",
            Recommendation::Avoid => "AVOID",
            Recommendation::Hold => "HOLD",
        }
    }

    /// BUY or STRONG BUY.
    #[must_use]
    pub const fn is_buy(self) -> bool {
        matches!(self, Recommendation::StrongBuy | Recommendation::Buy)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Formulas
// =============================================================================

/// Expected profit per unit staked at `price` when the true win probability is `p`.
#[must_use]
pub fn expected_value(price: Decimal, p: Decimal) -> Decimal {
    price * p - Decimal::ONE
}

/// Full Kelly fraction for decimal odds `price` and win probability `p`.
///
/// Never negative: a negative edge means "do not bet". Returns zero for a
/// price at or below 1.0, where the net odds `b` would be zero or negative.
#[must_use]
pub fn kelly_fraction(price: Decimal, p: Decimal) -> Decimal {
    let b = price - Decimal::ONE;
    if b <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let q = Decimal::ONE - p;
    ((b * p - q) / b).max(Decimal::ZERO)
}

/// Agreement between bookmakers: `1 - 2 * population std dev`, clamped to [0, 1].
/// Zero when fewer than two probabilities are given.
#[must_use]
pub fn confidence(probabilities: &[Decimal]) -> Decimal {
    if probabilities.len() < 2 {
        return Decimal::ZERO;
    }

    let n = Decimal::from(probabilities.len());
    let mean = probabilities.iter().sum::<Decimal>() / n;
    let variance = probabilities
        .iter()
        .map(|p| (*p - mean) * (*p - mean))
        .sum::<Decimal>()
        / n;
    let std_dev = variance.sqrt().unwrap_or(Decimal::ZERO);

    (Decimal::ONE - dec!(2) * std_dev).clamp(Decimal::ZERO, Decimal::ONE)
}

// =============================================================================
// Value Analysis
// =============================================================================

/// Value metrics for the best available price of a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueAnalysis {
    /// Expected profit per unit staked (0.08 = 8%).
    pub expected_value: Decimal,
    /// Kelly fraction of bankroll, never negative.
    pub kelly: Decimal,
    /// Bookmaker agreement, 0.0 to 1.0.
    pub confidence: Decimal,
    pub recommendation: Recommendation,
    /// Vig-adjusted consensus probability the metrics were computed from.
    pub true_probability: Decimal,
    /// Number of bookmaker quotes behind the consensus.
    pub samples: usize,
}

/// Estimates value from cross-bookmaker consensus.
#[derive(Debug, Clone)]
pub struct ValueEstimator {
    vig_discount: Decimal,
}

impl Default for ValueEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueEstimator {
    /// Creates an estimator with the default 0.95 vig discount.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }

    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            vig_discount: config.vig_discount,
        }
    }

    #[must_use]
    pub fn with_vig_discount(mut self, vig_discount: Decimal) -> Self {
        self.vig_discount = vig_discount;
        self
    }

    #[must_use]
    pub fn vig_discount(&self) -> Decimal {
        self.vig_discount
    }

    /// Scores `best` against every bookmaker in `table` quoting the same outcome.
    ///
    /// With no usable quote for the outcome, the best price's own implied
    /// probability stands in for the consensus and confidence is zero.
    #[must_use]
    pub fn estimate(&self, table: &MarketTable<'_>, best: &BestOdds) -> ValueAnalysis {
        let probabilities: Vec<Decimal> = table
            .quotes()
            .filter(|(_, outcome)| outcome.name == best.outcome)
            .filter_map(|(_, outcome)| outcome.implied_probability())
            .collect();

        let consensus = if probabilities.is_empty() {
            best.implied_probability
        } else {
            probabilities.iter().sum::<Decimal>() / Decimal::from(probabilities.len())
        };

        let true_probability =
            (consensus * self.vig_discount).clamp(Decimal::ZERO, Decimal::ONE);
        let expected_value = expected_value(best.price, true_probability);
        let kelly = kelly_fraction(best.price, true_probability);
        let confidence = confidence(&probabilities);
        let recommendation = Recommendation::from_metrics(expected_value, kelly, confidence);

        trace!(
            market = %table.kind(),
            outcome = %best.outcome,
            samples = probabilities.len(),
            true_probability = %true_probability,
            expected_value = %expected_value,
            kelly = %kelly,
            confidence = %confidence,
            recommendation = %recommendation,
            "Value estimated"
        );

        ValueAnalysis {
            expected_value,
            kelly,
            confidence,
            recommendation,
            true_probability,
            samples: probabilities.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_price::select_best_price;
    use bet_edge_core::{BookmakerOdds, Event, Market, MarketKind, OddsSnapshot, Outcome};
    use chrono::Utc;

    fn event(books: Vec<(&str, Vec<(&str, Decimal)>)>) -> Event {
        let now = Utc::now();
        Event::from_snapshot(OddsSnapshot {
            id: "evt".to_string(),
            sport_key: "icehockey_nhl".to_string(),
            sport_title: "NHL".to_string(),
            commence_time: now,
            home_team: "A".to_string(),
            away_team: "B".to_string(),
            bookmakers: books
                .into_iter()
                .map(|(key, outcomes)| {
                    BookmakerOdds::new(key, key, now).with_market(Market::new(
                        MarketKind::H2h,
                        outcomes
                            .into_iter()
                            .map(|(name, price)| Outcome::new(name, price))
                            .collect(),
                    ))
                })
                .collect(),
        })
    }

    fn best(outcome: &str, bookmaker: &str, price: Decimal) -> BestOdds {
        BestOdds {
            outcome: outcome.to_string(),
            bookmaker: bookmaker.to_string(),
            price,
            implied_probability: Decimal::ONE / price,
        }
    }

    // ============================================
    // Recommendation Table
    // ============================================

    #[test]
    fn strong_buy_when_all_thresholds_clear() {
        let rec = Recommendation::from_metrics(dec!(0.12), dec!(0.06), dec!(0.75));
        assert_eq!(rec, Recommendation::StrongBuy);
    }

    #[test]
    fn weak_buy_when_kelly_misses_buy_threshold() {
        let rec = Recommendation::from_metrics(dec!(0.07), dec!(0.00), dec!(0.90));
        assert_eq!(rec, Recommendation::WeakBuy);
    }

    #[test]
    fn avoid_on_clearly_negative_ev() {
        let rec = Recommendation::from_metrics(dec!(-0.10), dec!(0.0), dec!(0.2));
        assert_eq!(rec, Recommendation::Avoid);
    }

    #[test]
    fn buy_tier() {
        let rec = Recommendation::from_metrics(dec!(0.08), dec!(0.03), dec!(0.6));
        assert_eq!(rec, Recommendation::Buy);
    }

    #[test]
    fn thresholds_are_strict() {
        // Exactly at the STRONG BUY edges falls through to BUY.
        assert_eq!(
            Recommendation::from_metrics(dec!(0.10), dec!(0.06), dec!(0.75)),
            Recommendation::Buy
        );
        // Positive EV but confidence exactly 0.30 is HOLD.
        assert_eq!(
            Recommendation::from_metrics(dec!(0.01), dec!(0.0), dec!(0.30)),
            Recommendation::Hold
        );
        // EV exactly -0.05 is HOLD, not AVOID.
        assert_eq!(
            Recommendation::from_metrics(dec!(-0.05), dec!(0.0), dec!(0.9)),
            Recommendation::Hold
        );
    }

    #[test]
    fn positive_ev_without_confidence_holds() {
        let rec = Recommendation::from_metrics(dec!(0.20), dec!(0.10), Decimal::ZERO);
        assert_eq!(rec, Recommendation::Hold);
    }

    #[test]
    fn recommendation_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&Recommendation::StrongBuy).unwrap();
        assert_eq!(json, "\"STRONG BUY\"");
        let back: Recommendation = serde_json::from_str("\"WEAK BUY\"").unwrap();
        assert_eq!(back, Recommendation::WeakBuy);
        assert!(serde_json::from_str::<Recommendation>("\"MAYBE\"").is_err());
    }

    #[test]
    fn display_matches_closed_label_set() {
        let labels: Vec<String> = [
            Recommendation::StrongBuy,
            Recommendation::Buy,
            Recommendation::WeakBuy,
            Recommendation::Avoid,
            Recommendation::Hold,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(labels, vec!["STRONG BUY", "BUY", "WEAK BUY", "AVOID", "HOLD"]);
        assert!(Recommendation::Buy.is_buy());
        assert!(!Recommendation::WeakBuy.is_buy());
    }

    // ============================================
    // Formulas
    // ============================================

    #[test]
    fn kelly_matches_formula() {
        // b = 1.5, p = 0.5, q = 0.5: (0.75 - 0.5) / 1.5 = 1/6
        let k = kelly_fraction(dec!(2.5), dec!(0.5));
        assert!((k - dec!(0.1666666)).abs() < dec!(0.00001));
    }

    #[test]
    fn kelly_is_zero_on_negative_edge() {
        assert_eq!(kelly_fraction(dec!(1.8), dec!(0.4)), Decimal::ZERO);
    }

    #[test]
    fn kelly_guards_degenerate_prices() {
        assert_eq!(kelly_fraction(dec!(1.0), dec!(0.9)), Decimal::ZERO);
        assert_eq!(kelly_fraction(Decimal::ZERO, dec!(0.9)), Decimal::ZERO);
    }

    #[test]
    fn kelly_never_negative_across_grid() {
        for price in [dec!(1.01), dec!(1.5), dec!(2), dec!(3.75), dec!(15)] {
            for p in [dec!(0), dec!(0.1), dec!(0.5), dec!(0.9), dec!(1)] {
                assert!(kelly_fraction(price, p) >= Decimal::ZERO);
            }
        }
    }

    #[test]
    fn expected_value_formula() {
        assert_eq!(expected_value(dec!(2.0), dec!(0.55)), dec!(0.10));
        assert_eq!(expected_value(dec!(2.0), dec!(0.5)), Decimal::ZERO);
    }

    #[test]
    fn confidence_needs_two_samples() {
        assert_eq!(confidence(&[]), Decimal::ZERO);
        assert_eq!(confidence(&[dec!(0.5)]), Decimal::ZERO);
    }

    #[test]
    fn identical_quotes_give_full_confidence() {
        assert_eq!(confidence(&[dec!(0.4), dec!(0.4), dec!(0.4)]), Decimal::ONE);
    }

    #[test]
    fn confidence_uses_population_std_dev() {
        // mean 0.5, population σ = 0.1 → 1 - 0.2 = 0.8
        let c = confidence(&[dec!(0.4), dec!(0.6)]);
        assert!((c - dec!(0.8)).abs() < dec!(0.0000001));
    }

    #[test]
    fn confidence_stays_in_unit_interval() {
        let c = confidence(&[dec!(0.01), dec!(0.99)]);
        assert!(c >= Decimal::ZERO && c <= Decimal::ONE);
        // σ = 1 gives 1 - 2 = -1, clamped to 0
        assert_eq!(confidence(&[dec!(0), dec!(2)]), Decimal::ZERO);
    }

    // ============================================
    // Estimator
    // ============================================

    #[test]
    fn estimate_uses_only_the_best_outcome_quotes() {
        let ev = event(vec![
            ("a", vec![("Home", dec!(2.00)), ("Away", dec!(1.80))]),
            ("b", vec![("Home", dec!(2.20)), ("Away", dec!(1.70))]),
            ("c", vec![("Home", dec!(2.10)), ("Away", dec!(1.75))]),
        ]);
        let table = MarketTable::build(&ev, MarketKind::H2h);
        let best = select_best_price(&table).unwrap();
        assert_eq!(best.bookmaker, "b");

        let va = ValueEstimator::new().estimate(&table, &best);
        assert_eq!(va.samples, 3);

        let mean = (dec!(1) / dec!(2.00) + dec!(1) / dec!(2.20) + dec!(1) / dec!(2.10)) / dec!(3);
        let p = mean * dec!(0.95);
        assert!((va.true_probability - p).abs() < dec!(0.0000001));
        assert!((va.expected_value - (dec!(2.20) * p - dec!(1))).abs() < dec!(0.0000001));
        assert!(va.kelly >= Decimal::ZERO);
        assert!(va.confidence > dec!(0.9) && va.confidence <= Decimal::ONE);
    }

    #[test]
    fn single_bookmaker_has_zero_confidence() {
        let ev = event(vec![("solo", vec![("Home", dec!(2.5)), ("Away", dec!(1.5))])]);
        let table = MarketTable::build(&ev, MarketKind::H2h);
        let best = select_best_price(&table).unwrap();

        let va = ValueEstimator::new().estimate(&table, &best);
        assert_eq!(va.samples, 1);
        assert_eq!(va.confidence, Decimal::ZERO);
        // p = 0.4 * 0.95 = 0.38, EV = 2.5 * 0.38 - 1 = -0.05 (not below it)
        assert_eq!(va.expected_value, dec!(-0.05));
        assert_eq!(va.kelly, Decimal::ZERO);
        assert_eq!(va.recommendation, Recommendation::Hold);
    }

    #[test]
    fn no_matching_quotes_falls_back_to_best_price() {
        let ev = event(vec![("a", vec![("Home", dec!(2.0)), ("Away", dec!(1.9))])]);
        let table = MarketTable::build(&ev, MarketKind::H2h);
        let orphan = best("Draw", "elsewhere", dec!(4.0));

        let va = ValueEstimator::new().estimate(&table, &orphan);
        assert_eq!(va.samples, 0);
        assert_eq!(va.confidence, Decimal::ZERO);
        assert_eq!(va.true_probability, dec!(0.25) * dec!(0.95));
        assert_eq!(va.expected_value, dec!(4.0) * dec!(0.2375) - dec!(1));
    }

    #[test]
    fn outlier_price_is_a_strong_buy() {
        let ev = event(vec![
            ("a", vec![("Home", dec!(2.00)), ("Away", dec!(1.85))]),
            ("b", vec![("Home", dec!(2.02)), ("Away", dec!(1.84))]),
            ("c", vec![("Home", dec!(2.01)), ("Away", dec!(1.86))]),
            ("d", vec![("Home", dec!(2.45)), ("Away", dec!(1.50))]),
        ]);
        let table = MarketTable::build(&ev, MarketKind::H2h);
        let best = select_best_price(&table).unwrap();
        assert_eq!(best.bookmaker, "d");

        let va = ValueEstimator::new().estimate(&table, &best);
        // consensus ≈ 0.4752, p ≈ 0.4514, EV ≈ 0.106, kelly ≈ 0.073, σ ≈ 0.039
        assert!(va.expected_value > dec!(0.10));
        assert!(va.kelly > dec!(0.05));
        assert!(va.confidence > dec!(0.70));
        assert_eq!(va.recommendation, Recommendation::StrongBuy);
    }

    #[test]
    fn vig_discount_is_configurable() {
        let estimator = ValueEstimator::new().with_vig_discount(dec!(1));
        assert_eq!(estimator.vig_discount(), dec!(1));

        let ev = event(vec![("a", vec![("Home", dec!(2.0)), ("Away", dec!(1.9))])]);
        let table = MarketTable::build(&ev, MarketKind::H2h);
        let best = select_best_price(&table).unwrap();
        let va = estimator.estimate(&table, &best);
        assert_eq!(va.expected_value, Decimal::ZERO);
    }
}
