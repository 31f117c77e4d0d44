//! Runs the per-market pipeline over an event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::arbitrage::{ArbitrageDetector, ArbitrageOpportunity};
use crate::best_price::{select_best_price, BestOdds};
use crate::error::{AnalysisError, Result};
use crate::indexer::MarketTable;
use crate::value::{ValueAnalysis, ValueEstimator};
use bet_edge_core::{AnalysisConfig, Event, MarketKind};

/// Analysis of one market of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub event_id: String,
    pub market: MarketKind,
    pub best_odds: BestOdds,
    pub arbitrage: Option<ArbitrageOpportunity>,
    pub value: ValueAnalysis,
    pub timestamp: DateTime<Utc>,
}

/// A market that bookmakers listed but that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketFault {
    pub event_id: String,
    pub market: MarketKind,
    pub reason: String,
}

/// Every result for one event, plus the markets that faulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAnalysis {
    pub results: Vec<AnalysisResult>,
    pub faults: Vec<MarketFault>,
}

/// Analyzes events market by market.
///
/// Holds configuration only; every call is independent, so a shared
/// `Analyzer` can be used from several threads at once.
#[derive(Debug, Clone)]
pub struct Analyzer {
    arbitrage: ArbitrageDetector,
    value: ValueEstimator,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }

    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            arbitrage: ArbitrageDetector::from_config(config),
            value: ValueEstimator::from_config(config),
        }
    }

    #[must_use]
    pub fn arbitrage_detector(&self) -> &ArbitrageDetector {
        &self.arbitrage
    }

    #[must_use]
    pub fn value_estimator(&self) -> &ValueEstimator {
        &self.value
    }

    /// Analyzes a single market.
    ///
    /// Returns `Ok(None)` when no bookmaker offers the market.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NoPricedOutcome`] when the market is listed
    /// but carries no price above 1.0.
    pub fn analyze_market(
        &self,
        event: &Event,
        kind: MarketKind,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<AnalysisResult>> {
        let table = MarketTable::build(event, kind);
        if table.is_empty() {
            debug!(event_id = %event.id, market = %kind, "No odds for market");
            return Ok(None);
        }

        let best_odds = select_best_price(&table)?;
        let arbitrage = self.arbitrage.detect(&table);
        let value = self.value.estimate(&table, &best_odds);

        debug!(
            event_id = %event.id,
            market = %kind,
            bookmakers = table.len(),
            best_outcome = %best_odds.outcome,
            best_price = %best_odds.price,
            best_bookmaker = %best_odds.bookmaker,
            recommendation = %value.recommendation,
            arbitrage = arbitrage.is_some(),
            "Market analyzed"
        );

        Ok(Some(AnalysisResult {
            event_id: event.id.clone(),
            market: kind,
            best_odds,
            arbitrage,
            value,
            timestamp,
        }))
    }

    /// Analyzes every market kind of `event`, stamping results with `timestamp`.
    ///
    /// Results follow [`MarketKind::ALL`] order. A faulted market is logged
    /// and recorded; the remaining markets are still analyzed.
    #[must_use]
    pub fn analyze_event_detailed_at(&self, event: &Event, timestamp: DateTime<Utc>) -> EventAnalysis {
        info!(event_id = %event.id, matchup = %event.matchup(), "Analyzing event");

        MarketKind::ALL
            .into_iter()
            .fold(EventAnalysis::default(), |mut analysis, kind| {
                match self.analyze_market(event, kind, timestamp) {
                    Ok(Some(result)) => analysis.results.push(result),
                    Ok(None) => {}
                    Err(err @ AnalysisError::NoPricedOutcome { .. }) => {
                        warn!(event_id = %event.id, market = %kind, error = %err, "Skipping market");
                        analysis.faults.push(MarketFault {
                            event_id: event.id.clone(),
                            market: kind,
                            reason: err.to_string(),
                        });
                    }
                }
                analysis
            })
    }

    /// [`analyze_event_detailed_at`](Self::analyze_event_detailed_at) stamped with the current time.
    #[must_use]
    pub fn analyze_event_detailed(&self, event: &Event) -> EventAnalysis {
        self.analyze_event_detailed_at(event, Utc::now())
    }

    /// Ordered results for `event`. Markets without coverage or without any
    /// valid price produce no result; an event matching no market yields an
    /// empty list.
    #[must_use]
    pub fn analyze_event(&self, event: &Event) -> Vec<AnalysisResult> {
        self.analyze_event_detailed(event).results
    }

    /// Like [`analyze_event`](Self::analyze_event) with an explicit timestamp.
    #[must_use]
    pub fn analyze_event_at(&self, event: &Event, timestamp: DateTime<Utc>) -> Vec<AnalysisResult> {
        self.analyze_event_detailed_at(event, timestamp).results
    }

    /// Analyzes events in order, pairing each with its results.
    #[must_use]
    pub fn analyze_events<'a>(&self, events: &'a [Event]) -> Vec<(&'a Event, Vec<AnalysisResult>)> {
        let timestamp = Utc::now();
        events
            .iter()
            .map(|event| (event, self.analyze_event_at(event, timestamp)))
            .collect()
    }
}
