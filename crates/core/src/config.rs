use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

/// Tunable constants of the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Multiplier applied to the consensus implied probability to strip the
    /// bookmaker margin. A fixed discount, not derived from the market.
    pub vig_discount: Decimal,
    /// Total amount split across the legs of an arbitrage.
    pub arbitrage_total_stake: Decimal,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            vig_discount: Decimal::new(95, 2),          // 0.95
            arbitrage_total_stake: Decimal::new(100, 0), // $100
        }
    }
}

/// Filters and limits for the best-bets and event listing reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Minimum confidence for a result to count as a best bet.
    pub min_confidence: Decimal,
    /// Maximum number of events scanned per report.
    pub max_events: usize,
    /// Maximum number of recommendations shown.
    pub max_recommendations: usize,
    /// Maximum number of events in the upcoming-events listing.
    pub max_listed_events: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_confidence: Decimal::new(6, 1), // 0.6
            max_events: 20,
            max_recommendations: 10,
            max_listed_events: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
