//! Odds comparison, arbitrage and value analysis for sportsbook markets.
//!
//! Each market of an event runs through the same pipeline:
//!
//! ```text
//! Event ──► MarketTable ──► best price ──► arbitrage ──► value / Kelly ──► AnalysisResult
//! ```
//!
//! For example, two books pricing a tennis match in opposite directions:
//!
//! ```text
//! book A:  Player 1 @ 2.10   Player 2 @ 1.70
//! book B:  Player 1 @ 1.70   Player 2 @ 2.10
//!
//! best price:   Player 1 @ 2.10 (A)
//! arbitrage:    1/2.10 + 1/2.10 = 0.952 < 1
//!               stake $50.00 on each side, $4.76 guaranteed on $100
//! ```
//!
//! # Modules
//!
//! - [`indexer`]: per-market view of every bookmaker quoting an event
//! - [`best_price`]: highest price across bookmakers
//! - [`arbitrage`]: guaranteed-profit stake splits
//! - [`value`]: consensus probability, expected value, Kelly and recommendation
//! - [`orchestrator`]: runs the pipeline over every market of an event
//! - [`report`]: plain-text reports over the results
//!
//! # Example
//!
//! ```ignore
//! use bet_edge_analysis::{Analyzer, ReportFormatter};
//! use bet_edge_core::parse_events;
//!
//! let events = parse_events(&feed_json)?;
//! let analyzer = Analyzer::new();
//! for event in &events {
//!     let results = analyzer.analyze_event(event);
//!     println!("{}", ReportFormatter::compare_odds(event, &results));
//! }
//! ```

pub mod arbitrage;
pub mod best_price;
pub mod error;
pub mod indexer;
pub mod orchestrator;
pub mod report;
pub mod value;

pub use arbitrage::{ArbitrageDetector, ArbitrageLeg, ArbitrageOpportunity};
pub use best_price::{select_best_price, BestOdds};
pub use error::{AnalysisError, Result};
pub use indexer::{MarketEntry, MarketTable};
pub use orchestrator::{AnalysisResult, Analyzer, EventAnalysis, MarketFault};
pub use report::ReportFormatter;
pub use value::{
    confidence, expected_value, kelly_fraction, Recommendation, ValueAnalysis, ValueEstimator,
};
