//! CLI commands for odds comparison and arbitrage analysis.

pub mod analyze;
pub mod arbitrage;
pub mod best_bets;
pub mod compare;
pub mod events;
pub mod input;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use arbitrage::{run_arbitrage, ArbitrageArgs};
pub use best_bets::{run_best_bets, BestBetsArgs};
pub use compare::{run_compare, CompareArgs};
pub use events::{run_events, EventsArgs};
