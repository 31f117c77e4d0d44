//! Core types for sportsbook odds analysis.
//!
//! - [`types`]: events, bookmakers, markets and outcomes in decimal odds
//! - [`feed`]: decoding of the odds provider's JSON documents
//! - [`config`] / [`config_loader`]: layered configuration (defaults, TOML, env)

pub mod config;
pub mod config_loader;
pub mod error;
pub mod feed;
pub mod types;

pub use config::{AnalysisConfig, AppConfig, LoggingConfig, ReportConfig};
pub use config_loader::ConfigLoader;
pub use error::OddsFeedError;
pub use feed::{find_event, parse_events, parse_snapshots};
pub use types::{
    implied_probability, BookmakerOdds, Event, Market, MarketKind, OddsSnapshot, Outcome,
};
