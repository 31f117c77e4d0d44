use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use bet_edge_core::config_loader::DEFAULT_CONFIG_PATH;
use bet_edge_core::ConfigLoader;
use commands::{AnalyzeArgs, ArbitrageArgs, BestBetsArgs, CompareArgs, EventsArgs};

#[derive(Parser)]
#[command(name = "bet-edge")]
#[command(about = "Sportsbook odds comparison, arbitrage and value analysis", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the upcoming events in a feed
    Events(EventsArgs),
    /// Compare bookmaker odds for one event
    Compare(CompareArgs),
    /// Find guaranteed-profit arbitrage across a feed
    Arbitrage(ArbitrageArgs),
    /// List high-confidence value bets across a feed
    BestBets(BestBetsArgs),
    /// Detailed market analysis for one or every event
    Analyze(AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_from(&cli.config)?;

    // Reports go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(config = %cli.config, "Configuration ready");

    match cli.command {
        Commands::Events(args) => commands::run_events(args, &config),
        Commands::Compare(args) => commands::run_compare(args, &config),
        Commands::Arbitrage(args) => commands::run_arbitrage(args, &config),
        Commands::BestBets(args) => commands::run_best_bets(args, &config),
        Commands::Analyze(args) => commands::run_analyze(args, &config),
    }
}
