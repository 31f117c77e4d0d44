#![allow(clippy::format_push_string)]

//! Plain-text reports over analysis results.

use chrono::SecondsFormat;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::orchestrator::AnalysisResult;
use bet_edge_core::{Event, ReportConfig};

const RULE: &str = "═══════════════════════════════════════════════════════════════\n";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────\n";

fn pct(value: Decimal) -> Decimal {
    value * dec!(100)
}

pub struct ReportFormatter;

impl ReportFormatter {
    /// Lists at most `limit` events with their start time and id.
    #[must_use]
    pub fn events(sport: &str, events: &[Event], limit: usize) -> String {
        if events.is_empty() || limit == 0 {
            return format!("No upcoming events in {sport}\n");
        }

        let mut output = format!("Upcoming events in {sport}:\n");
        for event in events.iter().take(limit) {
            output.push_str(&format!(
                "• {} - {} (ID: {})\n",
                event.matchup(),
                event.start_time.to_rfc3339_opts(SecondsFormat::Secs, true),
                event.id
            ));
        }
        output
    }

    /// One line per market: best price and recommendation.
    #[must_use]
    pub fn compare_odds(event: &Event, results: &[AnalysisResult]) -> String {
        let mut output = format!("Odds comparison analysis for {}:\n", event.id);
        if results.is_empty() {
            output.push_str("No markets with odds available\n");
        }
        for result in results {
            output.push_str(&format!(
                "Market: {}, Best: {} @ {} ({}), Recommendation: {}\n",
                result.market,
                result.best_odds.outcome,
                result.best_odds.price,
                result.best_odds.bookmaker,
                result.value.recommendation
            ));
        }
        output
    }

    /// Every guaranteed, profitable arbitrage across the analyzed events.
    #[must_use]
    pub fn find_arbitrage(sport: &str, analyzed: &[(&Event, Vec<AnalysisResult>)]) -> String {
        let lines: Vec<String> = analyzed
            .iter()
            .flat_map(|(event, results)| results.iter().map(move |r| (*event, r)))
            .filter_map(|(event, result)| {
                let arb = result.arbitrage.as_ref()?;
                (arb.guaranteed && arb.profit > Decimal::ZERO).then(|| {
                    format!(
                        "Event: {}, Market: {}, Profit: ${:.2} ({:.2}% on ${:.2})",
                        event.matchup(),
                        result.market,
                        arb.profit,
                        arb.roi_pct(),
                        arb.total_stake
                    )
                })
            })
            .collect();

        if lines.is_empty() {
            return format!("No arbitrage opportunities found for {sport}\n");
        }

        let mut output = format!("Found {} arbitrage opportunities:\n", lines.len());
        for line in lines {
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    /// BUY and STRONG BUY results at or above the configured confidence.
    #[must_use]
    pub fn best_bets(
        sport: &str,
        analyzed: &[(&Event, Vec<AnalysisResult>)],
        config: &ReportConfig,
    ) -> String {
        let picks: Vec<String> = analyzed
            .iter()
            .take(config.max_events)
            .flat_map(|(event, results)| results.iter().map(move |r| (*event, r)))
            .filter(|(_, result)| {
                result.value.confidence >= config.min_confidence
                    && result.value.recommendation.is_buy()
            })
            .take(config.max_recommendations)
            .map(|(event, result)| {
                let mut block = format!("{}\n", event.matchup());
                block.push_str(&format!("   Market: {}\n", result.market));
                block.push_str(&format!(
                    "   Best: {} @ {} ({})\n",
                    result.best_odds.outcome, result.best_odds.price, result.best_odds.bookmaker
                ));
                block.push_str(&format!(
                    "   Recommendation: {}\n",
                    result.value.recommendation
                ));
                block.push_str(&format!(
                    "   Expected Value: {:.2}%\n",
                    pct(result.value.expected_value)
                ));
                block.push_str(&format!("   Kelly: {:.2}%\n", pct(result.value.kelly)));
                block.push_str(&format!(
                    "   Confidence: {:.1}%\n",
                    pct(result.value.confidence)
                ));
                block
            })
            .collect();

        if picks.is_empty() {
            return format!(
                "No high-confidence betting opportunities found in {sport} with the specified criteria.\n"
            );
        }

        let mut output = format!(
            "Best betting opportunities in {} (confidence >= {:.0}%):\n\n",
            sport,
            pct(config.min_confidence).trunc()
        );
        output.push_str(&picks.join("\n"));
        output
    }

    /// Detailed per-market breakdown of one event.
    #[must_use]
    pub fn market_analysis(event: &Event, results: &[AnalysisResult]) -> String {
        let mut output = String::new();

        output.push_str(RULE);
        output.push_str("                  DETAILED MARKET ANALYSIS                     \n");
        output.push_str(RULE);
        output.push_str(&format!("Event:      {}\n", event.matchup()));
        output.push_str(&format!("League:     {}\n", event.league));
        output.push_str(&format!(
            "Start Time: {}\n",
            event.start_time.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push('\n');

        if results.is_empty() {
            output.push_str("No markets with odds available\n");
            return output;
        }

        for result in results {
            output.push_str(&format!("{} MARKET\n", result.market.key().to_uppercase()));
            output.push_str(THIN_RULE);
            output.push_str(&format!(
                "Best Bet:       {} @ {} ({})\n",
                result.best_odds.outcome, result.best_odds.price, result.best_odds.bookmaker
            ));
            output.push_str(&format!(
                "Recommendation: {}\n",
                result.value.recommendation
            ));
            output.push_str(&format!(
                "Expected Value: {:.2}%\n",
                pct(result.value.expected_value)
            ));
            output.push_str(&format!("Kelly Stake:    {:.2}%\n", pct(result.value.kelly)));
            output.push_str(&format!(
                "Confidence:     {:.1}%\n",
                pct(result.value.confidence)
            ));

            if let Some(arb) = result.arbitrage.as_ref().filter(|arb| arb.guaranteed) {
                output.push_str(&format!(
                    "ARBITRAGE OPPORTUNITY: ${:.2} profit guaranteed on ${:.2}\n",
                    arb.profit, arb.total_stake
                ));
                for leg in &arb.legs {
                    output.push_str(&format!(
                        "  Stake ${:.2} on {} @ {} ({})\n",
                        leg.stake, leg.outcome, leg.price, leg.bookmaker
                    ));
                }
            }
            output.push('\n');
        }

        output
    }
}
