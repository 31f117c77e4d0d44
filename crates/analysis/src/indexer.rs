//! Market indexing: which bookmakers quote a given market for an event.

use bet_edge_core::{Event, Market, MarketKind, Outcome};

/// One bookmaker's quote for the indexed market.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketEntry<'a> {
    pub bookmaker: &'a str,
    pub market: &'a Market,
}

/// Bookmaker key to market, for one (event, market kind) pair.
///
/// Entries keep the order in which bookmakers appear in the event's
/// snapshots, so "first seen" is well defined for tie-breaking. An empty
/// table means no bookmaker covers the market.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketTable<'a> {
    kind: MarketKind,
    entries: Vec<MarketEntry<'a>>,
}

impl<'a> MarketTable<'a> {
    /// Indexes `kind` across every bookmaker snapshot of `event`.
    ///
    /// A bookmaker repeated in a later snapshot replaces its earlier market
    /// but keeps its first position.
    #[must_use]
    pub fn build(event: &'a Event, kind: MarketKind) -> Self {
        let mut entries: Vec<MarketEntry<'a>> = Vec::new();

        for bookmaker in event.bookmakers() {
            let Some(market) = bookmaker.market(kind.key()) else {
                continue;
            };

            match entries.iter_mut().find(|e| e.bookmaker == bookmaker.key) {
                Some(existing) => existing.market = market,
                None => entries.push(MarketEntry {
                    bookmaker: &bookmaker.key,
                    market,
                }),
            }
        }

        Self { kind, entries }
    }

    #[must_use]
    pub fn kind(&self) -> MarketKind {
        self.kind
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn entries(&self) -> &[MarketEntry<'a>] {
        &self.entries
    }

    /// Market quoted by `bookmaker`, if any.
    #[must_use]
    pub fn get(&self, bookmaker: &str) -> Option<&'a Market> {
        self.entries
            .iter()
            .find(|e| e.bookmaker == bookmaker)
            .map(|e| e.market)
    }

    /// Every (bookmaker, outcome) pair in table order.
    pub fn quotes(&self) -> impl Iterator<Item = (&'a str, &'a Outcome)> + '_ {
        self.entries
            .iter()
            .flat_map(|e| e.market.outcomes.iter().map(move |o| (e.bookmaker, o)))
    }

    /// Like [`quotes`](Self::quotes) but skipping malformed prices (at or below 1.0).
    pub fn priced_quotes(&self) -> impl Iterator<Item = (&'a str, &'a Outcome)> + '_ {
        self.quotes().filter(|(_, outcome)| outcome.has_valid_price())
    }
}
