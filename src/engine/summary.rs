//! Walks the raw event records and reduces each one to an [`EventSummary`].
//!
//! Every level is deserialized only when it is consulted: the event header
//! always, the first bookmaker when there is one, market keys until the
//! head-to-head market is found, and that market's outcomes. Missing
//! bookmakers or markets become notices; a missing or malformed required
//! field is fatal.

use super::odds::american_to_decimal;
use crate::error::OddsError;
use crate::feed::types::{BookmakerRecord, EventRecord, MarketKey, MarketRecord};
use crate::render::OutputFormat;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// Provider key of the head-to-head (moneyline) market.
pub const H2H_MARKET: &str = "h2h";

/// How `max_events` is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapPolicy {
    /// Show at most `max_events`.
    #[default]
    Strict,
    /// Show `max_events + 1`, matching a post-increment `shown++ > max` check.
    Inclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCap {
    max_events: usize,
    policy: CapPolicy,
}

impl DisplayCap {
    pub fn new(max_events: usize, policy: CapPolicy) -> Self {
        Self { max_events, policy }
    }

    /// Number of events that will actually be shown.
    pub fn limit(&self) -> usize {
        match self.policy {
            CapPolicy::Strict => self.max_events,
            CapPolicy::Inclusive => self.max_events.saturating_add(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub away_team: String,
    pub home_team: String,
    pub commence_time: DateTime<FixedOffset>,
    pub book: BookOutcome,
}

/// What the primary bookmaker had to offer for an event.
#[derive(Debug, Clone, PartialEq)]
pub enum BookOutcome {
    NoBookmakers,
    NoMarket { bookmaker: String },
    Priced(BookmakerQuote),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookmakerQuote {
    pub title: String,
    pub last_update: DateTime<FixedOffset>,
    pub quotes: Vec<OddsQuote>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OddsQuote {
    pub team_name: String,
    pub american_price: Decimal,
    /// `None` if the conversion overflowed.
    pub decimal_odds: Option<Decimal>,
}

/// Only the first listed bookmaker is ever consulted.
pub fn select_primary_bookmaker(bookmakers: &[Value]) -> Option<&Value> {
    bookmakers.first()
}

/// First market whose `key` matches, in listed order.
pub fn find_market<'a>(markets: &'a [Value], key: &str) -> Result<Option<&'a Value>, serde_json::Error> {
    for market in markets {
        if MarketKey::deserialize(market)?.key == key {
            return Ok(Some(market));
        }
    }
    Ok(None)
}

/// Reduce one raw event record to its summary.
pub fn summarize_event(raw: &Value) -> Result<EventSummary, serde_json::Error> {
    let event = EventRecord::deserialize(raw)?;

    let primary = event
        .bookmakers
        .as_deref()
        .and_then(select_primary_bookmaker);

    let book = match primary {
        None => {
            tracing::debug!(away = %event.away_team, home = %event.home_team, "no bookmakers listed");
            BookOutcome::NoBookmakers
        }
        Some(raw_book) => summarize_bookmaker(raw_book)?,
    };

    Ok(EventSummary {
        away_team: event.away_team,
        home_team: event.home_team,
        commence_time: event.commence_time,
        book,
    })
}

fn summarize_bookmaker(raw: &Value) -> Result<BookOutcome, serde_json::Error> {
    let bookmaker = BookmakerRecord::deserialize(raw)?;

    let Some(raw_market) = find_market(&bookmaker.markets, H2H_MARKET)? else {
        tracing::debug!(bookmaker = %bookmaker.title, "no h2h market");
        return Ok(BookOutcome::NoMarket { bookmaker: bookmaker.title });
    };
    let market = MarketRecord::deserialize(raw_market)?;

    let quotes = market
        .outcomes
        .into_iter()
        .map(|o| {
            let decimal_odds = american_to_decimal(o.price);
            if decimal_odds.is_none() {
                tracing::warn!(team = %o.name, price = %o.price, "decimal odds out of range");
            }
            OddsQuote {
                team_name: o.name,
                american_price: o.price,
                decimal_odds,
            }
        })
        .collect();

    Ok(BookOutcome::Priced(BookmakerQuote {
        title: bookmaker.title,
        last_update: bookmaker.last_update,
        quotes,
    }))
}

/// Lazily summarize events in order, stopping at the cap. Each item is
/// produced only when pulled, so earlier events can be shown before a
/// malformed later one ends the run.
pub fn summaries(events: &[Value], cap: DisplayCap) -> impl Iterator<Item = Result<EventSummary, OddsError>> + '_ {
    events
        .iter()
        .take(cap.limit())
        .enumerate()
        .map(|(index, raw)| {
            summarize_event(raw).map_err(|source| OddsError::MalformedEvent { index, source })
        })
}

pub fn extract_summaries(events: &[Value], cap: DisplayCap) -> Result<Vec<EventSummary>, OddsError> {
    summaries(events, cap).collect()
}

/// Summarize and render every shown event into console lines.
pub fn summarize(events: &[Value], cap: DisplayCap, format: &OutputFormat) -> Result<Vec<String>, OddsError> {
    let mut lines = Vec::new();
    for summary in summaries(events, cap) {
        lines.extend(format.event_lines(&summary?));
    }
    Ok(lines)
}
