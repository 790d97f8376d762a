// Console rendering. All number and time formatting goes through
// OutputFormat so output does not depend on the host locale.

use crate::config::DisplayConfig;
use crate::engine::summary::{BookOutcome, EventSummary};
use crate::feed::types::ApiQuota;
use chrono::{DateTime, FixedOffset};
use rust_decimal::{Decimal, RoundingStrategy};

pub const KEY_OK: &str = "Api key is working";
pub const DONE: &str = "Done";

#[derive(Debug, Clone, PartialEq)]
pub struct OutputFormat {
    pub timestamp_format: String,
    pub name_width: usize,
    pub decimal_places: Option<u32>,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for OutputFormat {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            timestamp_format: display.timestamp_format.clone(),
            name_width: display.name_width,
            decimal_places: display.decimal_places,
        }
    }
}

impl OutputFormat {
    /// Wall-clock time as supplied by the provider; no zone conversion.
    pub fn timestamp(&self, ts: &DateTime<FixedOffset>) -> String {
        ts.format(&self.timestamp_format).to_string()
    }

    pub fn odds(&self, decimal: Decimal) -> String {
        match self.decimal_places {
            Some(dp) => {
                let mut rounded = decimal.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
                rounded.rescale(dp);
                rounded.to_string()
            }
            None => decimal.normalize().to_string(),
        }
    }

    /// Lines for one event, led by a blank separator line.
    pub fn event_lines(&self, summary: &EventSummary) -> Vec<String> {
        let mut lines = vec![
            String::new(),
            format!(
                "{} vs {} at {}",
                summary.away_team,
                summary.home_team,
                self.timestamp(&summary.commence_time)
            ),
        ];

        match &summary.book {
            BookOutcome::NoBookmakers => {
                lines.push("No bookmakers available for this game".to_string());
            }
            BookOutcome::NoMarket { bookmaker } => {
                lines.push(format!("{} has no h2h market", bookmaker));
            }
            BookOutcome::Priced(book) => {
                lines.push(format!(
                    "Book: {} (updated {})",
                    book.title,
                    self.timestamp(&book.last_update)
                ));
                for quote in &book.quotes {
                    let odds = match quote.decimal_odds {
                        Some(d) => self.odds(d),
                        None => "unavailable".to_string(),
                    };
                    lines.push(format!(
                        "{:<width$} odds: {}",
                        quote.team_name,
                        odds,
                        width = self.name_width
                    ));
                }
            }
        }

        lines
    }
}

/// "Used: N" / "Remaining: N", each only if the header was present.
pub fn quota_lines(quota: &ApiQuota) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(used) = &quota.requests_used {
        lines.push(format!("Used: {}", used));
    }
    if let Some(remaining) = &quota.requests_remaining {
        lines.push(format!("Remaining: {}", remaining));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::summary::{BookmakerQuote, OddsQuote};
    use rust_decimal_macros::dec;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_odds_fixed_places() {
        let fmt = OutputFormat::default();
        assert_eq!(fmt.odds(dec!(2.5)), "2.50");
        assert_eq!(fmt.odds(dec!(1)), "1.00");
        assert_eq!(fmt.odds(dec!(1.905)), "1.91");
        assert_eq!(fmt.odds(dec!(1.9090909090909090909090909091)), "1.91");
    }

    #[test]
    fn test_odds_full_precision() {
        let fmt = OutputFormat { decimal_places: None, ..OutputFormat::default() };
        assert_eq!(fmt.odds(dec!(2.50)), "2.5");
        assert_eq!(fmt.odds(dec!(101)), "101");
    }

    #[test]
    fn test_timestamp_keeps_supplied_offset() {
        let fmt = OutputFormat::default();
        assert_eq!(fmt.timestamp(&ts("2026-10-21T23:30:59Z")), "2026-10-21 23:30");
        assert_eq!(fmt.timestamp(&ts("2026-10-21T19:30:00-04:00")), "2026-10-21 19:30");
    }

    #[test]
    fn test_no_market_line() {
        let summary = EventSummary {
            away_team: "Denver Nuggets".to_string(),
            home_team: "Utah Jazz".to_string(),
            commence_time: ts("2026-10-22T02:00:00Z"),
            book: BookOutcome::NoMarket { bookmaker: "Bovada".to_string() },
        };
        let lines = OutputFormat::default().event_lines(&summary);
        assert_eq!(lines[1], "Denver Nuggets vs Utah Jazz at 2026-10-22 02:00");
        assert_eq!(lines[2], "Bovada has no h2h market");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_unavailable_odds_and_width() {
        let summary = EventSummary {
            away_team: "A".to_string(),
            home_team: "B".to_string(),
            commence_time: ts("2026-10-22T02:00:00Z"),
            book: BookOutcome::Priced(BookmakerQuote {
                title: "BetRivers".to_string(),
                last_update: ts("2026-10-21T20:15:00Z"),
                quotes: vec![OddsQuote {
                    team_name: "A".to_string(),
                    american_price: dec!(-1),
                    decimal_odds: None,
                }],
            }),
        };
        let fmt = OutputFormat { name_width: 4, ..OutputFormat::default() };
        let lines = fmt.event_lines(&summary);
        assert_eq!(lines[3], "A    odds: unavailable");
    }

    #[test]
    fn test_quota_lines() {
        let quota = ApiQuota {
            requests_used: None,
            requests_remaining: Some("499".to_string()),
        };
        assert_eq!(quota_lines(&quota), vec!["Remaining: 499".to_string()]);
        assert!(quota_lines(&ApiQuota::default()).is_empty());
    }
}
