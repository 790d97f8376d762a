use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Result of one successful odds request: the raw event records, untouched
/// until the summary consults them, plus whatever quota headers came back.
#[derive(Debug, Clone)]
pub struct OddsFetch {
    pub events: Vec<Value>,
    pub quota: ApiQuota,
}

/// API usage quota as reported in response headers. Each header is
/// independently optional and kept verbatim for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiQuota {
    pub requests_used: Option<String>,
    pub requests_remaining: Option<String>,
}

impl ApiQuota {
    /// Remaining requests as a count. The provider sometimes sends floats
    /// (e.g. "14527.0").
    pub fn remaining(&self) -> Option<u64> {
        self.requests_remaining.as_deref().and_then(parse_quota_value)
    }
}

fn parse_quota_value(raw: &str) -> Option<u64> {
    raw.trim().parse::<f64>().ok().filter(|v| *v >= 0.0).map(|v| v as u64)
}

// the-odds-api.com v4 response. Nested collections stay as raw JSON so that
// only the parts actually consulted are ever deserialized: a malformed second
// bookmaker or an unrelated market cannot abort the run.

#[derive(Debug, Deserialize)]
pub struct EventRecord {
    pub away_team: String,
    pub home_team: String,
    #[serde(deserialize_with = "provider_timestamp")]
    pub commence_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub bookmakers: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct BookmakerRecord {
    pub title: String,
    #[serde(deserialize_with = "provider_timestamp")]
    pub last_update: DateTime<FixedOffset>,
    pub markets: Vec<Value>,
}

/// Just enough of a market entry to decide whether it is the one wanted.
#[derive(Debug, Deserialize)]
pub struct MarketKey {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct MarketRecord {
    pub outcomes: Vec<OutcomeRecord>,
}

#[derive(Debug, Deserialize)]
pub struct OutcomeRecord {
    pub name: String,
    #[serde(deserialize_with = "american_price")]
    pub price: Decimal,
}

/// RFC 3339 with an offset, or an ISO timestamp without one. Offset-less
/// times are taken as UTC, which keeps the wall clock exactly as supplied.
fn provider_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    if let Ok(ts) = text.parse::<DateTime<FixedOffset>>() {
        return Ok(ts);
    }
    NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|e| serde::de::Error::custom(format!("timestamp {text:?}: {e}")))
}

/// Accept only JSON numbers. serde_json holds fractional numbers as f64 and
/// prints them back in shortest form, so typical odds (`-110.5`) come through
/// with their written digits; the arithmetic from there on is base-10.
/// A number outside `Decimal`'s range (`1e30`, more than 28 fractional
/// digits) is a parse error for the whole event, not an unavailable quote.
fn american_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| serde::de::Error::custom(format!("price {text} is not a decimal: {e}")))
}
