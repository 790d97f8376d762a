use super::types::*;
use super::HttpTransport;
use crate::config::OddsFeedConfig;
use crate::error::OddsError;
use anyhow::Context;
use reqwest::header::HeaderMap;
use reqwest::Url;
use serde_json::Value;

pub struct TheOddsApi<T: HttpTransport> {
    transport: T,
    api_key: String,
    base_url: String,
    sport: String,
    regions: String,
    markets: String,
    odds_format: String,
}

/// Map our internal sport key to the-odds-api.com sport key.
pub fn api_sport_key(sport: &str) -> &str {
    match sport {
        "basketball" => "basketball_nba",
        "american-football" => "americanfootball_nfl",
        "baseball" => "baseball_mlb",
        "ice-hockey" => "icehockey_nhl",
        "college-basketball" => "basketball_ncaab",
        "college-basketball-womens" => "basketball_wncaab",
        "soccer-epl" => "soccer_epl",
        "mma" => "mma_mixed_martial_arts",
        _ => sport,
    }
}

/// Raw value of an optional quota header.
fn quota_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
}

impl<T: HttpTransport> TheOddsApi<T> {
    pub fn new(transport: T, api_key: String, config: &OddsFeedConfig) -> Self {
        Self {
            transport,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sport: api_sport_key(&config.sport).to_string(),
            regions: config.regions.clone(),
            markets: config.markets.clone(),
            odds_format: config.odds_format.clone(),
        }
    }

    fn request_url(&self, api_key: &str) -> anyhow::Result<Url> {
        let base = format!("{}/v4/sports/{}/odds/", self.base_url, self.sport);
        Url::parse_with_params(
            &base,
            &[
                ("apiKey", api_key),
                ("regions", self.regions.as_str()),
                ("markets", self.markets.as_str()),
                ("oddsFormat", self.odds_format.as_str()),
            ],
        )
        .with_context(|| format!("invalid odds endpoint: {}", base))
    }

    /// The request URL with the key masked, for logs.
    fn redacted_url(&self) -> Option<String> {
        self.request_url("REDACTED").ok().map(String::from)
    }

    /// Perform the single odds request. Non-success statuses are returned
    /// with their body unparsed.
    pub async fn fetch_odds(&self) -> Result<OddsFetch, OddsError> {
        let url = self.request_url(&self.api_key).map_err(OddsError::Transport)?;
        if let Some(redacted) = self.redacted_url() {
            tracing::debug!(url = %redacted, "requesting odds");
        }

        let resp = self.transport.get(url.as_str()).await
            .map_err(OddsError::Transport)?;

        let status = resp.status;
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "odds request rejected");
            return Err(OddsError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body: resp.body,
            });
        }

        let quota = ApiQuota {
            requests_used: quota_header(&resp.headers, "x-requests-used"),
            requests_remaining: quota_header(&resp.headers, "x-requests-remaining"),
        };

        let document: Value = serde_json::from_str(&resp.body)
            .map_err(OddsError::InvalidJson)?;
        let events = match document {
            Value::Array(events) => events,
            other => {
                return Err(OddsError::UnexpectedShape {
                    found: OddsError::json_kind(&other),
                })
            }
        };

        tracing::debug!(sport = %self.sport, count = events.len(), "received events");
        Ok(OddsFetch { events, quota })
    }
}
