// Key check -> one fetch -> per-event summary, written as it goes.

use crate::config::{Config, ODDS_API_KEY_VAR};
use crate::engine::summary::summaries;
use crate::error::OddsError;
use crate::feed::the_odds_api::TheOddsApi;
use crate::feed::HttpTransport;
use crate::render::{quota_lines, OutputFormat, DONE, KEY_OK};
use anyhow::Result;
use std::io::Write;

/// Run once. Without a key nothing is requested. Events are written as they
/// are summarized, so a malformed event stops the run after the ones before
/// it have been shown.
pub async fn run<T, W>(config: &Config, api_key: Option<String>, transport: T, out: &mut W) -> Result<()>
where
    T: HttpTransport,
    W: Write,
{
    let api_key = api_key.ok_or(OddsError::MissingApiKey { var: ODDS_API_KEY_VAR })?;
    writeln!(out, "{}", KEY_OK)?;

    let feed = TheOddsApi::new(transport, api_key, &config.odds_feed);
    let fetch = feed.fetch_odds().await?;

    for line in quota_lines(&fetch.quota) {
        writeln!(out, "{}", line)?;
    }
    if let (Some(threshold), Some(remaining)) = (config.odds_feed.quota_warning_threshold, fetch.quota.remaining()) {
        if remaining < threshold {
            tracing::warn!(remaining, threshold, "odds API quota running low");
            writeln!(out, "Quota low: {} requests remaining", remaining)?;
        }
    }

    let format = OutputFormat::from(&config.display);
    writeln!(out, "{}", config.display.title)?;
    for summary in summaries(&fetch.events, config.display.cap()) {
        for line in format.event_lines(&summary?) {
            writeln!(out, "{}", line)?;
        }
    }

    writeln!(out, "{}", DONE)?;
    out.flush()?;
    Ok(())
}
