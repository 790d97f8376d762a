use crate::engine::summary::{CapPolicy, DisplayCap};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

const ENV_FILE: &str = ".env";

pub const ODDS_API_KEY_VAR: &str = "ODDS_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub odds_feed: OddsFeedConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OddsFeedConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_sport")]
    pub sport: String,
    #[serde(default = "default_regions")]
    pub regions: String,
    /// Comma-separated provider market keys. Only `h2h` is ever rendered.
    #[serde(default = "default_markets")]
    pub markets: String,
    #[serde(default = "default_odds_format")]
    pub odds_format: String,
    pub quota_warning_threshold: Option<u64>,
}

fn default_base_url() -> String {
    "https://api.the-odds-api.com".to_string()
}
fn default_sport() -> String {
    "basketball".to_string()
}
fn default_regions() -> String {
    "us".to_string()
}
fn default_markets() -> String {
    "h2h,spreads".to_string()
}
fn default_odds_format() -> String {
    "american".to_string()
}

impl Default for OddsFeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            sport: default_sport(),
            regions: default_regions(),
            markets: default_markets(),
            odds_format: default_odds_format(),
            quota_warning_threshold: Some(50),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_max_events")]
    pub max_events: usize,
    #[serde(default)]
    pub cap_policy: CapPolicy,
    /// chrono `strftime` pattern for start and update times.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_name_width")]
    pub name_width: usize,
    /// `None` prints the full decimal expansion.
    pub decimal_places: Option<u32>,
}

fn default_title() -> String {
    "NBA Odds H2H".to_string()
}
fn default_max_events() -> usize {
    6
}
fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}
fn default_name_width() -> usize {
    25
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            max_events: default_max_events(),
            cap_policy: CapPolicy::default(),
            timestamp_format: default_timestamp_format(),
            name_width: default_name_width(),
            decimal_places: Some(2),
        }
    }
}

impl DisplayConfig {
    pub fn cap(&self) -> DisplayCap {
        DisplayCap::new(self.max_events, self.cap_policy)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load .env file into process environment. Real env vars take precedence.
    pub fn load_env_file() {
        Self::load_env_from(Path::new(ENV_FILE));
    }

    /// Returns whether the file was loaded. A missing file is not an error.
    pub fn load_env_from(path: &Path) -> bool {
        match dotenvy::from_path(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "loaded env file");
                true
            }
            Err(e) if e.not_found() => false,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable env file");
                false
            }
        }
    }

    /// The odds API key from the environment, or `None` when unset or blank.
    pub fn resolve_api_key() -> Option<String> {
        api_key_from_env(ODDS_API_KEY_VAR)
    }
}

fn api_key_from_env(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|raw| sanitize_key(&raw))
        .filter(|key| !key.is_empty())
}

/// Strip carriage returns, BOM, and other invisible chars from a key value.
fn sanitize_key(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}', '\u{200b}'], "")
        .trim()
        .to_string()
}
