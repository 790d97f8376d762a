use thiserror::Error;

/// Fatal conditions that stop a run. Missing bookmakers or markets are not
/// errors; the summary records them as notices instead.
#[derive(Error, Debug)]
pub enum OddsError {
    #[error("Api key is not working ({var} is unset or blank)")]
    MissingApiKey { var: &'static str },

    #[error("the-odds-api request failed: {0:#}")]
    Transport(anyhow::Error),

    #[error("HTTP {status} - {reason}\n{body}")]
    HttpStatus {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("failed to parse the-odds-api response")]
    InvalidJson(#[source] serde_json::Error),

    #[error("unexpected the-odds-api response: expected a JSON array of events, got {found}")]
    UnexpectedShape { found: &'static str },

    #[error("malformed event #{index}")]
    MalformedEvent {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl OddsError {
    /// Short name of a JSON value's type, for shape errors.
    pub fn json_kind(value: &serde_json::Value) -> &'static str {
        match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "a boolean",
            serde_json::Value::Number(_) => "a number",
            serde_json::Value::String(_) => "a string",
            serde_json::Value::Array(_) => "an array",
            serde_json::Value::Object(_) => "an object",
        }
    }
}
