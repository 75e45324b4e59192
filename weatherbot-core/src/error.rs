use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the weather provider.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to OpenWeather ({endpoint}) failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse OpenWeather {endpoint} JSON: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("OpenWeather response is missing {0}")]
    MissingField(&'static str),

    #[error("invalid forecast timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// Failures delivering a message.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("request to Telegram failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Telegram request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Telegram API error{}: {description}", code_suffix(.code))]
    Api {
        code: Option<i64>,
        description: String,
    },

    #[error("failed to parse Telegram response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Overall outcome of a report run that did not end in a delivered report.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("current weather unavailable: {source}")]
    CurrentUnavailable {
        #[source]
        source: WeatherError,
        /// Whether the apology message reached the recipient.
        apology_sent: bool,
    },

    #[error("report delivery failed: {0}")]
    Delivery(#[source] NotifyError),
}

fn code_suffix(code: &Option<i64>) -> String {
    code.map(|c| format!(" (code {c})")).unwrap_or_default()
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
