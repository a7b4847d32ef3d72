use std::path::PathBuf;

use thiserror::Error;

/// Error types for Bot API operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The file-send selector is not one of `document`, `photo` or `video`
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    /// Network-level failure while talking to the Bot API.
    ///
    /// The request URL, which carries the bot token, is stripped.
    #[error("HTTP error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body was not JSON or lacked a boolean `ok`
    #[error("Failed to parse API response: {0}")]
    ResponseParse(String),

    /// The Bot API answered with `ok: false`
    #[error("Telegram API error{}: {description}", code_suffix(.error_code))]
    Rejected {
        error_code: Option<i64>,
        description: String,
    },

    /// A local file could not be read
    #[error("Failed to read {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a new configuration error
    pub fn configuration<S: AsRef<str>>(message: S) -> Self {
        Error::Configuration(message.as_ref().to_string())
    }

    /// Create a new response parsing error
    pub fn parse<S: AsRef<str>>(message: S) -> Self {
        Error::ResponseParse(message.as_ref().to_string())
    }

    /// Whether the Bot API could not be reached at all
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.without_url())
    }
}

fn code_suffix(code: &Option<i64>) -> String {
    code.map(|c| format!(" {}", c)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, Error>;
