use std::fmt;
use std::time::Duration;

use crate::error::Error;
use crate::redact::{mask_token, REDACTED};
use crate::request::InputFile;

/// Base URL of the public Bot API
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// HTTP client options for API requests
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout covering connect, upload and response
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Configuration for a [`BotClient`](crate::BotClient)
#[derive(Clone)]
pub struct Configuration {
    /// Telegram Bot API token
    bot_token: String,
    /// Scheme and host the `/bot<token>/<method>` paths are appended to
    api_base: String,
    /// HTTP client options
    client_options: ClientOptions,
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("bot_token", &mask_token(&self.bot_token))
            .field("api_base", &self.api_base)
            .field("client_options", &self.client_options)
            .finish()
    }
}

impl Configuration {
    /// Create a configuration for the public Bot API
    pub fn new<S: AsRef<str>>(bot_token: S) -> Self {
        Configuration {
            bot_token: bot_token.as_ref().to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            client_options: ClientOptions::default(),
        }
    }

    /// Get the Telegram Bot API token
    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    /// Point the client at a different Bot API server
    pub fn set_api_base<S: AsRef<str>>(&mut self, api_base: S) {
        self.api_base = api_base.as_ref().trim_end_matches('/').to_string();
    }

    /// Get the Bot API base URL
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Set the request timeout
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.client_options.timeout = timeout;
    }

    /// Set client options
    pub fn set_client_options(&mut self, options: ClientOptions) {
        self.client_options = options;
    }

    /// Get client options
    pub fn client_options(&self) -> &ClientOptions {
        &self.client_options
    }

    /// Full endpoint URL for an API method
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.bot_token, method)
    }

    /// Endpoint URL with the token masked, for logging
    pub fn redacted_method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, REDACTED, method)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Error> {
        if self.bot_token.trim().is_empty() {
            return Err(Error::configuration("Bot token not configured"));
        }

        if self.bot_token.contains('/') {
            return Err(Error::configuration("Bot token must not contain '/'"));
        }

        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            return Err(Error::configuration(format!(
                "Invalid API base URL: '{}'. Must start with http:// or https://",
                self.api_base
            )));
        }

        Ok(())
    }
}

/// Text formatting dialect the Bot API renders captions and messages with.
///
/// Names are passed through untouched; the server decides what is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Markdown,
    MarkdownV2,
    Html,
    Other(String),
}

impl ParseMode {
    /// The value sent in the `parse_mode` field
    pub fn as_str(&self) -> &str {
        match self {
            ParseMode::Markdown => "Markdown",
            ParseMode::MarkdownV2 => "MarkdownV2",
            ParseMode::Html => "HTML",
            ParseMode::Other(mode) => mode,
        }
    }
}

impl From<&str> for ParseMode {
    fn from(mode: &str) -> Self {
        match mode {
            "Markdown" => ParseMode::Markdown,
            "MarkdownV2" => ParseMode::MarkdownV2,
            "HTML" => ParseMode::Html,
            other => ParseMode::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for `sendMessage`
///
/// Text messages notify readers by default.
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    pub parse_mode: ParseMode,
    /// Don't show a link preview for URLs in the text
    pub disable_web_page_preview: bool,
    /// Deliver silently
    pub disable_notification: bool,
}

/// Options shared by `sendDocument`, `sendPhoto` and `sendVideo`
///
/// Unlike text messages, files are delivered silently by default.
#[derive(Debug, Clone)]
pub struct FileOptions {
    pub caption: String,
    pub parse_mode: ParseMode,
    pub disable_notification: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        FileOptions {
            caption: String::new(),
            parse_mode: ParseMode::default(),
            disable_notification: true,
        }
    }
}

impl FileOptions {
    /// Default options with a caption
    pub fn with_caption<S: Into<String>>(caption: S) -> Self {
        FileOptions {
            caption: caption.into(),
            ..Default::default()
        }
    }
}

/// Options for `sendVideo`
///
/// Metadata fields are only sent when set.
#[derive(Debug, Clone, Default)]
pub struct VideoOptions {
    pub file: FileOptions,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Duration in seconds
    pub duration: Option<u32>,
    /// Thumbnail uploaded alongside the video
    pub thumb: Option<InputFile>,
    pub supports_streaming: Option<bool>,
}
