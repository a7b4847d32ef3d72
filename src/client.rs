use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::configuration::{Configuration, FileOptions, MessageOptions, VideoOptions};
use crate::error::Error;
use crate::redact::redact_secret;
use crate::request::{InputFile, MediaKind, OutboundRequest};
use crate::transport::{ReqwestTransport, Transport};

/// Response from the Telegram API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    /// Whether the request was successful
    pub ok: bool,
    /// Human readable reason when `ok` is false
    #[serde(default)]
    pub description: Option<String>,
    /// Numeric error code when `ok` is false
    #[serde(default)]
    pub error_code: Option<i64>,
    /// Response result
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

impl ApiResponse {
    /// Parse a raw response body.
    ///
    /// Fails unless the body is a JSON object with a boolean `ok`.
    pub fn parse(body: &str) -> Result<Self, Error> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| Error::parse(e.to_string()))?;

        if !value.is_object() {
            return Err(Error::parse("response body is not a JSON object"));
        }

        serde_json::from_value(value).map_err(|e| Error::parse(e.to_string()))
    }

    /// Turn `ok: false` into [`Error::Rejected`] and hand back the result payload
    pub fn into_result(self) -> Result<serde_json::Value, Error> {
        if self.ok {
            return Ok(self.result.unwrap_or(serde_json::Value::Null));
        }

        Err(Error::Rejected {
            error_code: self.error_code,
            description: self
                .description
                .unwrap_or_else(|| "Unknown API error".to_string()),
        })
    }
}

/// Client for the Telegram Bot API send methods.
///
/// Holds only the configuration and a transport, so it can be cloned and
/// shared between threads freely.
#[derive(Clone)]
pub struct BotClient {
    config: Configuration,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for BotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BotClient {
    /// Create a client for the public Bot API with default options
    pub fn new<S: AsRef<str>>(bot_token: S) -> Self {
        Self::with_configuration(Configuration::new(bot_token))
    }

    /// Create a client with a custom configuration
    pub fn with_configuration(config: Configuration) -> Self {
        let transport = ReqwestTransport::new(config.client_options());
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that posts through the given transport
    pub fn with_transport(config: Configuration, transport: Arc<dyn Transport>) -> Self {
        BotClient { config, transport }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Send a text message.
    ///
    /// Returns the `ok` flag of the response. Transport and parse failures
    /// are errors, never `false`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tgsend::{BotClient, MessageOptions};
    ///
    /// let bot = BotClient::new("123456:YOUR_BOT_TOKEN");
    /// bot.send_message("@mychannel", "hello *world*", &MessageOptions::default())?;
    /// # Ok::<(), tgsend::Error>(())
    /// ```
    pub fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        options: &MessageOptions,
    ) -> Result<bool, Error> {
        let request = Self::build_message_request(chat_id, text, options);
        self.send(&request)
    }

    /// Send a file as a document
    pub fn send_document(
        &self,
        chat_id: &str,
        file: &InputFile,
        options: &FileOptions,
    ) -> Result<bool, Error> {
        self.send_file(MediaKind::Document, chat_id, file, options, None)
    }

    /// Send a file as a photo
    pub fn send_photo(
        &self,
        chat_id: &str,
        file: &InputFile,
        options: &FileOptions,
    ) -> Result<bool, Error> {
        self.send_file(MediaKind::Photo, chat_id, file, options, None)
    }

    /// Send a file as a video, with optional metadata and thumbnail
    pub fn send_video(
        &self,
        chat_id: &str,
        file: &InputFile,
        options: &VideoOptions,
    ) -> Result<bool, Error> {
        self.send_file(MediaKind::Video, chat_id, file, &options.file, Some(options))
    }

    /// Shared path for every file upload.
    ///
    /// `video` is ignored unless `kind` is [`MediaKind::Video`].
    pub fn send_file(
        &self,
        kind: MediaKind,
        chat_id: &str,
        file: &InputFile,
        options: &FileOptions,
        video: Option<&VideoOptions>,
    ) -> Result<bool, Error> {
        let request = Self::build_file_request(kind, chat_id, file, options, video)?;
        self.send(&request)
    }

    /// File upload keyed by a selector string (`document`, `photo` or `video`).
    ///
    /// An unknown selector returns `Ok(false)` without touching the network.
    pub fn send_file_named(
        &self,
        selector: &str,
        chat_id: &str,
        file: &InputFile,
        options: &FileOptions,
    ) -> Result<bool, Error> {
        match selector.parse::<MediaKind>() {
            Ok(kind) => self.send_file(kind, chat_id, file, options, None),
            Err(e) => {
                warn!("Not sending file: {}", e);
                Ok(false)
            }
        }
    }

    /// Post a request and return the whole parsed response
    pub fn execute(&self, request: &OutboundRequest) -> Result<ApiResponse, Error> {
        self.config.validate()?;

        let url = self.config.method_url(&request.method);
        debug!("Calling {}", self.config.redacted_method_url(&request.method));

        let body = self.transport.post(&url, request)?;
        ApiResponse::parse(&body).map_err(|e| {
            // Gateway error pages sometimes echo the request path
            let preview: String = body.chars().take(200).collect();
            warn!(
                "Unparseable {} response: {}",
                request.method,
                redact_secret(&preview, self.config.bot_token())
            );
            e
        })
    }

    fn send(&self, request: &OutboundRequest) -> Result<bool, Error> {
        let response = self.execute(request)?;

        if response.ok {
            info!("{} succeeded", request.method);
        } else {
            warn!(
                "{} rejected by Telegram ({}): {}",
                request.method,
                response
                    .error_code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "no code".to_string()),
                response.description.as_deref().unwrap_or("no description")
            );
        }

        Ok(response.ok)
    }

    /// Build the `sendMessage` request.
    ///
    /// The text is sent as given; escaping is up to the caller and the
    /// chosen parse mode.
    pub fn build_message_request(
        chat_id: &str,
        text: &str,
        options: &MessageOptions,
    ) -> OutboundRequest {
        OutboundRequest::new("sendMessage")
            .field("chat_id", chat_id)
            .field("text", text)
            .field("parse_mode", options.parse_mode.as_str())
            .field("disable_web_page_preview", options.disable_web_page_preview)
            .field("disable_notification", options.disable_notification)
    }

    /// Build a file upload request, reading the file (and thumbnail) fully
    /// into memory.
    pub fn build_file_request(
        kind: MediaKind,
        chat_id: &str,
        file: &InputFile,
        options: &FileOptions,
        video: Option<&VideoOptions>,
    ) -> Result<OutboundRequest, Error> {
        let mut request = OutboundRequest::new(kind.api_method())
            .attach(file.to_attachment(kind.field_name())?)
            .field("chat_id", chat_id)
            .field("disable_notification", options.disable_notification)
            .field("parse_mode", options.parse_mode.as_str())
            .field("caption", options.caption.as_str());

        if let (MediaKind::Video, Some(video)) = (kind, video) {
            request = request
                .optional_field("width", video.width)
                .optional_field("height", video.height)
                .optional_field("duration", video.duration)
                .optional_field("supports_streaming", video.supports_streaming);

            if let Some(thumb) = &video.thumb {
                request = request.attach(thumb.to_attachment("thumb")?);
            }
        }

        debug!(
            "Built {} request with {} field(s) and {} file part(s)",
            request.method,
            request.fields.len(),
            request.attachments.len()
        );

        Ok(request)
    }
}
