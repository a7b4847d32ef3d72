use log::{debug, error, info};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client as ReqwestClient;

use crate::configuration::ClientOptions;
use crate::error::Error;
use crate::request::OutboundRequest;

/// Issues the HTTP POST for a built request.
///
/// Implementations return the raw response body whatever the HTTP status:
/// the Bot API reports failures inside the JSON body.
pub trait Transport: Send + Sync {
    fn post(&self, url: &str, request: &OutboundRequest) -> Result<String, Error>;
}

/// Blocking `reqwest` transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(&ClientOptions::default())
    }
}

impl ReqwestTransport {
    pub fn new(options: &ClientOptions) -> Self {
        let client = ReqwestClient::builder()
            .timeout(options.timeout)
            .build()
            .unwrap_or_else(|e| {
                error!("Failed to build HTTP client, using defaults: {}", e);
                ReqwestClient::new()
            });

        ReqwestTransport { client }
    }

    /// Wrap an already configured client
    pub fn with_client(client: ReqwestClient) -> Self {
        ReqwestTransport { client }
    }

    fn multipart_form(request: &OutboundRequest) -> Form {
        let form = request
            .form_pairs()
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value));

        request.attachments.iter().fold(form, |form, attachment| {
            let part =
                Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone());
            form.part(attachment.field.clone(), part)
        })
    }
}

impl Transport for ReqwestTransport {
    fn post(&self, url: &str, request: &OutboundRequest) -> Result<String, Error> {
        let builder = self.client.post(url);
        let builder = if request.is_multipart() {
            debug!(
                "Posting {} as multipart with {} file part(s)",
                request.method,
                request.attachments.len()
            );
            builder.multipart(Self::multipart_form(request))
        } else {
            debug!("Posting {} as url-encoded form", request.method);
            builder.form(&request.form_pairs())
        };

        let response = builder.send().map_err(|e| {
            let err = Error::from(e);
            error!("{} request failed: {}", request.method, err);
            err
        })?;

        let status = response.status();
        info!("{} answered with status code: {}", request.method, status);

        response.text().map_err(|e| {
            let err = Error::from(e);
            error!("Failed to read {} response body: {}", request.method, err);
            err
        })
    }
}
