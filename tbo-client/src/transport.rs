//! The HTTP seam between [`Client`](crate::Client) and the Bot API.
//!
//! A [`Transport`] moves one request to `{api_url}/bot{token}/{method}` and
//! hands back the raw response body. Envelope handling and decoding stay in
//! the client, so tests can plug in an in-memory transport.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part as FormPart};

use crate::Config;
use crate::errors::InvocationError;
use crate::media::FilePart;

/// One request parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum Part {
    Text(String),
    File(FilePart),
}

/// Sends a single Bot API request.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Plain request, parameters in the query string.
    async fn get(&self, method: &str, query: &[(String, String)]) -> Result<String, InvocationError>;

    /// Upload request, parameters as `multipart/form-data` fields.
    async fn post_multipart(&self, method: &str, parts: &[(String, Part)]) -> Result<String, InvocationError>;
}

// ─── HttpTransport ────────────────────────────────────────────────────────────

/// [`Transport`] backed by a pooled `reqwest` client.
pub struct HttpTransport {
    http:     reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, InvocationError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("tbo/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = format!("{}/bot{}", config.api_url.trim_end_matches('/'), config.token);
        Ok(Self { http, base_url })
    }

    fn url_for(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }
}

// Error statuses still carry a JSON envelope, so the body is returned as-is
// whatever the status code.
#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, method: &str, query: &[(String, String)]) -> Result<String, InvocationError> {
        let resp = self.http.get(self.url_for(method)).query(query).send().await?;
        Ok(resp.text().await?)
    }

    async fn post_multipart(&self, method: &str, parts: &[(String, Part)]) -> Result<String, InvocationError> {
        let mut form = Form::new();
        for (name, part) in parts {
            form = match part {
                Part::Text(text) => form.text(name.clone(), text.clone()),
                Part::File(file) => {
                    let field = FormPart::bytes(file.bytes.clone())
                        .file_name(file.file_name.clone())
                        .mime_str(&file.mime_type)?;
                    form.part(name.clone(), field)
                }
            };
        }
        let resp = self.http.post(self.url_for(method)).multipart(form).send().await?;
        Ok(resp.text().await?)
    }
}

impl std::fmt::Debug for HttpTransport {
    // The base URL embeds the bot token.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}
