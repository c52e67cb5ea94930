/// HTTP transport to the Mailgun API
use crate::constants::{API_USER, USER_AGENT};
use crate::email::mime::detect_content_type;
use crate::error::MailgunError;
use crate::models::{AttachmentRef, MailerConfig, MessageFiles, MessagePayload};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use url::Url;

/// Raw provider response, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts one message to `path`, relative to the API base URL
    async fn post(
        &self,
        path: &str,
        payload: &MessagePayload,
        files: &MessageFiles,
    ) -> Result<TransportResponse, MailgunError>;
}

pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpTransport {
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MailgunError> {
        // Joining onto a base without a trailing slash would drop its last segment
        let base = if endpoint.ends_with('/') {
            endpoint.to_string()
        } else {
            format!("{}/", endpoint)
        };
        let endpoint = Url::parse(&base)
            .map_err(|e| MailgunError::Config(format!("Invalid endpoint URL {}: {}", base, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MailgunError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &MailerConfig) -> Result<Self, MailgunError> {
        Self::new(&config.endpoint, config.api_key.clone(), config.timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Appends `path` to the base URL one segment at a time, so each segment
    /// is percent-encoded and can never replace the host or the version prefix
    pub fn request_url(&self, path: &str) -> Result<Url, MailgunError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                MailgunError::Config(format!("Endpoint {} cannot take a path", self.endpoint))
            })?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    /// Reads one file into a form part; the handle is closed before returning
    async fn file_part(file: &AttachmentRef) -> Result<Part, MailgunError> {
        let data = tokio::fs::read(&file.path)
            .await
            .map_err(|source| MailgunError::Attachment {
                path: file.path.clone(),
                source,
            })?;

        tracing::debug!(
            file_name = %file.remote_name(),
            size = data.len(),
            "Read attachment from disk"
        );

        let part = Part::bytes(data)
            .file_name(file.remote_name())
            .mime_str(detect_content_type(&file.path).as_ref())?;
        Ok(part)
    }

    async fn build_form(
        payload: &MessagePayload,
        files: &MessageFiles,
    ) -> Result<Form, MailgunError> {
        let mut form = Form::new();

        for (key, value) in payload.to_form_fields() {
            form = form.text(key, value);
        }

        for attachment in &files.attachments {
            form = form.part("attachment", Self::file_part(attachment).await?);
        }

        for inline in &files.inline {
            form = form.part("inline", Self::file_part(inline).await?);
        }

        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        path: &str,
        payload: &MessagePayload,
        files: &MessageFiles,
    ) -> Result<TransportResponse, MailgunError> {
        let url = self.request_url(path)?;

        let form = Self::build_form(payload, files).await?;

        let response = self
            .client
            .post(url)
            .basic_auth(API_USER, Some(&self.api_key))
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
