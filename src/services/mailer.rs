/// Mailer - merges configured defaults into a message and posts it to Mailgun
use super::observer::{SendObserver, TracingObserver};
use super::transport::{HttpTransport, Transport, TransportResponse};
use crate::constants::MESSAGES_PATH;
use crate::email::{MailMessage, Message};
use crate::error::MailgunError;
use crate::models::{ErrorBody, MailerConfig, SendReceipt};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait MailSender: Send + Sync {
    /// Sends one message; it is consumed whether or not the send succeeds
    async fn send(&self, message: Message) -> Result<SendReceipt, MailgunError>;
}

/// Mailgun mailer
///
/// The configuration is read-only once the mailer is built, so one mailer
/// can be shared between tasks behind an `Arc`.
pub struct Mailer {
    config: MailerConfig,
    transport: Arc<dyn Transport>,
    observer: Arc<dyn SendObserver>,
}

impl Mailer {
    pub fn new(config: MailerConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Builds the HTTP transport from the configuration
    pub fn from_config(config: MailerConfig) -> Result<Self, MailgunError> {
        let transport = HttpTransport::from_config(&config)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn with_observer(mut self, observer: Arc<dyn SendObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &MailerConfig {
        &self.config
    }

    /// A fresh, empty message
    pub fn compose(&self) -> Message {
        Message::new()
    }

    /// Fills every option the message left unset from the configured defaults.
    /// Values the message already carries always win.
    pub fn apply_defaults(&self, message: &mut Message) -> Result<(), MailgunError> {
        let config = &self.config;

        if message.from().is_none() {
            if let Some(sender) = config.default_sender() {
                message.set_from(sender)?;
            }
        }
        if message.tags().is_empty() && !config.tags.is_empty() {
            message.set_tags(config.tags.iter().cloned())?;
        }
        if message.campaign_ids().is_empty() {
            if let Some(campaign_id) = &config.campaign_id {
                message.set_campaign_id(campaign_id.clone())?;
            }
        }
        if message.dkim().is_none() {
            if let Some(dkim) = config.dkim {
                message.set_dkim(dkim);
            }
        }
        if message.test_mode().is_none() {
            if let Some(test_mode) = config.test_mode {
                message.set_test_mode(test_mode);
            }
        }
        if message.click_tracking().is_none() {
            if let Some(mode) = config.click_tracking {
                message.set_click_tracking(mode);
            }
        }
        if message.open_tracking().is_none() {
            if let Some(opens) = config.open_tracking {
                message.set_open_tracking(opens);
            }
        }

        Ok(())
    }

    fn messages_path(&self) -> String {
        format!("{}/{}", self.config.domain.trim(), MESSAGES_PATH)
    }

    fn interpret(response: &TransportResponse) -> Result<SendReceipt, MailgunError> {
        if !response.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|body| body.message)
                .unwrap_or_else(|_| response.body.clone());
            return Err(MailgunError::Rejected {
                status: response.status,
                message,
            });
        }

        // A 2xx without a message id means nothing was queued
        serde_json::from_str::<SendReceipt>(&response.body).map_err(|_| {
            MailgunError::Rejected {
                status: response.status,
                message: format!("unexpected response body: {}", response.body),
            }
        })
    }
}

#[async_trait]
impl MailSender for Mailer {
    #[tracing::instrument(name = "mailer.send", skip(self, message), fields(domain = %self.config.domain))]
    async fn send(&self, mut message: Message) -> Result<SendReceipt, MailgunError> {
        self.config.ensure_credentials()?;
        self.apply_defaults(&mut message)?;

        let domain = self.config.domain.trim();
        self.observer.before_send(domain, &message);

        let (payload, files) = message.into_parts();
        let response = self
            .transport
            .post(&self.messages_path(), &payload, &files)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, local = e.is_local(), "Failed to post email to Mailgun");
            })?;

        self.observer.after_send(domain, &response);

        let receipt = Self::interpret(&response)?;
        tracing::info!(message_id = %receipt.id, "Email queued by Mailgun");
        Ok(receipt)
    }
}
