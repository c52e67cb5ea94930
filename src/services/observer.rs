/// Send observers - the logging hooks around each send
use super::transport::TransportResponse;
use crate::email::{MailMessage, Message};
use crate::utils::logging::{redact_mailbox, redact_subject};

/// Called once before and once after every POST the mailer makes
pub trait SendObserver: Send + Sync {
    fn before_send(&self, domain: &str, message: &Message);

    fn after_send(&self, domain: &str, response: &TransportResponse);
}

/// Default observer: structured `tracing` events with PII redacted
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SendObserver for TracingObserver {
    fn before_send(&self, domain: &str, message: &Message) {
        let recipients = message
            .to()
            .iter()
            .chain(message.cc())
            .chain(message.bcc())
            .map(|addr| redact_mailbox(addr))
            .collect::<Vec<_>>()
            .join(", ");

        tracing::info!(
            domain = %domain,
            recipients = %recipients,
            subject = %redact_subject(message.subject().unwrap_or_default()),
            tags = ?message.tags(),
            attachments = message.files().len(),
            "Sending email"
        );
    }

    fn after_send(&self, domain: &str, response: &TransportResponse) {
        if response.is_success() {
            tracing::info!(
                domain = %domain,
                status = response.status,
                response = %response.body,
                "Mailgun response"
            );
        } else {
            tracing::warn!(
                domain = %domain,
                status = response.status,
                response = %response.body,
                "Mailgun response"
            );
        }
    }
}
