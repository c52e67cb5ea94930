/// Recording transport and observer for integration testing
use async_trait::async_trait;
use mailgun_mailer::MailgunError;
use mailgun_mailer::models::{MessageFiles, MessagePayload};
use mailgun_mailer::services::{SendObserver, Transport, TransportResponse};
use mailgun_mailer::Message;
use std::sync::{Arc, Mutex};

/// One POST captured by `RecordingTransport`
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub path: String,
    pub payload: MessagePayload,
    pub files: MessageFiles,
}

impl SentRequest {
    /// All values sent under `key`, in order
    pub fn field(&self, key: &str) -> Vec<String> {
        self.payload
            .to_form_fields()
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }
}

/// Transport that records requests and answers with a canned response
#[derive(Clone)]
pub struct RecordingTransport {
    pub requests: Arc<Mutex<Vec<SentRequest>>>,
    response: TransportResponse,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::responding(
            200,
            r#"{"id": "<20240101.1@example.com>", "message": "Queued. Thank you."}"#,
        )
    }

    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response: TransportResponse {
                status,
                body: body.to_string(),
            },
        }
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post(
        &self,
        path: &str,
        payload: &MessagePayload,
        files: &MessageFiles,
    ) -> Result<TransportResponse, MailgunError> {
        self.requests.lock().unwrap().push(SentRequest {
            path: path.to_string(),
            payload: payload.clone(),
            files: files.clone(),
        });
        Ok(self.response.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    BeforeSend { domain: String, rendered: String },
    AfterSend { domain: String, status: u16, body: String },
}

/// Observer that keeps every callback it receives
#[derive(Clone, Default)]
pub struct RecordingObserver {
    pub events: Arc<Mutex<Vec<ObservedEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl SendObserver for RecordingObserver {
    fn before_send(&self, domain: &str, message: &Message) {
        self.events.lock().unwrap().push(ObservedEvent::BeforeSend {
            domain: domain.to_string(),
            rendered: message.to_string(),
        });
    }

    fn after_send(&self, domain: &str, response: &TransportResponse) {
        self.events.lock().unwrap().push(ObservedEvent::AfterSend {
            domain: domain.to_string(),
            status: response.status,
            body: response.body.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_transport() {
        let transport = RecordingTransport::new();
        let response = transport
            .post(
                "example.com/messages",
                &MessagePayload::default(),
                &MessageFiles::default(),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(transport.sent_count(), 1);
        assert_eq!(transport.sent()[0].path, "example.com/messages");
    }
}
