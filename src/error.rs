/// Error types for the Mailgun mailer
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailgunError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Too many tags: a message carries at most {limit} tags")]
    TooManyTags { limit: usize },

    #[error("Too many parameters: {0}")]
    TooManyParameters(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read attachment {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mailgun rejected the message (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

impl MailgunError {
    /// True when the error was raised before anything was sent
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Transport(_) | Self::Rejected { .. })
    }
}

impl From<serde_json::Error> for MailgunError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidParameter(err.to_string())
    }
}
