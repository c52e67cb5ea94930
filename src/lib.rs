//! Mailgun Mailer - send email through the Mailgun HTTP API
//!
//! A `Mailer` holds account credentials and default send options, and a
//! `Message` accumulates one outgoing email. The HTTP transport is injected so
//! it can be swapped out in tests.

pub mod constants;
pub mod email;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use email::{MailMessage, Message};
pub use error::MailgunError;
pub use models::{AttachmentRef, ClickTracking, EmailAddress, MailerConfig, SendReceipt};
pub use services::{HttpTransport, MailSender, Mailer, SendObserver, Transport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
