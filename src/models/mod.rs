pub mod config;
/// Data models for the Mailgun mailer
pub mod email;
pub mod messages;

// Re-export commonly used types
pub use config::*;
pub use email::*;
pub use messages::*;
