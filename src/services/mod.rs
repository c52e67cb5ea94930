/// Mail services: configuration, transport and the mailer itself
pub mod config;
pub mod mailer;
pub mod observer;
pub mod transport;

// Re-export service traits
pub use config::EnvConfigProvider;
pub use mailer::{MailSender, Mailer};
pub use observer::{SendObserver, TracingObserver};
pub use transport::{HttpTransport, Transport, TransportResponse};
