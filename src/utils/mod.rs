/// Utility functions
pub mod logging;

pub use logging::{init_tracing, redact_email, redact_mailbox, redact_subject};
