/// Message building
pub mod message;
pub mod mime;

pub use message::{MailMessage, Message};
