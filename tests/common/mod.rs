//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

use mailgun_mailer::MailerConfig;
use std::io::Write;
use tempfile::NamedTempFile;

pub mod mock_transport;
pub mod test_data;

/// Config of the end-to-end scenario: domain, key, default sender and one tag
pub fn scenario_config() -> MailerConfig {
    MailerConfig::builder()
        .domain("example.com")
        .api_key("key-123")
        .from("a@example.com")
        .tags(vec!["sys".to_string()])
        .build()
}

/// Same as `scenario_config` but pointed at a local mock server
pub fn config_for_server(server_uri: &str) -> MailerConfig {
    MailerConfig::builder()
        .domain("example.com")
        .api_key("key-123")
        .from("a@example.com")
        .tags(vec!["sys".to_string()])
        .endpoint(server_uri)
        .timeout_secs(5)
        .build()
}

/// Write `content` to a temporary file with the given suffix
pub fn temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("mailgun-test-")
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_file_has_content() {
        let file = temp_file(".txt", b"hello");
        assert_eq!(std::fs::read(file.path()).unwrap(), b"hello");
        assert!(file.path().to_string_lossy().ends_with(".txt"));
    }
}
