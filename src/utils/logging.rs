/// Logging utilities: subscriber setup and PII redaction
///
/// Recipient addresses and subjects end up in send logs; these helpers keep
/// enough of them for debugging without writing the full values out.
use lettre::message::Mailbox;
use regex::Regex;
use tracing_subscriber::EnvFilter;

lazy_static::lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
}

/// Installs a global `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Does nothing when a subscriber is already installed.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Redacts email addresses from text, preserving domain for debugging
///
/// # Examples
/// ```
/// use mailgun_mailer::utils::logging::redact_email;
///
/// assert_eq!(redact_email("user@example.com"), "***@example.com");
/// assert_eq!(redact_email("Alice <alice@acme.com>"), "Alice <***@acme.com>");
/// ```
pub fn redact_email(text: &str) -> String {
    EMAIL_PATTERN
        .replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            match email.find('@') {
                Some(at_pos) => format!("***{}", &email[at_pos..]),
                None => "***@***".to_string(),
            }
        })
        .to_string()
}

/// Redacts one formatted recipient down to its masked address, dropping any
/// display name
///
/// # Examples
/// ```
/// use mailgun_mailer::utils::logging::redact_mailbox;
///
/// assert_eq!(redact_mailbox("Bob Smith <bob@acme.com>"), "***@acme.com");
/// assert_eq!(redact_mailbox("bob@acme.com"), "***@acme.com");
/// ```
pub fn redact_mailbox(mailbox: &str) -> String {
    match mailbox.parse::<Mailbox>() {
        Ok(parsed) => redact_email(&parsed.email.to_string()),
        Err(_) => "***".to_string(),
    }
}

/// Redacts subject line for logging (truncates and masks)
///
/// # Examples
/// ```
/// use mailgun_mailer::utils::logging::redact_subject;
///
/// assert_eq!(redact_subject("Confidential Document"), "Con...[21 chars]");
/// assert_eq!(redact_subject("Hi"), "Hi");
/// ```
pub fn redact_subject(subject: &str) -> String {
    const MAX_VISIBLE_CHARS: usize = 3;
    const MIN_LENGTH_TO_REDACT: usize = 6;

    let length = subject.chars().count();
    if length < MIN_LENGTH_TO_REDACT {
        subject.to_string()
    } else {
        let visible: String = subject.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}...[{} chars]", visible, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_email() {
        assert_eq!(redact_email("user@example.com"), "***@example.com");
        assert_eq!(
            redact_email("Contact test@acme.com for help"),
            "Contact ***@acme.com for help"
        );
        assert_eq!(
            redact_email("Bob <bob@bar.com>"),
            "Bob <***@bar.com>"
        );
    }

    #[test]
    fn test_redact_mailbox_drops_names() {
        assert_eq!(redact_mailbox("Bob Smith <bob@bar.com>"), "***@bar.com");
        assert_eq!(redact_mailbox("bob@bar.com"), "***@bar.com");
        assert_eq!(redact_mailbox("Bob Smith"), "***");
    }

    #[test]
    fn test_redact_subject() {
        assert_eq!(redact_subject("Short"), "Short");
        assert_eq!(redact_subject("This is a long subject"), "Thi...[22 chars]");
        assert_eq!(redact_subject(""), "");
        assert_eq!(redact_subject("Grüße aus Köln"), "Grü...[14 chars]");
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing(false);
        init_tracing(true);
    }
}
