/// Email domain models
use super::config::ClickTracking;
use crate::error::MailgunError;
use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    pub address: String,
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(address: impl Into<String>, name: Option<String>) -> Self {
        Self {
            address: address.into(),
            name,
        }
    }

    /// Parses the address and renders it the way the API expects it,
    /// `Name <user@example.com>` or a bare `user@example.com`.
    pub fn to_mailbox_string(&self) -> Result<String, MailgunError> {
        let mailbox = match &self.name {
            Some(name) => Mailbox::new(
                Some(name.clone()),
                self.address.parse().map_err(|e| {
                    MailgunError::InvalidAddress(format!("{}: {}", self.address, e))
                })?,
            ),
            // Also accepts an already formatted `Name <user@example.com>`
            None => Mailbox::from_str(&self.address)
                .map_err(|e| MailgunError::InvalidAddress(format!("{}: {}", self.address, e)))?,
        };
        Ok(mailbox.to_string())
    }
}

impl From<&str> for EmailAddress {
    fn from(address: &str) -> Self {
        Self::new(address, None)
    }
}

impl From<String> for EmailAddress {
    fn from(address: String) -> Self {
        Self::new(address, None)
    }
}

impl From<&String> for EmailAddress {
    fn from(address: &String) -> Self {
        Self::new(address.as_str(), None)
    }
}

impl From<(&str, &str)> for EmailAddress {
    fn from((address, name): (&str, &str)) -> Self {
        Self::new(address, Some(name.to_string()))
    }
}

/// A file on disk attached to, or embedded in, a message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentRef {
    pub path: PathBuf,
    pub file_name: Option<String>,
}

impl AttachmentRef {
    pub fn new(path: impl AsRef<Path>, file_name: Option<&str>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file_name: file_name.map(str::to_string),
        }
    }

    /// File name sent to the provider: the override, or the last path segment
    pub fn remote_name(&self) -> String {
        self.file_name.clone().unwrap_or_else(|| {
            self.path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string())
        })
    }
}

/// Files travelling with a message, read from disk at send time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFiles {
    pub attachments: Vec<AttachmentRef>,
    pub inline: Vec<AttachmentRef>,
}

impl MessageFiles {
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty() && self.inline.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attachments.len() + self.inline.len()
    }
}

/// Assembled wire fields of one message
///
/// `None` and empty lists mean "unset": the mailer fills those from its
/// configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePayload {
    pub from: Option<String>,
    pub reply_to: Option<String>,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: Option<String>,
    pub text: Option<String>,
    pub html: Option<String>,
    pub tags: Vec<String>,
    pub campaign_ids: Vec<String>,
    pub dkim: Option<bool>,
    pub test_mode: Option<bool>,
    pub click_tracking: Option<ClickTracking>,
    pub open_tracking: Option<bool>,
    pub headers: BTreeMap<String, String>,
    pub variables: BTreeMap<String, String>,
}

impl MessagePayload {
    /// Flattens the payload into Mailgun form fields, in a fixed order.
    /// Repeated keys (`to`, `o:tag`, ...) appear once per value.
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        let mut push = |key: &str, value: &str| fields.push((key.to_string(), value.to_string()));

        if let Some(from) = &self.from {
            push("from", from);
        }
        if let Some(reply_to) = &self.reply_to {
            push("h:reply-to", reply_to);
        }
        for to in &self.to {
            push("to", to);
        }
        for cc in &self.cc {
            push("cc", cc);
        }
        for bcc in &self.bcc {
            push("bcc", bcc);
        }
        if let Some(subject) = &self.subject {
            push("subject", subject);
        }
        if let Some(text) = &self.text {
            push("text", text);
        }
        if let Some(html) = &self.html {
            push("html", html);
        }
        for tag in &self.tags {
            push("o:tag", tag);
        }
        for campaign in &self.campaign_ids {
            push("o:campaign", campaign);
        }
        if let Some(dkim) = self.dkim {
            push("o:dkim", yes_no(dkim));
        }
        if let Some(test_mode) = self.test_mode {
            push("o:testmode", yes_no(test_mode));
        }
        if let Some(mode) = self.click_tracking {
            push("o:tracking-clicks", mode.as_wire_value());
        }
        if let Some(opens) = self.open_tracking {
            push("o:tracking-opens", yes_no(opens));
        }
        for (name, value) in &self.headers {
            push(&format!("h:{}", name), value);
        }
        for (name, value) in &self.variables {
            push(&format!("v:{}", name), value);
        }

        fields
    }
}

impl fmt::Display for MessagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.to_form_fields() {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
