/// Outgoing message builder
///
/// Setters write straight into the wire payload and every getter reads it
/// back, so what a getter returns is exactly what will be transmitted.
use crate::constants::{
    BLANK_PART, CAMPAIGN_ID_LIMIT, DEFAULT_CHARSET, RECIPIENT_COUNT_LIMIT, TAG_LIMIT,
};
use crate::error::MailgunError;
use crate::models::{AttachmentRef, ClickTracking, EmailAddress, MessageFiles, MessagePayload};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Generic mail message surface shared by every provider-backed message
pub trait MailMessage {
    /// Always `utf-8`
    fn charset(&self) -> &str;
    /// No-op; the charset is not configurable
    fn set_charset(&mut self, charset: &str) -> &mut Self;

    fn from(&self) -> Option<&str>;
    fn set_from(&mut self, from: impl Into<EmailAddress>) -> Result<&mut Self, MailgunError>;

    fn reply_to(&self) -> Option<&str>;
    fn set_reply_to(&mut self, reply_to: impl Into<EmailAddress>)
    -> Result<&mut Self, MailgunError>;

    fn to(&self) -> &[String];
    /// Appends recipients to the `to` field
    fn set_to<I, A>(&mut self, recipients: I) -> Result<&mut Self, MailgunError>
    where
        I: IntoIterator<Item = A>,
        A: Into<EmailAddress>;

    fn cc(&self) -> &[String];
    fn set_cc<I, A>(&mut self, recipients: I) -> Result<&mut Self, MailgunError>
    where
        I: IntoIterator<Item = A>,
        A: Into<EmailAddress>;

    fn bcc(&self) -> &[String];
    fn set_bcc<I, A>(&mut self, recipients: I) -> Result<&mut Self, MailgunError>
    where
        I: IntoIterator<Item = A>,
        A: Into<EmailAddress>;

    fn subject(&self) -> Option<&str>;
    fn set_subject(&mut self, subject: &str) -> &mut Self;

    fn text_body(&self) -> Option<&str>;
    fn set_text_body(&mut self, text: &str) -> &mut Self;

    fn html_body(&self) -> Option<&str>;
    fn set_html_body(&mut self, html: &str) -> &mut Self;

    /// Attaches a file on disk; it is read when the message is sent
    fn attach(&mut self, path: impl AsRef<Path>, file_name: Option<&str>) -> &mut Self;

    /// Always fails: in-memory content must be written to a file and attached by path
    fn attach_content(
        &mut self,
        content: &[u8],
        file_name: Option<&str>,
    ) -> Result<&mut Self, MailgunError>;

    /// Embeds a file on disk inline and returns the `cid:` reference to use in HTML
    fn embed(&mut self, path: impl AsRef<Path>, file_name: Option<&str>) -> String;

    /// Always fails: in-memory content must be written to a file and embedded by path
    fn embed_content(
        &mut self,
        content: &[u8],
        file_name: Option<&str>,
    ) -> Result<String, MailgunError>;
}

/// One outgoing Mailgun message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    payload: MessagePayload,
    files: MessageFiles,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self) -> &MessagePayload {
        &self.payload
    }

    pub fn files(&self) -> &MessageFiles {
        &self.files
    }

    pub fn into_parts(self) -> (MessagePayload, MessageFiles) {
        (self.payload, self.files)
    }

    /// Appends tags one at a time, in order.
    ///
    /// Fails with `TooManyTags` once the provider limit is reached; tags
    /// added before the failing one are kept.
    pub fn set_tags<I, T>(&mut self, tags: I) -> Result<&mut Self, MailgunError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for tag in tags {
            if self.payload.tags.len() >= TAG_LIMIT {
                return Err(MailgunError::TooManyTags { limit: TAG_LIMIT });
            }
            self.payload.tags.push(tag.into());
        }
        Ok(self)
    }

    pub fn tags(&self) -> &[String] {
        &self.payload.tags
    }

    pub fn set_click_tracking(&mut self, mode: ClickTracking) -> &mut Self {
        self.payload.click_tracking = Some(mode);
        self
    }

    pub fn click_tracking(&self) -> Option<ClickTracking> {
        self.payload.click_tracking
    }

    pub fn set_open_tracking(&mut self, enabled: bool) -> &mut Self {
        self.payload.open_tracking = Some(enabled);
        self
    }

    pub fn open_tracking(&self) -> Option<bool> {
        self.payload.open_tracking
    }

    /// Appends a campaign id; at most `CAMPAIGN_ID_LIMIT` per message
    pub fn set_campaign_id(&mut self, id: impl Into<String>) -> Result<&mut Self, MailgunError> {
        if self.payload.campaign_ids.len() >= CAMPAIGN_ID_LIMIT {
            return Err(MailgunError::TooManyParameters(format!(
                "a message carries at most {} campaign ids",
                CAMPAIGN_ID_LIMIT
            )));
        }
        self.payload.campaign_ids.push(id.into());
        Ok(self)
    }

    pub fn campaign_ids(&self) -> &[String] {
        &self.payload.campaign_ids
    }

    pub fn set_dkim(&mut self, enabled: bool) -> &mut Self {
        self.payload.dkim = Some(enabled);
        self
    }

    pub fn dkim(&self) -> Option<bool> {
        self.payload.dkim
    }

    /// In test mode Mailgun accepts the message but does not deliver it
    pub fn set_test_mode(&mut self, enabled: bool) -> &mut Self {
        self.payload.test_mode = Some(enabled);
        self
    }

    pub fn test_mode(&self) -> Option<bool> {
        self.payload.test_mode
    }

    /// Attaches a custom variable, sent JSON-encoded as `v:<name>`
    pub fn set_custom_variable<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<&mut Self, MailgunError> {
        let name = non_empty_name(name, "custom variable")?;
        let encoded = serde_json::to_string(value)?;
        self.payload.variables.insert(name, encoded);
        Ok(self)
    }

    pub fn custom_variable(&self, name: &str) -> Option<&str> {
        self.payload.variables.get(name).map(String::as_str)
    }

    /// Adds a custom MIME header, sent as `h:<name>`.
    ///
    /// `Reply-To` in any case is the same field as `set_reply_to`.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<&mut Self, MailgunError> {
        let name = non_empty_name(name, "header")?;
        if name.eq_ignore_ascii_case(REPLY_TO_HEADER) {
            return self.set_reply_to(value);
        }
        self.payload.headers.insert(name, value.to_string());
        Ok(self)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        if name.trim().eq_ignore_ascii_case(REPLY_TO_HEADER) {
            return self.reply_to();
        }
        self.payload.headers.get(name).map(String::as_str)
    }
}

const REPLY_TO_HEADER: &str = "reply-to";

fn non_empty_name(name: &str, kind: &str) -> Result<String, MailgunError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MailgunError::InvalidParameter(format!(
            "{} name must not be empty",
            kind
        )));
    }
    Ok(name.to_string())
}

fn add_recipients<I, A>(field: &mut Vec<String>, kind: &str, recipients: I) -> Result<(), MailgunError>
where
    I: IntoIterator<Item = A>,
    A: Into<EmailAddress>,
{
    for recipient in recipients {
        if field.len() >= RECIPIENT_COUNT_LIMIT {
            return Err(MailgunError::TooManyParameters(format!(
                "exceeded the maximum recipient count ({}) on the {} field",
                RECIPIENT_COUNT_LIMIT, kind
            )));
        }
        field.push(recipient.into().to_mailbox_string()?);
    }
    Ok(())
}

fn blank_to_placeholder(value: &str) -> String {
    if value.is_empty() {
        BLANK_PART.to_string()
    } else {
        value.to_string()
    }
}

impl MailMessage for Message {
    fn charset(&self) -> &str {
        DEFAULT_CHARSET
    }

    fn set_charset(&mut self, charset: &str) -> &mut Self {
        tracing::debug!(charset = %charset, "Ignoring charset, messages are always utf-8");
        self
    }

    fn from(&self) -> Option<&str> {
        self.payload.from.as_deref()
    }

    fn set_from(&mut self, from: impl Into<EmailAddress>) -> Result<&mut Self, MailgunError> {
        self.payload.from = Some(from.into().to_mailbox_string()?);
        Ok(self)
    }

    fn reply_to(&self) -> Option<&str> {
        self.payload.reply_to.as_deref()
    }

    fn set_reply_to(
        &mut self,
        reply_to: impl Into<EmailAddress>,
    ) -> Result<&mut Self, MailgunError> {
        self.payload.reply_to = Some(reply_to.into().to_mailbox_string()?);
        Ok(self)
    }

    fn to(&self) -> &[String] {
        &self.payload.to
    }

    fn set_to<I, A>(&mut self, recipients: I) -> Result<&mut Self, MailgunError>
    where
        I: IntoIterator<Item = A>,
        A: Into<EmailAddress>,
    {
        add_recipients(&mut self.payload.to, "to", recipients)?;
        Ok(self)
    }

    fn cc(&self) -> &[String] {
        &self.payload.cc
    }

    fn set_cc<I, A>(&mut self, recipients: I) -> Result<&mut Self, MailgunError>
    where
        I: IntoIterator<Item = A>,
        A: Into<EmailAddress>,
    {
        add_recipients(&mut self.payload.cc, "cc", recipients)?;
        Ok(self)
    }

    fn bcc(&self) -> &[String] {
        &self.payload.bcc
    }

    fn set_bcc<I, A>(&mut self, recipients: I) -> Result<&mut Self, MailgunError>
    where
        I: IntoIterator<Item = A>,
        A: Into<EmailAddress>,
    {
        add_recipients(&mut self.payload.bcc, "bcc", recipients)?;
        Ok(self)
    }

    fn subject(&self) -> Option<&str> {
        self.payload.subject.as_deref()
    }

    fn set_subject(&mut self, subject: &str) -> &mut Self {
        self.payload.subject = Some(blank_to_placeholder(subject));
        self
    }

    fn text_body(&self) -> Option<&str> {
        self.payload.text.as_deref()
    }

    fn set_text_body(&mut self, text: &str) -> &mut Self {
        self.payload.text = Some(blank_to_placeholder(text));
        self
    }

    fn html_body(&self) -> Option<&str> {
        self.payload.html.as_deref()
    }

    fn set_html_body(&mut self, html: &str) -> &mut Self {
        self.payload.html = Some(blank_to_placeholder(html));
        self
    }

    fn attach(&mut self, path: impl AsRef<Path>, file_name: Option<&str>) -> &mut Self {
        self.files
            .attachments
            .push(AttachmentRef::new(path, file_name));
        self
    }

    fn attach_content(
        &mut self,
        _content: &[u8],
        _file_name: Option<&str>,
    ) -> Result<&mut Self, MailgunError> {
        Err(MailgunError::NotSupported(
            "attach content is not supported, attach a file path instead".to_string(),
        ))
    }

    fn embed(&mut self, path: impl AsRef<Path>, file_name: Option<&str>) -> String {
        let inline = AttachmentRef::new(path, file_name);
        let cid = format!("cid:{}", inline.remote_name());
        self.files.inline.push(inline);
        cid
    }

    fn embed_content(
        &mut self,
        _content: &[u8],
        _file_name: Option<&str>,
    ) -> Result<String, MailgunError> {
        Err(MailgunError::NotSupported(
            "embed content is not supported, embed a file path instead".to_string(),
        ))
    }
}

/// Diagnostic dump of the payload and file list; not used for transport
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.payload)?;
        for (kind, files) in [
            ("attachment", &self.files.attachments),
            ("inline", &self.files.inline),
        ] {
            for file in files {
                writeln!(
                    f,
                    "{}: {} ({})",
                    kind,
                    file.path.display(),
                    file.remote_name()
                )?;
            }
        }
        Ok(())
    }
}
