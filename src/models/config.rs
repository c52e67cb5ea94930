/// Configuration models
use super::email::EmailAddress;
use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, TAG_LIMIT};
use crate::error::MailgunError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Click tracking mode: off, on, or on for the HTML part only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTracking {
    Disabled,
    Enabled,
    HtmlOnly,
}

impl ClickTracking {
    pub fn as_wire_value(&self) -> &'static str {
        match self {
            Self::Disabled => "no",
            Self::Enabled => "yes",
            Self::HtmlOnly => "htmlonly",
        }
    }
}

impl From<bool> for ClickTracking {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

impl FromStr for ClickTracking {
    type Err = MailgunError;

    /// Accepts exactly `true`, `false` and `html`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::Enabled),
            "false" => Ok(Self::Disabled),
            "html" => Ok(Self::HtmlOnly),
            other => Err(MailgunError::InvalidParameter(format!(
                "click tracking must be true, false or \"html\", got {:?}",
                other
            ))),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawClickTracking {
    Flag(bool),
    Mode(String),
}

impl<'de> Deserialize<'de> for ClickTracking {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawClickTracking::deserialize(deserializer)? {
            RawClickTracking::Flag(enabled) => Ok(enabled.into()),
            RawClickTracking::Mode(mode) if mode == "html" => Ok(Self::HtmlOnly),
            RawClickTracking::Mode(mode) => Err(D::Error::custom(format!(
                "click tracking must be true, false or \"html\", got {:?}",
                mode
            ))),
        }
    }
}

/// Campaign ids may be configured as a string or a plain number
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCampaignId {
    Text(String),
    Number(u64),
}

fn deserialize_campaign_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(
        Option::<RawCampaignId>::deserialize(deserializer)?.map(|raw| match raw {
            RawCampaignId::Text(id) => id,
            RawCampaignId::Number(id) => id.to_string(),
        }),
    )
}

impl Serialize for ClickTracking {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Enabled => serializer.serialize_bool(true),
            Self::HtmlOnly => serializer.serialize_str("html"),
        }
    }
}

/// Mailer configuration, built once at startup and never mutated afterwards
///
/// Both option spellings of the older adapters are accepted when
/// deserializing (`key`, `from_address`, `clicks_tracking_mode`,
/// `opens_tracking`).
#[derive(Clone, Deserialize, Serialize, TypedBuilder)]
pub struct MailerConfig {
    #[builder(setter(into))]
    pub domain: String,

    #[serde(alias = "key")]
    #[builder(setter(into))]
    pub api_key: String,

    #[serde(default, alias = "from_address")]
    #[builder(default, setter(strip_option, into))]
    pub from: Option<String>,

    #[serde(default)]
    #[builder(default, setter(strip_option, into))]
    pub from_name: Option<String>,

    #[serde(default)]
    #[builder(default)]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_campaign_id")]
    #[builder(default, setter(strip_option, into))]
    pub campaign_id: Option<String>,

    #[serde(default)]
    #[builder(default, setter(strip_option))]
    pub dkim: Option<bool>,

    #[serde(default)]
    #[builder(default, setter(strip_option))]
    pub test_mode: Option<bool>,

    #[serde(default, alias = "clicks_tracking_mode")]
    #[builder(default, setter(strip_option))]
    pub click_tracking: Option<ClickTracking>,

    #[serde(default, alias = "opens_tracking")]
    #[builder(default, setter(strip_option))]
    pub open_tracking: Option<bool>,

    /// API base URL
    #[serde(default = "default_endpoint")]
    #[builder(default = DEFAULT_ENDPOINT.to_string(), setter(into))]
    pub endpoint: String,

    /// Total request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    #[builder(default = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl MailerConfig {
    /// Fails with `MissingConfiguration` when the domain or API key is blank,
    /// and with `Config` when the domain is not a bare host name
    pub fn ensure_credentials(&self) -> Result<(), MailgunError> {
        let domain = self.domain.trim();
        if domain.is_empty() {
            return Err(MailgunError::MissingConfiguration(
                "domain is required".to_string(),
            ));
        }

        // The domain becomes a path segment under the API base URL
        if domain
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '?' | '#' | '@' | '%') || c.is_whitespace())
        {
            return Err(MailgunError::Config(format!(
                "domain must be a bare host name, got {:?}",
                self.domain
            )));
        }

        if self.api_key.trim().is_empty() {
            return Err(MailgunError::MissingConfiguration(
                "API key is required".to_string(),
            ));
        }

        Ok(())
    }

    /// Default sender, or `None` when no `from` is configured
    pub fn default_sender(&self) -> Option<EmailAddress> {
        self.from
            .as_deref()
            .filter(|from| !from.trim().is_empty())
            .map(|from| EmailAddress::new(from, self.from_name.clone()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates configuration is complete and consistent
    pub fn validate(&self) -> Result<(), MailgunError> {
        self.ensure_credentials()?;

        if let Some(sender) = self.default_sender() {
            sender.to_mailbox_string()?;
        }

        if self.tags.len() > TAG_LIMIT {
            return Err(MailgunError::TooManyTags { limit: TAG_LIMIT });
        }

        url::Url::parse(&self.endpoint).map_err(|e| {
            MailgunError::Config(format!("Invalid endpoint URL {}: {}", self.endpoint, e))
        })?;

        if self.timeout_secs == 0 {
            return Err(MailgunError::Config("timeout_secs must be > 0".to_string()));
        }

        Ok(())
    }
}

impl fmt::Debug for MailerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerConfig")
            .field("domain", &self.domain)
            .field("api_key", &"***")
            .field("from", &self.from)
            .field("from_name", &self.from_name)
            .field("tags", &self.tags)
            .field("campaign_id", &self.campaign_id)
            .field("dkim", &self.dkim)
            .field("test_mode", &self.test_mode)
            .field("click_tracking", &self.click_tracking)
            .field("open_tracking", &self.open_tracking)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
