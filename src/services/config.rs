/// Configuration service - loads mailer config from environment variables
use crate::constants::*;
use crate::error::MailgunError;
use crate::models::{ClickTracking, MailerConfig};
use std::str::FromStr;

/// Environment variable-based configuration provider
pub struct EnvConfigProvider;

impl EnvConfigProvider {
    /// Loads and validates the configuration from the process environment
    pub fn load() -> Result<MailerConfig, MailgunError> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name to its value
    pub fn load_from<F>(lookup: F) -> Result<MailerConfig, MailgunError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let domain = get(ENV_DOMAIN).ok_or_else(|| {
            MailgunError::MissingConfiguration(format!("Missing {} env var", ENV_DOMAIN))
        })?;
        let api_key = get(ENV_API_KEY).ok_or_else(|| {
            MailgunError::MissingConfiguration(format!("Missing {} env var", ENV_API_KEY))
        })?;

        let tags = get(ENV_TAGS)
            .unwrap_or_default()
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string())
            .collect();

        let config = MailerConfig {
            domain,
            api_key,
            from: get(ENV_FROM),
            from_name: get(ENV_FROM_NAME),
            tags,
            campaign_id: get(ENV_CAMPAIGN_ID),
            dkim: get(ENV_DKIM).map(|v| parse_flag(ENV_DKIM, &v)).transpose()?,
            test_mode: get(ENV_TEST_MODE)
                .map(|v| parse_flag(ENV_TEST_MODE, &v))
                .transpose()?,
            click_tracking: get(ENV_CLICK_TRACKING)
                .map(|v| ClickTracking::from_str(&v))
                .transpose()?,
            open_tracking: get(ENV_OPEN_TRACKING)
                .map(|v| parse_flag(ENV_OPEN_TRACKING, &v))
                .transpose()?,
            endpoint: get(ENV_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout_secs: get(ENV_TIMEOUT_SECS)
                .map(|v| {
                    v.parse::<u64>().map_err(|e| {
                        MailgunError::Config(format!("Invalid {} {:?}: {}", ENV_TIMEOUT_SECS, v, e))
                    })
                })
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        config.validate()?;

        tracing::info!(domain = %config.domain, "Mailer configuration validated successfully");

        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, MailgunError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(MailgunError::Config(format!(
            "Invalid {} {:?}: expected true or false",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_env_config_missing_vars() {
        let result = EnvConfigProvider::load_from(lookup(&[(ENV_API_KEY, "key-123")]));
        assert!(matches!(result, Err(MailgunError::MissingConfiguration(_))));

        let result = EnvConfigProvider::load_from(lookup(&[(ENV_DOMAIN, "example.com")]));
        assert!(matches!(result, Err(MailgunError::MissingConfiguration(_))));
    }

    #[test]
    fn test_env_config_full() {
        let config = EnvConfigProvider::load_from(lookup(&[
            (ENV_DOMAIN, "example.com"),
            (ENV_API_KEY, "key-123"),
            (ENV_FROM, "noreply@example.com"),
            (ENV_FROM_NAME, "Example"),
            (ENV_TAGS, "sys, billing,"),
            (ENV_CAMPAIGN_ID, "spring"),
            (ENV_DKIM, "yes"),
            (ENV_TEST_MODE, "false"),
            (ENV_CLICK_TRACKING, "html"),
            (ENV_OPEN_TRACKING, "1"),
            (ENV_ENDPOINT, "https://api.eu.mailgun.net/v3"),
            (ENV_TIMEOUT_SECS, "10"),
        ]))
        .unwrap();

        assert_eq!(config.domain, "example.com");
        assert_eq!(config.tags, vec!["sys", "billing"]);
        assert_eq!(config.campaign_id.as_deref(), Some("spring"));
        assert_eq!(config.dkim, Some(true));
        assert_eq!(config.test_mode, Some(false));
        assert_eq!(config.click_tracking, Some(ClickTracking::HtmlOnly));
        assert_eq!(config.open_tracking, Some(true));
        assert_eq!(config.endpoint, "https://api.eu.mailgun.net/v3");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_env_config_defaults() {
        let config = EnvConfigProvider::load_from(lookup(&[
            (ENV_DOMAIN, "example.com"),
            (ENV_API_KEY, "key-123"),
            (ENV_TAGS, ""),
        ]))
        .unwrap();

        assert!(config.tags.is_empty());
        assert_eq!(config.from, None);
        assert_eq!(config.click_tracking, None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_env_config_rejects_bad_values() {
        let base = [(ENV_DOMAIN, "example.com"), (ENV_API_KEY, "key-123")];

        let mut vars = base.to_vec();
        vars.push((ENV_CLICK_TRACKING, "sometimes"));
        assert!(matches!(
            EnvConfigProvider::load_from(lookup(&vars)),
            Err(MailgunError::InvalidParameter(_))
        ));

        let mut vars = base.to_vec();
        vars.push((ENV_DKIM, "maybe"));
        assert!(matches!(
            EnvConfigProvider::load_from(lookup(&vars)),
            Err(MailgunError::Config(_))
        ));

        let mut vars = base.to_vec();
        vars.push((ENV_TIMEOUT_SECS, "soon"));
        assert!(matches!(
            EnvConfigProvider::load_from(lookup(&vars)),
            Err(MailgunError::Config(_))
        ));
    }
}
