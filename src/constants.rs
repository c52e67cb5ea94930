/// Application constants
///
/// Provider limits and defaults. Limits mirror what the Mailgun API accepts
/// for a single message.
// ============================================================================
// Endpoint Constants
// ============================================================================
/// Default Mailgun API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.mailgun.net/v3";

/// HTTP basic auth user name expected by the Mailgun API
pub const API_USER: &str = "api";

/// Path suffix of the send endpoint, appended to the sending domain
pub const MESSAGES_PATH: &str = "messages";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("mailgun-mailer/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Timing Constants
// ============================================================================

/// Total request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Message Limits
// ============================================================================

/// Maximum number of tags per message
pub const TAG_LIMIT: usize = 3;

/// Maximum number of campaign ids per message
pub const CAMPAIGN_ID_LIMIT: usize = 3;

/// Maximum number of recipients per recipient field (to, cc, bcc)
pub const RECIPIENT_COUNT_LIMIT: usize = 1000;

/// Charset of every message; not configurable
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Stand-in for blank subject and body parts, which the API rejects
pub const BLANK_PART: &str = " ";

// ============================================================================
// Environment Variables
// ============================================================================

pub const ENV_DOMAIN: &str = "MAILGUN_DOMAIN";
pub const ENV_API_KEY: &str = "MAILGUN_API_KEY";
pub const ENV_FROM: &str = "MAILGUN_FROM";
pub const ENV_FROM_NAME: &str = "MAILGUN_FROM_NAME";
pub const ENV_TAGS: &str = "MAILGUN_TAGS";
pub const ENV_CAMPAIGN_ID: &str = "MAILGUN_CAMPAIGN_ID";
pub const ENV_DKIM: &str = "MAILGUN_DKIM";
pub const ENV_TEST_MODE: &str = "MAILGUN_TEST_MODE";
pub const ENV_CLICK_TRACKING: &str = "MAILGUN_CLICK_TRACKING";
pub const ENV_OPEN_TRACKING: &str = "MAILGUN_OPEN_TRACKING";
pub const ENV_ENDPOINT: &str = "MAILGUN_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "MAILGUN_TIMEOUT_SECS";
