use reminder_domain::{parse_utc_offset, FixedOffset};
use reminder_utils::create_random_secret;
use std::{path::PathBuf, str::FromStr, time::Duration};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to sign session tokens
    pub jwt_secret: String,
    /// Lifetime of session tokens in seconds
    pub jwt_expiry_secs: i64,
    /// How often the due-check job looks for due `Reminder`s
    pub reminder_check_interval: Duration,
    /// Offset used to interpret `remindAt` values that carry no offset
    pub reminder_utc_offset: FixedOffset,
    /// Directory uploaded images are stored in until they are processed
    pub upload_dir: PathBuf,
    pub openai: OpenAIConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub base_url: String,
    /// Address notifications are sent from
    pub sender: String,
    /// Address notifications are sent to when the owner has not set one
    pub default_recipient: Option<String>,
}

const DEFAULT_PORT: usize = 9000;
const DEFAULT_JWT_EXPIRY_SECS: i64 = 60 * 60;
const DEFAULT_CHECK_INTERVAL_SECS: u64 = 1;
const DEFAULT_UTC_OFFSET: &str = "+05:30";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|val| !val.trim().is_empty())
}

fn env_required_or_empty(key: &str) -> String {
    env_opt(key).unwrap_or_else(|| {
        warn!(
            "Did not find {} environment variable. Calls depending on it are going to fail.",
            key
        );
        String::new()
    })
}

fn env_parsed<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env_opt(key) {
        None => default,
        Some(val) => match val.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, val, default
                );
                default
            }
        },
    }
}

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match env_opt("JWT_SECRET") {
            Some(secret) => secret,
            None => {
                info!("Did not find JWT_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!("Secret for signing session tokens was generated and set to: {}", secret);
                secret
            }
        };

        let check_interval_secs =
            env_parsed("REMINDER_CHECK_INTERVAL_SECS", DEFAULT_CHECK_INTERVAL_SECS).max(1);

        let offset = env_or("REMINDER_UTC_OFFSET", DEFAULT_UTC_OFFSET);
        let reminder_utc_offset = match parse_utc_offset(&offset) {
            Some(offset) => offset,
            None => {
                warn!(
                    "The given REMINDER_UTC_OFFSET: {} is not valid, falling back to the default: {}.",
                    offset, DEFAULT_UTC_OFFSET
                );
                default_utc_offset()
            }
        };

        Self {
            port: env_parsed("PORT", DEFAULT_PORT),
            jwt_secret,
            jwt_expiry_secs: env_parsed("JWT_EXPIRY_SECS", DEFAULT_JWT_EXPIRY_SECS),
            reminder_check_interval: Duration::from_secs(check_interval_secs),
            reminder_utc_offset,
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
            openai: OpenAIConfig {
                api_key: env_required_or_empty("OPENAI_API_KEY"),
                base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                model: env_or("OPENAI_MODEL", "gpt-4o"),
            },
            notifications: NotificationConfig {
                account_sid: env_required_or_empty("ACCOUNT_SID"),
                auth_token: env_required_or_empty("AUTH_TOKEN"),
                base_url: env_or("TWILIO_BASE_URL", "https://api.twilio.com"),
                sender: env_or("NOTIFICATION_SENDER", "whatsapp:+14155238886"),
                default_recipient: env_opt("NOTIFICATION_RECIPIENT"),
            },
        }
    }
}

fn default_utc_offset() -> FixedOffset {
    parse_utc_offset(DEFAULT_UTC_OFFSET).unwrap()
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
