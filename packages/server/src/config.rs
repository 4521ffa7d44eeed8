use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// How often the sweep scans every room.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Minimum gap between sweep announcements for one room, unless the room overrides it.
pub const DEFAULT_MIN_NOTIFICATION_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Notifications are off entirely when no bot token is configured
    pub slack_bot_token: Option<String>,
    pub slack_api_base_url: String,
    pub sweep_interval: Duration,
    pub min_notification_interval: Duration,
    pub rooms_file: Option<PathBuf>,
}

/// The part of the configuration the notification engine reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierSettings {
    pub sweep_interval: Duration,
    pub default_min_interval: Duration,
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            default_min_interval: DEFAULT_MIN_NOTIFICATION_INTERVAL,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            slack_bot_token: non_empty(env::var("SLACK_BOT_TOKEN").ok()),
            slack_api_base_url: env::var("SLACK_API_BASE_URL")
                .unwrap_or_else(|_| slack::DEFAULT_API_BASE.to_string()),
            sweep_interval: parse_secs(
                "NOTIFIER_SWEEP_INTERVAL_SECS",
                env::var("NOTIFIER_SWEEP_INTERVAL_SECS").ok(),
                DEFAULT_SWEEP_INTERVAL,
            )?,
            min_notification_interval: parse_secs(
                "NOTIFIER_MIN_NOTIFICATION_INTERVAL_SECS",
                env::var("NOTIFIER_MIN_NOTIFICATION_INTERVAL_SECS").ok(),
                DEFAULT_MIN_NOTIFICATION_INTERVAL,
            )?,
            rooms_file: non_empty(env::var("NOTIFIER_ROOMS_FILE").ok()).map(PathBuf::from),
        })
    }

    pub fn notifier_settings(&self) -> NotifierSettings {
        NotifierSettings {
            sweep_interval: self.sweep_interval,
            default_min_interval: self.min_notification_interval,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_secs(name: &str, value: Option<String>, default: Duration) -> Result<Duration> {
    match non_empty(value) {
        None => Ok(default),
        Some(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", name))?;
            anyhow::ensure!(secs > 0, "{} must be greater than zero", name);
            Ok(Duration::from_secs(secs))
        }
    }
}
