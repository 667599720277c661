//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Webhook value shipped in templates; treated as "not configured".
pub const WEBHOOK_PLACEHOLDER: &str = "YOUR_DISCORD_WEBHOOK_URL_HERE";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// What to poll and how often
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Webhook notification settings
    #[serde(default)]
    pub notifier: NotifierConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `API_URL`, `BOOK_URL` and `DISCORD_WEBHOOK_URL` overrides.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("API_URL") {
            self.monitor.inventory_url = v;
        }
        if let Some(v) = get("BOOK_URL") {
            self.monitor.booking_url = v;
        }
        if let Some(v) = get("DISCORD_WEBHOOK_URL") {
            self.notifier.webhook_url = v;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.monitor.inventory_url).map_err(|e| {
            AppError::validation(format!("monitor.inventory_url is not a valid URL: {e}"))
        })?;
        if self.monitor.target_car.is_empty() {
            return Err(AppError::validation("monitor.target_car is empty"));
        }
        if self.monitor.threshold == 0 {
            return Err(AppError::validation("monitor.threshold must be > 0"));
        }
        if self.monitor.check_interval_secs == 0 {
            return Err(AppError::validation(
                "monitor.check_interval_secs must be > 0",
            ));
        }
        if self.monitor.max_runtime_secs == 0 {
            return Err(AppError::validation("monitor.max_runtime_secs must be > 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        self.notifier.timezone()?;
        self.notifier.webhook()?;
        Ok(())
    }
}

/// Polling target and schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Inventory endpoint polled every cycle
    #[serde(default = "defaults::inventory_url")]
    pub inventory_url: String,

    /// Booking page linked from notifications
    #[serde(default = "defaults::booking_url")]
    pub booking_url: String,

    /// Physical car name, matched exactly
    #[serde(default = "defaults::target_car")]
    pub target_car: String,

    /// Minimum available seats before notifying
    #[serde(default = "defaults::threshold")]
    pub threshold: usize,

    #[serde(default = "defaults::check_interval")]
    pub check_interval_secs: u64,

    /// Self-termination deadline measured from startup
    #[serde(default = "defaults::max_runtime")]
    pub max_runtime_secs: u64,
}

impl MonitorConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    pub fn max_runtime(&self) -> Duration {
        Duration::from_secs(self.max_runtime_secs)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            inventory_url: defaults::inventory_url(),
            booking_url: defaults::booking_url(),
            target_car: defaults::target_car(),
            threshold: defaults::threshold(),
            check_interval_secs: defaults::check_interval(),
            max_runtime_secs: defaults::max_runtime(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Webhook notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    #[serde(default = "defaults::webhook_url")]
    pub webhook_url: String,

    /// IANA time zone used for the check timestamp
    #[serde(default = "defaults::timezone")]
    pub timezone: String,
}

impl NotifierConfig {
    /// Parsed webhook URL, or `None` when left empty or at the placeholder.
    pub fn webhook(&self) -> Result<Option<Url>> {
        let raw = self.webhook_url.trim();
        if raw.is_empty() || raw == WEBHOOK_PLACEHOLDER {
            return Ok(None);
        }
        Url::parse(raw)
            .map(Some)
            .map_err(|e| AppError::validation(format!("notifier.webhook_url is invalid: {e}")))
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            AppError::validation(format!("Unknown notifier.timezone: {}", self.timezone))
        })
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: defaults::webhook_url(),
            timezone: defaults::timezone(),
        }
    }
}

mod defaults {
    // Monitor defaults
    pub fn inventory_url() -> String {
        "https://common-api.sagano.linktivity.io/v1/inventories/2025-11-03/services/37?product_id=51&base_booking_id=".into()
    }
    pub fn booking_url() -> String {
        "https://ars-saganokanko.triplabo.jp/activity/zt/LINKTIVITY-YRBTL/".into()
    }
    pub fn target_car() -> String {
        "2号車".into()
    }
    pub fn threshold() -> usize {
        4
    }
    pub fn check_interval() -> u64 {
        20 * 60
    }
    pub fn max_runtime() -> u64 {
        // 5.9 hours
        5 * 60 * 60 + 54 * 60
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        concat!("seat-monitor/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Notifier defaults
    pub fn webhook_url() -> String {
        super::WEBHOOK_PLACEHOLDER.into()
    }
    pub fn timezone() -> String {
        "Asia/Taipei".into()
    }
}
