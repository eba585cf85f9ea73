//! Share service configuration
//!
//! Values come from defaults, then the environment, then explicit builder
//! calls (the CLI maps its flags onto the builders).

use std::time::Duration;

/// Base address used when nothing is configured
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Environment variables consulted for the base address, in order
pub const APP_URL_VARS: [&str; 2] = ["ALLOT_APP_URL", "NEXT_PUBLIC_APP_URL"];

/// Environment variable that switches rate limiting off when set to `off`
pub const RATE_LIMIT_VAR: &str = "ALLOT_RATE_LIMIT";

/// Share service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareConfig {
    /// Public base address, without trailing `/`
    pub app_url: String,
    /// Most activities a shared chart may carry
    pub max_activities: usize,
    /// Limits on persisted shares
    pub rate_limit: RateLimitConfig,
}

impl ShareConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = APP_URL_VARS
            .iter()
            .filter_map(|&key| lookup(key))
            .find(|url| !url.trim().is_empty())
        {
            config = config.with_app_url(url);
        }

        if let Some(value) = lookup(RATE_LIMIT_VAR) {
            let value = value.trim().to_ascii_lowercase();
            if matches!(value.as_str(), "off" | "0" | "false" | "disabled") {
                config.rate_limit.enabled = false;
            }
        }

        config
    }

    /// With app url (trailing `/` trimmed)
    #[must_use]
    pub fn with_app_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.app_url = url.trim().trim_end_matches('/').to_owned();
        self
    }

    /// With max activities
    #[inline]
    #[must_use]
    pub fn with_max_activities(mut self, max: usize) -> Self {
        self.max_activities = max;
        self
    }

    /// With rate limit
    #[inline]
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Share page address for a segment
    #[must_use]
    pub fn share_url(&self, segment: &str) -> String {
        format!("{}/share/{segment}", self.app_url)
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            app_url: DEFAULT_APP_URL.to_owned(),
            max_activities: 10,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Sliding-window limit on persisted shares per caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Whether the limit is applied at all
    pub enabled: bool,
    /// Accepted requests per window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl RateLimitConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that never limits
    #[inline]
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// With max requests
    #[inline]
    #[must_use]
    pub fn with_max_requests(mut self, max: u32) -> Self {
        self.max_requests = max;
        self
    }

    /// With window
    #[inline]
    #[must_use]
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 10,
            window: Duration::from_secs(60 * 60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ShareConfig::new();
        assert_eq!(config.app_url, "http://localhost:3000");
        assert_eq!(config.max_activities, 10);
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window, Duration::from_secs(3600));
    }

    #[test]
    fn first_app_url_var_wins() {
        let config = ShareConfig::from_lookup(lookup(&[
            ("ALLOT_APP_URL", "https://allot.example/"),
            ("NEXT_PUBLIC_APP_URL", "https://other.example"),
        ]));
        assert_eq!(config.app_url, "https://allot.example");
    }

    #[test]
    fn falls_back_to_public_app_url() {
        let config = ShareConfig::from_lookup(lookup(&[
            ("ALLOT_APP_URL", "  "),
            ("NEXT_PUBLIC_APP_URL", "https://pie.example"),
        ]));
        assert_eq!(config.app_url, "https://pie.example");
    }

    #[test]
    fn rate_limit_can_be_switched_off() {
        let config = ShareConfig::from_lookup(lookup(&[("ALLOT_RATE_LIMIT", "OFF")]));
        assert!(!config.rate_limit.enabled);

        let config = ShareConfig::from_lookup(lookup(&[("ALLOT_RATE_LIMIT", "on")]));
        assert!(config.rate_limit.enabled);
    }

    #[test]
    fn share_url_joins_without_double_slash() {
        let config = ShareConfig::new().with_app_url("https://allot.example///");
        assert_eq!(config.share_url("42"), "https://allot.example/share/42");
    }
}
