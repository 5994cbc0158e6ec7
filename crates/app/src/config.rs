use std::fmt;
use std::time::Duration;

use services::{AppServicesOptions, DEFAULT_LESSON_DELAY, NavigationPolicy};

pub const LOG_ENV: &str = "GRAMMAR_LOG";
pub const LESSON_DELAY_ENV: &str = "GRAMMAR_LESSON_DELAY_MS";
pub const NAVIGATION_ENV: &str = "GRAMMAR_NAVIGATION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidDelay { raw: String },
    InvalidNavigation { raw: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDelay { raw } => {
                write!(f, "{LESSON_DELAY_ENV} must be a number of milliseconds, got {raw}")
            }
            ConfigError::InvalidNavigation { raw } => {
                write!(f, "{NAVIGATION_ENV} must be `answered` or `all`, got {raw}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings for the binary. Flags override these after `from_env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_filter: String,
    pub lesson_delay: Duration,
    pub navigation: NavigationPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            lesson_delay: DEFAULT_LESSON_DELAY,
            navigation: NavigationPolicy::default(),
        }
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(filter) = lookup(LOG_ENV).or_else(|| lookup("RUST_LOG")) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }
        if let Some(raw) = lookup(LESSON_DELAY_ENV) {
            config.lesson_delay = parse_delay_ms(&raw)?;
        }
        if let Some(raw) = lookup(NAVIGATION_ENV) {
            config.navigation = parse_navigation(&raw)?;
        }

        Ok(config)
    }

    #[must_use]
    pub fn service_options(&self) -> AppServicesOptions {
        AppServicesOptions {
            lesson_delay: self.lesson_delay,
            navigation: self.navigation,
        }
    }
}

pub fn parse_delay_ms(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidDelay {
            raw: raw.to_string(),
        })
}

pub fn parse_navigation(raw: &str) -> Result<NavigationPolicy, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "answered" | "answered-only" => Ok(NavigationPolicy::AnsweredOnly),
        "all" | "all-questions" => Ok(NavigationPolicy::AllQuestions),
        _ => Err(ConfigError::InvalidNavigation {
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.lesson_delay, Duration::from_secs(1));
    }

    #[test]
    fn reads_all_variables() {
        let config = config_from(&[
            (LOG_ENV, "debug"),
            (LESSON_DELAY_ENV, "0"),
            (NAVIGATION_ENV, "all"),
        ])
        .unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.lesson_delay, Duration::ZERO);
        assert_eq!(config.navigation, NavigationPolicy::AllQuestions);
    }

    #[test]
    fn falls_back_to_rust_log() {
        let config = config_from(&[("RUST_LOG", "services=trace")]).unwrap();
        assert_eq!(config.log_filter, "services=trace");
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            config_from(&[(LESSON_DELAY_ENV, "soon")]).unwrap_err(),
            ConfigError::InvalidDelay { raw: "soon".into() }
        );
        assert!(matches!(
            config_from(&[(NAVIGATION_ENV, "sideways")]),
            Err(ConfigError::InvalidNavigation { .. })
        ));
    }
}
