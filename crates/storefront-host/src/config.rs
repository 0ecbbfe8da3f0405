use std::time::Duration;

use serde::Deserialize;

use storefront_core::preferences::{Currency, Language};
use storefront_core::session::SessionIdentity;

/// Name of the optional config file read from the working directory.
pub const CONFIG_FILE: &str = "storefront.toml";

/// Top-level host configuration, loaded from `storefront.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Milliseconds between download ticks.
    pub tick_interval_ms: u64,
    pub session: SessionIdentity,
    pub preferences: PreferenceDefaults,
    pub filters: FilterDefaults,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            session: SessionIdentity::default(),
            preferences: PreferenceDefaults::default(),
            filters: FilterDefaults::default(),
        }
    }
}

/// Initial currency and language labels.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PreferenceDefaults {
    pub currency: Currency,
    pub language: Language,
}

/// Initial filter toggles.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    pub show_adult_content: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(m) => write!(f, "failed to parse {CONFIG_FILE}: {m}"),
            Self::Invalid(m) => write!(f, "invalid configuration: {m}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl HostConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Parse a config document. Missing keys fall back to defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check values that would leave the host unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be > 0".to_string(),
            ));
        }
        if self.session.name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "session.name must not be empty".to_string(),
            ));
        }
        if self.session.email.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "session.email must not be empty".to_string(),
            ));
        }
        if self.tick_interval_ms > 60_000 {
            tracing::warn!(
                tick_interval_ms = self.tick_interval_ms,
                "Download ticks are more than a minute apart"
            );
        }
        Ok(())
    }

    /// Load config from `storefront.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {CONFIG_FILE}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("{e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => {
                tracing::info!("No {CONFIG_FILE} found, using defaults");
                Self::default()
            },
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply `STOREFRONT_*` overrides. `lookup` stands in for `std::env::var`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("STOREFRONT_TICK_INTERVAL_MS")
            && let Ok(n) = val.parse::<u64>()
        {
            self.tick_interval_ms = n;
        }
        if let Some(name) = lookup("STOREFRONT_SESSION_NAME")
            && !name.is_empty()
        {
            self.session.name = name;
        }
        if let Some(email) = lookup("STOREFRONT_SESSION_EMAIL")
            && !email.is_empty()
        {
            self.session.email = email;
        }
        if let Some(val) = lookup("STOREFRONT_SHOW_ADULT_CONTENT")
            && let Ok(flag) = val.parse::<bool>()
        {
            self.filters.show_adult_content = flag;
        }
    }
}
