//! Application configuration
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables. Credentials (the FRED API key) only ever arrive this way.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{PricerError, PricerResult};

/// Environment variable holding the FRED API key
pub const ENV_FRED_API_KEY: &str = "FRED_API_KEY";
/// Environment variable overriding the fallback risk-free rate
pub const ENV_FALLBACK_RATE: &str = "BS_OPTIONS_FALLBACK_RATE";
/// Risk-free rate used when no treasury yield is available
pub const DEFAULT_FALLBACK_RATE: f64 = 0.045;

/// Configuration for the data providers and the shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Yahoo Finance settings
    pub yahoo: YahooConfig,
    /// FRED settings
    pub fred: FredConfig,
    /// Rate used when no treasury yield can be fetched
    pub fallback_rate: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            yahoo: YahooConfig::default(),
            fred: FredConfig::default(),
            fallback_rate: DEFAULT_FALLBACK_RATE,
        }
    }
}

/// Yahoo Finance client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YahooConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com/v7/finance".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            timeout_secs: 10,
        }
    }
}

/// FRED (St. Louis Fed) client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FredConfig {
    pub base_url: String,
    /// API key; usually supplied through `FRED_API_KEY`
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for FredConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.stlouisfed.org/fred".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> PricerResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| PricerError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, then apply environment overrides.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(path: Option<&Path>) -> PricerResult<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let text = std::fs::read_to_string(path)?;
                tracing::debug!("Loaded configuration from {}", path.display());
                Self::from_toml_str(&text)?
            }
            Some(path) => {
                tracing::debug!("No configuration at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process env)
    pub fn apply_env<F>(&mut self, lookup: F) -> PricerResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_FRED_API_KEY) {
            let key = key.trim();
            if !key.is_empty() {
                self.fred.api_key = Some(key.to_string());
            }
        }

        if let Some(rate) = lookup(ENV_FALLBACK_RATE) {
            self.fallback_rate = rate.trim().parse().map_err(|_| {
                PricerError::config(format!("{} is not a number: {}", ENV_FALLBACK_RATE, rate))
            })?;
        }

        self.validate()
    }

    fn validate(&self) -> PricerResult<()> {
        if !self.fallback_rate.is_finite() {
            return Err(PricerError::config("fallback_rate must be finite"));
        }
        if self.yahoo.timeout_secs == 0 || self.fred.timeout_secs == 0 {
            return Err(PricerError::config("timeouts must be at least one second"));
        }
        Ok(())
    }
}
