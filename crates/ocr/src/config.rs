use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::{BoundedNormalizer, DateExtractor, Strategy};
use crate::filter::default_horizon;
use crate::resolve::{DateNormalizer, DEFAULT_JULIAN_BASE_YEAR};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which plausibility guarantee callers get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPolicy {
    /// Every recognizer, every constructible date.
    #[default]
    Permissive,
    /// Raw numeric matches only, between today and the horizon.
    Bounded,
}

impl std::fmt::Display for ExtractionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionPolicy::Permissive => write!(f, "permissive"),
            ExtractionPolicy::Bounded => write!(f, "bounded"),
        }
    }
}

impl std::str::FromStr for ExtractionPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "permissive" => Ok(ExtractionPolicy::Permissive),
            "bounded" => Ok(ExtractionPolicy::Bounded),
            other => Err(format!("Unknown extraction policy: '{other}'")),
        }
    }
}

/// Extraction settings, usually read from a TOML file:
///
/// ```toml
/// policy = "bounded"
/// horizon = "2035-01-01"
/// julian_base_year = 2020
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    pub policy: ExtractionPolicy,
    /// Last date the bounded policy accepts.
    pub horizon: NaiveDate,
    pub julian_base_year: i32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            policy: ExtractionPolicy::default(),
            horizon: default_horizon(),
            julian_base_year: DEFAULT_JULIAN_BASE_YEAR,
        }
    }
}

impl ExtractorConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: ExtractorConfig = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1000..=9990).contains(&self.julian_base_year) || self.julian_base_year % 10 != 0 {
            return Err(ConfigError::Invalid(format!(
                "julian_base_year must be the first year of a decade, got {}",
                self.julian_base_year
            )));
        }
        if !(1..=9999).contains(&self.horizon.year()) {
            return Err(ConfigError::Invalid(format!(
                "horizon must have a four-digit year, got {}",
                self.horizon
            )));
        }
        Ok(())
    }

    /// Build the configured strategy. `today` is the lower bound of the
    /// bounded policy and is ignored by the permissive one.
    pub fn build(&self, today: NaiveDate) -> Strategy {
        match self.policy {
            ExtractionPolicy::Permissive => {
                Strategy::Permissive(DateExtractor::new(DateNormalizer::new(self.julian_base_year)))
            }
            ExtractionPolicy::Bounded => Strategy::Bounded(BoundedNormalizer::new(today, self.horizon)),
        }
    }
}
