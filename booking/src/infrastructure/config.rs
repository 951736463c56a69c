/// Booking configuration loaded from TOML
use crate::application::services::{SessionOptions, DEFAULT_START_HOUR};
use crate::domain::aggregates::DEFAULT_DURATION_HOURS;
use crate::domain::services::{
    AvailabilityCalculator, Clock, PricingEngine, DEFAULT_MAX_SCAN_DAYS,
    DEFAULT_MINIMUM_BILLABLE_HOURS,
};
use crate::domain::value_objects::LocalizedText;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub trait Validate {
    fn validate(&self) -> ConfigResult<()>;
}

fn validate_range(field: &str, value: u32, min: u32, max: u32) -> ConfigResult<()> {
    if value < min || value > max {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("{} is outside {}..={}", value, min, max),
        });
    }
    Ok(())
}

/// Tunables of the booking core; every field has a default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Days scanned when looking for the earliest available date
    pub max_availability_scan_days: u32,
    /// Length of a booking when only the start is chosen
    pub default_duration_hours: u32,
    pub minimum_billable_hours: u32,
    /// Hour of day a reset start date lands on
    pub default_start_hour: u32,
    pub default_language: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        BookingConfig {
            max_availability_scan_days: DEFAULT_MAX_SCAN_DAYS,
            default_duration_hours: DEFAULT_DURATION_HOURS,
            minimum_billable_hours: DEFAULT_MINIMUM_BILLABLE_HOURS,
            default_start_hour: DEFAULT_START_HOUR,
            default_language: LocalizedText::FALLBACK_LANGUAGE.to_string(),
        }
    }
}

impl BookingConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: BookingConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn availability<C: Clock>(&self, clock: C) -> AvailabilityCalculator<C> {
        AvailabilityCalculator::new(clock).with_max_scan_days(self.max_availability_scan_days)
    }

    pub fn pricing(&self) -> PricingEngine {
        PricingEngine::new(self.minimum_billable_hours)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            default_start_hour: self.default_start_hour,
            default_duration_hours: self.default_duration_hours,
            pricing: self.pricing(),
        }
    }
}

impl Validate for BookingConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_range("max_availability_scan_days", self.max_availability_scan_days, 1, 36_500)?;
        validate_range("default_duration_hours", self.default_duration_hours, 1, 24 * 30)?;
        validate_range("minimum_billable_hours", self.minimum_billable_hours, 1, 24 * 30)?;
        validate_range("default_start_hour", self.default_start_hour, 0, 23)?;

        if self.default_language.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "default_language".to_string(),
                reason: "language code cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}
