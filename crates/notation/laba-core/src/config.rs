//! Core configuration for laba-core.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::interp::EASING_COUNT;

/// Engine constants that the notation resolves against.
/// Every field has a default, so partial JSON objects are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pipe duration in seconds when no `d`/`D` is given; also the default literal of `d`/`D`.
    pub default_duration: f64,
    /// Fraction of `default_duration` used by the filler pipe that `,` inserts.
    pub pause_factor: f64,
    /// Global multiplier applied to every resolved pipe duration.
    pub time_scale: f64,

    /// Grid capacity enforced by the parser.
    pub max_pipes: usize,
    pub max_actions: usize,

    /// Index into the easing table used until an `e<N>` switches it.
    pub default_easing: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration: 0.87,
            pause_factor: 0.26,
            time_scale: 1.0,
            max_pipes: 40,
            max_actions: 40,
            default_easing: 3,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON object and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_duration.is_finite() || self.default_duration < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_duration must be finite and >= 0, got {}",
                self.default_duration
            )));
        }
        if !self.pause_factor.is_finite() || self.pause_factor < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pause_factor must be finite and >= 0, got {}",
                self.pause_factor
            )));
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "time_scale must be finite and > 0, got {}",
                self.time_scale
            )));
        }
        if self.max_pipes == 0 || self.max_actions == 0 {
            return Err(ConfigError::Invalid(
                "grid capacity must be at least 1x1".into(),
            ));
        }
        if self.default_easing >= EASING_COUNT {
            return Err(ConfigError::Invalid(format!(
                "default_easing {} is out of range (table has {} entries)",
                self.default_easing, EASING_COUNT
            )));
        }
        Ok(())
    }

    /// Duration of the pause pipe inserted by `,`.
    #[inline]
    pub fn pause_duration(&self) -> f64 {
        self.default_duration * self.pause_factor
    }
}
