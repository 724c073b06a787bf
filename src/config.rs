use std::env;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_CAPACITY: usize = 2048;
pub const DEFAULT_CLIP_THRESHOLD: f32 = 0.99;
pub const DEFAULT_UPDATE_INTERVAL_MS: f64 = 50.0;
pub const DEFAULT_SAMPLE_RATE: f64 = 48000.0;

/// Construction parameters for a meter and its reporting schedule.
///
/// Missing JSON fields fall back to the defaults, so a host can pass `{}`
/// or just `{"capacity": 1024}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    /// Signed so hosts can send any integer; non-positive values are
    /// rejected when the meter is built.
    pub capacity: i64,
    /// Samples with a magnitude above this count as clipped.
    pub clip_threshold: f32,
    pub update_interval_ms: f64,
    pub sample_rate: f64,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY as i64,
            clip_threshold: DEFAULT_CLIP_THRESHOLD,
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl MeterConfig {
    /// Reads overrides from `SOUNDMETER_*` environment variables.
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env::var("SOUNDMETER_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),
            clip_threshold: env::var("SOUNDMETER_CLIP_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.clip_threshold),
            update_interval_ms: env::var("SOUNDMETER_UPDATE_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.update_interval_ms),
            sample_rate: env::var("SOUNDMETER_SAMPLE_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sample_rate),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeterError;

    #[test]
    fn test_defaults_match_worklet() {
        let config = MeterConfig::default();
        assert_eq!(config.capacity, 2048);
        assert_eq!(config.clip_threshold, 0.99);
        assert_eq!(config.update_interval_ms, 50.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MeterConfig::from_json(r#"{"capacity": 256}"#).unwrap();
        assert_eq!(config.capacity, 256);
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_malformed_json() {
        let err = MeterConfig::from_json("{capacity").unwrap_err();
        assert!(matches!(err, MeterError::Config(_)));
    }

    #[test]
    fn test_from_env_overrides() {
        env::set_var("SOUNDMETER_CAPACITY", "512");
        env::set_var("SOUNDMETER_SAMPLE_RATE", "not-a-number");
        let config = MeterConfig::from_env();
        env::remove_var("SOUNDMETER_CAPACITY");
        env::remove_var("SOUNDMETER_SAMPLE_RATE");

        assert_eq!(config.capacity, 512);
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
    }
}
