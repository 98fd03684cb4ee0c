use anyhow::Result;
use figment::{providers::{Env, Format, Serialized, Toml}, Figment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use validator::{Validate, ValidationError};

/// Reference intensity assumed for the earliest target year (g/kWh)
pub const DEFAULT_BASELINE_INTENSITY_G_PER_KWH: f64 = 400.0;

/// 24h lookback at 15-minute cadence
pub const DEFAULT_ANOMALY_WINDOW: usize = 96;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub inputs: InputConfig,
}

/// Tunables for the analytics engine
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(default)]
#[validate(schema(function = "validate_thresholds"))]
pub struct EngineConfig {
    /// Samples preceding each evaluated point in the anomaly window
    #[validate(range(min = 1))]
    pub window_size: usize,
    /// z-score above which a sample is flagged
    #[validate(range(min = 0.0))]
    pub anomaly_threshold: f64,
    /// z-score above which severity is medium
    pub medium_threshold: f64,
    /// z-score above which severity is high
    pub high_threshold: f64,
    /// Flagged samples carried in the summary's `recent` list
    pub recent_anomaly_limit: usize,
    #[validate(range(min = 1.0))]
    pub baseline_intensity_g_per_kwh: f64,
    /// Trailing samples used for the observed velocity
    #[validate(range(min = 2))]
    pub velocity_sample_count: usize,
    /// Year-end intensity as a fraction of current when no target exists
    #[validate(range(min = 0.0, max = 1.0))]
    pub default_reduction_ratio: f64,
    #[validate(range(min = 1))]
    pub days_per_year: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_ANOMALY_WINDOW,
            anomaly_threshold: 2.5,
            medium_threshold: 3.0,
            high_threshold: 3.5,
            recent_anomaly_limit: 10,
            baseline_intensity_g_per_kwh: DEFAULT_BASELINE_INTENSITY_G_PER_KWH,
            velocity_sample_count: 7,
            default_reduction_ratio: 0.9,
            days_per_year: 365,
        }
    }
}

fn validate_thresholds(cfg: &EngineConfig) -> Result<(), ValidationError> {
    if cfg.anomaly_threshold <= cfg.medium_threshold && cfg.medium_threshold <= cfg.high_threshold {
        Ok(())
    } else {
        Err(ValidationError::new("thresholds_not_ascending"))
    }
}

/// Snapshot files read by the binary before invoking the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub intensity_path: PathBuf,
    pub mix_path: PathBuf,
    pub targets_path: PathBuf,
    pub fetch_timeout_seconds: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            intensity_path: PathBuf::from("data/co2.json"),
            mix_path: PathBuf::from("data/mix.json"),
            targets_path: PathBuf::from("data/netzero.json"),
            fetch_timeout_seconds: 10,
        }
    }
}

impl InputConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("CGT__").split("__"));
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.window_size, 96);
        assert_eq!(cfg.baseline_intensity_g_per_kwh, 400.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let cfg = EngineConfig {
            window_size: 0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_descending_thresholds_rejected() {
        let cfg = EngineConfig {
            medium_threshold: 4.0,
            high_threshold: 3.5,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string("[engine]\nbaseline_intensity_g_per_kwh = 350.0\n"))
            .extract()
            .unwrap();
        assert_eq!(cfg.engine.baseline_intensity_g_per_kwh, 350.0);
        assert_eq!(cfg.engine.window_size, 96);
        assert_eq!(cfg.inputs.fetch_timeout_seconds, 10);
    }
}
