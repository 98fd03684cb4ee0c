pub mod analytics;
pub mod config;
pub mod domain;
pub mod error;
pub mod telemetry;

pub use analytics::GoalTracker;
pub use config::EngineConfig;
pub use domain::{AnnualTarget, GoalTrackerReport, IntensitySample, MixSample};
pub use error::AnalyticsError;
