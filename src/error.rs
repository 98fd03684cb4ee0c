use thiserror::Error;

/// Analytics engine error types
///
/// These never cross `GoalTracker::compute`; the orchestrator folds them into
/// the report's `error` field.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticsError {
    #[error("Insufficient data for goal tracking: intensity={intensity}, mix={mix}")]
    InsufficientData { intensity: usize, mix: usize },

    #[error("Non-finite result computing {metric}")]
    NonFinite { metric: &'static str },

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl AnalyticsError {
    /// Message surfaced in a degraded report
    pub fn report_message(&self) -> String {
        match self {
            AnalyticsError::InsufficientData { .. } => self.to_string(),
            _ => format!("Goal tracker computation failed: {}", self),
        }
    }
}

impl From<validator::ValidationErrors> for AnalyticsError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AnalyticsError::InvalidConfig(errors.to_string())
    }
}

/// Reject NaN/inf before it reaches the report
pub(crate) fn ensure_finite(metric: &'static str, value: f64) -> Result<f64, AnalyticsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticsError::NonFinite { metric })
    }
}
