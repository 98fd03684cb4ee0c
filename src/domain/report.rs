use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anomaly severity band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A flagged intensity sample
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnomalyRecord {
    pub timestamp: DateTime<Utc>,
    pub co2_intensity_g_per_kwh: f64,
    pub is_anomaly: bool,
    /// z-score magnitude against the preceding window
    pub deviation: f64,
    pub severity: Severity,
}

/// Correlation strength band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    /// Band an absolute coefficient
    pub fn from_coefficient(r: f64) -> Self {
        let abs = r.abs();
        if abs > 0.7 {
            Self::Strong
        } else if abs > 0.3 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

/// Pearson correlation between intensity and renewable share
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorrelationResult {
    /// Coefficient in [-1, 1], rounded to 3 decimals
    pub correlation: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
    pub sample_size: usize,
}

impl CorrelationResult {
    /// Result reported when the coefficient cannot be computed
    pub fn degenerate(sample_size: usize) -> Self {
        Self {
            correlation: 0.0,
            strength: CorrelationStrength::Weak,
            direction: CorrelationDirection::Positive,
            sample_size,
        }
    }
}

/// Year-to-date carbon budget position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetStatus {
    /// Estimated emissions so far this year (t)
    pub ytd_tons: f64,
    /// Prorated allowance so far this year (t)
    pub ytd_budget_tons: f64,
    /// Days of emissions left in the prorated budget; negative when behind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_ahead: Option<f64>,
}

/// Observed vs. required rate of intensity change (g/kWh per year)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VelocityStatus {
    pub on_track: bool,
    pub v_actual_g_per_kwh_per_yr: f64,
    pub v_required_g_per_kwh_per_yr: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathwayPoint {
    pub year: i32,
    pub target_emissions_mt: f64,
}

/// Linear projection to zero intensity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathwayProjection {
    pub eta_year: i32,
    pub series: Vec<PathwayPoint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityHistogram {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl SeverityHistogram {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnomalySummary {
    /// Total flagged samples
    pub count: usize,
    /// Most recent flagged samples, oldest first
    pub recent: Vec<AnomalyRecord>,
    /// Histogram over all flagged samples
    pub severity: SeverityHistogram,
}

impl AnomalySummary {
    pub fn from_records(records: &[AnomalyRecord], recent_limit: usize) -> Self {
        let mut severity = SeverityHistogram::default();
        for record in records {
            severity.record(record.severity);
        }
        let skip = records.len().saturating_sub(recent_limit);
        Self {
            count: records.len(),
            recent: records[skip..].to_vec(),
            severity,
        }
    }
}

/// Goal tracker output
///
/// Absent fields mean "not computable under current data", never zero.
/// When `error` is set every other field is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GoalTrackerReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rai_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<VelocityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathway: Option<PathwayProjection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomalies: Option<AnomalySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GoalTrackerReport {
    /// Error-only report
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}
