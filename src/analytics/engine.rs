use chrono::{DateTime, Datelike, Utc};
use tracing::{debug, instrument, warn};
use validator::Validate;

use super::{
    align, alignment_index::alignment_index, anomaly::detect_anomalies, budget::carbon_budget,
    correlation::correlate, pathway::project_pathway, velocity::decarbonization_velocity,
};
use crate::config::EngineConfig;
use crate::domain::{AnnualTarget, AnomalySummary, GoalTrackerReport, IntensitySample, MixSample};
use crate::error::AnalyticsError;

/// Goal tracker orchestrator
///
/// Stateless between calls: each invocation works on its own sorted copies of
/// the inputs and returns a fresh report.
#[derive(Debug, Clone, Default)]
pub struct GoalTracker {
    config: EngineConfig,
}

impl GoalTracker {
    pub fn new(config: EngineConfig) -> Result<Self, AnalyticsError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build a report against the current wall clock
    pub fn compute(
        &self,
        intensity: &[IntensitySample],
        mix: &[MixSample],
        targets: &[AnnualTarget],
    ) -> GoalTrackerReport {
        self.compute_at(intensity, mix, targets, Utc::now())
    }

    /// Build a report as of `as_of`
    ///
    /// Calendar quantities (current year, days elapsed) derive from `as_of`.
    /// Never fails: errors surface as an error-only report.
    #[instrument(skip_all, fields(as_of = %as_of))]
    pub fn compute_at(
        &self,
        intensity: &[IntensitySample],
        mix: &[MixSample],
        targets: &[AnnualTarget],
        as_of: DateTime<Utc>,
    ) -> GoalTrackerReport {
        match self.assemble(intensity, mix, targets, as_of) {
            Ok(report) => report,
            Err(error) => {
                warn!(%error, "goal tracker report degraded");
                GoalTrackerReport::failed(error.report_message())
            }
        }
    }

    fn assemble(
        &self,
        intensity: &[IntensitySample],
        mix: &[MixSample],
        targets: &[AnnualTarget],
        as_of: DateTime<Utc>,
    ) -> Result<GoalTrackerReport, AnalyticsError> {
        if intensity.is_empty() || mix.is_empty() {
            return Err(AnalyticsError::InsufficientData {
                intensity: intensity.len(),
                mix: mix.len(),
            });
        }

        let cfg = &self.config;
        let year = as_of.year();
        let elapsed_days = as_of.ordinal0();

        let intensity = align::chronological(intensity);
        let mix = align::chronological(mix);
        let targets = align::by_year(targets);
        let latest = intensity.last();
        let current_target = targets.iter().find(|t| t.year == year);

        debug!(
            intensity = intensity.len(),
            mix = mix.len(),
            targets = targets.len(),
            latest_intensity = latest.map(|s| s.co2_intensity_g_per_kwh),
            year,
            "computing goal tracker"
        );

        let anomalies = detect_anomalies(&intensity, cfg);
        let correlation = correlate(&align::pair_by_timestamp(&intensity, &mix));
        let rai_pct = alignment_index(latest, &targets, year, cfg.baseline_intensity_g_per_kwh)?;
        let budget =
            carbon_budget(current_target, elapsed_days, cfg.days_per_year, &intensity, &mix)?;
        let velocity = decarbonization_velocity(&intensity, current_target, elapsed_days, cfg)?;
        let pathway = project_pathway(velocity.as_ref(), latest, &targets, year)?;

        Ok(GoalTrackerReport {
            rai_pct,
            budget,
            velocity,
            pathway,
            anomalies: Some(AnomalySummary::from_records(&anomalies, cfg.recent_anomaly_limit)),
            correlation: Some(correlation),
            error: None,
        })
    }
}
