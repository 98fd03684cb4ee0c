//! Decarbonization velocity: observed vs. required rate of intensity change

use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::{AnnualTarget, IntensitySample, VelocityStatus};
use crate::error::{ensure_finite, AnalyticsError};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compare the recent intensity trend with the trend needed to hit year end
///
/// Both rates are signed g/kWh per year, negative meaning decline. The
/// observed rate uses the measured time span of the trailing
/// `velocity_sample_count` samples. The year-end target is the current
/// intensity scaled by this year's target/actual emissions ratio, or by
/// `default_reduction_ratio` when there is no target.
pub fn decarbonization_velocity(
    sorted: &[IntensitySample],
    current_target: Option<&AnnualTarget>,
    elapsed_days: u32,
    cfg: &EngineConfig,
) -> Result<Option<VelocityStatus>, AnalyticsError> {
    let count = cfg.velocity_sample_count;
    if count < 2 || sorted.len() < count {
        debug!(samples = sorted.len(), required = count, "velocity omitted: too few samples");
        return Ok(None);
    }

    let recent = &sorted[sorted.len() - count..];
    let (first, last) = (&recent[0], &recent[count - 1]);
    let span_days = (last.timestamp - first.timestamp).num_milliseconds() as f64 / MILLIS_PER_DAY;
    if span_days <= 0.0 {
        debug!("velocity omitted: recent samples share one timestamp");
        return Ok(None);
    }

    let days_per_year = f64::from(cfg.days_per_year);
    let change = last.co2_intensity_g_per_kwh - first.co2_intensity_g_per_kwh;
    let v_actual = ensure_finite("observed velocity", change / span_days * days_per_year)?;

    let current = last.co2_intensity_g_per_kwh;
    let year_end_target = match current_target {
        Some(t) => t.target_emissions_mt / t.actual_emissions_mt * current,
        None => current * cfg.default_reduction_ratio,
    };
    let days_left = f64::from(cfg.days_per_year.saturating_sub(elapsed_days).max(1));
    let v_required = ensure_finite(
        "required velocity",
        (year_end_target - current) * days_per_year / days_left,
    )?;

    Ok(Some(VelocityStatus {
        on_track: v_actual <= v_required,
        v_actual_g_per_kwh_per_yr: round2(v_actual),
        v_required_g_per_kwh_per_yr: round2(v_required),
    }))
}
