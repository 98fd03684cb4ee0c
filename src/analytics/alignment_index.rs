//! Real-time Alignment Index (RAI)

use tracing::debug;

use crate::domain::{AnnualTarget, IntensitySample};
use crate::error::{ensure_finite, AnalyticsError};

/// Current intensity against the year's target intensity, capped at 100%
///
/// The target intensity scales `baseline_intensity` (assumed for the earliest
/// target year) by the ratio of this year's target emissions to the baseline
/// year's. `targets` must be sorted by year. Returns `Ok(None)` when there is
/// no latest sample or no target for `year`.
pub fn alignment_index(
    latest: Option<&IntensitySample>,
    targets: &[AnnualTarget],
    year: i32,
    baseline_intensity: f64,
) -> Result<Option<f64>, AnalyticsError> {
    let Some(latest) = latest else {
        debug!("rai omitted: no intensity data");
        return Ok(None);
    };
    let Some(current) = targets.iter().find(|t| t.year == year) else {
        debug!(year, "rai omitted: no target for current year");
        return Ok(None);
    };
    let Some(baseline) = targets.first() else {
        return Ok(None);
    };

    let target_intensity = ensure_finite(
        "alignment index target intensity",
        baseline_intensity * (current.target_emissions_mt / baseline.target_emissions_mt),
    )?;

    let intensity = latest.co2_intensity_g_per_kwh;
    let rai = if intensity > 0.0 {
        (target_intensity / intensity * 100.0).min(100.0)
    } else {
        100.0
    };
    Ok(Some(rai))
}
