//! Net-zero pathway projection

use tracing::debug;

use crate::domain::{AnnualTarget, IntensitySample, PathwayPoint, PathwayProjection, VelocityStatus};
use crate::error::{ensure_finite, AnalyticsError};

/// Extrapolate current intensity to zero at the observed annual rate
///
/// Only meaningful while intensity is declining; a flat or rising trend, a
/// missing velocity or an empty target series yields `Ok(None)`.
pub fn project_pathway(
    velocity: Option<&VelocityStatus>,
    latest: Option<&IntensitySample>,
    targets: &[AnnualTarget],
    year: i32,
) -> Result<Option<PathwayProjection>, AnalyticsError> {
    if targets.is_empty() {
        return Ok(None);
    }
    let (Some(velocity), Some(latest)) = (velocity, latest) else {
        return Ok(None);
    };
    let rate = velocity.v_actual_g_per_kwh_per_yr;
    if rate >= 0.0 {
        debug!(rate, "pathway omitted: intensity not declining");
        return Ok(None);
    }

    let years_to_zero = ensure_finite(
        "pathway eta",
        (latest.co2_intensity_g_per_kwh / rate).abs(),
    )?;
    let eta_year = (f64::from(year) + years_to_zero).round() as i32;

    Ok(Some(PathwayProjection {
        eta_year,
        series: targets
            .iter()
            .map(|t| PathwayPoint {
                year: t.year,
                target_emissions_mt: t.target_emissions_mt,
            })
            .collect(),
    }))
}
