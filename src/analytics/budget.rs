//! Year-to-date carbon budget tracking

use statrs::statistics::Statistics;
use tracing::debug;

use crate::domain::{AnnualTarget, BudgetStatus, IntensitySample, MixSample};
use crate::error::{ensure_finite, AnalyticsError};

/// Estimate emissions so far this year against the prorated annual target
///
/// The estimate assumes average generation at average intensity for every
/// elapsed hour. MW x h x g/kWh is kg, so one division by 1000 gives tonnes.
pub fn carbon_budget(
    current_target: Option<&AnnualTarget>,
    elapsed_days: u32,
    days_per_year: u32,
    intensity: &[IntensitySample],
    mix: &[MixSample],
) -> Result<Option<BudgetStatus>, AnalyticsError> {
    let Some(target) = current_target else {
        debug!("budget omitted: no target for current year");
        return Ok(None);
    };
    if intensity.is_empty() || mix.is_empty() {
        return Ok(None);
    }

    let annual_target_tons = target.target_emissions_mt * 1000.0;
    let ytd_budget_tons = ensure_finite(
        "ytd budget",
        annual_target_tons * (f64::from(elapsed_days) / f64::from(days_per_year)),
    )?;

    let avg_intensity = intensity.iter().map(|s| s.co2_intensity_g_per_kwh).mean();
    let avg_generation_mw = mix.iter().map(|s| s.total_mw()).mean();
    let elapsed_hours = f64::from(elapsed_days) * 24.0;
    let ytd_tons = ensure_finite(
        "ytd emissions",
        avg_generation_mw * elapsed_hours * avg_intensity / 1000.0,
    )?;

    let daily_rate = if elapsed_days > 0 {
        ytd_tons / f64::from(elapsed_days)
    } else {
        0.0
    };
    let days_ahead = if daily_rate != 0.0 {
        let days = ensure_finite("budget days ahead", (ytd_budget_tons - ytd_tons) / daily_rate)?;
        Some(days.round())
    } else {
        debug!("budget days_ahead omitted: zero daily emission rate");
        None
    };

    Ok(Some(BudgetStatus {
        ytd_tons: ytd_tons.round(),
        ytd_budget_tons: ytd_budget_tons.round(),
        days_ahead,
    }))
}
