//! Pearson correlation between carbon intensity and renewable share

use statrs::statistics::Statistics;

use super::align::AlignedPairs;
use crate::domain::{CorrelationDirection, CorrelationResult, CorrelationStrength};

/// Correlate index-aligned pairs
///
/// Never fails: fewer than two pairs or a zero-variance side gives a weak,
/// positive, zero coefficient carrying the actual sample size.
pub fn correlate(pairs: &AlignedPairs) -> CorrelationResult {
    let n = pairs.len();
    if n < 2 {
        return CorrelationResult::degenerate(n);
    }

    let sx = pairs.intensity.iter().population_std_dev();
    let sy = pairs.renewable_share.iter().population_std_dev();
    let denominator = sx * sy;
    if !denominator.is_finite() || denominator == 0.0 {
        return CorrelationResult::degenerate(n);
    }

    let covariance = pairs
        .intensity
        .iter()
        .population_covariance(pairs.renewable_share.iter());
    let r = (covariance / denominator).clamp(-1.0, 1.0);
    if r.is_nan() {
        return CorrelationResult::degenerate(n);
    }

    CorrelationResult {
        correlation: (r * 1000.0).round() / 1000.0,
        strength: CorrelationStrength::from_coefficient(r),
        direction: if r >= 0.0 {
            CorrelationDirection::Positive
        } else {
            CorrelationDirection::Negative
        },
        sample_size: n,
    }
}
