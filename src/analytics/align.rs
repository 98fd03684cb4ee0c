//! Series alignment
//!
//! Sorting and joining of the input series. Inputs are never mutated; each
//! function returns an owned, ordered copy.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::collections::HashMap;

use crate::domain::{AnnualTarget, IntensitySample, MixSample, Timestamped};

/// Stable ascending sort by timestamp
pub fn chronological<T: Timestamped + Clone>(series: &[T]) -> Vec<T> {
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|s| s.timestamp());
    sorted
}

/// Ascending by year, one record per year (the first supplied wins)
pub fn by_year(targets: &[AnnualTarget]) -> Vec<AnnualTarget> {
    targets
        .iter()
        .copied()
        .sorted_by_key(|t| t.year)
        .unique_by(|t| t.year)
        .collect()
}

/// Index-aligned (intensity, renewable share) pairs over common timestamps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedPairs {
    pub timestamps: Vec<DateTime<Utc>>,
    pub intensity: Vec<f64>,
    pub renewable_share: Vec<f64>,
}

impl AlignedPairs {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Join intensity and mix on exact timestamp
///
/// The first occurrence of a timestamp on either side is used. Fewer than two
/// common timestamps yields an empty pairing.
pub fn pair_by_timestamp(intensity: &[IntensitySample], mix: &[MixSample]) -> AlignedPairs {
    let mut share_at: HashMap<DateTime<Utc>, f64> = HashMap::with_capacity(mix.len());
    for sample in mix {
        share_at
            .entry(sample.timestamp)
            .or_insert(sample.renewable_share_pct);
    }

    let mut pairs = AlignedPairs::default();
    for sample in chronological(intensity)
        .into_iter()
        .unique_by(|s| s.timestamp)
    {
        if let Some(share) = share_at.get(&sample.timestamp) {
            pairs.timestamps.push(sample.timestamp);
            pairs.intensity.push(sample.co2_intensity_g_per_kwh);
            pairs.renewable_share.push(*share);
        }
    }

    if pairs.len() < 2 {
        return AlignedPairs::default();
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn mix(minutes: i64, share: f64) -> MixSample {
        MixSample {
            timestamp: t(minutes),
            hydro_mw: 0.0,
            wind_mw: 0.0,
            solar_mw: 0.0,
            nuclear_mw: 0.0,
            fossil_mw: 0.0,
            renewable_share_pct: share,
        }
    }

    fn target(year: i32, target_mt: f64) -> AnnualTarget {
        AnnualTarget {
            year,
            actual_emissions_mt: target_mt,
            target_emissions_mt: target_mt,
            alignment_pct: 100.0,
        }
    }

    #[test]
    fn test_chronological_does_not_mutate_input() {
        let input = vec![
            IntensitySample::new(t(30), 3.0),
            IntensitySample::new(t(0), 1.0),
            IntensitySample::new(t(15), 2.0),
        ];
        let sorted = chronological(&input);

        assert_eq!(
            sorted.iter().map(|s| s.co2_intensity_g_per_kwh).collect::<Vec<_>>(),
            vec![1.0, 2.0, 3.0]
        );
        assert_eq!(input[0].co2_intensity_g_per_kwh, 3.0);
    }

    #[test]
    fn test_chronological_keeps_duplicate_timestamps() {
        let input = vec![
            IntensitySample::new(t(15), 2.0),
            IntensitySample::new(t(0), 1.0),
            IntensitySample::new(t(15), 5.0),
        ];
        let sorted = chronological(&input);
        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted[1].co2_intensity_g_per_kwh, 2.0);
        assert_eq!(sorted[2].co2_intensity_g_per_kwh, 5.0);
    }

    #[test]
    fn test_by_year_sorts_and_deduplicates() {
        let targets = vec![target(2026, 80.0), target(2024, 100.0), target(2026, 75.0)];
        let sorted = by_year(&targets);

        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].year, 2024);
        assert_eq!(sorted[1].target_emissions_mt, 80.0);
    }

    #[test]
    fn test_pair_by_timestamp_intersects() {
        let intensity = vec![
            IntensitySample::new(t(30), 300.0),
            IntensitySample::new(t(0), 100.0),
            IntensitySample::new(t(15), 200.0),
        ];
        let mix = vec![mix(15, 20.0), mix(30, 10.0), mix(45, 5.0)];

        let pairs = pair_by_timestamp(&intensity, &mix);

        assert_eq!(pairs.timestamps, vec![t(15), t(30)]);
        assert_eq!(pairs.intensity, vec![200.0, 300.0]);
        assert_eq!(pairs.renewable_share, vec![20.0, 10.0]);
    }

    #[test]
    fn test_pair_by_timestamp_uses_first_occurrence() {
        let intensity = vec![
            IntensitySample::new(t(15), 210.0),
            IntensitySample::new(t(0), 100.0),
            IntensitySample::new(t(15), 999.0),
            IntensitySample::new(t(0), 555.0),
        ];
        let mix = vec![mix(0, 40.0), mix(15, 35.0), mix(0, 1.0), mix(15, 2.0)];

        let pairs = pair_by_timestamp(&intensity, &mix);

        assert_eq!(pairs.timestamps, vec![t(0), t(15)]);
        assert_eq!(pairs.intensity, vec![100.0, 210.0]);
        assert_eq!(pairs.renewable_share, vec![40.0, 35.0]);
    }

    #[test]
    fn test_pair_by_timestamp_needs_two_points() {
        let intensity = vec![IntensitySample::new(t(0), 100.0), IntensitySample::new(t(15), 90.0)];
        let mix = vec![mix(0, 40.0), mix(60, 45.0)];

        let pairs = pair_by_timestamp(&intensity, &mix);
        assert!(pairs.is_empty());
    }
}
