use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Time-indexed input records
// ============================================================================

/// Grid carbon intensity measurement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IntensitySample {
    pub timestamp: DateTime<Utc>,
    /// Carbon intensity (g CO2/kWh)
    pub co2_intensity_g_per_kwh: f64,
}

impl IntensitySample {
    pub fn new(timestamp: DateTime<Utc>, co2_intensity_g_per_kwh: f64) -> Self {
        Self {
            timestamp,
            co2_intensity_g_per_kwh,
        }
    }
}

/// Generation mix snapshot (MW per source)
///
/// `renewable_share_pct` is taken as supplied; it is not recomputed from the
/// source columns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MixSample {
    pub timestamp: DateTime<Utc>,
    pub hydro_mw: f64,
    pub wind_mw: f64,
    pub solar_mw: f64,
    pub nuclear_mw: f64,
    pub fossil_mw: f64,
    /// Renewable share of total generation (%)
    pub renewable_share_pct: f64,
}

impl MixSample {
    /// Total generation across all five source columns (MW)
    pub fn total_mw(&self) -> f64 {
        self.hydro_mw + self.wind_mw + self.solar_mw + self.nuclear_mw + self.fossil_mw
    }
}

// ============================================================================
// Annual net-zero pathway
// ============================================================================

/// Emissions target and outcome for one calendar year
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AnnualTarget {
    pub year: i32,
    /// Actual emissions (Mt CO2)
    pub actual_emissions_mt: f64,
    /// Target emissions (Mt CO2)
    pub target_emissions_mt: f64,
    /// Alignment with target (%)
    pub alignment_pct: f64,
}

/// Records ordered on a timeline
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Timestamped for IntensitySample {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Timestamped for MixSample {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_total_sums_all_sources() {
        let mix = MixSample {
            timestamp: Utc::now(),
            hydro_mw: 100.0,
            wind_mw: 50.0,
            solar_mw: 25.0,
            nuclear_mw: 200.0,
            fossil_mw: 125.0,
            renewable_share_pct: 35.0,
        };
        assert_eq!(mix.total_mw(), 500.0);
    }

    #[test]
    fn test_intensity_sample_deserializes_rfc3339() {
        let json = r#"{"timestamp":"2024-03-01T12:15:00+01:00","co2_intensity_g_per_kwh":212.5}"#;
        let sample: IntensitySample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.timestamp.to_rfc3339(), "2024-03-01T11:15:00+00:00");
        assert_eq!(sample.co2_intensity_g_per_kwh, 212.5);
    }

    #[test]
    fn test_annual_target_deserializes() {
        let json = r#"{
            "year": 2030,
            "actual_emissions_mt": 48.2,
            "target_emissions_mt": 45.0,
            "alignment_pct": 93.4
        }"#;
        let target: AnnualTarget = serde_json::from_str(json).unwrap();
        assert_eq!(target.year, 2030);
        assert_eq!(target.target_emissions_mt, 45.0);
    }
}
