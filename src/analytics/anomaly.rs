//! Rolling z-score anomaly detection on the intensity series

use itertools::{Itertools, MinMaxResult};
use statrs::statistics::Statistics;

use crate::config::EngineConfig;
use crate::domain::{AnomalyRecord, IntensitySample, Severity};

/// Band a z-score, `None` when it does not exceed the flag threshold
pub fn classify(z: f64, cfg: &EngineConfig) -> Option<Severity> {
    if z.is_nan() || z <= cfg.anomaly_threshold {
        return None;
    }
    let severity = if z > cfg.high_threshold {
        Severity::High
    } else if z > cfg.medium_threshold {
        Severity::Medium
    } else {
        Severity::Low
    };
    Some(severity)
}

/// Flag samples that deviate from the `window_size` samples preceding them
///
/// `sorted` must be in chronological order. The first `window_size` samples
/// are never evaluated, and a flat window (zero standard deviation) never
/// flags. Returns only the flagged samples, in order.
pub fn detect_anomalies(sorted: &[IntensitySample], cfg: &EngineConfig) -> Vec<AnomalyRecord> {
    let window = cfg.window_size;
    if window == 0 || sorted.len() <= window {
        return Vec::new();
    }

    let values: Vec<f64> = sorted.iter().map(|s| s.co2_intensity_g_per_kwh).collect();
    let mut flagged = Vec::new();

    for (offset, span) in values.windows(window + 1).enumerate() {
        let (history, current) = span.split_at(window);
        let current = current[0];

        // flat window, whatever the running variance rounds to
        match history.iter().minmax() {
            MinMaxResult::MinMax(lo, hi) if lo < hi => {}
            _ => continue,
        }
        let std_dev = history.iter().population_std_dev();
        if std_dev.is_nan() || std_dev <= 0.0 {
            continue;
        }
        let mean = history.iter().mean();
        let z = (current - mean).abs() / std_dev;

        if let Some(severity) = classify(z, cfg) {
            let sample = &sorted[offset + window];
            flagged.push(AnomalyRecord {
                timestamp: sample.timestamp,
                co2_intensity_g_per_kwh: sample.co2_intensity_g_per_kwh,
                is_anomaly: true,
                deviation: z,
                severity,
            });
        }
    }

    flagged
}
