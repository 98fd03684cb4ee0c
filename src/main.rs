use anyhow::{Context, Result};
use carbon_goal_tracker::{config, telemetry, AnnualTarget, GoalTracker, IntensitySample, MixSample};
use config::Config;
use serde::de::DeserializeOwned;
use std::path::Path;
use telemetry::init_tracing;
use tracing::{info, warn};

async fn read_series<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;
    let tracker = GoalTracker::new(cfg.engine.clone())?;
    let inputs = &cfg.inputs;

    let (intensity, mix, targets) = tokio::time::timeout(inputs.fetch_timeout(), async {
        tokio::try_join!(
            read_series::<IntensitySample>(&inputs.intensity_path),
            read_series::<MixSample>(&inputs.mix_path),
            read_series::<AnnualTarget>(&inputs.targets_path),
        )
    })
    .await
    .context("timed out reading input snapshots")??;

    info!(
        intensity = intensity.len(),
        mix = mix.len(),
        targets = targets.len(),
        "input snapshots loaded"
    );

    let report = tracker.compute(&intensity, &mix, &targets);
    if let Some(error) = &report.error {
        warn!(%error, "goal tracker returned a degraded report");
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
