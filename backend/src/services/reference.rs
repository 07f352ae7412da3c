//! Reference table loading at startup

use anyhow::Context;
use std::time::Duration;

use shared::ReferenceData;

/// Read and validate the reference file, or fall back to the built-in tables
pub async fn load_reference(path: Option<&str>, timeout: Duration) -> anyhow::Result<ReferenceData> {
    let Some(path) = path else {
        tracing::info!("Using built-in reference tables");
        return Ok(ReferenceData::default());
    };

    tracing::info!("Loading reference tables from {}", path);
    let contents = tokio::time::timeout(timeout, tokio::fs::read_to_string(path))
        .await
        .with_context(|| format!("timed out reading {}", path))?
        .with_context(|| format!("failed to read {}", path))?;

    let data = ReferenceData::from_json(&contents)
        .with_context(|| format!("invalid reference data in {}", path))?;

    tracing::info!(
        diseases = data.diseases.len(),
        crops = data.crop_prices.len(),
        "Reference tables loaded"
    );
    Ok(data)
}
