use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use annotator_core::EngineConfig;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "annotator_replay=info,annotator_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let config = EngineConfig::from_env().context("Invalid engine configuration")?;
    tracing::info!(
        initial_mode = config.initial_mode.as_str(),
        clamp_coordinates = config.clamp_coordinates,
        discard_degenerate_boxes = config.discard_degenerate_boxes,
        "Loaded engine configuration"
    );

    // --- Script ---
    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: annotator-replay <script.json>")?;
    let script = annotator_replay::load_script(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let outcome = annotator_replay::run_script(script, config)?;
    tracing::info!(
        annotations = outcome.annotations.len(),
        pending = outcome.pending.len(),
        skipped = outcome.skipped_events,
        "Replay finished"
    );

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
