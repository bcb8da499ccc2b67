//! Radar engine binary for the Fishradar simulation.
//!
//! Wires together the configuration, lake geometry, demo fleet, tick
//! loop, and read-model snapshot, then runs until Ctrl-C or the
//! configured tick limit.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `fishradar-config.yaml` (or the path in
//!    `FISHRADAR_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the lake boundary and radar parameters
//! 4. Seed the demo fleet (stand-in for the rental collaborator)
//! 5. Spawn the radar loop and publish snapshots each tick
//! 6. Stop cleanly on Ctrl-C and log the final read-model counts

mod error;
mod spawner;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fishradar_core::config::RadarConfig;
use fishradar_core::runner::{RadarControl, run_radar};
use fishradar_core::snapshot::SnapshotHandle;
use fishradar_core::tick::SimulationState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point for the radar engine.
///
/// # Errors
///
/// Returns an error if configuration loading or fleet seeding fails;
/// once the loop is running, tick-level failures are logged and absorbed.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration (before logging so the level applies).
    let config = load_config()?;

    // 2. Initialize structured logging. RUST_LOG overrides the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!(
        name = config.simulation.name,
        seed = config.simulation.seed,
        tick_interval_ms = config.simulation.tick_interval_ms,
        "fishradar-engine starting"
    );

    // 3. Build lake geometry and radar parameters.
    let boundary = config.boundary()?;
    info!(
        vertices = boundary.vertex_count(),
        dock_lon = boundary.dock().lon,
        dock_lat = boundary.dock().lat,
        "Lake boundary ready"
    );

    let mut state = SimulationState::new(boundary, config.params(), config.simulation.seed);

    // 4. Seed the demo fleet.
    let launched = spawner::seed_demo_fleet(
        &mut state.voyages,
        config.simulation.demo_fleet_size,
        &mut state.rng,
    )?;
    info!(fleet = launched.len(), "Demo fleet launched");

    // 5. Start the radar loop.
    let control = Arc::new(RadarControl::new(
        config.simulation.tick_interval_ms,
        config.simulation.max_ticks,
    ));
    let snapshots = SnapshotHandle::new();

    let loop_control = Arc::clone(&control);
    let loop_snapshots = snapshots.clone();
    let mut radar_task = tokio::spawn(async move {
        run_radar(&mut state, &loop_control, &loop_snapshots).await
    });

    // 6. Wait for the loop to finish or for Ctrl-C.
    let outcome = tokio::select! {
        joined = &mut radar_task => joined?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Ctrl-C received, stopping radar loop");
            control.request_stop();
            radar_task.await?
        }
    };

    info!(
        end_reason = ?outcome.end_reason,
        total_ticks = outcome.total_ticks,
        "Radar loop finished"
    );

    let vessels = snapshots.list_active_vessels().await;
    let hotspots = snapshots.list_hotspots().await;
    info!(
        vessels = vessels.len(),
        hotspots = hotspots.len(),
        "Final read models"
    );

    info!("fishradar-engine shutdown complete");
    Ok(())
}

/// Load the radar configuration.
///
/// Uses the path in `FISHRADAR_CONFIG` when set, otherwise
/// `fishradar-config.yaml` in the working directory. A missing file
/// yields the built-in defaults.
fn load_config() -> Result<RadarConfig, EngineError> {
    let config_path = std::env::var("FISHRADAR_CONFIG")
        .map_or_else(|_| PathBuf::from("fishradar-config.yaml"), PathBuf::from);

    if Path::new(&config_path).exists() {
        Ok(RadarConfig::from_file(&config_path)?)
    } else {
        Ok(RadarConfig::default())
    }
}
