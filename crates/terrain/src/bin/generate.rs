//! Generates a terrain mesh and prints its summary as JSON.
//!
//! Run with:
//! ```
//! cargo run -p terrain-mesh --bin generate
//! ```
//!
//! `TERRAIN_CONFIG` may point at a JSON [`GenerationConfig`]; `TERRAIN_DIV`,
//! `TERRAIN_ITERATIONS`, `TERRAIN_DELTA` and `TERRAIN_SEED` override single fields.

use std::env;
use std::str::FromStr;

use anyhow::Context;
use terrain_mesh::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Reads `name` as a `T`, keeping `current` when unset or unparsable.
fn env_override<T: FromStr>(name: &str, current: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable {name}={raw}");
            current
        }),
        Err(_) => current,
    }
}

fn load_config() -> anyhow::Result<GenerationConfig> {
    let mut config = match env::var("TERRAIN_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))?
        }
        Err(_) => GenerationConfig::default(),
    };

    config.div = env_override("TERRAIN_DIV", config.div);
    config.fault_iterations = env_override("TERRAIN_ITERATIONS", config.fault_iterations);
    config.fault_delta = env_override("TERRAIN_DELTA", config.fault_delta);
    config.seed = env_override("TERRAIN_SEED", config.seed);

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = load_config()?;
    tracing::info!("Generating with {:?}", config);

    let result = MeshBuilder::from_config(config).with_metrics(true).build()?;

    if let Some(metrics) = &result.metrics {
        tracing::info!("Generation completed in {} ms", metrics.generation_time_ms);
        tracing::info!("  Vertices: {}", metrics.vertex_count);
        tracing::info!("  Faces: {}", metrics.face_count);
        tracing::info!("  Edges: {}", metrics.edge_count);
    }

    println!("{}", serde_json::to_string_pretty(&result.mesh.summary())?);

    Ok(())
}
