//! Grid generation demo
//!
//! Loads a list of grids from a TOML or RON file (or uses a single unit
//! grid), builds each plane and uploads it into in-memory buffers the way a
//! renderer would before its first draw call.
//!
//! ```text
//! grid_app [config.toml|config.ron]
//! ```

use grid_mesh::backend::{CapacityExceeded, UploadError};
use grid_mesh::foundation::logging;
use grid_mesh::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Grid #{index}: {source}")]
    Upload {
        index: usize,
        source: UploadError<CapacityExceeded>,
    },
}

fn load_config() -> Result<MeshConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => MeshConfig::load_from_file(path),
        None => Ok(MeshConfig::default()),
    }
}

fn run(config: &MeshConfig) -> Result<(), AppError> {
    let mut positions = RecordingSink::new();
    let mut uv = RecordingSink::new();
    let mut total_vertices = 0;

    for (index, spec) in config.grids.iter().enumerate() {
        let vertices = upload_plane(&mut positions, &mut uv, spec)
            .map_err(|source| AppError::Upload { index, source })?;
        total_vertices += vertices;

        log::info!(
            "Grid #{}: {}x{} cells at ({}, {}, {}), {} vertices, {} + {} bytes",
            index,
            spec.subdivisions.x,
            spec.subdivisions.y,
            spec.origin.x,
            spec.origin.y,
            spec.origin.z,
            vertices,
            positions.byte_len(),
            uv.byte_len()
        );
    }

    log::info!("Generated {} grids, {} vertices in total", config.grids.len(), total_vertices);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();

    let filter = config
        .as_ref()
        .ok()
        .and_then(|config| config.log_filter.clone())
        .unwrap_or_else(|| "info".to_string());
    logging::init_with_filter(&filter);

    let config = config.map_err(AppError::from)?;
    log::info!("Generating {} grids", config.grids.len());
    run(&config)?;
    Ok(())
}
