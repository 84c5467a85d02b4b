//! # Grid Mesh
//!
//! Vertex data helpers for 3D graphics APIs: tessellates rectangles into
//! grids of two-triangle quads and hands the resulting flat `f32` streams to
//! whatever device layer the caller plugs in.
//!
//! ## Features
//!
//! - **Grid Tessellation**: `subX × subY` cells, six vertices per cell, fixed winding
//! - **Matching UVs**: normalized texture coordinates paired index-for-index with positions
//! - **Device Seams**: buffer upload and shader name lookup as small traits
//! - **Configuration**: grid lists loaded from TOML or RON files
//!
//! ## Quick Start
//!
//! ```rust
//! use grid_mesh::prelude::*;
//!
//! fn main() -> Result<(), MeshError> {
//!     let spec = GridSpec::from_rect(0.0, 0.0, 2.0, 1.0).with_subdivisions(2, 1);
//!     let mesh = plane(&spec)?;
//!
//!     assert_eq!(mesh.vertex_count(), 12);
//!     assert_eq!(mesh.positions().len(), 12 * 3);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod foundation;
pub mod mesh;
pub mod backend;
pub mod config;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        backend::{
            attrib_locations, uniform_locations, upload_plane, upload_rect, BufferSink,
            ProgramIntrospect, RecordingSink, UploadError,
        },
        config::{Config, ConfigError, MeshConfig},
        foundation::math::{Point3, Vec2},
        mesh::{
            generate_positions, generate_uv, plane, rect, GridMesh, GridSpec, GridVertex,
            MeshError, Subdivisions, VertexLayout,
        },
    };
}
