//! Grid mesh generation
//!
//! Tessellates axis-aligned rectangles into quads (two triangles per cell)
//! and produces flat position and UV streams ready for a device buffer.

pub mod error;
pub mod grid;
pub mod vertex;

pub use error::MeshError;
pub use grid::{
    generate_positions, generate_uv, plane, rect, GridMesh, GridSpec, Subdivisions, VertexLayout,
    UV_COMPONENTS, VERTICES_PER_CELL,
};
pub use vertex::GridVertex;
