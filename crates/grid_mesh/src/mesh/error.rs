//! Mesh generation errors

use thiserror::Error;

/// Precondition violations detected before any geometry is emitted
///
/// All variants are caller programming errors, so the generator fails fast
/// and never returns a truncated mesh.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MeshError {
    /// Width or height is zero, negative, or not finite
    #[error(
        "Invalid grid dimension: {width}x{height} \
         (both extents must be finite and greater than zero)"
    )]
    InvalidDimension {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// A subdivision count is zero
    #[error("Invalid grid subdivision: {sub_x}x{sub_y} (both counts must be at least 1)")]
    InvalidSubdivision {
        /// Cells along the X axis
        sub_x: u32,
        /// Cells along the Y axis
        sub_y: u32,
    },

    /// The vertex streams for this many cells cannot be allocated
    #[error("Too many grid cells: {sub_x}x{sub_y} exceeds addressable vertex storage")]
    TooManyVertices {
        /// Cells along the X axis
        sub_x: u32,
        /// Cells along the Y axis
        sub_y: u32,
    },
}
