//! Interleaved vertex format for grid meshes
//!
//! Device buffers that take one interleaved stream instead of separate
//! position and UV streams can upload a `&[GridVertex]` directly through
//! `bytemuck::cast_slice`.

use std::mem::{offset_of, size_of};

/// Vertex with a model-space position and a texture coordinate
///
/// # Memory Layout
/// `#[repr(C)]` with five `f32` fields and no padding: 20 bytes per vertex,
/// position at byte 0, texture coordinate at byte 12.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GridVertex {
    /// Position in model space
    pub position: [f32; 3],

    /// Texture coordinates in the unit square
    pub tex_coord: [f32; 2],
}

impl GridVertex {
    /// Byte distance between consecutive vertices
    pub const STRIDE: usize = size_of::<Self>();

    /// Byte offset of `position` within a vertex
    pub const POSITION_OFFSET: usize = offset_of!(Self, position);

    /// Byte offset of `tex_coord` within a vertex
    pub const TEX_COORD_OFFSET: usize = offset_of!(Self, tex_coord);

    /// Create a new vertex
    pub const fn new(position: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self { position, tex_coord }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(GridVertex::STRIDE, 20);
        assert_eq!(GridVertex::POSITION_OFFSET, 0);
        assert_eq!(GridVertex::TEX_COORD_OFFSET, 12);
    }

    #[test]
    fn test_vertex_bytes() {
        let vertices = [
            GridVertex::new([1.0, 2.0, 3.0], [0.0, 1.0]),
            GridVertex::new([4.0, 5.0, 6.0], [1.0, 0.0]),
        ];
        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 1.0, 0.0]);
    }
}
