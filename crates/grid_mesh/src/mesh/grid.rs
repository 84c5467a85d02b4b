//! Rectangle tessellation into quad grids
//!
//! A [`GridSpec`] describes an axis-aligned rectangle and how many cells to
//! split it into along each axis. Every cell becomes two triangles, emitted as
//! six vertices in a fixed order:
//!
//! ```text
//! (x0, y0) (x1, y0) (x0, y1)   triangle 1: bottom-left, bottom-right, top-left
//! (x0, y1) (x1, y0) (x1, y1)   triangle 2: top-left, bottom-right, top-right
//! ```
//!
//! Renderers derive face orientation from this order, so it never changes.
//! Cells are visited row by row (outer loop over Y, inner loop over X).
//!
//! # Coordinate Precision
//! Cell offsets are computed from the integer cell index (`index * step`)
//! rather than by repeatedly adding a step, so there is no accumulated drift
//! and a degenerate step can never stall the loop.

use serde::{Deserialize, Serialize};

use super::{GridVertex, MeshError};
use crate::foundation::math::{utils, Point3, Vec2};

/// Vertices emitted per grid cell (two triangles)
pub const VERTICES_PER_CELL: usize = 6;

/// Components per UV vertex: `(u, v, 0)`
pub const UV_COMPONENTS: usize = 3;

/// Widest vertex of any stream: XYZ positions and `(u, v, 0)` UVs
const MAX_COMPONENTS: usize = 3;

/// Corner of each emitted vertex within a cell as `(right, top)` flags
const CELL_CORNERS: [(bool, bool); VERTICES_PER_CELL] = [
    (false, false),
    (true, false),
    (false, true),
    (false, true),
    (true, false),
    (true, true),
];

/// Number of cells along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subdivisions {
    /// Cells along the X axis
    pub x: u32,

    /// Cells along the Y axis
    pub y: u32,
}

impl Subdivisions {
    /// Create a subdivision count
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Total number of cells, saturating at `usize::MAX`
    pub fn cell_count(&self) -> usize {
        (self.x as usize).saturating_mul(self.y as usize)
    }

    /// Total number of emitted vertices, saturating at `usize::MAX`
    pub fn vertex_count(&self) -> usize {
        self.cell_count().saturating_mul(VERTICES_PER_CELL)
    }

    /// Bytes of the widest stream, `None` when it overflows `usize`
    fn stream_bytes(&self) -> Option<usize> {
        (self.x as usize)
            .checked_mul(self.y as usize)?
            .checked_mul(VERTICES_PER_CELL * MAX_COMPONENTS)?
            .checked_mul(std::mem::size_of::<f32>())
    }

    /// Reject zero counts and grids whose streams cannot be allocated
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.x == 0 || self.y == 0 {
            return Err(MeshError::InvalidSubdivision { sub_x: self.x, sub_y: self.y });
        }
        match self.stream_bytes() {
            Some(bytes) if bytes <= isize::MAX.unsigned_abs() => Ok(()),
            _ => Err(MeshError::TooManyVertices { sub_x: self.x, sub_y: self.y }),
        }
    }
}

impl Default for Subdivisions {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Components written per position vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VertexLayout {
    /// `(x, y)`
    Xy,

    /// `(x, y, z)` with `z` taken from the grid origin
    #[default]
    Xyz,
}

impl VertexLayout {
    /// Number of floats per vertex
    pub const fn components(self) -> usize {
        match self {
            Self::Xy => 2,
            Self::Xyz => 3,
        }
    }
}

/// Axis-aligned rectangle to tessellate
///
/// `origin` is the top-left corner; its `z` component is only emitted with
/// [`VertexLayout::Xyz`]. `size` holds width and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Corner of the region the first cell starts at
    pub origin: Point3,

    /// Width (`x`) and height (`y`) of the region
    pub size: Vec2,

    /// Cell counts, one cell per axis when omitted
    #[serde(default)]
    pub subdivisions: Subdivisions,
}

impl GridSpec {
    /// Create a single-cell grid
    pub fn new(origin: Point3, width: f32, height: f32) -> Self {
        Self {
            origin,
            size: Vec2::new(width, height),
            subdivisions: Subdivisions::default(),
        }
    }

    /// Create a single-cell grid in the `z = 0` plane
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Point3::new(x, y, 0.0), width, height)
    }

    /// Set the cell counts
    #[must_use]
    pub fn with_subdivisions(mut self, x: u32, y: u32) -> Self {
        self.subdivisions = Subdivisions::new(x, y);
        self
    }

    /// Check every precondition of the generator
    pub fn validate(&self) -> Result<(), MeshError> {
        if !utils::is_positive_extent(self.size.x) || !utils::is_positive_extent(self.size.y) {
            return Err(MeshError::InvalidDimension { width: self.size.x, height: self.size.y });
        }
        self.subdivisions.validate()
    }

    /// Extent of a single cell
    ///
    /// Only meaningful for a spec that passes [`GridSpec::validate`].
    pub fn step(&self) -> Vec2 {
        self.size.component_div(&Vec2::new(self.subdivisions.x as f32, self.subdivisions.y as f32))
    }

    /// Total number of emitted vertices
    pub fn vertex_count(&self) -> usize {
        self.subdivisions.vertex_count()
    }
}

/// Visit every vertex of a `subdivisions` grid in emission order
///
/// The callback receives the cell column, the cell row and the `(right, top)`
/// corner flags of the vertex.
fn for_each_vertex(subdivisions: Subdivisions, mut visit: impl FnMut(u32, u32, bool, bool)) {
    for row in 0..subdivisions.y {
        for column in 0..subdivisions.x {
            for (right, top) in CELL_CORNERS {
                visit(column, row, right, top);
            }
        }
    }
}

/// Generate flat vertex positions for every cell of `spec`
///
/// Returns `spec.vertex_count() * layout.components()` floats. For a cell at
/// column `i` and row `j` the corners are `x + i * step.x` and
/// `x + step.x + i * step.x` horizontally (likewise vertically).
///
/// # Errors
/// [`MeshError::InvalidDimension`], [`MeshError::InvalidSubdivision`] or
/// [`MeshError::TooManyVertices`] when `spec` fails validation; nothing is
/// generated in that case.
pub fn generate_positions(spec: &GridSpec, layout: VertexLayout) -> Result<Vec<f32>, MeshError> {
    spec.validate()?;

    let step = spec.step();
    let origin = spec.origin;
    let x_end = origin.x + step.x;
    let y_end = origin.y + step.y;

    let mut positions = Vec::with_capacity(spec.vertex_count() * layout.components());
    for_each_vertex(spec.subdivisions, |column, row, right, top| {
        let offset_x = column as f32 * step.x;
        let offset_y = row as f32 * step.y;

        let x = if right { x_end } else { origin.x };
        let y = if top { y_end } else { origin.y };
        positions.push(x + offset_x);
        positions.push(y + offset_y);
        if layout == VertexLayout::Xyz {
            positions.push(origin.z);
        }
    });

    log::trace!(
        "Generated {} grid positions ({}x{} cells, {:?})",
        positions.len(),
        spec.subdivisions.x,
        spec.subdivisions.y,
        layout
    );
    Ok(positions)
}

/// Generate UV coordinates covering the unit square
///
/// Uses the same cell order and winding as [`generate_positions`], so vertex
/// `k` of both streams describes the same triangle corner. Each vertex is
/// `(u, v, 0)`; cell edges are `i / sub_x` and `(i + 1) / sub_x`, which keeps
/// every value inside `[0, 1]`.
///
/// # Errors
/// [`MeshError::InvalidSubdivision`] when either count is zero,
/// [`MeshError::TooManyVertices`] when the stream cannot be allocated.
pub fn generate_uv(subdivisions: Subdivisions) -> Result<Vec<f32>, MeshError> {
    subdivisions.validate()?;

    let mut uv = Vec::with_capacity(subdivisions.vertex_count() * UV_COMPONENTS);
    for_each_vertex(subdivisions, |column, row, right, top| {
        let u = utils::fraction(column + u32::from(right), subdivisions.x);
        let v = utils::fraction(row + u32::from(top), subdivisions.y);
        uv.extend_from_slice(&[u, v, 0.0]);
    });

    log::trace!("Generated {} grid UV coordinates", uv.len());
    Ok(uv)
}

/// Positions and matching UV coordinates for one grid
///
/// Immutable once generated; take ownership of the streams with
/// [`GridMesh::into_parts`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridMesh {
    positions: Vec<f32>,
    uv: Vec<f32>,
    layout: VertexLayout,
}

impl GridMesh {
    /// Flat position stream
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat UV stream, `(u, v, 0)` per vertex
    pub fn uv(&self) -> &[f32] {
        &self.uv
    }

    /// Layout of the position stream
    pub const fn layout(&self) -> VertexLayout {
        self.layout
    }

    /// Number of vertices (six per cell)
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / self.layout.components()
    }

    /// Position stream as raw bytes for buffer upload
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// UV stream as raw bytes for buffer upload
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uv)
    }

    /// Interleave both streams into one vertex per triangle corner
    ///
    /// Two-component positions get `z = 0`.
    pub fn vertices(&self) -> Vec<GridVertex> {
        self.positions
            .chunks_exact(self.layout.components())
            .zip(self.uv.chunks_exact(UV_COMPONENTS))
            .map(|(position, uv)| {
                let z = position.get(2).copied().unwrap_or(0.0);
                GridVertex::new([position[0], position[1], z], [uv[0], uv[1]])
            })
            .collect()
    }

    /// Split into `(positions, uv)`
    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>) {
        (self.positions, self.uv)
    }
}

/// Tessellate `spec` into 3D positions plus matching UV coordinates
///
/// # Errors
/// Any [`MeshError`] from validating `spec`.
pub fn plane(spec: &GridSpec) -> Result<GridMesh, MeshError> {
    let positions = generate_positions(spec, VertexLayout::Xyz)?;
    let uv = generate_uv(spec.subdivisions)?;

    log::debug!(
        "Built plane at ({}, {}, {}) size {}x{} with {} vertices",
        spec.origin.x,
        spec.origin.y,
        spec.origin.z,
        spec.size.x,
        spec.size.y,
        spec.vertex_count()
    );
    Ok(GridMesh { positions, uv, layout: VertexLayout::Xyz })
}

/// Tessellate `spec` into 2D positions only
///
/// # Errors
/// Any [`MeshError`] from validating `spec`.
pub fn rect(spec: &GridSpec) -> Result<Vec<f32>, MeshError> {
    generate_positions(spec, VertexLayout::Xy)
}
