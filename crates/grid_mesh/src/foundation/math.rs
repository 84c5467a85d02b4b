//! Math utilities and types
//!
//! Provides the vector and point types used to describe grid regions.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math utility functions
pub mod utils {
    /// Whether a value is a usable extent: finite and strictly positive
    ///
    /// NaN fails both comparisons, so it is rejected along with zero and
    /// negative values.
    pub fn is_positive_extent(value: f32) -> bool {
        value.is_finite() && value > 0.0
    }

    /// Fraction `index / count` computed in `f64` and rounded once
    ///
    /// `fraction(n, n)` is exactly `1.0`, which keeps normalized coordinates
    /// inside the unit interval for any subdivision count.
    pub fn fraction(index: u32, count: u32) -> f32 {
        (f64::from(index) / f64::from(count)) as f32
    }
}
