//! Vertex buffer upload through a device-agnostic sink

use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

use crate::mesh::{self, GridSpec, MeshError};

/// Destination for flat vertex streams
///
/// Implemented by the device layer (an immutable GPU buffer, a streaming
/// buffer, a file dump). Each call replaces whatever the sink held before,
/// mirroring a `bufferData` upload.
pub trait BufferSink {
    /// Error reported by the device layer
    type Error: std::error::Error + 'static;

    /// Check whether an upload of `len` floats would be accepted
    ///
    /// Must not modify the sink. Sinks without a size limit keep the default.
    fn check_capacity(&self, len: usize) -> Result<(), Self::Error> {
        let _ = len;
        Ok(())
    }

    /// Upload one flat stream of floats
    fn upload(&mut self, data: &[f32]) -> Result<(), Self::Error>;
}

/// Vertex stream an upload error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Vertex positions
    Positions,

    /// Texture coordinates
    Uv,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positions => f.write_str("positions"),
            Self::Uv => f.write_str("uv"),
        }
    }
}

/// Failure of a generate-and-upload helper
#[derive(Error, Debug)]
pub enum UploadError<E: std::error::Error + 'static> {
    /// The grid spec was rejected before anything was uploaded
    #[error("Mesh generation failed: {0}")]
    Mesh(#[from] MeshError),

    /// The sink for `stream` refused the data
    #[error("Buffer upload of {stream} failed: {source}")]
    Sink {
        /// Stream whose sink failed
        stream: Stream,
        /// Device layer error
        source: E,
    },
}

impl<E: std::error::Error + 'static> UploadError<E> {
    fn sink(stream: Stream) -> impl FnOnce(E) -> Self {
        move |source| Self::Sink { stream, source }
    }
}

/// Generate 2D positions for `spec` and upload them
///
/// Returns the number of floats uploaded (two per vertex).
///
/// # Errors
/// [`UploadError::Mesh`] for an invalid spec (the sink is left untouched),
/// [`UploadError::Sink`] when the upload itself fails.
pub fn upload_rect<S: BufferSink + ?Sized>(
    sink: &mut S,
    spec: &GridSpec,
) -> Result<usize, UploadError<S::Error>> {
    let positions = mesh::rect(spec)?;
    sink.upload(&positions).map_err(UploadError::sink(Stream::Positions))?;

    log::debug!("Uploaded rect with {} floats", positions.len());
    Ok(positions.len())
}

/// Generate a plane for `spec` and upload positions and UVs to separate sinks
///
/// Returns the number of vertices, the count a draw call needs.
///
/// Both sinks are asked [`BufferSink::check_capacity`] before either is
/// written, so a size rejection leaves both untouched. If a sink only fails
/// inside [`BufferSink::upload`] and that sink is the UV one, the positions
/// sink already holds the new plane; the error's `stream` tells which.
///
/// # Errors
/// [`UploadError::Mesh`] for an invalid spec (neither sink is touched),
/// [`UploadError::Sink`] when either sink rejects its stream.
pub fn upload_plane<S: BufferSink + ?Sized>(
    positions: &mut S,
    uv: &mut S,
    spec: &GridSpec,
) -> Result<usize, UploadError<S::Error>> {
    let plane = mesh::plane(spec)?;

    positions
        .check_capacity(plane.positions().len())
        .map_err(UploadError::sink(Stream::Positions))?;
    uv.check_capacity(plane.uv().len()).map_err(UploadError::sink(Stream::Uv))?;

    positions.upload(plane.positions()).map_err(UploadError::sink(Stream::Positions))?;
    uv.upload(plane.uv()).map_err(UploadError::sink(Stream::Uv))?;

    log::debug!("Uploaded plane with {} vertices", plane.vertex_count());
    Ok(plane.vertex_count())
}

/// Upload rejected by a [`RecordingSink`] with a float limit
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Upload of {requested} floats exceeds sink capacity of {capacity}")]
pub struct CapacityExceeded {
    /// Floats in the rejected upload
    pub requested: usize,
    /// Maximum floats the sink accepts
    pub capacity: usize,
}

/// In-memory sink that keeps the last upload
///
/// Useful for headless tools and tests. An optional capacity emulates a
/// fixed-size device buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    data: Vec<f32>,
    uploads: usize,
    capacity: Option<usize>,
}

impl RecordingSink {
    /// Create an unbounded sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that rejects uploads larger than `capacity` floats
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self { capacity: Some(capacity), ..Self::default() }
    }

    /// Contents of the most recent upload
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Number of successful uploads
    pub const fn upload_count(&self) -> usize {
        self.uploads
    }

    /// Size of the current contents in bytes
    pub fn byte_len(&self) -> usize {
        bytemuck::cast_slice::<f32, u8>(&self.data).len()
    }
}

impl BufferSink for RecordingSink {
    type Error = CapacityExceeded;

    fn check_capacity(&self, len: usize) -> Result<(), Self::Error> {
        match self.capacity {
            Some(capacity) if len > capacity => Err(CapacityExceeded { requested: len, capacity }),
            _ => Ok(()),
        }
    }

    fn upload(&mut self, data: &[f32]) -> Result<(), Self::Error> {
        self.check_capacity(data.len())?;
        self.data.clear();
        self.data.extend_from_slice(data);
        self.uploads += 1;
        Ok(())
    }
}

/// A plain vector holds the most recent upload
impl BufferSink for Vec<f32> {
    type Error = Infallible;

    fn upload(&mut self, data: &[f32]) -> Result<(), Self::Error> {
        self.clear();
        self.extend_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Subdivisions;

    /// Sink whose size check always passes, failing inside `upload` on demand
    #[derive(Default)]
    struct UncheckedSink {
        fail_upload: bool,
        data: Vec<f32>,
    }

    impl BufferSink for UncheckedSink {
        type Error = CapacityExceeded;

        fn upload(&mut self, data: &[f32]) -> Result<(), Self::Error> {
            if self.fail_upload {
                return Err(CapacityExceeded { requested: data.len(), capacity: 0 });
            }
            self.data = data.to_vec();
            Ok(())
        }
    }

    #[test]
    fn test_upload_rect_reports_float_count() {
        let mut sink = RecordingSink::new();
        let spec = GridSpec::from_rect(0.0, 0.0, 1.0, 1.0).with_subdivisions(3, 2);

        let count = upload_rect(&mut sink, &spec).unwrap();

        assert_eq!(count, 3 * 2 * 6 * 2);
        assert_eq!(sink.data().len(), count);
        assert_eq!(sink.byte_len(), count * 4);
        assert_eq!(sink.upload_count(), 1);
    }

    #[test]
    fn test_upload_replaces_previous_contents() {
        let mut sink: Vec<f32> = vec![9.0; 100];

        upload_rect(&mut sink, &GridSpec::from_rect(0.0, 0.0, 1.0, 1.0)).unwrap();

        assert_eq!(sink, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_upload_plane_fills_both_sinks() {
        let mut positions = RecordingSink::new();
        let mut uv = RecordingSink::new();
        let spec = GridSpec::from_rect(-1.0, -1.0, 2.0, 2.0).with_subdivisions(4, 4);

        let vertices = upload_plane(&mut positions, &mut uv, &spec).unwrap();

        assert_eq!(vertices, Subdivisions::new(4, 4).vertex_count());
        assert_eq!(positions.data().len(), vertices * 3);
        assert_eq!(uv.data().len(), vertices * 3);
    }

    #[test]
    fn test_invalid_spec_leaves_sink_untouched() {
        let mut sink = RecordingSink::new();
        let spec = GridSpec::from_rect(0.0, 0.0, 1.0, 1.0).with_subdivisions(0, 1);

        let err = upload_rect(&mut sink, &spec).unwrap_err();

        assert!(matches!(err, UploadError::Mesh(MeshError::InvalidSubdivision { .. })));
        assert_eq!(sink.upload_count(), 0);
    }

    #[test]
    fn test_positions_sink_error_is_propagated() {
        let mut positions = RecordingSink::with_capacity_limit(1024);
        let mut uv = RecordingSink::with_capacity_limit(1024);
        let spec = GridSpec::from_rect(0.0, 0.0, 1.0, 1.0).with_subdivisions(10, 10);

        let err = upload_plane(&mut positions, &mut uv, &spec).unwrap_err();

        match err {
            UploadError::Sink { stream, source } => {
                assert_eq!(stream, Stream::Positions);
                assert_eq!(source, CapacityExceeded { requested: 10 * 10 * 6 * 3, capacity: 1024 });
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(positions.upload_count(), 0);
        assert_eq!(uv.upload_count(), 0);
    }

    #[test]
    fn test_uv_capacity_failure_leaves_positions_untouched() {
        let mut positions = RecordingSink::with_capacity_limit(10_000);
        let mut uv = RecordingSink::new();
        upload_plane(&mut positions, &mut uv, &GridSpec::from_rect(0.0, 0.0, 1.0, 1.0)).unwrap();
        let previous = positions.data().to_vec();

        let mut small_uv = RecordingSink::with_capacity_limit(17);
        let spec = GridSpec::from_rect(5.0, 5.0, 1.0, 1.0);
        let err = upload_plane(&mut positions, &mut small_uv, &spec).unwrap_err();

        assert!(matches!(err, UploadError::Sink { stream: Stream::Uv, .. }));
        assert_eq!(positions.data(), previous.as_slice());
        assert_eq!(positions.upload_count(), 1);
        assert_eq!(small_uv.upload_count(), 0);
    }

    #[test]
    fn test_uv_upload_failure_names_the_stream() {
        let mut positions = UncheckedSink::default();
        let mut uv = UncheckedSink { fail_upload: true, ..UncheckedSink::default() };

        let err = upload_plane(&mut positions, &mut uv, &GridSpec::from_rect(0.0, 0.0, 1.0, 1.0))
            .unwrap_err();

        assert!(matches!(err, UploadError::Sink { stream: Stream::Uv, .. }));
        assert!(err.to_string().contains("uv"));
        // Without a capacity check the positions sink already holds the plane
        assert_eq!(positions.data.len(), 6 * 3);
        assert!(uv.data.is_empty());
    }
}
