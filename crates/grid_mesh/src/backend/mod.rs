//! # Device Collaborator Seams
//!
//! The mesh generator never talks to a graphics device. This module defines
//! the narrow interfaces a device layer implements to receive generated data:
//!
//! - [`BufferSink`]: accepts flat `f32` vertex streams (positions, UVs)
//! - [`ProgramIntrospect`]: resolves shader attribute and uniform names to
//!   backend handles
//!
//! Generated positions are meant for the `a_position` attribute and UVs for
//! `a_uv` (or `a_texCoord`). That pairing is a naming convention of the
//! shaders, not something the generator depends on.

pub mod buffer;
pub mod program;

pub use buffer::{
    upload_plane, upload_rect, BufferSink, CapacityExceeded, RecordingSink, Stream, UploadError,
};
pub use program::{
    attrib_locations, uniform_locations, ProgramIntrospect, ATTRIB_PREFIX, UNIFORM_PREFIX,
};
