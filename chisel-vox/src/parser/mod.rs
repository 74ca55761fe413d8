//! Vox container codec
//!
//! This module provides the chunk-level reader and writer for the `.vox`
//! container. It consists of:
//!
//! - `read` - Recursive-descent parsing of a chunk stream into a [`crate::VoxModel`]
//! - `write` - Serializing dimensions, voxels, and a palette back into the
//!   exact container framing the reader accepts
//! - `tests` - Behavioral test suite for framing, degradation, and round-trips

mod read;
mod write;


// Re-export public API
pub use read::parse_vox;
pub use write::serialize_vox;
