//! Chisel-Vox: MagicaVoxel `.vox` container codec
//!
//! This crate reads and writes the MagicaVoxel `.vox` chunk container: a
//! tagged, recursively-nested binary stream describing voxel model
//! dimensions, voxel occupancy, a 256-color palette, materials, scene-graph
//! nodes, and free-form notes.
//!
//! # Key Features
//!
//! - **Byte-exact framing**: chunk lengths are authoritative; the reader
//!   consumes exactly the declared byte counts and never desynchronizes on
//!   chunk types it does not understand
//! - **Graceful degradation**: unknown chunks are counted and skipped, and a
//!   malformed known-chunk body degrades that one field instead of aborting
//!   the parse
//! - **Diagnostics ledger**: every parse result reports how many unknown
//!   chunks (and bytes) were encountered, aggregated per tag
//! - **Grid transform**: the flat voxel list is materialized into a dense
//!   3D occupancy grid once dimensions are known
//!
//! # Usage
//!
//! ```ignore
//! use chisel_vox::{parse_vox, serialize_vox, Dimensions, Voxel};
//!
//! let bytes = std::fs::read("model.vox").unwrap();
//! let model = parse_vox(&bytes).unwrap();
//!
//! println!("Size: {:?}", model.dimensions);
//! println!("Voxels: {}", model.voxels.len());
//! println!("Unknown chunks: {}", model.unknown.count);
//!
//! // Round-trip a model of our own
//! let dims = Dimensions { x: 3, y: 3, z: 3 };
//! let voxels = vec![Voxel { x: 0, y: 0, z: 0, color: 1 }];
//! let bytes = serialize_vox(dims, &voxels, None);
//! ```
//!
//! # Format Reference
//!
//! - MagicaVoxel .vox format specification
//! - <https://github.com/ephtracy/voxel-model/blob/master/MagicaVoxel-file-format-vox.txt>

mod error;
mod model;
mod palette;
mod parser;

pub use error::VoxError;
pub use model::{
    Dimensions, OpaqueRecord, PaletteColor, TagStats, TextBlob, UnknownChunkLedger, VoxGrid,
    VoxModel, Voxel,
};
pub use palette::{DEFAULT_PALETTE, default_palette};
pub use parser::{parse_vox, serialize_vox};

// =============================================================================
// Constants
// =============================================================================

/// Vox format magic bytes
pub const VOX_MAGIC: &[u8; 4] = b"VOX ";

/// Vox format version emitted by the writer
pub const VOX_VERSION: u32 = 150;

/// Size of a chunk header: 4-byte tag + content length + children length
pub const CHUNK_HEADER_LEN: usize = 12;

/// Number of entries in a complete palette
pub const PALETTE_SIZE: usize = 256;

/// Byte length of a complete RGBA palette chunk body
pub const PALETTE_BYTES: usize = PALETTE_SIZE * 4;

/// Largest dimension component accepted for a model
///
/// Voxel coordinates are single bytes, so cells beyond 256 on any axis are
/// unaddressable. This also bounds grid allocation for hostile SIZE chunks.
pub const MAX_DIMENSION: u32 = 256;

/// Maximum container nesting depth before a branch is dropped
pub const MAX_NESTING_DEPTH: u32 = 64;

// =============================================================================
// Chunk Tags
// =============================================================================

/// Chunk tag identifiers
pub mod tags {
    /// Top-level container; children are a stream of sibling chunks
    pub const MAIN: [u8; 4] = *b"MAIN";
    /// Model dimensions: 3 x u32 (x, y, z)
    pub const SIZE: [u8; 4] = *b"SIZE";
    /// Voxel list: u32 count + count x (x, y, z, color_index) bytes
    pub const XYZI: [u8; 4] = *b"XYZI";
    /// Palette: 256 x (r, g, b, a) bytes, no count prefix
    pub const RGBA: [u8; 4] = *b"RGBA";
    /// Material: u32 id + opaque property bytes
    pub const MATL: [u8; 4] = *b"MATL";
    /// Layer: u32 id + opaque property bytes
    pub const LAYR: [u8; 4] = *b"LAYR";
    /// Render object: u32 id + opaque property bytes
    pub const ROBJ: [u8; 4] = *b"rOBJ";
    /// Render camera: u32 id + opaque property bytes
    pub const RCAM: [u8; 4] = *b"rCAM";
    /// Scene transform node: u32 id + opaque payload
    pub const NTRN: [u8; 4] = *b"nTRN";
    /// Scene shape node: u32 id + opaque payload
    pub const NSHP: [u8; 4] = *b"nSHP";
    /// Scene group node: u32 id + opaque payload
    pub const NGRP: [u8; 4] = *b"nGRP";
    /// Free-form annotation text: u32 byte length + payload
    pub const NOTE: [u8; 4] = *b"NOTE";
    /// Model metadata text: u32 byte length + payload
    pub const META: [u8; 4] = *b"META";
}

/// Printable form of a chunk tag for diagnostics
///
/// Non-printable bytes are replaced rather than passed through so log lines
/// and error messages stay single-line.
pub fn tag_name(tag: &[u8; 4]) -> String {
    tag.iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '?'
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VOX_MAGIC, b"VOX ");
        assert_eq!(VOX_VERSION, 150);
        assert_eq!(CHUNK_HEADER_LEN, 12);
        assert_eq!(PALETTE_BYTES, 1024);
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(tag_name(&tags::MAIN), "MAIN");
        assert_eq!(tag_name(&tags::ROBJ), "rOBJ");
        assert_eq!(tag_name(&[0x01, b'A', 0xFF, b' ']), "?A? ");
    }
}
