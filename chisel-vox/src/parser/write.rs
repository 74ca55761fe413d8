//! Vox container serialization

use crate::model::{Dimensions, PaletteColor, Voxel};
use crate::{CHUNK_HEADER_LEN, PALETTE_BYTES, PALETTE_SIZE, VOX_MAGIC, VOX_VERSION, tags};

/// Serialize a model into the exact `.vox` container framing
///
/// Produces the file header followed by one synthetic MAIN container whose
/// children are SIZE, then XYZI, then RGBA (omitted when `palette` is None),
/// in that fixed order. The output is byte-for-byte what [`super::parse_vox`]
/// accepts, so serialize-then-parse is lossless for these fields.
///
/// Inputs are trusted per the caller contract: dimension components and
/// voxel coordinates/color indices must already be range-valid. The writer
/// itself always succeeds.
pub fn serialize_vox(
    dimensions: Dimensions,
    voxels: &[Voxel],
    palette: Option<&[PaletteColor; PALETTE_SIZE]>,
) -> Vec<u8> {
    // Content sizes are fixed-layout, so the container length is known
    // up front - nothing is back-patched
    let size_content = 12;
    let xyzi_content = 4 + voxels.len() * 4;
    let rgba_content = if palette.is_some() { PALETTE_BYTES } else { 0 };

    let mut children_len = CHUNK_HEADER_LEN + size_content + CHUNK_HEADER_LEN + xyzi_content;
    if palette.is_some() {
        children_len += CHUNK_HEADER_LEN + rgba_content;
    }

    let mut out = Vec::with_capacity(8 + CHUNK_HEADER_LEN + children_len);

    // ========== File header ==========

    // Magic (4 bytes)
    write_bytes(&mut out, VOX_MAGIC);

    // Version (4 bytes)
    write_u32(&mut out, VOX_VERSION);

    // ========== MAIN container ==========

    // MAIN carries no content of its own; all payload lives in its children
    write_chunk_header(&mut out, tags::MAIN, 0, children_len as u32);

    write_size_chunk(&mut out, dimensions);
    write_xyzi_chunk(&mut out, voxels);
    if let Some(palette) = palette {
        write_rgba_chunk(&mut out, palette);
    }

    out
}

// =============================================================================
// Per-chunk emitters
// =============================================================================

/// SIZE: 3 x u32 (x, y, z)
fn write_size_chunk(out: &mut Vec<u8>, dimensions: Dimensions) {
    write_chunk_header(out, tags::SIZE, 12, 0);
    write_u32(out, dimensions.x);
    write_u32(out, dimensions.y);
    write_u32(out, dimensions.z);
}

/// XYZI: u32 voxel count + 4 bytes per voxel in insertion order
fn write_xyzi_chunk(out: &mut Vec<u8>, voxels: &[Voxel]) {
    write_chunk_header(out, tags::XYZI, (4 + voxels.len() * 4) as u32, 0);
    write_u32(out, voxels.len() as u32);
    for v in voxels {
        out.push(v.x);
        out.push(v.y);
        out.push(v.z);
        out.push(v.color);
    }
}

/// RGBA: 256 x (r, g, b, a), no count prefix
fn write_rgba_chunk(out: &mut Vec<u8>, palette: &[PaletteColor; PALETTE_SIZE]) {
    write_chunk_header(out, tags::RGBA, PALETTE_BYTES as u32, 0);
    for c in palette {
        out.push(c.r);
        out.push(c.g);
        out.push(c.b);
        out.push(c.a);
    }
}

// =============================================================================
// Helper functions for writing data
// =============================================================================

/// Chunk framing: tag (4) + content length (4) + children length (4)
fn write_chunk_header(out: &mut Vec<u8>, tag: [u8; 4], content_len: u32, children_len: u32) {
    write_bytes(out, &tag);
    write_u32(out, content_len);
    write_u32(out, children_len);
}

fn write_u32(out: &mut Vec<u8>, val: u32) {
    out.extend_from_slice(&val.to_le_bytes());
}

fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes);
}
