//! Vox chunk stream parsing

use crate::error::VoxError;
use crate::model::{Dimensions, OpaqueRecord, PaletteColor, TextBlob, VoxModel, Voxel};
use crate::{MAX_NESTING_DEPTH, PALETTE_BYTES, PALETTE_SIZE, VOX_MAGIC, tag_name, tags};

/// Parse a `.vox` byte buffer into a [`VoxModel`]
///
/// Fails only on the fatal tier: a bad magic, or top-level framing whose
/// declared lengths overrun the buffer. Malformed bodies of known chunk
/// types degrade to their empty defaults, and unknown chunk types are
/// skipped and counted in the model's ledger - neither aborts the parse.
///
/// # Arguments
/// * `data` - Complete file contents; the parser never reads incrementally
///
/// # Example
/// ```ignore
/// let bytes = std::fs::read("model.vox")?;
/// let model = parse_vox(&bytes)?;
/// println!("{} voxels", model.voxel_count());
/// ```
pub fn parse_vox(data: &[u8]) -> Result<VoxModel, VoxError> {
    if data.len() < 8 {
        return Err(VoxError::TooSmall);
    }

    // Validate magic (4 bytes)
    if &data[0..4] != VOX_MAGIC {
        return Err(VoxError::InvalidMagic);
    }

    // Version (4 bytes) - recorded as-is, the chunk layout is version-stable
    let mut pos = 4;
    let version = read_u32(data, &mut pos)?;

    // Everything after the header is one top-level chunk stream
    let mut model = parse_chunk_stream(&data[8..], 0)?;
    model.version = version;
    model.materialize_grid();
    Ok(model)
}

/// Parse one flat run of sibling chunks
///
/// Container children are handed back to this function as an independent
/// stream: each recursion owns a fresh accumulator which the caller merges,
/// so a failing branch can be dropped without corrupting the parent state.
fn parse_chunk_stream(bytes: &[u8], depth: u32) -> Result<VoxModel, VoxError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(VoxError::TooDeep);
    }

    let mut model = VoxModel::default();
    let mut pos = 0;

    // Loop while a tag could still follow; four zero bytes end the stream
    while bytes.len() - pos >= 4 {
        if bytes[pos..pos + 4] == [0, 0, 0, 0] {
            break;
        }

        // Chunk header: tag (4) + content length (4) + children length (4)
        let tag = read_tag(bytes, &mut pos)?;
        let content_len = read_u32(bytes, &mut pos)? as usize;
        let children_len = read_u32(bytes, &mut pos)? as usize;

        // The declared lengths are authoritative; if they cannot be sized
        // from the remaining buffer this stream is structurally broken
        let total = content_len
            .checked_add(children_len)
            .ok_or(VoxError::ChunkOverrun(tag))?;
        if total > bytes.len() - pos {
            return Err(VoxError::ChunkOverrun(tag));
        }

        let content = &bytes[pos..pos + content_len];
        let children = &bytes[pos + content_len..pos + total];
        pos += total;

        if tag == tags::MAIN {
            // Fresh recursion over the children region; a broken branch
            // contributes nothing but does not kill the parse
            match parse_chunk_stream(children, depth + 1) {
                Ok(sub) => model.absorb(sub),
                Err(e) => log::warn!("container branch dropped: {}", e),
            }
        } else if let Some(parse) = find_parser(&tag) {
            if let Err(e) = parse(&mut model, content) {
                log::warn!("chunk '{}' degraded: {}", tag_name(&tag), e);
            }
        } else {
            model.unknown.record(tag, total as u64);
            log::debug!(
                "skipped unknown chunk '{}' ({} bytes)",
                tag_name(&tag),
                total
            );
        }
    }

    Ok(model)
}

// =============================================================================
// Chunk dispatch
// =============================================================================

/// A typed sub-parser: decodes one chunk body into the model
///
/// Sub-parsers commit to the model only after the whole body decoded, so a
/// failure leaves earlier state untouched (keep-last-fully-parsed).
type ChunkParser = fn(&mut VoxModel, &[u8]) -> Result<(), VoxError>;

/// Tag -> sub-parser lookup table
///
/// Adding a chunk type means adding a row here; the chunk loop itself never
/// changes.
const CHUNK_PARSERS: &[([u8; 4], ChunkParser)] = &[
    (tags::SIZE, parse_size),
    (tags::XYZI, parse_xyzi),
    (tags::RGBA, parse_rgba),
    (tags::MATL, parse_material),
    (tags::LAYR, parse_layer),
    (tags::ROBJ, parse_render_object),
    (tags::RCAM, parse_camera),
    (tags::NTRN, parse_transform),
    (tags::NSHP, parse_shape),
    (tags::NGRP, parse_group),
    (tags::NOTE, parse_note),
    (tags::META, parse_metadata),
];

fn find_parser(tag: &[u8; 4]) -> Option<ChunkParser> {
    CHUNK_PARSERS
        .iter()
        .find(|(t, _)| t == tag)
        .map(|&(_, parse)| parse)
}

// =============================================================================
// Typed sub-parsers
// =============================================================================

/// SIZE: 3 x u32 (x, y, z)
fn parse_size(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    if content.len() != 12 {
        return Err(VoxError::InvalidChunk(tags::SIZE));
    }
    let mut pos = 0;
    let dims = Dimensions {
        x: read_u32(content, &mut pos)?,
        y: read_u32(content, &mut pos)?,
        z: read_u32(content, &mut pos)?,
    };
    // Byte coordinates cannot address cells past 256, and an absurd SIZE
    // must not drive grid allocation
    if !dims.is_valid() {
        return Err(VoxError::InvalidChunk(tags::SIZE));
    }
    model.dimensions = Some(dims);
    Ok(())
}

/// XYZI: u32 voxel count + count x (x, y, z, color_index)
fn parse_xyzi(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    let mut pos = 0;
    let count = read_u32(content, &mut pos)? as usize;

    let expected = count
        .checked_mul(4)
        .and_then(|n| n.checked_add(4))
        .ok_or(VoxError::InvalidChunk(tags::XYZI))?;
    if content.len() != expected {
        return Err(VoxError::InvalidChunk(tags::XYZI));
    }

    let mut voxels = Vec::with_capacity(count);
    for _ in 0..count {
        voxels.push(Voxel {
            x: content[pos],
            y: content[pos + 1],
            z: content[pos + 2],
            color: content[pos + 3],
        });
        pos += 4;
    }

    model.voxels = voxels;
    Ok(())
}

/// RGBA: exactly 256 x (r, g, b, a), no count prefix
///
/// A short palette is rejected outright, never padded.
fn parse_rgba(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    if content.len() != PALETTE_BYTES {
        return Err(VoxError::InvalidChunk(tags::RGBA));
    }
    let mut palette = Box::new([PaletteColor::default(); PALETTE_SIZE]);
    for (i, entry) in content.chunks_exact(4).enumerate() {
        palette[i] = PaletteColor {
            r: entry[0],
            g: entry[1],
            b: entry[2],
            a: entry[3],
        };
    }
    model.palette = Some(palette);
    Ok(())
}

/// Shared decoder for the opaque record family: u32 id + raw remainder
fn parse_opaque(tag: [u8; 4], content: &[u8]) -> Result<OpaqueRecord, VoxError> {
    let mut pos = 0;
    let id = read_u32(content, &mut pos).map_err(|_| VoxError::InvalidChunk(tag))?;
    Ok(OpaqueRecord {
        id,
        raw: content[pos..].to_vec(),
    })
}

fn parse_material(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    model.materials.push(parse_opaque(tags::MATL, content)?);
    Ok(())
}

fn parse_layer(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    model.layers.push(parse_opaque(tags::LAYR, content)?);
    Ok(())
}

fn parse_render_object(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    model.render_objects.push(parse_opaque(tags::ROBJ, content)?);
    Ok(())
}

fn parse_camera(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    model.cameras.push(parse_opaque(tags::RCAM, content)?);
    Ok(())
}

fn parse_transform(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    model.transforms.push(parse_opaque(tags::NTRN, content)?);
    Ok(())
}

fn parse_shape(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    model.shapes.push(parse_opaque(tags::NSHP, content)?);
    Ok(())
}

fn parse_group(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    model.groups.push(parse_opaque(tags::NGRP, content)?);
    Ok(())
}

/// Shared decoder for NOTE/META: u32 byte length + text payload
fn parse_text_blob(tag: [u8; 4], content: &[u8]) -> Result<TextBlob, VoxError> {
    let mut pos = 0;
    let byte_len = read_u32(content, &mut pos).map_err(|_| VoxError::InvalidChunk(tag))? as usize;
    if content.len() != 4 + byte_len {
        return Err(VoxError::InvalidChunk(tag));
    }
    Ok(TextBlob {
        text: decode_text(&content[pos..]),
        byte_len: byte_len as u32,
    })
}

fn parse_note(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    model.notes.push(parse_text_blob(tags::NOTE, content)?);
    Ok(())
}

fn parse_metadata(model: &mut VoxModel, content: &[u8]) -> Result<(), VoxError> {
    model.metadata = Some(parse_text_blob(tags::META, content)?);
    Ok(())
}

/// Decode a text payload, falling back to a hex escape on invalid UTF-8
///
/// The fallback is deterministic and prefixed ("0x" + lowercase hex of every
/// payload byte) so undecodable text is preserved rather than dropped.
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let mut out = String::with_capacity(2 + bytes.len() * 2);
            out.push_str("0x");
            for b in bytes {
                out.push_str(&format!("{:02x}", b));
            }
            out
        }
    }
}

// =============================================================================
// Helper functions for reading data
// =============================================================================

pub(crate) fn read_u32(data: &[u8], pos: &mut usize) -> Result<u32, VoxError> {
    let bytes = data
        .get(*pos..*pos + 4)
        .ok_or(VoxError::UnexpectedEof)?;
    *pos += 4;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

pub(crate) fn read_tag(data: &[u8], pos: &mut usize) -> Result<[u8; 4], VoxError> {
    let bytes = data
        .get(*pos..*pos + 4)
        .ok_or(VoxError::UnexpectedEof)?;
    *pos += 4;
    Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
}
