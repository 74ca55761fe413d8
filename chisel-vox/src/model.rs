//! Vox model data structures

use std::collections::BTreeMap;

use crate::palette::default_palette;
use crate::{MAX_DIMENSION, PALETTE_SIZE};

/// Model dimensions in voxels along each axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    /// Extent along X (1-256)
    pub x: u32,
    /// Extent along Y (1-256)
    pub y: u32,
    /// Extent along Z (1-256)
    pub z: u32,
}

impl Dimensions {
    /// Total cell count of the bounding box
    pub fn volume(&self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Check that all components are non-zero and addressable by byte coordinates
    pub fn is_valid(&self) -> bool {
        (1..=MAX_DIMENSION).contains(&self.x)
            && (1..=MAX_DIMENSION).contains(&self.y)
            && (1..=MAX_DIMENSION).contains(&self.z)
    }

    /// Check whether a voxel coordinate falls inside the bounding box
    #[inline]
    pub fn contains(&self, x: u8, y: u8, z: u8) -> bool {
        (x as u32) < self.x && (y as u32) < self.y && (z as u32) < self.z
    }
}

/// One occupied cell: coordinate plus palette color index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Voxel {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    /// Palette color index (0 conventionally means empty)
    pub color: u8,
}

/// One palette entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaletteColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PaletteColor {
    /// Unpack from the 0xAABBGGRR word layout used by packed palette tables
    pub fn from_packed(word: u32) -> Self {
        Self {
            r: (word & 0xFF) as u8,
            g: ((word >> 8) & 0xFF) as u8,
            b: ((word >> 16) & 0xFF) as u8,
            a: ((word >> 24) & 0xFF) as u8,
        }
    }
}

/// A structurally-captured chunk whose payload is not interpreted
///
/// Materials, layers, render objects, cameras, and scene-graph nodes all
/// share this shape: a leading u32 identifier and an opaque remainder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpaqueRecord {
    /// Leading identifier from the chunk body
    pub id: u32,
    /// Remaining body bytes, kept verbatim
    pub raw: Vec<u8>,
}

/// Decoded NOTE/META text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlob {
    /// Decoded text, or a "0x"-prefixed hex escape when the payload was not
    /// valid UTF-8
    pub text: String,
    /// Payload byte count as declared in the chunk
    pub byte_len: u32,
}

/// Aggregate for one unrecognized chunk tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagStats {
    /// Number of chunks seen with this tag
    pub count: u32,
    /// Cumulative content + children bytes
    pub bytes: u64,
}

impl TagStats {
    /// Running average bytes per chunk of this tag
    pub fn average_bytes(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            self.bytes / self.count as u64
        }
    }
}

/// Record of everything the parser skipped without understanding
///
/// This is the graceful-degradation ledger: a caller can distinguish a
/// pristine parse from a lossy-but-completed one without re-reading the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownChunkLedger {
    /// Total number of unrecognized chunks
    pub count: u32,
    /// Total content + children bytes skipped
    pub total_bytes: u64,
    per_tag: BTreeMap<[u8; 4], TagStats>,
}

impl UnknownChunkLedger {
    /// Record one skipped chunk
    pub(crate) fn record(&mut self, tag: [u8; 4], bytes: u64) {
        self.count += 1;
        self.total_bytes += bytes;
        let stats = self.per_tag.entry(tag).or_default();
        stats.count += 1;
        stats.bytes += bytes;
    }

    /// Fold another ledger into this one
    pub(crate) fn absorb(&mut self, other: UnknownChunkLedger) {
        self.count += other.count;
        self.total_bytes += other.total_bytes;
        for (tag, stats) in other.per_tag {
            let entry = self.per_tag.entry(tag).or_default();
            entry.count += stats.count;
            entry.bytes += stats.bytes;
        }
    }

    /// Stats for a single tag, if any chunk with it was seen
    pub fn stats_for(&self, tag: &[u8; 4]) -> Option<TagStats> {
        self.per_tag.get(tag).copied()
    }

    /// Iterate per-tag aggregates in stable (byte-order) tag order
    pub fn per_tag(&self) -> impl Iterator<Item = (&[u8; 4], &TagStats)> {
        self.per_tag.iter()
    }
}

/// Dense 3D occupancy view derived from a voxel list
///
/// Cells default to color index 0; each voxel overwrites its cell, so later
/// voxels at the same coordinate win. The grid is a derived view owned by the
/// model and is rebuilt from scratch, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxGrid {
    dims: Dimensions,
    cells: Vec<u8>,
}

impl VoxGrid {
    /// Materialize a grid from dimensions and a flat voxel list
    ///
    /// Voxels whose coordinates fall outside the dimensions are skipped; the
    /// flat list keeps them, only the grid view drops them.
    pub fn build(dims: Dimensions, voxels: &[Voxel]) -> Self {
        let mut cells = vec![0u8; dims.volume()];
        for v in voxels {
            if dims.contains(v.x, v.y, v.z) {
                let idx = Self::index(&dims, v.x as u32, v.y as u32, v.z as u32);
                cells[idx] = v.color;
            } else {
                log::debug!(
                    "voxel ({}, {}, {}) outside {}x{}x{}, not gridded",
                    v.x,
                    v.y,
                    v.z,
                    dims.x,
                    dims.y,
                    dims.z
                );
            }
        }
        Self { dims, cells }
    }

    #[inline]
    fn index(dims: &Dimensions, x: u32, y: u32, z: u32) -> usize {
        (x + dims.x * (y + dims.y * z)) as usize
    }

    /// Grid bounds
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Color index at a coordinate, or None outside the bounds
    pub fn get(&self, x: u32, y: u32, z: u32) -> Option<u8> {
        if x < self.dims.x && y < self.dims.y && z < self.dims.z {
            Some(self.cells[Self::index(&self.dims, x, y, z)])
        } else {
            None
        }
    }

    /// Number of cells holding a non-zero color index
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}

/// Parsed result of one `.vox` buffer
///
/// Created fresh per parse and not mutated afterwards. Fields the stream did
/// not provide stay at their empty defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoxModel {
    /// Version integer from the file header (recorded, not validated)
    pub version: u32,
    /// Model bounding box from the last fully-parsed SIZE chunk
    pub dimensions: Option<Dimensions>,
    /// Voxels from the last fully-parsed XYZI chunk, in stream order
    pub voxels: Vec<Voxel>,
    /// Palette from the last fully-parsed RGBA chunk; always 256 entries
    pub palette: Option<Box<[PaletteColor; PALETTE_SIZE]>>,
    /// MATL records in stream order
    pub materials: Vec<OpaqueRecord>,
    /// LAYR records in stream order
    pub layers: Vec<OpaqueRecord>,
    /// rOBJ records in stream order
    pub render_objects: Vec<OpaqueRecord>,
    /// rCAM records in stream order
    pub cameras: Vec<OpaqueRecord>,
    /// nTRN records in stream order
    pub transforms: Vec<OpaqueRecord>,
    /// nSHP records in stream order
    pub shapes: Vec<OpaqueRecord>,
    /// nGRP records in stream order
    pub groups: Vec<OpaqueRecord>,
    /// NOTE text blobs in stream order
    pub notes: Vec<TextBlob>,
    /// META text blob, if present
    pub metadata: Option<TextBlob>,
    /// Dense occupancy view, present when dimensions and voxels both are
    pub grid: Option<VoxGrid>,
    /// Ledger of skipped unrecognized chunks
    pub unknown: UnknownChunkLedger,
}

impl VoxModel {
    /// Number of voxels in the flat list
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Whether the stream carried a complete palette
    pub fn has_palette(&self) -> bool {
        self.palette.is_some()
    }

    /// Palette entry for a color index, falling back to the standard
    /// MagicaVoxel palette when the file carried none
    pub fn color(&self, index: u8) -> PaletteColor {
        match &self.palette {
            Some(palette) => palette[index as usize],
            None => default_palette()[index as usize],
        }
    }

    /// Whether any chunk was skipped without being understood
    pub fn has_unknown_chunks(&self) -> bool {
        self.unknown.count > 0
    }

    /// Merge a container's independently-parsed child stream into this model
    ///
    /// Scalar fields follow keep-last: the child stream was parsed after
    /// whatever produced the current state, so its values win when present.
    /// List fields append, preserving stream order.
    pub(crate) fn absorb(&mut self, other: VoxModel) {
        if other.dimensions.is_some() {
            self.dimensions = other.dimensions;
        }
        if !other.voxels.is_empty() {
            self.voxels = other.voxels;
        }
        if other.palette.is_some() {
            self.palette = other.palette;
        }
        if other.metadata.is_some() {
            self.metadata = other.metadata;
        }
        self.materials.extend(other.materials);
        self.layers.extend(other.layers);
        self.render_objects.extend(other.render_objects);
        self.cameras.extend(other.cameras);
        self.transforms.extend(other.transforms);
        self.shapes.extend(other.shapes);
        self.groups.extend(other.groups);
        self.notes.extend(other.notes);
        self.unknown.absorb(other.unknown);
    }

    /// Build the grid view if both dimensions and voxels are available
    pub(crate) fn materialize_grid(&mut self) {
        match self.dimensions {
            Some(dims) if dims.is_valid() && !self.voxels.is_empty() => {
                self.grid = Some(VoxGrid::build(dims, &self.voxels));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_validity() {
        assert!(Dimensions { x: 1, y: 1, z: 1 }.is_valid());
        assert!(Dimensions { x: 256, y: 256, z: 256 }.is_valid());
        assert!(!Dimensions { x: 0, y: 4, z: 4 }.is_valid());
        assert!(!Dimensions { x: 257, y: 4, z: 4 }.is_valid());
    }

    #[test]
    fn test_dimensions_contains() {
        let dims = Dimensions { x: 3, y: 3, z: 3 };
        assert!(dims.contains(0, 0, 0));
        assert!(dims.contains(2, 2, 2));
        assert!(!dims.contains(3, 0, 0));
        assert!(!dims.contains(0, 0, 255));
    }

    #[test]
    fn test_palette_color_from_packed() {
        let c = PaletteColor::from_packed(0xFF204080);
        assert_eq!(
            c,
            PaletteColor {
                r: 0x80,
                g: 0x40,
                b: 0x20,
                a: 0xFF
            }
        );
    }

    #[test]
    fn test_grid_build_and_overwrite() {
        let dims = Dimensions { x: 2, y: 2, z: 2 };
        let voxels = [
            Voxel { x: 0, y: 0, z: 0, color: 5 },
            Voxel { x: 1, y: 1, z: 1, color: 7 },
            // Same cell again - later voxel wins
            Voxel { x: 0, y: 0, z: 0, color: 9 },
        ];
        let grid = VoxGrid::build(dims, &voxels);
        assert_eq!(grid.get(0, 0, 0), Some(9));
        assert_eq!(grid.get(1, 1, 1), Some(7));
        assert_eq!(grid.get(1, 0, 0), Some(0));
        assert_eq!(grid.get(2, 0, 0), None);
        assert_eq!(grid.occupied_cells(), 2);
    }

    #[test]
    fn test_grid_skips_out_of_bounds_voxels() {
        let dims = Dimensions { x: 2, y: 2, z: 2 };
        let voxels = [Voxel { x: 5, y: 5, z: 5, color: 1 }];
        let grid = VoxGrid::build(dims, &voxels);
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    fn test_ledger_aggregates() {
        let mut ledger = UnknownChunkLedger::default();
        ledger.record(*b"ABCD", 10);
        ledger.record(*b"ABCD", 30);
        ledger.record(*b"EFGH", 4);

        assert_eq!(ledger.count, 3);
        assert_eq!(ledger.total_bytes, 44);

        let abcd = ledger.stats_for(b"ABCD").unwrap();
        assert_eq!(abcd.count, 2);
        assert_eq!(abcd.bytes, 40);
        assert_eq!(abcd.average_bytes(), 20);

        let efgh = ledger.stats_for(b"EFGH").unwrap();
        assert_eq!(efgh.count, 1);
        assert_eq!(efgh.average_bytes(), 4);
    }

    #[test]
    fn test_model_color_fallback() {
        let model = VoxModel::default();
        assert!(!model.has_palette());
        // Index 0 of the default palette is fully transparent
        assert_eq!(model.color(0).a, 0);
        // Index 1 is opaque white
        assert_eq!(
            model.color(1),
            PaletteColor {
                r: 255,
                g: 255,
                b: 255,
                a: 255
            }
        );
    }

    #[test]
    fn test_absorb_keep_last_and_append() {
        let mut base = VoxModel {
            dimensions: Some(Dimensions { x: 1, y: 1, z: 1 }),
            voxels: vec![Voxel { x: 0, y: 0, z: 0, color: 1 }],
            materials: vec![OpaqueRecord { id: 1, raw: vec![] }],
            ..Default::default()
        };

        let child = VoxModel {
            dimensions: Some(Dimensions { x: 4, y: 4, z: 4 }),
            materials: vec![OpaqueRecord { id: 2, raw: vec![0xAB] }],
            ..Default::default()
        };

        base.absorb(child);
        assert_eq!(base.dimensions, Some(Dimensions { x: 4, y: 4, z: 4 }));
        // Child had no voxels, so the existing list survives
        assert_eq!(base.voxels.len(), 1);
        assert_eq!(base.materials.len(), 2);
        assert_eq!(base.materials[1].id, 2);
    }
}
