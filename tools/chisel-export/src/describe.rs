//! JSON model descriptions
//!
//! Hand-authored model files for the `build` command:
//!
//! ```json
//! {
//!   "size": [3, 3, 3],
//!   "voxels": [
//!     { "x": 0, "y": 0, "z": 0, "color": 1 }
//!   ],
//!   "palette": [[255, 0, 0, 255], ...]
//! }
//! ```
//!
//! The writer trusts its inputs, so every range rule is enforced here before
//! anything is serialized.

use anyhow::{Context, Result, bail, ensure};
use chisel_vox::{Dimensions, PALETTE_SIZE, PaletteColor, Voxel};
use serde::Deserialize;
use std::path::Path;

/// Top-level model description
#[derive(Debug, Deserialize)]
pub struct ModelDescription {
    /// Bounding box: [x, y, z], each 1-256
    pub size: [u32; 3],
    /// Occupied cells; coordinates must fall inside `size`
    #[serde(default)]
    pub voxels: Vec<VoxelEntry>,
    /// Optional palette; exactly 256 [r, g, b, a] entries when present
    #[serde(default)]
    pub palette: Option<Vec<[u8; 4]>>,
}

/// One voxel in a description
#[derive(Debug, Deserialize)]
pub struct VoxelEntry {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    /// Palette color index
    #[serde(default = "default_color")]
    pub color: u8,
}

fn default_color() -> u8 {
    1
}

/// Load and deserialize a description file
pub fn load_description(path: &Path) -> Result<ModelDescription> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let description: ModelDescription = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(description)
}

impl ModelDescription {
    /// Validate and convert into codec inputs
    pub fn into_parts(
        self,
    ) -> Result<(Dimensions, Vec<Voxel>, Option<Box<[PaletteColor; PALETTE_SIZE]>>)> {
        let dims = Dimensions {
            x: self.size[0],
            y: self.size[1],
            z: self.size[2],
        };
        ensure!(
            dims.is_valid(),
            "size [{}, {}, {}] out of range (each component must be 1-256)",
            dims.x,
            dims.y,
            dims.z
        );

        let mut voxels = Vec::with_capacity(self.voxels.len());
        for (i, entry) in self.voxels.iter().enumerate() {
            ensure!(
                dims.contains(entry.x, entry.y, entry.z),
                "voxel #{} at ({}, {}, {}) outside size [{}, {}, {}]",
                i,
                entry.x,
                entry.y,
                entry.z,
                dims.x,
                dims.y,
                dims.z
            );
            voxels.push(Voxel {
                x: entry.x,
                y: entry.y,
                z: entry.z,
                color: entry.color,
            });
        }

        let palette = match self.palette {
            None => None,
            Some(entries) => {
                if entries.len() != PALETTE_SIZE {
                    bail!(
                        "palette has {} entries, expected exactly {}",
                        entries.len(),
                        PALETTE_SIZE
                    );
                }
                let mut palette = Box::new([PaletteColor::default(); PALETTE_SIZE]);
                for (slot, [r, g, b, a]) in palette.iter_mut().zip(entries) {
                    *slot = PaletteColor { r, g, b, a };
                }
                Some(palette)
            }
        };

        Ok((dims, voxels, palette))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_description() {
        let description: ModelDescription =
            serde_json::from_str(r#"{ "size": [3, 3, 3] }"#).unwrap();
        let (dims, voxels, palette) = description.into_parts().unwrap();
        assert_eq!(dims, Dimensions { x: 3, y: 3, z: 3 });
        assert!(voxels.is_empty());
        assert!(palette.is_none());
    }

    #[test]
    fn test_voxels_and_default_color() {
        let description: ModelDescription = serde_json::from_str(
            r#"{
                "size": [4, 4, 4],
                "voxels": [
                    { "x": 0, "y": 1, "z": 2, "color": 9 },
                    { "x": 3, "y": 3, "z": 3 }
                ]
            }"#,
        )
        .unwrap();
        let (_, voxels, _) = description.into_parts().unwrap();
        assert_eq!(voxels.len(), 2);
        assert_eq!(voxels[0].color, 9);
        assert_eq!(voxels[1].color, 1);
    }

    #[test]
    fn test_out_of_range_size_rejected() {
        let description: ModelDescription =
            serde_json::from_str(r#"{ "size": [0, 3, 3] }"#).unwrap();
        assert!(description.into_parts().is_err());

        let description: ModelDescription =
            serde_json::from_str(r#"{ "size": [3, 3, 300] }"#).unwrap();
        assert!(description.into_parts().is_err());
    }

    #[test]
    fn test_voxel_outside_size_rejected() {
        let description: ModelDescription = serde_json::from_str(
            r#"{ "size": [2, 2, 2], "voxels": [{ "x": 2, "y": 0, "z": 0 }] }"#,
        )
        .unwrap();
        let err = description.into_parts().unwrap_err();
        assert!(err.to_string().contains("outside size"));
    }

    #[test]
    fn test_short_palette_rejected() {
        let entries: Vec<[u8; 4]> = vec![[1, 2, 3, 4]; 100];
        let description = ModelDescription {
            size: [2, 2, 2],
            voxels: vec![],
            palette: Some(entries),
        };
        let err = description.into_parts().unwrap_err();
        assert!(err.to_string().contains("expected exactly 256"));
    }

    #[test]
    fn test_full_palette_accepted() {
        let entries: Vec<[u8; 4]> = (0..=255u16).map(|i| [i as u8, 0, 0, 255]).collect();
        let description = ModelDescription {
            size: [2, 2, 2],
            voxels: vec![],
            palette: Some(entries),
        };
        let (_, _, palette) = description.into_parts().unwrap();
        let palette = palette.unwrap();
        assert_eq!(palette[200].r, 200);
    }
}
