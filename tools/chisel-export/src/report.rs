//! Model inspection reports

use chisel_vox::{VoxGrid, VoxModel, tag_name};
use std::fmt::Write as _;

/// Render a parse summary: geometry, records, and the degradation ledger
pub fn render_summary(model: &VoxModel) -> String {
    let mut out = String::new();

    writeln!(out, "version: {}", model.version).ok();
    match model.dimensions {
        Some(dims) => {
            writeln!(out, "size: {} x {} x {}", dims.x, dims.y, dims.z).ok();
        }
        None => {
            writeln!(out, "size: (none)").ok();
        }
    }
    writeln!(out, "voxels: {}", model.voxel_count()).ok();
    writeln!(
        out,
        "palette: {}",
        if model.has_palette() {
            "embedded"
        } else {
            "default"
        }
    )
    .ok();

    if let Some(grid) = &model.grid {
        writeln!(out, "occupied cells: {}", grid.occupied_cells()).ok();
    }

    let records = [
        ("materials", model.materials.len()),
        ("layers", model.layers.len()),
        ("render objects", model.render_objects.len()),
        ("cameras", model.cameras.len()),
        ("transforms", model.transforms.len()),
        ("shapes", model.shapes.len()),
        ("groups", model.groups.len()),
    ];
    for (name, count) in records {
        if count > 0 {
            writeln!(out, "{}: {}", name, count).ok();
        }
    }

    for note in &model.notes {
        writeln!(out, "note ({} bytes): {}", note.byte_len, note.text).ok();
    }
    if let Some(meta) = &model.metadata {
        writeln!(out, "metadata ({} bytes): {}", meta.byte_len, meta.text).ok();
    }

    if model.has_unknown_chunks() {
        writeln!(
            out,
            "unknown chunks: {} ({} bytes total)",
            model.unknown.count, model.unknown.total_bytes
        )
        .ok();
        for (tag, stats) in model.unknown.per_tag() {
            writeln!(
                out,
                "  {}: {} chunk(s), {} byte(s), avg {}",
                tag_name(tag),
                stats.count,
                stats.bytes,
                stats.average_bytes()
            )
            .ok();
        }
    } else {
        writeln!(out, "unknown chunks: none (pristine parse)").ok();
    }

    out
}

/// Render per-Z ASCII occupancy slices ('#' occupied, '.' empty)
///
/// Y grows downward within each slice so the printout reads top-to-bottom.
pub fn render_grid_slices(grid: &VoxGrid) -> String {
    let dims = grid.dimensions();
    let mut out = String::new();

    for z in 0..dims.z {
        writeln!(out, "z = {}", z).ok();
        for y in (0..dims.y).rev() {
            for x in 0..dims.x {
                let occupied = grid.get(x, y, z).unwrap_or(0) != 0;
                out.push(if occupied { '#' } else { '.' });
            }
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chisel_vox::{Dimensions, Voxel, parse_vox, serialize_vox};

    fn sample_model() -> VoxModel {
        let dims = Dimensions { x: 2, y: 2, z: 1 };
        let voxels = vec![Voxel { x: 0, y: 0, z: 0, color: 1 }];
        let bytes = serialize_vox(dims, &voxels, None);
        parse_vox(&bytes).unwrap()
    }

    #[test]
    fn test_summary_mentions_geometry() {
        let summary = render_summary(&sample_model());
        assert!(summary.contains("size: 2 x 2 x 1"));
        assert!(summary.contains("voxels: 1"));
        assert!(summary.contains("pristine parse"));
    }

    #[test]
    fn test_grid_slices_layout() {
        let model = sample_model();
        let slices = render_grid_slices(model.grid.as_ref().unwrap());
        // One slice, two rows; the voxel sits at y=0 which prints last
        assert_eq!(slices, "z = 0\n..\n#.\n\n");
    }
}
