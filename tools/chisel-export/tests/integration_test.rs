//! Integration tests for chisel-export
//!
//! Tests the full pipeline: generate model -> serialize -> write to disk ->
//! read back -> parse -> verify.

use std::path::Path;
use tempfile::tempdir;

use chisel_export::{describe, report, shapes};
use chisel_vox::{VoxGrid, default_palette, parse_vox, serialize_vox};

/// Write a serialized model and parse it back from disk
fn roundtrip_through_disk(path: &Path, bytes: &[u8]) -> chisel_vox::VoxModel {
    std::fs::write(path, bytes).expect("Failed to write vox file");
    let data = std::fs::read(path).expect("Failed to read vox file");
    parse_vox(&data).expect("Round-tripped file should parse")
}

#[test]
fn test_sphere_pipeline() {
    let dir = tempdir().expect("Failed to create temp dir");
    let vox_path = dir.path().join("sphere.vox");

    let (dims, voxels) = shapes::generate_sphere(16, 3);
    let bytes = serialize_vox(dims, &voxels, None);
    let model = roundtrip_through_disk(&vox_path, &bytes);

    assert_eq!(model.dimensions, Some(dims));
    assert_eq!(model.voxels, voxels);
    assert!(!model.has_unknown_chunks(), "generated file must be pristine");

    // The parsed grid matches one built straight from the generator output
    let grid = model.grid.as_ref().expect("grid should materialize");
    assert_eq!(*grid, VoxGrid::build(dims, &voxels));
}

#[test]
fn test_gen_with_embedded_palette() {
    let dir = tempdir().expect("Failed to create temp dir");
    let vox_path = dir.path().join("cube.vox");

    let (dims, voxels) = shapes::generate_cube(8, 1);
    let bytes = serialize_vox(dims, &voxels, Some(default_palette()));
    let model = roundtrip_through_disk(&vox_path, &bytes);

    assert!(model.has_palette());
    assert_eq!(
        model.palette.as_ref().unwrap().as_slice(),
        default_palette().as_slice()
    );
}

#[test]
fn test_build_from_json_description() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("model.json");
    let vox_path = dir.path().join("model.vox");

    std::fs::write(
        &json_path,
        r#"{
            "size": [3, 3, 3],
            "voxels": [
                { "x": 0, "y": 0, "z": 0, "color": 1 },
                { "x": 1, "y": 0, "z": 0, "color": 2 },
                { "x": 2, "y": 0, "z": 0, "color": 3 }
            ]
        }"#,
    )
    .expect("Failed to write description");

    let description = describe::load_description(&json_path).expect("Description should load");
    let (dims, voxels, palette) = description.into_parts().expect("Description should validate");
    let bytes = serialize_vox(dims, &voxels, palette.as_deref());
    let model = roundtrip_through_disk(&vox_path, &bytes);

    let grid = model.grid.as_ref().expect("grid should materialize");
    assert_eq!(grid.get(0, 0, 0), Some(1));
    assert_eq!(grid.get(1, 0, 0), Some(2));
    assert_eq!(grid.get(2, 0, 0), Some(3));
    assert_eq!(grid.occupied_cells(), 3);
}

#[test]
fn test_invalid_description_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("bad.json");

    std::fs::write(
        &json_path,
        r#"{ "size": [2, 2, 2], "voxels": [{ "x": 5, "y": 0, "z": 0 }] }"#,
    )
    .expect("Failed to write description");

    let description = describe::load_description(&json_path).expect("Description should load");
    assert!(description.into_parts().is_err());
}

#[test]
fn test_info_summary_of_generated_file() {
    let (dims, voxels) = shapes::generate_torus(24, 5);
    let bytes = serialize_vox(dims, &voxels, None);
    let model = parse_vox(&bytes).expect("generated torus should parse");

    let summary = report::render_summary(&model);
    assert!(summary.contains("size: 24 x 24 x 24"));
    assert!(summary.contains("pristine parse"));
}
