//! Procedural voxel shape generators
//!
//! Each generator scans a cubic model volume and keeps the cells a geometric
//! predicate accepts. Outputs feed the vox writer unmodified: a bounding box
//! plus a flat voxel list in scan order.

use chisel_vox::{Dimensions, Voxel};
use tracing::warn;

/// Smallest edge size a generator accepts
pub const MIN_SIZE: u32 = 8;

/// Largest edge size a generator accepts (byte coordinates)
pub const MAX_SIZE: u32 = 255;

/// Clamp an edge size into the supported range
fn clamp_size(name: &str, size: u32) -> u32 {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        warn!(
            "{}: size {} outside {}-{}, clamping",
            name, size, MIN_SIZE, MAX_SIZE
        );
    }
    size.clamp(MIN_SIZE, MAX_SIZE)
}

/// Scan the volume and keep cells accepted by `predicate`
///
/// The predicate sees coordinates normalized to [-1, 1] per axis, so shape
/// math is independent of the edge size.
fn scan<F: Fn(f32, f32, f32) -> bool>(
    size: u32,
    color: u8,
    predicate: F,
) -> (Dimensions, Vec<Voxel>) {
    let dims = Dimensions {
        x: size,
        y: size,
        z: size,
    };
    let center = (size - 1) as f32 / 2.0;
    let half = size as f32 / 2.0;

    let mut voxels = Vec::new();
    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                let nx = (x as f32 - center) / half;
                let ny = (y as f32 - center) / half;
                let nz = (z as f32 - center) / half;
                if predicate(nx, ny, nz) {
                    voxels.push(Voxel {
                        x: x as u8,
                        y: y as u8,
                        z: z as u8,
                        color,
                    });
                }
            }
        }
    }
    (dims, voxels)
}

/// Generate a solid cube filling the model bounds
///
/// # Arguments
/// * `size` - Edge length in voxels (clamped to 8-255)
/// * `color` - Palette color index for every voxel
pub fn generate_cube(size: u32, color: u8) -> (Dimensions, Vec<Voxel>) {
    let size = clamp_size("generate_cube", size);
    scan(size, color, |_, _, _| true)
}

/// Generate a solid sphere, radius = half the edge length
///
/// # Arguments
/// * `size` - Edge length in voxels (clamped to 8-255)
/// * `color` - Palette color index for every voxel
pub fn generate_sphere(size: u32, color: u8) -> (Dimensions, Vec<Voxel>) {
    let size = clamp_size("generate_sphere", size);
    scan(size, color, |nx, ny, nz| nx * nx + ny * ny + nz * nz <= 1.0)
}

/// Generate a torus around the Z axis
///
/// Major radius 0.6 and minor radius 0.25 of the half-extent, leaving a
/// visible hole through the center.
///
/// # Arguments
/// * `size` - Edge length in voxels (clamped to 8-255)
/// * `color` - Palette color index for every voxel
pub fn generate_torus(size: u32, color: u8) -> (Dimensions, Vec<Voxel>) {
    let size = clamp_size("generate_torus", size);
    scan(size, color, |nx, ny, nz| {
        let ring = (nx * nx + ny * ny).sqrt() - 0.6;
        ring * ring + nz * nz <= 0.25 * 0.25
    })
}

/// Generate a stylized teapot
///
/// Composed from four predicates: a squashed ellipsoid body, a torus-arc
/// handle on the -X side, a tapered spout along +X, and a lid knob on top.
///
/// # Arguments
/// * `size` - Edge length in voxels (clamped to 8-255)
/// * `color` - Palette color index for every voxel
pub fn generate_teapot(size: u32, color: u8) -> (Dimensions, Vec<Voxel>) {
    let size = clamp_size("generate_teapot", size);

    let body = |nx: f32, ny: f32, nz: f32| {
        let dz = (nz + 0.15) / 0.48;
        (nx / 0.62) * (nx / 0.62) + (ny / 0.62) * (ny / 0.62) + dz * dz <= 1.0
    };
    let handle = |nx: f32, ny: f32, nz: f32| {
        let ring = ((nx + 0.62) * (nx + 0.62) + (nz + 0.1) * (nz + 0.1)).sqrt() - 0.28;
        ring * ring + ny * ny <= 0.09 * 0.09
    };
    let spout = |nx: f32, ny: f32, nz: f32| {
        if !(0.4..=0.9).contains(&nx) {
            return false;
        }
        // Tube rises toward the rim and tapers as it goes
        let t = (nx - 0.4) / 0.5;
        let axis_z = -0.25 + 0.45 * t;
        let radius = 0.14 - 0.05 * t;
        let dy = ny;
        let dz = nz - axis_z;
        dy * dy + dz * dz <= radius * radius
    };
    let knob = |nx: f32, ny: f32, nz: f32| {
        let dz = nz - 0.42;
        nx * nx + ny * ny + dz * dz <= 0.14 * 0.14
    };

    scan(size, color, |nx, ny, nz| {
        body(nx, ny, nz) || handle(nx, ny, nz) || spout(nx, ny, nz) || knob(nx, ny, nz)
    })
}
