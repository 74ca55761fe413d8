//! chisel-export - vox model generation and inspection
//!
//! Library half of the `chisel-export` binary. Provides:
//!
//! - `shapes` - procedural voxel generators (cube, sphere, torus, teapot)
//! - `describe` - JSON model descriptions authored by hand, validated and
//!   converted into codec inputs
//! - `report` - human-readable summaries of parsed models, including the
//!   unknown-chunk ledger and ASCII occupancy slices
//!
//! All file-system I/O lives in the binary; these modules transform values.

pub mod describe;
pub mod report;
pub mod shapes;
