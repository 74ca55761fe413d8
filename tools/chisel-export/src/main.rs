//! chisel-export - vox model generation and inspection tool
//!
//! Generates MagicaVoxel `.vox` files from procedural shape presets or
//! hand-authored JSON model descriptions, and inspects existing files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use chisel_export::{describe, report, shapes};
use chisel_vox::{default_palette, parse_vox, serialize_vox};

#[derive(Parser)]
#[command(name = "chisel-export")]
#[command(about = "Vox model generation and inspection tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a .vox file and print a summary
    Info {
        /// Input .vox file
        file: PathBuf,

        /// Also print per-Z ASCII occupancy slices
        #[arg(long)]
        grid: bool,
    },

    /// Generate a .vox file from a shape preset
    Gen {
        /// Shape preset
        shape: Shape,

        /// Edge length in voxels (8-255)
        #[arg(short, long, default_value_t = 32)]
        size: u32,

        /// Palette color index for generated voxels
        #[arg(short, long, default_value_t = 1)]
        color: u8,

        /// Output .vox file
        #[arg(short, long)]
        output: PathBuf,

        /// Embed the standard palette instead of omitting the chunk
        #[arg(long)]
        palette: bool,
    },

    /// Build a .vox file from a JSON model description
    Build {
        /// Input model description (JSON)
        description: PathBuf,

        /// Output .vox file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Shape {
    Cube,
    Sphere,
    Torus,
    Teapot,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file, grid } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let model = parse_vox(&bytes)
                .with_context(|| format!("failed to parse {}", file.display()))?;

            print!("{}", report::render_summary(&model));
            if grid {
                match &model.grid {
                    Some(g) => print!("{}", report::render_grid_slices(g)),
                    None => println!("(no grid - model lacks dimensions or voxels)"),
                }
            }
            Ok(())
        }

        Commands::Gen {
            shape,
            size,
            color,
            output,
            palette,
        } => {
            let (dims, voxels) = match shape {
                Shape::Cube => shapes::generate_cube(size, color),
                Shape::Sphere => shapes::generate_sphere(size, color),
                Shape::Torus => shapes::generate_torus(size, color),
                Shape::Teapot => shapes::generate_teapot(size, color),
            };
            let palette = palette.then(default_palette);

            let bytes = serialize_vox(dims, &voxels, palette);
            std::fs::write(&output, &bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;
            tracing::info!(
                "wrote {} ({} voxels, {} bytes)",
                output.display(),
                voxels.len(),
                bytes.len()
            );
            Ok(())
        }

        Commands::Build {
            description,
            output,
        } => {
            let desc = describe::load_description(&description)?;
            let (dims, voxels, palette) = desc.into_parts()?;

            let bytes = serialize_vox(dims, &voxels, palette.as_deref());
            std::fs::write(&output, &bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;
            tracing::info!(
                "wrote {} ({} voxels, {} bytes)",
                output.display(),
                voxels.len(),
                bytes.len()
            );
            Ok(())
        }
    }
}
