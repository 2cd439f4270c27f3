//! # buildart
//!
//! A pure-Rust library for working with Build engine tile assets
//! (Duke Nukem 3D, Blood, Shadow Warrior era).
//!
//! ## Supported Formats
//!
//! - **ART archives** - Parse tile archives: dimensions, animation words,
//!   column-major indexed pixels, per-tile remap tables
//! - **PALETTE.DAT** - Base colors, shade tables, and translucency table
//! - **PNG/TGA/BMP** - Export tiles as standard images
//!
//! ## Quick Start
//!
//! ```no_run
//! use buildart::converter::{ConversionOptions, palette_to_rgba};
//! use buildart::encoder::encode_png;
//! use buildart::formats::art::read_art;
//! use buildart::formats::palette::read_palette;
//!
//! let archive = read_art("TILES000.ART")?;
//! let palette = read_palette("PALETTE.DAT")?;
//!
//! let tile = archive.tile(0).expect("archive has tiles");
//! let image = palette_to_rgba(&tile, &palette, &ConversionOptions::default())?;
//! let png = encode_png(&image.view())?;
//! png.write_to("tile0000.png")?;
//! # Ok::<(), buildart::Error>(())
//! ```
//!
//! ### Batch Extraction
//!
//! ```no_run
//! use buildart::extract::{ExtractOptions, extract_tiles};
//! use buildart::formats::art::read_art;
//! use buildart::formats::palette::read_palette;
//!
//! let archive = read_art("TILES000.ART")?;
//! let palette = read_palette("PALETTE.DAT")?;
//!
//! let summary = extract_tiles(&archive, &palette, &ExtractOptions::new("out/"), |_| {})?;
//! println!("{} tiles written, {} failed", summary.success_count, summary.fail_count);
//! # Ok::<(), buildart::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `buildart` command-line binary

pub mod converter;
pub mod encoder;
pub mod error;
pub mod extract;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::converter::{ConversionOptions, RgbaImage, palette_to_rgba};
    pub use crate::encoder::{
        EncodedImage, ImageFormat, RgbaImageView, TransparencyPolicy, encode_bmp, encode_png,
        encode_tga,
    };
    pub use crate::error::{Error, Result};
    pub use crate::extract::{
        ExtractOptions, ExtractSummary, extract_tiles, find_art_files, render_anim_ini,
        tile_file_name,
    };
    pub use crate::formats::art::{
        AnimationDescriptor, AnimationKind, ArtArchive, TileView, parse_art, read_art,
    };
    pub use crate::formats::palette::{Palette, parse_palette, read_palette};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
