//! Batch tile extraction
//!
//! Drives the full per-tile pipeline (convert, encode, write) across an
//! archive, one independent rayon task per tile. `ArtArchive` and `Palette`
//! are read-only, so tasks share them without locking; per-tile failures are
//! counted into the summary while the rest of the batch keeps going.

mod anim_ini;

pub use anim_ini::{render_anim_ini, write_anim_ini};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::converter::{ConversionOptions, palette_to_rgba};
use crate::encoder::{
    EncodedImage, ImageFormat, TransparencyPolicy, encode_bmp, encode_png, encode_tga,
};
use crate::error::Result;
use crate::formats::art::{ArtArchive, TileView};
use crate::formats::palette::Palette;

/// Default file name for the animation sidecar
pub const ANIM_INI_NAME: &str = "animdata.ini";

/// Options for a batch extraction run
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Directory tile images are written into
    pub output_dir: PathBuf,
    /// Output image format
    pub format: ImageFormat,
    /// Conversion pipeline knobs (PNG path)
    pub conversion: ConversionOptions,
    /// Alpha keying rule for the BMP path
    pub transparency: TransparencyPolicy,
    /// Also write the animation metadata sidecar
    pub write_anim_ini: bool,
}

impl ExtractOptions {
    /// Options with the legacy defaults for a given output directory
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            format: ImageFormat::Tga,
            conversion: ConversionOptions::default(),
            transparency: TransparencyPolicy::default(),
            write_anim_ini: true,
        }
    }
}

/// Progress information during batch extraction
#[derive(Debug, Clone)]
pub struct TileProgress {
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of tiles
    pub total: usize,
    /// Tile ID being processed
    pub tile_id: u32,
}

/// Result of a batch extraction run
#[derive(Debug, Clone)]
pub struct ExtractSummary {
    /// Number of tiles successfully written
    pub success_count: usize,
    /// Number of tiles that failed to convert, encode, or write
    pub fail_count: usize,
    /// Number of empty tiles skipped
    pub skipped_count: usize,
    /// One message per tile processed
    pub results: Vec<String>,
}

impl ExtractSummary {
    /// True when no tile failed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.fail_count == 0
    }
}

/// Find all `.art` files in a directory recursively
///
/// # Returns
/// A sorted list of paths to ART files found in the directory tree.
pub fn find_art_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut art_files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("art"))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    art_files.sort();
    art_files
}

/// Output file name for a tile: `tileNNNN.<ext>`, 4-digit zero-padded
#[must_use]
pub fn tile_file_name(id: u32, format: ImageFormat) -> String {
    format!("tile{id:04}.{}", format.extension())
}

/// Convert and encode one tile according to the selected format.
///
/// PNG goes through the full RGBA pipeline; TGA and BMP work directly from
/// the indexed pixels.
///
/// # Errors
/// Returns the conversion or encoding error for this tile.
pub fn encode_tile(
    tile: &TileView<'_>,
    palette: &Palette,
    options: &ExtractOptions,
) -> Result<EncodedImage> {
    match options.format {
        ImageFormat::Png => {
            let image = palette_to_rgba(tile, palette, &options.conversion)?;
            encode_png(&image.view())
        }
        ImageFormat::Tga => encode_tga(tile, palette),
        ImageFormat::Bmp => encode_bmp(tile, palette, options.transparency),
    }
}

/// Extract every tile of an archive to disk in parallel.
///
/// Creating the output directory or writing the animation sidecar is fatal;
/// per-tile convert/encode/write failures are recorded in the summary and
/// processing continues.
///
/// # Errors
/// Returns an error if the output directory cannot be created or the
/// animation sidecar cannot be written.
pub fn extract_tiles<F>(
    archive: &ArtArchive,
    palette: &Palette,
    options: &ExtractOptions,
    progress: F,
) -> Result<ExtractSummary>
where
    F: Fn(&TileProgress) + Send + Sync,
{
    std::fs::create_dir_all(&options.output_dir)?;

    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let skipped_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = archive.tile_count();

    tracing::debug!(
        "Extracting {total} tiles as {} into {:?}",
        options.format.as_str(),
        options.output_dir
    );

    // One task per tile; collect() is the blocking join
    let results: Vec<String> = (0..total)
        .into_par_iter()
        .map(|i| {
            let tile = archive.tile(i).expect("index in range");

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&TileProgress {
                current,
                total,
                tile_id: tile.id,
            });

            let file_name = tile_file_name(tile.id, options.format);

            if tile.is_empty() {
                skipped_counter.fetch_add(1, Ordering::SeqCst);
                return format!("Skipped {file_name}: empty tile");
            }

            let written = encode_tile(&tile, palette, options)
                .and_then(|encoded| encoded.write_to(options.output_dir.join(&file_name)));
            match written {
                Ok(()) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    format!("Wrote {file_name}")
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    tracing::warn!("tile {} failed: {e}", tile.id);
                    format!("Failed {file_name}: {e}")
                }
            }
        })
        .collect();

    if options.write_anim_ini {
        write_anim_ini(
            options.output_dir.join(ANIM_INI_NAME),
            archive,
            options.format.extension(),
        )?;
    }

    Ok(ExtractSummary {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        skipped_count: skipped_counter.load(Ordering::SeqCst),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_file_names_are_zero_padded() {
        assert_eq!(tile_file_name(0, ImageFormat::Tga), "tile0000.tga");
        assert_eq!(tile_file_name(42, ImageFormat::Png), "tile0042.png");
        assert_eq!(tile_file_name(12345, ImageFormat::Bmp), "tile12345.bmp");
    }
}
