//! Indexed tile to RGBA conversion
//!
//! Transforms one column-major indexed tile plus a palette into a row-major
//! RGBA8 image. The per-pixel pipeline is: sample, optional per-tile remap,
//! palette/shade lookup, index-0 transparency keying, integer alpha
//! premultiply. An optional whole-image matte-hygiene pass (alpha erode +
//! box blur) runs afterwards, before the final premultiply.

mod matte;

use crate::error::Result;
use crate::formats::art::TileView;
use crate::formats::palette::Palette;

/// Knobs for [`palette_to_rgba`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Remap pixel indices through the tile's lookup table when it has one
    pub apply_lookup: bool,
    /// Darken/lighten through this shade table before color lookup
    pub shade_index: Option<u8>,
    /// Treat palette index 0 as fully transparent (zeroing RGB too)
    pub fix_transparency: bool,
    /// Premultiply color channels by alpha
    pub premultiply_alpha: bool,
    /// Erode + blur the alpha channel to reduce edge shimmer
    pub matte_hygiene: bool,
}

impl Default for ConversionOptions {
    /// Index-0 transparency keying on, everything else off - what the legacy
    /// tool did by default
    fn default() -> Self {
        Self {
            apply_lookup: false,
            shade_index: None,
            fix_transparency: true,
            premultiply_alpha: false,
            matte_hygiene: false,
        }
    }
}

/// A row-major RGBA8 image produced by conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA8 buffer, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    /// Borrow a packed view over the whole image
    #[must_use]
    pub fn view(&self) -> crate::encoder::RgbaImageView<'_> {
        crate::encoder::RgbaImageView {
            pixels: &self.pixels,
            width: self.width,
            height: self.height,
            stride: self.width as usize * 4,
        }
    }
}

/// Convert one indexed tile to a row-major RGBA8 image.
///
/// Empty tiles (either dimension zero) succeed trivially with a zero-sized
/// image. For non-empty tiles a pixel span that does not match
/// `width * height` fails the whole call; there is no partial result.
///
/// # Errors
///
/// Returns [`Error::PixelBufferMismatch`] on a dimension/span mismatch.
///
/// [`Error::PixelBufferMismatch`]: crate::Error::PixelBufferMismatch
pub fn palette_to_rgba(
    tile: &TileView<'_>,
    palette: &Palette,
    options: &ConversionOptions,
) -> Result<RgbaImage> {
    if tile.is_empty() {
        return Ok(RgbaImage {
            width: u32::from(tile.width),
            height: u32::from(tile.height),
            pixels: Vec::new(),
        });
    }
    tile.check_pixel_len()?;

    let width = u32::from(tile.width);
    let height = u32::from(tile.height);
    let mut pixels = vec![0u8; width as usize * height as usize * 4];

    for y in 0..height {
        for x in 0..width {
            // Sample from the column-major span
            let mut index = tile.pixels[tile.pixel_index(x, y)];

            // Per-tile remap; indices past a short table pass through
            if options.apply_lookup {
                if let Some(remap) = tile.remap {
                    if let Some(&mapped) = remap.get(index as usize) {
                        index = mapped;
                    }
                }
            }

            let rgb = match options.shade_index {
                Some(shade) if palette.has_shade_tables() => {
                    palette.shaded_entry_to_rgb(shade, index)
                }
                _ => palette.entry_to_rgb(index),
            };
            let mut rgba = [rgb[0], rgb[1], rgb[2], 255];

            // Index 0 is the engine's transparent color
            if options.fix_transparency && index == 0 {
                rgba = [0, 0, 0, 0];
            }

            if options.premultiply_alpha {
                premultiply_pixel(&mut rgba);
            }

            let dst = (y as usize * width as usize + x as usize) * 4;
            pixels[dst..dst + 4].copy_from_slice(&rgba);
        }
    }

    if options.matte_hygiene {
        matte::clean_alpha(width as usize, height as usize, &mut pixels);
        // The matte pass rewrites alpha, so the premultiply must be redone
        // against the cleaned values
        if options.premultiply_alpha {
            for px in pixels.chunks_exact_mut(4) {
                premultiply_pixel(px);
            }
        }
    }

    Ok(RgbaImage {
        width,
        height,
        pixels,
    })
}

/// Integer premultiply: `c * (a + 1) >> 8`, skipped for opaque pixels.
///
/// At alpha 0 this zeroes every channel, which keeps the index-0 keying
/// convention intact even when the matte pass drops a pixel to zero.
fn premultiply_pixel(rgba: &mut [u8]) {
    let alpha = rgba[3];
    if alpha < 255 {
        for c in &mut rgba[..3] {
            *c = ((u16::from(*c) * (u16::from(alpha) + 1)) >> 8) as u8;
        }
    }
}
