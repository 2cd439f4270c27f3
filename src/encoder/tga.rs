//! TGA encoding
//!
//! Writes uncompressed color-mapped Targa files: an 18-byte header, the
//! palette as a 256-entry 24-bit BGR color map, and the tile's raw palette
//! indices reordered from column-major into bottom-to-top rows. No RGBA
//! expansion happens here - TGA keeps the indexed data intact.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::Result;
use crate::formats::art::TileView;
use crate::formats::palette::Palette;

use super::{EncodedImage, ImageFormat};

/// Header size of every TGA this module writes
const TGA_HEADER_SIZE: usize = 18;

/// Color map size: 256 entries of 3 bytes each
const TGA_COLOR_MAP_SIZE: usize = 768;

/// Encode a tile as an uncompressed color-mapped TGA.
///
/// Empty tiles produce an empty byte buffer.
///
/// # Errors
///
/// Returns [`Error::PixelBufferMismatch`] when a non-empty tile's pixel span
/// does not match its dimensions.
///
/// [`Error::PixelBufferMismatch`]: crate::Error::PixelBufferMismatch
pub fn encode_tga(tile: &TileView<'_>, palette: &Palette) -> Result<EncodedImage> {
    if tile.is_empty() {
        return Ok(EncodedImage {
            format: ImageFormat::Tga,
            width: u32::from(tile.width),
            height: u32::from(tile.height),
            bytes: Vec::new(),
        });
    }
    tile.check_pixel_len()?;

    let mut bytes =
        Vec::with_capacity(TGA_HEADER_SIZE + TGA_COLOR_MAP_SIZE + tile.pixels.len());

    // 18-byte header
    bytes.write_u8(0)?; // no image ID
    bytes.write_u8(1)?; // color map present
    bytes.write_u8(1)?; // uncompressed, color-mapped
    bytes.write_u16::<LittleEndian>(0)?; // color map origin
    bytes.write_u16::<LittleEndian>(256)?; // color map length
    bytes.write_u8(24)?; // color map entry depth
    bytes.write_u16::<LittleEndian>(0)?; // x origin
    bytes.write_u16::<LittleEndian>(0)?; // y origin
    bytes.write_u16::<LittleEndian>(tile.width)?;
    bytes.write_u16::<LittleEndian>(tile.height)?;
    bytes.write_u8(8)?; // bits per pixel
    bytes.write_u8(0)?; // descriptor: bottom-left origin

    // Color map in BGR order at full 8-bit scale
    for index in 0..=255u8 {
        let [r, g, b] = palette.entry_to_rgb(index);
        bytes.write_u8(b)?;
        bytes.write_u8(g)?;
        bytes.write_u8(r)?;
    }

    // Indexed pixels, bottom row first
    for y in (0..u32::from(tile.height)).rev() {
        for x in 0..u32::from(tile.width) {
            bytes.write_u8(tile.pixels[tile.pixel_index(x, y)])?;
        }
    }

    Ok(EncodedImage {
        format: ImageFormat::Tga,
        width: u32::from(tile.width),
        height: u32::from(tile.height),
        bytes,
    })
}
