//! BMP encoding
//!
//! Writes uncompressed 32-bit bitmaps: a 14-byte file header, a 40-byte
//! BITMAPINFOHEADER with positive height (bottom-up rows), and BGRA pixel
//! data resolved through the palette. The alpha channel comes from the
//! caller's [`TransparencyPolicy`]; the legacy BMP path keyed on the magenta
//! marker color at index 255 rather than the engine's index-0 rule.
//!
//! Rows are naturally 4-byte aligned since every pixel is 4 bytes wide.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::Result;
use crate::formats::art::TileView;
use crate::formats::palette::Palette;

use super::{EncodedImage, ImageFormat, TransparencyPolicy};

/// 14-byte file header plus 40-byte info header
const BMP_DATA_OFFSET: u32 = 54;

/// Encode a tile as an uncompressed 32 bpp bottom-up BMP.
///
/// Empty tiles produce an empty byte buffer. The file-size field in the
/// header always equals the length of the returned buffer.
///
/// # Errors
///
/// Returns [`Error::PixelBufferMismatch`] when a non-empty tile's pixel span
/// does not match its dimensions.
///
/// [`Error::PixelBufferMismatch`]: crate::Error::PixelBufferMismatch
pub fn encode_bmp(
    tile: &TileView<'_>,
    palette: &Palette,
    policy: TransparencyPolicy,
) -> Result<EncodedImage> {
    if tile.is_empty() {
        return Ok(EncodedImage {
            format: ImageFormat::Bmp,
            width: u32::from(tile.width),
            height: u32::from(tile.height),
            bytes: Vec::new(),
        });
    }
    tile.check_pixel_len()?;

    let width = u32::from(tile.width);
    let height = u32::from(tile.height);
    let image_size = width * height * 4;
    let file_size = BMP_DATA_OFFSET + image_size;

    let mut bytes = Vec::with_capacity(file_size as usize);

    // File header
    bytes.extend_from_slice(b"BM");
    bytes.write_u32::<LittleEndian>(file_size)?;
    bytes.write_u32::<LittleEndian>(0)?; // reserved
    bytes.write_u32::<LittleEndian>(BMP_DATA_OFFSET)?;

    // BITMAPINFOHEADER
    bytes.write_u32::<LittleEndian>(40)?;
    bytes.write_i32::<LittleEndian>(width as i32)?;
    bytes.write_i32::<LittleEndian>(height as i32)?; // positive: bottom-up
    bytes.write_u16::<LittleEndian>(1)?; // planes
    bytes.write_u16::<LittleEndian>(32)?; // bits per pixel
    bytes.write_u32::<LittleEndian>(0)?; // BI_RGB, uncompressed
    bytes.write_u32::<LittleEndian>(image_size)?;
    bytes.write_i32::<LittleEndian>(0)?; // x pixels per meter
    bytes.write_i32::<LittleEndian>(0)?; // y pixels per meter
    bytes.write_u32::<LittleEndian>(0)?; // colors used
    bytes.write_u32::<LittleEndian>(0)?; // important colors

    // BGRA rows, bottom-up
    for y in (0..height).rev() {
        for x in 0..width {
            let index = tile.pixels[tile.pixel_index(x, y)];
            let rgb = palette.entry_to_rgb(index);
            let alpha = policy.alpha_for(index, rgb);
            bytes.write_u8(rgb[2])?;
            bytes.write_u8(rgb[1])?;
            bytes.write_u8(rgb[0])?;
            bytes.write_u8(alpha)?;
        }
    }

    Ok(EncodedImage {
        format: ImageFormat::Bmp,
        width,
        height,
        bytes,
    })
}
