//! PNG encoding via the delegate codec

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{Error, Result};

use super::{EncodedImage, ImageFormat, RgbaImageView};

/// Encode an RGBA view as PNG.
///
/// Empty views produce an empty byte buffer rather than an error, so empty
/// tiles stay a no-op through the whole pipeline.
///
/// # Errors
///
/// Returns [`Error::ImageViewMismatch`] when the view geometry does not fit
/// its buffer, or [`Error::PngEncodeFailed`] when the delegate codec fails.
pub fn encode_png(view: &RgbaImageView<'_>) -> Result<EncodedImage> {
    view.validate()?;

    if view.width == 0 || view.height == 0 {
        return Ok(EncodedImage {
            format: ImageFormat::Png,
            width: view.width,
            height: view.height,
            bytes: Vec::new(),
        });
    }

    let packed = view.packed_pixels();
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(&packed, view.width, view.height, ExtendedColorType::Rgba8)
        .map_err(|e| Error::PngEncodeFailed {
            message: e.to_string(),
        })?;

    Ok(EncodedImage {
        format: ImageFormat::Png,
        width: view.width,
        height: view.height,
        bytes,
    })
}
