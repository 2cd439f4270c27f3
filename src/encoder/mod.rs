//! Image encoders
//!
//! Serializes converted tiles into PNG, TGA, or BMP byte streams. PNG
//! delegates to the `image` crate; TGA and BMP are written by hand to match
//! the byte layouts legacy tooling expects. Every encoder is a pure function
//! of its inputs - there is no encoder state across calls.

mod bmp;
mod png;
mod tga;

pub use bmp::encode_bmp;
pub use png::encode_png;
pub use tga::encode_tga;

use std::borrow::Cow;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics (delegate codec, full RGBA)
    Png,
    /// Truevision TGA (color-mapped, keeps the indexed pixels)
    Tga,
    /// Windows bitmap (32 bpp BGRA, bottom-up)
    Bmp,
}

impl ImageFormat {
    /// File extension without the dot
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Tga => "tga",
            ImageFormat::Bmp => "bmp",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Tga => "TGA",
            ImageFormat::Bmp => "BMP",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "tga" => Ok(ImageFormat::Tga),
            "bmp" => Ok(ImageFormat::Bmp),
            _ => Err(format!("unknown image format '{s}' (expected png, tga, or bmp)")),
        }
    }
}

/// Which legacy transparency rule an encoder applies.
///
/// The original tooling shipped two different rules: the conversion engine
/// keys on palette index 0, while the BMP path keys on the engine's magenta
/// marker color sitting at index 255. Downstream content depends on both, so
/// they stay separate and explicitly selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransparencyPolicy {
    /// Palette index 0 is transparent
    ByIndexZero,
    /// Index 255 is transparent when its resolved color is the engine's
    /// magenta marker (R >= 250, B >= 250, G <= 5)
    #[default]
    ByColorValueAt255,
}

impl TransparencyPolicy {
    /// Alpha for a pixel given its source index and resolved 8-bit color
    #[must_use]
    pub fn alpha_for(self, index: u8, rgb: [u8; 3]) -> u8 {
        match self {
            TransparencyPolicy::ByIndexZero => {
                if index == 0 {
                    0
                } else {
                    255
                }
            }
            TransparencyPolicy::ByColorValueAt255 => {
                if index == 255 && rgb[0] >= 250 && rgb[2] >= 250 && rgb[1] <= 5 {
                    0
                } else {
                    255
                }
            }
        }
    }
}

/// A borrowed, possibly strided view over row-major RGBA8 pixels
#[derive(Debug, Clone, Copy)]
pub struct RgbaImageView<'a> {
    /// Pixel buffer
    pub pixels: &'a [u8],
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bytes per row (at least `width * 4`)
    pub stride: usize,
}

impl RgbaImageView<'_> {
    /// Check that the buffer is large enough for the declared geometry
    pub fn validate(&self) -> Result<()> {
        let row = self.width as usize * 4;
        let needed = if self.height == 0 {
            0
        } else {
            (self.height as usize - 1) * self.stride + row
        };
        if self.stride < row || self.pixels.len() < needed {
            return Err(Error::ImageViewMismatch {
                width: self.width,
                height: self.height,
                stride: self.stride,
                needed: needed.max(row * self.height as usize),
                available: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Borrow the pixels as one packed buffer, copying only when the rows
    /// are strided
    #[must_use]
    pub fn packed_pixels(&self) -> Cow<'_, [u8]> {
        let row = self.width as usize * 4;
        if self.stride == row {
            Cow::Borrowed(&self.pixels[..row * self.height as usize])
        } else {
            let mut packed = Vec::with_capacity(row * self.height as usize);
            for y in 0..self.height as usize {
                let start = y * self.stride;
                packed.extend_from_slice(&self.pixels[start..start + row]);
            }
            Cow::Owned(packed)
        }
    }
}

/// An encoded image ready for a byte sink
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// The format the bytes are encoded in
    pub format: ImageFormat,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Encoded byte stream
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// True when the source tile was empty and no bytes were produced
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the encoded bytes to a file
    ///
    /// # Errors
    /// Returns an error if file writing fails.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}
