//! Types for ART tile archive handling

use crate::error::{Error, Result};

use super::REMAP_TABLE_SIZE;

/// Animation playback mode packed into bits 6-7 of a tile's animation word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationKind {
    /// No animation
    #[default]
    None,
    /// Ping-pong between first and last frame
    Oscillating,
    /// Advance through frames in tile order
    Forward,
    /// Advance through frames in reverse tile order
    Backward,
}

impl AnimationKind {
    /// Parse the kind from its 2-bit encoding
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            1 => AnimationKind::Oscillating,
            2 => AnimationKind::Forward,
            3 => AnimationKind::Backward,
            _ => AnimationKind::None,
        }
    }

    /// Convert the kind to its 2-bit encoding
    #[must_use]
    pub fn to_bits(self) -> u8 {
        match self {
            AnimationKind::None => 0,
            AnimationKind::Oscillating => 1,
            AnimationKind::Forward => 2,
            AnimationKind::Backward => 3,
        }
    }

    /// The spelling used by animation sidecar files
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationKind::None => "none",
            AnimationKind::Oscillating => "oscillation",
            AnimationKind::Forward => "forward",
            AnimationKind::Backward => "backward",
        }
    }
}

/// Decoded form of a tile's packed 32-bit animation word.
///
/// Bit layout: frames in bits 0-5, kind in bits 6-7, signed Y center offset
/// in bits 8-15, signed X center offset in bits 16-23, speed in bits 24-27,
/// remaining flags in bits 28-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationDescriptor {
    /// Number of animation frames after this tile (0-63)
    pub frame_count: u8,
    /// Playback mode
    pub kind: AnimationKind,
    /// Signed Y center offset
    pub y_offset: i8,
    /// Signed X center offset
    pub x_offset: i8,
    /// Animation speed (0-15)
    pub speed: u8,
    /// Remaining flag bits (0-15)
    pub other_flags: u8,
}

impl AnimationDescriptor {
    /// Decode a packed animation word
    #[must_use]
    pub fn decode(word: u32) -> Self {
        Self {
            frame_count: (word & 0x3F) as u8,
            kind: AnimationKind::from_bits(((word >> 6) & 0x3) as u8),
            y_offset: ((word >> 8) & 0xFF) as u8 as i8,
            x_offset: ((word >> 16) & 0xFF) as u8 as i8,
            speed: ((word >> 24) & 0xF) as u8,
            other_flags: ((word >> 28) & 0xF) as u8,
        }
    }

    /// Pack the descriptor back into an animation word
    #[must_use]
    pub fn encode(&self) -> u32 {
        u32::from(self.frame_count & 0x3F)
            | (u32::from(self.kind.to_bits()) << 6)
            | (u32::from(self.y_offset as u8) << 8)
            | (u32::from(self.x_offset as u8) << 16)
            | (u32::from(self.speed & 0xF) << 24)
            | (u32::from(self.other_flags & 0xF) << 28)
    }

    /// Returns true if the tile animates at all
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.frame_count > 0 && self.kind != AnimationKind::None
    }
}

/// Metadata for one tile inside an [`ArtArchive`]
#[derive(Debug, Clone)]
pub struct TileDescriptor {
    /// Tile width in pixels
    pub width: u16,
    /// Tile height in pixels
    pub height: u16,
    /// Raw packed animation word
    pub anim_word: u32,
    /// Offset of this tile's pixels within the archive pixel payload
    pub(crate) pixel_offset: usize,
    /// Length of this tile's pixel span (`width * height`)
    pub(crate) pixel_len: usize,
    /// Offset of this tile's remap table within the trailing remap bytes
    pub(crate) remap_offset: Option<usize>,
}

/// A parsed ART tile archive.
///
/// Owns the pixel payload and any trailing remap tables; tiles are exposed
/// as borrowed [`TileView`]s. Immutable after parsing, so it can be shared
/// across worker threads without locking.
#[derive(Debug, Clone)]
pub struct ArtArchive {
    /// Format version from the header
    pub version: u32,
    /// ID of the first tile in the archive
    pub tile_start: u32,
    /// ID of the last tile in the archive
    pub tile_end: u32,
    pub(crate) tiles: Vec<TileDescriptor>,
    pub(crate) pixels: Vec<u8>,
    pub(crate) remaps: Vec<u8>,
}

impl ArtArchive {
    /// Number of tiles in the archive
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tile ID for a tile index (`tile_start + index`)
    #[must_use]
    pub fn tile_id(&self, index: usize) -> u32 {
        self.tile_start + index as u32
    }

    /// Total pixel payload length in bytes
    #[must_use]
    pub fn pixel_bytes(&self) -> usize {
        self.pixels.len()
    }

    /// Borrow one tile by index
    #[must_use]
    pub fn tile(&self, index: usize) -> Option<TileView<'_>> {
        let desc = self.tiles.get(index)?;
        Some(TileView {
            id: self.tile_id(index),
            width: desc.width,
            height: desc.height,
            pixels: &self.pixels[desc.pixel_offset..desc.pixel_offset + desc.pixel_len],
            remap: desc
                .remap_offset
                .map(|off| &self.remaps[off..off + REMAP_TABLE_SIZE]),
            animation: AnimationDescriptor::decode(desc.anim_word),
        })
    }

    /// Iterate over all tiles in archive order
    pub fn tiles(&self) -> impl Iterator<Item = TileView<'_>> + '_ {
        (0..self.tiles.len()).map(|i| self.tile(i).expect("index in range"))
    }
}

/// A non-owning view of one tile inside an [`ArtArchive`].
///
/// Pixels are indexed palette entries in column-major order; use
/// [`TileView::pixel_index`] or [`TileView::pixel`] rather than computing
/// offsets by hand.
#[derive(Debug, Clone, Copy)]
pub struct TileView<'a> {
    /// Global tile ID
    pub id: u32,
    /// Tile width in pixels
    pub width: u16,
    /// Tile height in pixels
    pub height: u16,
    /// Column-major indexed pixel data (`width * height` bytes)
    pub pixels: &'a [u8],
    /// Optional 256-entry palette remap for this tile
    pub remap: Option<&'a [u8]>,
    /// Decoded animation metadata
    pub animation: AnimationDescriptor,
}

impl TileView<'_> {
    /// True when either dimension is zero; empty tiles carry no pixels and
    /// convert/encode to empty output
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Linear offset of `(x, y)` in the column-major pixel span.
    ///
    /// Every pixel consumer goes through this helper so the `x * height + y`
    /// addressing lives in exactly one place.
    #[must_use]
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        x as usize * self.height as usize + y as usize
    }

    /// Read the palette index at `(x, y)`, bounds-checked
    pub fn pixel(&self, x: u32, y: u32) -> Result<u8> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.pixels
            .get(self.pixel_index(x, y))
            .copied()
            .ok_or(Error::PixelBufferMismatch {
                tile: self.id,
                expected: self.width as usize * self.height as usize,
                actual: self.pixels.len(),
            })
    }

    /// Validate that the pixel span matches the tile dimensions
    pub fn check_pixel_len(&self) -> Result<()> {
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() == expected {
            Ok(())
        } else {
            Err(Error::PixelBufferMismatch {
                tile: self.id,
                expected,
                actual: self.pixels.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_word_round_trips() {
        // Every field at a non-trivial value
        let desc = AnimationDescriptor {
            frame_count: 37,
            kind: AnimationKind::Backward,
            y_offset: -5,
            x_offset: 120,
            speed: 9,
            other_flags: 0xA,
        };
        assert_eq!(AnimationDescriptor::decode(desc.encode()), desc);
    }

    #[test]
    fn animation_word_round_trips_exhaustive_fields() {
        for frame_count in [0u8, 1, 63] {
            for kind_bits in 0u8..=3 {
                for offset in [-128i8, -1, 0, 1, 127] {
                    for speed in [0u8, 7, 15] {
                        let desc = AnimationDescriptor {
                            frame_count,
                            kind: AnimationKind::from_bits(kind_bits),
                            y_offset: offset,
                            x_offset: offset.wrapping_neg(),
                            speed,
                            other_flags: 0x5,
                        };
                        assert_eq!(AnimationDescriptor::decode(desc.encode()), desc);
                    }
                }
            }
        }
    }

    #[test]
    fn animation_decode_extracts_fields() {
        // frame_count=2, kind=oscillating, y=-1, x=3, speed=4, flags=1
        let word = 2 | (1 << 6) | (0xFF << 8) | (3 << 16) | (4 << 24) | (1 << 28);
        let desc = AnimationDescriptor::decode(word);
        assert_eq!(desc.frame_count, 2);
        assert_eq!(desc.kind, AnimationKind::Oscillating);
        assert_eq!(desc.y_offset, -1);
        assert_eq!(desc.x_offset, 3);
        assert_eq!(desc.speed, 4);
        assert_eq!(desc.other_flags, 1);
    }

    #[test]
    fn kind_bits_round_trip() {
        for bits in 0u8..=3 {
            assert_eq!(AnimationKind::from_bits(bits).to_bits(), bits);
        }
        // Upper bits are masked off
        assert_eq!(AnimationKind::from_bits(0xFE), AnimationKind::Forward);
    }

    #[test]
    fn pixel_index_is_column_major() {
        let view = TileView {
            id: 0,
            width: 4,
            height: 3,
            pixels: &[0; 12],
            remap: None,
            animation: AnimationDescriptor::default(),
        };
        assert_eq!(view.pixel_index(0, 0), 0);
        assert_eq!(view.pixel_index(0, 2), 2);
        assert_eq!(view.pixel_index(1, 0), 3);
        assert_eq!(view.pixel_index(3, 2), 11);
    }

    #[test]
    fn pixel_out_of_bounds_is_an_error() {
        let view = TileView {
            id: 7,
            width: 2,
            height: 2,
            pixels: &[1, 2, 3, 4],
            remap: None,
            animation: AnimationDescriptor::default(),
        };
        assert_eq!(view.pixel(1, 1).unwrap(), 4);
        assert!(matches!(
            view.pixel(2, 0),
            Err(Error::PixelOutOfBounds { x: 2, y: 0, .. })
        ));
    }
}
