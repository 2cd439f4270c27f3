//! ART archive reading and parsing

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};

use super::types::{ArtArchive, TileDescriptor};
use super::{ART_VERSION, MAX_TILES, MAX_TILE_DIM, REMAP_TABLE_SIZE};

/// Fixed header size: version, numtiles, tile_start, tile_end
const HEADER_SIZE: usize = 16;

/// Per-tile metadata size across the three parallel arrays (u16 + u16 + u32)
const TILE_META_SIZE: usize = 8;

/// Read an ART file from disk.
///
/// Remap tables trailing the pixel payload are picked up when present.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, or any of the
/// parse errors from [`parse_art`].
pub fn read_art<P: AsRef<Path>>(path: P) -> Result<ArtArchive> {
    let mut file = File::open(path.as_ref())?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let archive = parse_art(&buffer, true)?;
    tracing::debug!(
        "Parsed ART {:?}: tiles {}..={} ({} pixel bytes)",
        path.as_ref(),
        archive.tile_start,
        archive.tile_end,
        archive.pixel_bytes()
    );
    Ok(archive)
}

/// Parse ART data from bytes.
///
/// When `with_remaps` is set, bytes trailing the pixel payload are sliced
/// into successive 256-byte remap tables assigned to tiles in archive order;
/// assignment stops when fewer than 256 bytes remain, and later tiles simply
/// carry no remap.
///
/// # Errors
///
/// Fails fast with a descriptive error on the first violated check: buffer
/// too small for the current stage, version mismatch, inverted tile range,
/// tile count over the engine limit, out-of-range dimensions, or a pixel
/// payload shorter than the tile dimensions require.
pub fn parse_art(data: &[u8], with_remaps: bool) -> Result<ArtArchive> {
    if data.len() < HEADER_SIZE {
        return Err(Error::ArtTruncated {
            stage: "header",
            needed: HEADER_SIZE,
            available: data.len(),
        });
    }

    let mut cursor = Cursor::new(data);

    let version = cursor.read_u32::<LittleEndian>()?;
    if version != ART_VERSION {
        return Err(Error::UnsupportedArtVersion { version });
    }

    // numtiles is unreliable in files found in the wild; the real count
    // comes from the tile ID range below
    let _numtiles = cursor.read_u32::<LittleEndian>()?;

    let tile_start = cursor.read_u32::<LittleEndian>()?;
    let tile_end = cursor.read_u32::<LittleEndian>()?;
    if tile_start > tile_end {
        return Err(Error::InvalidTileRange {
            start: tile_start,
            end: tile_end,
        });
    }

    let tile_count = u64::from(tile_end - tile_start) + 1;
    if tile_count > MAX_TILES as u64 {
        return Err(Error::TooManyTiles {
            count: tile_count,
            limit: MAX_TILES,
        });
    }
    let tile_count = tile_count as usize;

    let meta_needed = tile_count * TILE_META_SIZE;
    let meta_available = data.len() - HEADER_SIZE;
    if meta_available < meta_needed {
        return Err(Error::ArtTruncated {
            stage: "tile metadata",
            needed: meta_needed,
            available: meta_available,
        });
    }

    // Three parallel arrays in array order: all widths, all heights, all
    // animation words
    let mut widths = Vec::with_capacity(tile_count);
    for _ in 0..tile_count {
        widths.push(cursor.read_u16::<LittleEndian>()?);
    }
    let mut heights = Vec::with_capacity(tile_count);
    for _ in 0..tile_count {
        heights.push(cursor.read_u16::<LittleEndian>()?);
    }
    let mut anim_words = Vec::with_capacity(tile_count);
    for _ in 0..tile_count {
        anim_words.push(cursor.read_u32::<LittleEndian>()?);
    }

    // Validate dimensions and lay out sequential pixel spans
    let mut tiles = Vec::with_capacity(tile_count);
    let mut total_pixels: usize = 0;
    for (i, ((&width, &height), &anim_word)) in
        widths.iter().zip(&heights).zip(&anim_words).enumerate()
    {
        let empty = width == 0 && height == 0;
        let in_range = (1..=MAX_TILE_DIM).contains(&width) && (1..=MAX_TILE_DIM).contains(&height);
        if !empty && !in_range {
            return Err(Error::InvalidTileDimensions {
                tile: tile_start + i as u32,
                width,
                height,
                max: MAX_TILE_DIM,
            });
        }

        let pixel_len = width as usize * height as usize;
        tiles.push(TileDescriptor {
            width,
            height,
            anim_word,
            pixel_offset: total_pixels,
            pixel_len,
            remap_offset: None,
        });
        total_pixels += pixel_len;
    }

    let pixel_start = HEADER_SIZE + meta_needed;
    let pixel_available = data.len() - pixel_start;
    if pixel_available < total_pixels {
        return Err(Error::ArtTruncated {
            stage: "pixel payload",
            needed: total_pixels,
            available: pixel_available,
        });
    }
    let pixels = data[pixel_start..pixel_start + total_pixels].to_vec();

    // Trailing bytes become per-tile remap tables, one 256-byte block per
    // tile in order until the bytes run out
    let mut remaps = Vec::new();
    if with_remaps {
        let trailing = &data[pixel_start + total_pixels..];
        let block_count = (trailing.len() / REMAP_TABLE_SIZE).min(tile_count);
        remaps.extend_from_slice(&trailing[..block_count * REMAP_TABLE_SIZE]);
        for (i, tile) in tiles.iter_mut().take(block_count).enumerate() {
            tile.remap_offset = Some(i * REMAP_TABLE_SIZE);
        }
    }

    Ok(ArtArchive {
        version,
        tile_start,
        tile_end,
        tiles,
        pixels,
        remaps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assemble ART bytes from tile dimension/animation triples plus raw
    /// pixel and trailing bytes
    fn build_art(
        tile_start: u32,
        dims: &[(u16, u16, u32)],
        pixels: &[u8],
        trailing: &[u8],
    ) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&(dims.len() as u32).to_le_bytes());
        data.extend_from_slice(&tile_start.to_le_bytes());
        data.extend_from_slice(&(tile_start + dims.len() as u32 - 1).to_le_bytes());
        for &(w, _, _) in dims {
            data.extend_from_slice(&w.to_le_bytes());
        }
        for &(_, h, _) in dims {
            data.extend_from_slice(&h.to_le_bytes());
        }
        for &(_, _, anim) in dims {
            data.extend_from_slice(&anim.to_le_bytes());
        }
        data.extend_from_slice(pixels);
        data.extend_from_slice(trailing);
        data
    }

    #[test]
    fn parses_a_two_tile_archive() {
        // 2x2 and 1x3 tiles
        let pixels = [1u8, 2, 3, 4, 5, 6, 7];
        let data = build_art(100, &[(2, 2, 0), (1, 3, 0)], &pixels, &[]);

        let archive = parse_art(&data, false).unwrap();
        assert_eq!(archive.tile_count(), 2);
        assert_eq!(archive.tile_start, 100);
        assert_eq!(archive.tile_end, 101);
        assert_eq!(archive.pixel_bytes(), 7);

        let first = archive.tile(0).unwrap();
        assert_eq!(first.id, 100);
        assert_eq!((first.width, first.height), (2, 2));
        assert_eq!(first.pixels, &[1, 2, 3, 4]);

        let second = archive.tile(1).unwrap();
        assert_eq!(second.id, 101);
        assert_eq!(second.pixels, &[5, 6, 7]);
    }

    #[test]
    fn pixel_spans_cover_the_payload() {
        let dims = [(2u16, 3u16, 0u32), (0, 0, 0), (4, 1, 0)];
        let pixels: Vec<u8> = (0..10).collect();
        let data = build_art(0, &dims, &pixels, &[]);

        let archive = parse_art(&data, false).unwrap();
        let span_sum: usize = archive
            .tiles()
            .map(|t| t.width as usize * t.height as usize)
            .sum();
        assert_eq!(span_sum, archive.pixel_bytes());
        assert!(archive.tile(1).unwrap().is_empty());
        assert!(archive.tile(1).unwrap().pixels.is_empty());
    }

    #[test]
    fn rejects_short_header() {
        let err = parse_art(&[0u8; 15], false).unwrap_err();
        assert!(matches!(
            err,
            Error::ArtTruncated {
                stage: "header",
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_version() {
        let mut data = build_art(0, &[(1, 1, 0)], &[9], &[]);
        data[0] = 2;
        assert!(matches!(
            parse_art(&data, false),
            Err(Error::UnsupportedArtVersion { version: 2 })
        ));
    }

    #[test]
    fn rejects_inverted_tile_range() {
        let mut data = build_art(5, &[(1, 1, 0)], &[9], &[]);
        // tile_end < tile_start
        data[12..16].copy_from_slice(&4u32.to_le_bytes());
        assert!(matches!(
            parse_art(&data, false),
            Err(Error::InvalidTileRange { start: 5, end: 4 })
        ));
    }

    #[test]
    fn rejects_tile_count_over_limit() {
        let mut data = build_art(0, &[(1, 1, 0)], &[9], &[]);
        data[12..16].copy_from_slice(&(MAX_TILES as u32).to_le_bytes());
        assert!(matches!(
            parse_art(&data, false),
            Err(Error::TooManyTiles { .. })
        ));
    }

    #[test]
    fn rejects_truncated_metadata() {
        let data = build_art(0, &[(1, 1, 0), (1, 1, 0)], &[9, 9], &[]);
        let err = parse_art(&data[..HEADER_SIZE + 5], false).unwrap_err();
        assert!(matches!(
            err,
            Error::ArtTruncated {
                stage: "tile metadata",
                ..
            }
        ));
    }

    #[test]
    fn rejects_half_empty_dimensions() {
        let data = build_art(40, &[(0, 3, 0)], &[], &[]);
        assert!(matches!(
            parse_art(&data, false),
            Err(Error::InvalidTileDimensions {
                tile: 40,
                width: 0,
                height: 3,
                ..
            })
        ));
    }

    #[test]
    fn rejects_oversized_dimensions() {
        let data = build_art(0, &[(257, 1, 0)], &[0; 257], &[]);
        assert!(matches!(
            parse_art(&data, false),
            Err(Error::InvalidTileDimensions { width: 257, .. })
        ));
    }

    #[test]
    fn rejects_short_pixel_payload() {
        let data = build_art(0, &[(2, 2, 0)], &[1, 2, 3], &[]);
        let err = parse_art(&data, false).unwrap_err();
        assert!(matches!(
            err,
            Error::ArtTruncated {
                stage: "pixel payload",
                needed: 4,
                available: 3,
            }
        ));
    }

    #[test]
    fn remaps_assigned_in_order_until_bytes_run_out() {
        // Three tiles, remap bytes for one and a half tables
        let mut trailing = vec![7u8; REMAP_TABLE_SIZE];
        trailing.extend_from_slice(&[8u8; 100]);
        let data = build_art(0, &[(1, 1, 0), (1, 1, 0), (1, 1, 0)], &[1, 2, 3], &trailing);

        let archive = parse_art(&data, true).unwrap();
        let first = archive.tile(0).unwrap();
        assert_eq!(first.remap.unwrap().len(), REMAP_TABLE_SIZE);
        assert!(first.remap.unwrap().iter().all(|&b| b == 7));
        assert!(archive.tile(1).unwrap().remap.is_none());
        assert!(archive.tile(2).unwrap().remap.is_none());
    }

    #[test]
    fn remaps_ignored_when_not_requested() {
        let trailing = vec![7u8; REMAP_TABLE_SIZE];
        let data = build_art(0, &[(1, 1, 0)], &[1], &trailing);
        let archive = parse_art(&data, false).unwrap();
        assert!(archive.tile(0).unwrap().remap.is_none());
    }

    #[test]
    fn animation_word_is_decoded_per_tile() {
        use super::super::types::AnimationKind;

        let word = 3 | (2 << 6) | (10 << 8) | (250 << 16) | (5 << 24);
        let data = build_art(12, &[(1, 1, word)], &[0], &[]);
        let archive = parse_art(&data, false).unwrap();
        let anim = archive.tile(0).unwrap().animation;
        assert_eq!(anim.frame_count, 3);
        assert_eq!(anim.kind, AnimationKind::Forward);
        assert_eq!(anim.y_offset, 10);
        assert_eq!(anim.x_offset, -6);
        assert_eq!(anim.speed, 5);
    }
}
