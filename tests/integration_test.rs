//! End-to-end tests over synthetic ART and palette fixtures

use buildart::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

/// Build ART bytes for the given tiles.
///
/// Each tile is (width, height, animation word); pixel values count up so
/// every tile gets distinct content. `remap_blocks` trailing tables are
/// appended.
fn build_art_bytes(tile_start: u32, tiles: &[(u16, u16, u32)], remap_blocks: usize) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&(tiles.len() as u32).to_le_bytes());
    data.extend_from_slice(&tile_start.to_le_bytes());
    data.extend_from_slice(&(tile_start + tiles.len() as u32 - 1).to_le_bytes());
    for &(w, _, _) in tiles {
        data.extend_from_slice(&w.to_le_bytes());
    }
    for &(_, h, _) in tiles {
        data.extend_from_slice(&h.to_le_bytes());
    }
    for &(_, _, anim) in tiles {
        data.extend_from_slice(&anim.to_le_bytes());
    }
    let total: usize = tiles.iter().map(|&(w, h, _)| w as usize * h as usize).sum();
    data.extend((0..total).map(|i| (i % 256) as u8));
    for block in 0..remap_blocks {
        data.extend(std::iter::repeat_n(block as u8, 256));
    }
    data
}

/// Palette bytes with a red ramp, `shades` flat shade tables, and an
/// optional translucency table
fn build_palette_bytes(shades: u16, translucency: bool) -> Vec<u8> {
    let mut data = Vec::new();
    for i in 0..256u16 {
        data.push((i % 64) as u8);
        data.push(1);
        data.push(2);
    }
    data.extend_from_slice(&shades.to_le_bytes());
    for s in 0..shades {
        data.extend(std::iter::repeat_n((s % 256) as u8, 256));
    }
    if translucency {
        data.extend((0..65536).map(|i| (i % 256) as u8));
    }
    data
}

#[test]
fn archive_invariants_hold_after_parsing() {
    let data = build_art_bytes(256, &[(4, 8, 0), (0, 0, 0), (16, 16, 0), (1, 1, 0)], 0);
    let archive = parse_art(&data, false).unwrap();

    assert_eq!(
        archive.tile_count() as u32,
        archive.tile_end - archive.tile_start + 1
    );
    let span_sum: usize = archive
        .tiles()
        .map(|t| t.width as usize * t.height as usize)
        .sum();
    assert_eq!(span_sum, archive.pixel_bytes());
    assert_eq!(archive.pixel_bytes(), 4 * 8 + 16 * 16 + 1);
}

#[test]
fn transparency_fix_matches_source_indices() {
    // One 16x16 tile whose pixels cycle 0..=255: every pixel with source
    // index 0 must come out fully transparent, everything else opaque
    let data = build_art_bytes(0, &[(16, 16, 0)], 0);
    let archive = parse_art(&data, true).unwrap();
    let palette = parse_palette(&build_palette_bytes(32, true)).unwrap();

    let tile = archive.tile(0).unwrap();
    let options = ConversionOptions::default();
    assert!(options.fix_transparency);
    let image = palette_to_rgba(&tile, &palette, &options).unwrap();

    for y in 0..16u32 {
        for x in 0..16u32 {
            let index = tile.pixels[tile.pixel_index(x, y)];
            let alpha = image.pixels[((y * 16 + x) * 4 + 3) as usize];
            if index == 0 {
                assert_eq!(alpha, 0, "index 0 at ({x},{y}) must be transparent");
            } else {
                assert_eq!(alpha, 255, "index {index} at ({x},{y}) must be opaque");
            }
        }
    }
}

#[test]
fn tga_file_and_memory_paths_are_byte_identical() {
    let data = build_art_bytes(0, &[(8, 5, 0)], 0);
    let archive = parse_art(&data, false).unwrap();
    let palette = parse_palette(&build_palette_bytes(0, false)).unwrap();
    let tile = archive.tile(0).unwrap();

    let encoded = encode_tga(&tile, &palette).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("tile0000.tga");
    encoded.write_to(&path).unwrap();
    let from_file = std::fs::read(&path).unwrap();

    assert_eq!(from_file, encoded.bytes);
}

#[test]
fn bmp_file_size_field_matches_output_length() {
    let data = build_art_bytes(0, &[(7, 3, 0)], 0);
    let archive = parse_art(&data, false).unwrap();
    let palette = parse_palette(&build_palette_bytes(0, false)).unwrap();

    let encoded = encode_bmp(
        &archive.tile(0).unwrap(),
        &palette,
        TransparencyPolicy::ByColorValueAt255,
    )
    .unwrap();
    let file_size = u32::from_le_bytes(encoded.bytes[2..6].try_into().unwrap());
    assert_eq!(file_size as usize, encoded.bytes.len());
}

#[test]
fn empty_tiles_are_no_ops_through_every_encoder() {
    let data = build_art_bytes(0, &[(0, 0, 0), (2, 2, 0)], 0);
    let archive = parse_art(&data, false).unwrap();
    let palette = parse_palette(&build_palette_bytes(0, false)).unwrap();
    let empty = archive.tile(0).unwrap();

    let image = palette_to_rgba(&empty, &palette, &ConversionOptions::default()).unwrap();
    assert!(image.pixels.is_empty());
    assert!(encode_png(&image.view()).unwrap().is_empty());
    assert!(encode_tga(&empty, &palette).unwrap().is_empty());
    assert!(
        encode_bmp(&empty, &palette, TransparencyPolicy::default())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn palette_round_trips_through_disk() {
    let original = build_palette_bytes(8, true);
    let palette = parse_palette(&original).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("PALETTE.DAT");
    buildart::formats::palette::write_palette(&path, &palette).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), original);

    let reloaded = read_palette(&path).unwrap();
    assert_eq!(reloaded.shade_table_count(), 8);
    assert!(reloaded.has_translucency());
    for i in [0u8, 63, 200, 255] {
        assert_eq!(reloaded.entry_to_rgb(i), palette.entry_to_rgb(i));
    }
}

#[test]
fn batch_extraction_writes_tiles_and_sidecar() {
    // Tile 0 still, tile 1 animated (2 forward frames, speed 3), tile 2
    // empty
    let animated = 2 | (2 << 6) | (3 << 24);
    let data = build_art_bytes(0, &[(4, 4, 0), (4, 4, animated), (0, 0, 0)], 0);
    let archive = parse_art(&data, true).unwrap();
    let palette = parse_palette(&build_palette_bytes(0, false)).unwrap();

    let dir = tempdir().unwrap();
    let mut options = ExtractOptions::new(dir.path());
    options.format = ImageFormat::Png;

    let summary = extract_tiles(&archive, &palette, &options, |_| {}).unwrap();
    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.fail_count, 0);
    assert_eq!(summary.skipped_count, 1);
    assert!(summary.is_complete());

    assert!(dir.path().join("tile0000.png").is_file());
    assert!(dir.path().join("tile0001.png").is_file());
    assert!(!dir.path().join("tile0002.png").exists());

    let ini = std::fs::read_to_string(dir.path().join("animdata.ini")).unwrap();
    let expected = "\
[tile0001.png -> tile0003.png]
   AnimationType=forward
   AnimationSpeed=3

";
    assert_eq!(ini, expected);
}

#[test]
fn extraction_reads_back_as_valid_png() {
    let data = build_art_bytes(10, &[(6, 9, 0)], 0);
    let archive = parse_art(&data, false).unwrap();
    let palette = parse_palette(&build_palette_bytes(0, false)).unwrap();

    let dir = tempdir().unwrap();
    let mut options = ExtractOptions::new(dir.path());
    options.format = ImageFormat::Png;
    options.write_anim_ini = false;

    extract_tiles(&archive, &palette, &options, |_| {}).unwrap();

    let decoded = image::open(dir.path().join("tile0010.png")).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (6, 9));
    // Column-major source: pixel (1, 0) is byte 9 of the span -> index 9
    let px = decoded.get_pixel(1, 0).0;
    assert_eq!(px[0], 9 * 4);
}

#[test]
fn remap_tables_flow_through_conversion() {
    // One tile, one trailing remap block filled with zeros: with lookup on,
    // every pixel remaps to index 0 and keys transparent
    let data = build_art_bytes(0, &[(2, 2, 0)], 1);
    let archive = parse_art(&data, true).unwrap();
    let palette = parse_palette(&build_palette_bytes(0, false)).unwrap();
    let tile = archive.tile(0).unwrap();
    assert!(tile.remap.is_some());

    let options = ConversionOptions {
        apply_lookup: true,
        ..ConversionOptions::default()
    };
    let image = palette_to_rgba(&tile, &palette, &options).unwrap();
    assert!(image.pixels.chunks_exact(4).all(|px| px == [0, 0, 0, 0]));
}

#[test]
fn find_art_files_discovers_recursively() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("sub")).unwrap();
    std::fs::write(dir.path().join("TILES000.ART"), b"").unwrap();
    std::fs::write(dir.path().join("sub/tiles001.art"), b"").unwrap();
    std::fs::write(dir.path().join("PALETTE.DAT"), b"").unwrap();

    let found = find_art_files(dir.path());
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| p
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("art"))));
}
