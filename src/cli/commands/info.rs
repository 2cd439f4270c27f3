//! CLI command for inspecting ART and palette files

use std::path::Path;

use crate::formats::art::{TileView, read_art};
use crate::formats::palette::read_palette;

/// Show info about an ART or palette file
pub fn execute(source: &Path, as_palette: bool, list_tiles: bool) -> anyhow::Result<()> {
    if as_palette {
        return palette_info(source);
    }
    art_info(source, list_tiles)
}

fn art_info(path: &Path, list_tiles: bool) -> anyhow::Result<()> {
    let archive = read_art(path)?;

    println!("ART Information: {}", path.display());
    println!();
    println!("Version: {}", archive.version);
    println!(
        "Tiles: {} ({}..={})",
        archive.tile_count(),
        archive.tile_start,
        archive.tile_end
    );
    println!("Pixel data: {} bytes", archive.pixel_bytes());

    let animated = archive.tiles().filter(|t| t.animation.is_animated()).count();
    let remapped = archive.tiles().filter(|t| t.remap.is_some()).count();
    let empty = archive.tiles().filter(TileView::is_empty).count();
    println!("Animated tiles: {animated}");
    println!("Tiles with remaps: {remapped}");
    println!("Empty tiles: {empty}");

    if list_tiles {
        println!();
        for tile in archive.tiles() {
            let anim = tile.animation;
            if anim.is_animated() {
                println!(
                    "tile{:04}: {}x{} {} x{} speed {}",
                    tile.id,
                    tile.width,
                    tile.height,
                    anim.kind.as_str(),
                    anim.frame_count,
                    anim.speed
                );
            } else {
                println!("tile{:04}: {}x{}", tile.id, tile.width, tile.height);
            }
        }
    }

    Ok(())
}

fn palette_info(path: &Path) -> anyhow::Result<()> {
    let palette = read_palette(path)?;

    println!("Palette Information: {}", path.display());
    println!();
    println!("Base colors: 256");
    println!("Shade tables: {}", palette.shade_table_count());
    println!(
        "Translucency table: {}",
        if palette.has_translucency() {
            "present"
        } else {
            "absent"
        }
    );

    Ok(())
}
