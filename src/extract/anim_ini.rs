//! Animation metadata sidecar
//!
//! Renders the per-archive animation INI consumed by downstream map and mod
//! tooling. The textual layout is load-bearing: 4-digit zero-padded tile
//! numbers, 3-space property indents, and the exact section spellings below
//! are what existing parsers expect.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::formats::art::ArtArchive;

/// Render the animation sidecar for an archive.
///
/// Tiles with a nonzero frame count get a range section naming the first
/// and last frame file; tiles with a nonzero center offset or extra flags
/// get a per-tile section. `extension` is the tile image extension without
/// the dot, matching whatever format the batch wrote.
#[must_use]
pub fn render_anim_ini(archive: &ArtArchive, extension: &str) -> String {
    let mut out = String::new();

    for tile in archive.tiles() {
        let anim = tile.animation;

        if anim.frame_count > 0 {
            let last = tile.id + u32::from(anim.frame_count);
            let _ = writeln!(
                out,
                "[tile{:04}.{extension} -> tile{last:04}.{extension}]",
                tile.id
            );
            let _ = writeln!(out, "   AnimationType={}", anim.kind.as_str());
            let _ = writeln!(out, "   AnimationSpeed={}", anim.speed);
            out.push('\n');
        }

        if anim.x_offset != 0 || anim.y_offset != 0 || anim.other_flags != 0 {
            let _ = writeln!(out, "[tile{:04}.{extension}]", tile.id);
            let _ = writeln!(out, "   XCenterOffset={}", anim.x_offset);
            let _ = writeln!(out, "   YCenterOffset={}", anim.y_offset);
            let _ = writeln!(out, "   OtherFlags={}", anim.other_flags);
            out.push('\n');
        }
    }

    out
}

/// Write the animation sidecar to disk
///
/// # Errors
/// Returns an error if file writing fails.
pub fn write_anim_ini<P: AsRef<Path>>(
    path: P,
    archive: &ArtArchive,
    extension: &str,
) -> Result<()> {
    std::fs::write(path, render_anim_ini(archive, extension))?;
    Ok(())
}
