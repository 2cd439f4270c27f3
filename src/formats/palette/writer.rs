//! Palette file writing
//!
//! Re-serializes a parsed [`Palette`] into the on-disk layout. Mainly useful
//! for fixture generation and for verifying that parsing is lossless.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::Result;

use super::Palette;

/// Serialize a palette back into its file layout.
///
/// The translucency table is appended only when the source data carried one,
/// so a serialize/parse round trip reproduces the original structure.
#[must_use]
pub fn palette_bytes(palette: &Palette) -> Vec<u8> {
    let mut data = Vec::with_capacity(
        palette.rgb.len() + 2 + palette.shade_tables.len() + palette.translucency.len(),
    );
    data.extend_from_slice(&palette.rgb);
    data.extend_from_slice(&palette.shade_count.to_le_bytes());
    data.extend_from_slice(&palette.shade_tables);
    if palette.has_translucency {
        data.extend_from_slice(&palette.translucency);
    }
    data
}

/// Write a palette file to disk
///
/// # Errors
/// Returns an error if file writing fails.
pub fn write_palette<P: AsRef<Path>>(path: P, palette: &Palette) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(&palette.rgb)?;
    writer.write_u16::<LittleEndian>(palette.shade_count)?;
    writer.write_all(&palette.shade_tables)?;
    if palette.has_translucency {
        writer.write_all(&palette.translucency)?;
    }
    writer.flush()?;

    Ok(())
}
