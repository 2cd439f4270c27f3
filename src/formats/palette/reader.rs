//! Palette file reading and parsing

use std::fs::File;
use std::io::Read;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

use super::{
    MAX_SHADE_TABLES, PALETTE_RGB_SIZE, Palette, SHADE_TABLE_SIZE, TRANSLUCENCY_TABLE_SIZE,
};

/// RGB section plus the u16 shade table count
const MIN_PALETTE_SIZE: usize = PALETTE_RGB_SIZE + 2;

/// Read a palette file from disk.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, or any of the
/// parse errors from [`parse_palette`].
pub fn read_palette<P: AsRef<Path>>(path: P) -> Result<Palette> {
    let mut file = File::open(path.as_ref())?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let palette = parse_palette(&buffer)?;
    tracing::debug!(
        "Parsed palette {:?}: {} shade tables, translucency {}",
        path.as_ref(),
        palette.shade_table_count(),
        if palette.has_translucency() {
            "present"
        } else {
            "absent"
        }
    );
    Ok(palette)
}

/// Parse palette data from bytes.
///
/// The 768 RGB bytes are copied verbatim; 6-bit range violations are
/// accepted as-is. A trailing translucency table is optional, and anything
/// shorter than a full table is ignored rather than rejected.
///
/// # Errors
///
/// Returns [`Error::PaletteTooSmall`] when the fixed prefix is missing,
/// [`Error::TooManyShadeTables`] when the declared count exceeds the
/// ceiling, and [`Error::ShadeTablesTruncated`] when the shade table section
/// ends early.
pub fn parse_palette(data: &[u8]) -> Result<Palette> {
    if data.len() < MIN_PALETTE_SIZE {
        return Err(Error::PaletteTooSmall {
            size: data.len(),
            needed: MIN_PALETTE_SIZE,
        });
    }

    let mut rgb = [0u8; PALETTE_RGB_SIZE];
    rgb.copy_from_slice(&data[..PALETTE_RGB_SIZE]);

    let shade_count = LittleEndian::read_u16(&data[PALETTE_RGB_SIZE..MIN_PALETTE_SIZE]);
    if shade_count as usize > MAX_SHADE_TABLES {
        return Err(Error::TooManyShadeTables {
            count: shade_count,
            limit: MAX_SHADE_TABLES,
        });
    }

    let shade_bytes = shade_count as usize * SHADE_TABLE_SIZE;
    let after_count = &data[MIN_PALETTE_SIZE..];
    if after_count.len() < shade_bytes {
        return Err(Error::ShadeTablesTruncated {
            needed: shade_bytes,
            available: after_count.len(),
        });
    }
    let shade_tables = after_count[..shade_bytes].to_vec();

    // Translucency table is optional; zero-fill when absent
    let after_shades = &after_count[shade_bytes..];
    let (translucency, has_translucency) = if after_shades.len() >= TRANSLUCENCY_TABLE_SIZE {
        (after_shades[..TRANSLUCENCY_TABLE_SIZE].to_vec(), true)
    } else {
        (vec![0u8; TRANSLUCENCY_TABLE_SIZE], false)
    };

    Ok(Palette {
        rgb,
        shade_count,
        shade_tables,
        translucency,
        has_translucency,
    })
}
