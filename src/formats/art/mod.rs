//! Build engine ART tile archive format
//!
//! An ART file is a little-endian binary archive of indexed-color tiles:
//! a 16-byte header (version, informational tile count, first/last tile ID),
//! three parallel metadata arrays (widths, heights, packed animation words),
//! the concatenated pixel payload, and optionally trailing 256-byte per-tile
//! remap tables. Tile pixels are stored column-major: the byte for `(x, y)`
//! lives at `x * height + y`.

mod reader;
mod types;

pub use reader::{parse_art, read_art};
pub use types::{AnimationDescriptor, AnimationKind, ArtArchive, TileDescriptor, TileView};

/// The only ART version this crate understands.
pub const ART_VERSION: u32 = 1;

/// Hard limit on tiles per archive, matching the engine's MAXTILES.
pub const MAX_TILES: usize = 9216;

/// Maximum legal tile width/height.
pub const MAX_TILE_DIM: u16 = 256;

/// Size of one per-tile remap table.
pub const REMAP_TABLE_SIZE: usize = 256;
