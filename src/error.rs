//! Error types for `buildart`

use thiserror::Error;

/// The error type for `buildart` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== ART Archive Errors ====================
    /// The buffer ended before a parse stage could complete.
    #[error("ART data truncated while reading {stage}: need {needed} bytes, have {available}")]
    ArtTruncated {
        /// The parse stage that ran out of bytes.
        stage: &'static str,
        /// Number of bytes the stage required.
        needed: usize,
        /// Number of bytes actually available.
        available: usize,
    },

    /// The ART version field is not the supported value.
    #[error("unsupported ART version: {version} (expected 1)")]
    UnsupportedArtVersion {
        /// The version number found in the file.
        version: u32,
    },

    /// The tile range in the header is inverted.
    #[error("invalid tile range: start {start} > end {end}")]
    InvalidTileRange {
        /// First tile ID in the archive.
        start: u32,
        /// Last tile ID in the archive.
        end: u32,
    },

    /// The archive claims more tiles than the engine hard limit.
    #[error("ART contains too many tiles: {count} (limit {limit})")]
    TooManyTiles {
        /// The number of tiles implied by the header.
        count: u64,
        /// The engine hard limit.
        limit: usize,
    },

    /// A tile has dimensions outside the legal range.
    #[error("invalid dimensions for tile {tile}: {width}x{height} (must be 0x0 or within 1..={max})")]
    InvalidTileDimensions {
        /// Tile ID of the offending tile.
        tile: u32,
        /// Width from the header.
        width: u16,
        /// Height from the header.
        height: u16,
        /// Maximum legal dimension.
        max: u16,
    },

    // ==================== Palette Errors ====================
    /// The palette blob is smaller than the fixed RGB + shade-count prefix.
    #[error("palette data too small: {size} bytes (need at least {needed})")]
    PaletteTooSmall {
        /// Size of the supplied buffer.
        size: usize,
        /// Minimum required size.
        needed: usize,
    },

    /// The palette claims more shade tables than the sanity ceiling.
    #[error("palette has too many shade tables: {count} (limit {limit})")]
    TooManyShadeTables {
        /// Shade table count from the palette header.
        count: u16,
        /// The sanity ceiling.
        limit: usize,
    },

    /// The shade table section ended early.
    #[error("palette shade tables truncated: need {needed} bytes, have {available}")]
    ShadeTablesTruncated {
        /// Bytes required for the declared shade tables.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    // ==================== Conversion Errors ====================
    /// A tile's pixel span does not match its dimensions.
    #[error("tile {tile} pixel buffer mismatch: expected {expected} bytes, have {actual}")]
    PixelBufferMismatch {
        /// Tile ID of the offending tile.
        tile: u32,
        /// Expected pixel count (`width * height`).
        expected: usize,
        /// Actual pixel span length.
        actual: usize,
    },

    /// A pixel coordinate fell outside the tile.
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} tile")]
    PixelOutOfBounds {
        /// X coordinate.
        x: u32,
        /// Y coordinate.
        y: u32,
        /// Tile width.
        width: u16,
        /// Tile height.
        height: u16,
    },

    // ==================== Encoding Errors ====================
    /// An image view's buffer does not match its declared dimensions/stride.
    #[error("image view mismatch: {width}x{height} with stride {stride} needs {needed} bytes, have {available}")]
    ImageViewMismatch {
        /// View width in pixels.
        width: u32,
        /// View height in pixels.
        height: u32,
        /// Row stride in bytes.
        stride: usize,
        /// Bytes the view geometry requires.
        needed: usize,
        /// Bytes actually in the buffer.
        available: usize,
    },

    /// The delegate PNG codec failed.
    #[error("failed to encode PNG: {message}")]
    PngEncodeFailed {
        /// The encoding error message.
        message: String,
    },

    // ==================== Generic/Fallback Errors ====================
    /// Invalid format error (use specific variants when possible).
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

/// A specialized Result type for `buildart` operations.
pub type Result<T> = std::result::Result<T, Error>;
