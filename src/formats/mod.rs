//! File format parsers and writers
//!
//! - [`art`] - Build engine ART tile archives
//! - [`palette`] - PALETTE.DAT color/shade/translucency data

pub mod art;
pub mod palette;
