use std::path::PathBuf;

use clap::Subcommand;

use crate::cli::progress::TermCaps;

pub mod extract;
pub mod info;

#[derive(Subcommand)]
pub enum Commands {
    /// Extract tiles from an ART file (or every ART file under a directory)
    Extract {
        /// Source ART file or directory
        #[arg(short, long)]
        source: PathBuf,

        /// Palette file (PALETTE.DAT)
        #[arg(short, long)]
        palette: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Output image format: png, tga, or bmp
        #[arg(short, long, default_value = "tga")]
        format: String,

        /// Remap pixel indices through per-tile lookup tables
        #[arg(long)]
        lookup: bool,

        /// Shade table index to apply before color lookup
        #[arg(long)]
        shade: Option<u8>,

        /// Keep palette index 0 opaque instead of keying it transparent
        #[arg(long)]
        no_transparency_fix: bool,

        /// Premultiply color channels by alpha
        #[arg(long)]
        premultiply: bool,

        /// Clean the alpha matte (erode + blur) to reduce edge shimmer
        #[arg(long)]
        matte_fix: bool,

        /// Key BMP transparency on palette index 0 instead of the magenta
        /// marker at index 255
        #[arg(long)]
        bmp_index_zero: bool,

        /// Skip writing the animdata.ini sidecar
        #[arg(long)]
        no_anim_ini: bool,

        /// Suppress the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show information about an ART or palette file
    Info {
        /// File to inspect
        source: PathBuf,

        /// Treat the source as a palette file
        #[arg(long)]
        palette: bool,

        /// List every tile
        #[arg(long)]
        tiles: bool,
    },
}

impl Commands {
    /// Execute the selected command
    ///
    /// # Errors
    /// Returns an error if the command fails.
    pub fn execute(self, caps: &TermCaps) -> anyhow::Result<()> {
        match self {
            Commands::Extract {
                source,
                palette,
                output,
                format,
                lookup,
                shade,
                no_transparency_fix,
                premultiply,
                matte_fix,
                bmp_index_zero,
                no_anim_ini,
                quiet,
            } => extract::execute(&extract::ExtractArgs {
                source,
                palette,
                output,
                format,
                lookup,
                shade,
                no_transparency_fix,
                premultiply,
                matte_fix,
                bmp_index_zero,
                no_anim_ini,
                quiet,
                caps: *caps,
            }),
            Commands::Info {
                source,
                palette,
                tiles,
            } => info::execute(&source, palette, tiles),
        }
    }
}
