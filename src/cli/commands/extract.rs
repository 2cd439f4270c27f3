//! CLI command for tile extraction

use std::path::PathBuf;

use anyhow::Context;

use crate::cli::progress::{TermCaps, print_summary, tile_bar};
use crate::converter::ConversionOptions;
use crate::encoder::{ImageFormat, TransparencyPolicy};
use crate::extract::{ExtractOptions, ExtractSummary, extract_tiles, find_art_files};
use crate::formats::art::read_art;
use crate::formats::palette::read_palette;

/// Extraction options from CLI flags
#[derive(Debug, Clone)]
pub struct ExtractArgs {
    /// Source ART file or directory (--source)
    pub source: PathBuf,
    /// Palette file (--palette)
    pub palette: PathBuf,
    /// Output directory (--output)
    pub output: PathBuf,
    /// Output format name (--format)
    pub format: String,
    /// Apply per-tile remaps (--lookup)
    pub lookup: bool,
    /// Shade table index (--shade)
    pub shade: Option<u8>,
    /// Keep index 0 opaque (--no-transparency-fix)
    pub no_transparency_fix: bool,
    /// Premultiply alpha (--premultiply)
    pub premultiply: bool,
    /// Clean the alpha matte (--matte-fix)
    pub matte_fix: bool,
    /// BMP keys on index 0 (--bmp-index-zero)
    pub bmp_index_zero: bool,
    /// Skip animdata.ini (--no-anim-ini)
    pub no_anim_ini: bool,
    /// Suppress progress (--quiet)
    pub quiet: bool,
    /// Terminal capabilities detected at startup
    pub caps: TermCaps,
}

impl ExtractArgs {
    fn extract_options(&self, format: ImageFormat, output_dir: PathBuf) -> ExtractOptions {
        ExtractOptions {
            output_dir,
            format,
            conversion: ConversionOptions {
                apply_lookup: self.lookup,
                shade_index: self.shade,
                fix_transparency: !self.no_transparency_fix,
                premultiply_alpha: self.premultiply,
                matte_hygiene: self.matte_fix,
            },
            transparency: if self.bmp_index_zero {
                TransparencyPolicy::ByIndexZero
            } else {
                TransparencyPolicy::ByColorValueAt255
            },
            write_anim_ini: !self.no_anim_ini,
        }
    }
}

pub fn execute(args: &ExtractArgs) -> anyhow::Result<()> {
    let format: ImageFormat = args
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let palette = read_palette(&args.palette)
        .with_context(|| format!("failed to load palette {}", args.palette.display()))?;

    // A directory source means batch mode over every ART file under it
    let batch = args.source.is_dir();
    let art_files = if batch {
        find_art_files(&args.source)
    } else {
        vec![args.source.clone()]
    };
    anyhow::ensure!(
        !art_files.is_empty(),
        "no ART files found under {}",
        args.source.display()
    );

    let mut totals = ExtractSummary {
        success_count: 0,
        fail_count: 0,
        skipped_count: 0,
        results: Vec::new(),
    };

    for art_path in &art_files {
        let archive = read_art(art_path)
            .with_context(|| format!("failed to load ART {}", art_path.display()))?;

        // Batch runs keep each archive's tiles in their own subdirectory
        let output_dir = if batch {
            let stem = art_path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            args.output.join(stem)
        } else {
            args.output.clone()
        };
        let options = args.extract_options(format, output_dir);

        let caps = if args.quiet {
            TermCaps::plain()
        } else {
            args.caps
        };
        let bar = tile_bar(
            &caps,
            archive.tile_count() as u64,
            &format!("Extracting {}", art_path.display()),
        );

        let summary = extract_tiles(&archive, &palette, &options, |p| {
            bar.set_position(p.current as u64);
        })?;
        bar.finish_and_clear();

        if !args.quiet {
            println!("{}:", art_path.display());
            print_summary(
                &caps,
                summary.success_count,
                summary.fail_count,
                summary.skipped_count,
            );
        }

        totals.success_count += summary.success_count;
        totals.fail_count += summary.fail_count;
        totals.skipped_count += summary.skipped_count;
        totals.results.extend(summary.results);
    }

    // Per-tile failures are reported, not fatal
    if totals.fail_count > 0 {
        for line in totals.results.iter().filter(|l| l.starts_with("Failed")) {
            eprintln!("{line}");
        }
    }

    Ok(())
}
