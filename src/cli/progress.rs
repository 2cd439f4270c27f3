//! CLI progress display utilities
//!
//! Progress bars and styled output for batch operations, gated on a
//! [`TermCaps`] value detected once at startup.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Terminal capabilities, detected once and passed down explicitly
#[derive(Debug, Clone, Copy)]
pub struct TermCaps {
    /// Whether styled/colored output is enabled for stdout
    pub colors: bool,
    /// Whether stdout is an interactive terminal
    pub interactive: bool,
}

impl TermCaps {
    /// Detect capabilities for the current stdout
    #[must_use]
    pub fn detect() -> Self {
        Self {
            colors: console::colors_enabled(),
            interactive: console::Term::stdout().is_term(),
        }
    }

    /// Capabilities for fully plain output (tests, piped runs)
    #[must_use]
    pub fn plain() -> Self {
        Self {
            colors: false,
            interactive: false,
        }
    }
}

/// Progress bar style for determinate progress
///
/// Format: `Extracting [████████░░░░░░░░] 50/100`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .expect("valid template")
}

/// Create a progress bar, hidden when the terminal is not interactive
#[must_use]
pub fn tile_bar(caps: &TermCaps, total: u64, msg: &str) -> ProgressBar {
    let pb = if caps.interactive {
        ProgressBar::new(total)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(bar_style());
    pb.set_message(msg.to_string());
    pb
}

/// Print a summary line, green/red styled when colors are available
pub fn print_summary(caps: &TermCaps, success: usize, failed: usize, skipped: usize) {
    if caps.colors {
        let ok = style(format!("{success} written")).green();
        if failed > 0 {
            println!("{ok}, {} ({skipped} empty skipped)", style(format!("{failed} failed")).red());
        } else {
            println!("{ok} ({skipped} empty skipped)");
        }
    } else {
        println!("{success} written, {failed} failed ({skipped} empty skipped)");
    }
}
