//! Terminal preview using ANSI 24-bit color escapes

use std::io::{self, Write};

use crate::palette::Palette;
use crate::quantize::QuantizeMode;
use crate::source::SourceGrids;

/// Which grid drives the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    /// Characters from the brightness grid, in bright white
    #[default]
    Gray,
    /// Characters from the mean of each RGB cell, colored by that cell
    Color,
}

const RESET: &str = "\x1b[0m";

/// Build the preview text, one line per grid row
///
/// `palette` must already be in lookup order.
pub fn render_preview(
    grids: &SourceGrids,
    palette: &Palette,
    quantize: QuantizeMode,
    mode: PreviewMode,
) -> String {
    let mut out = String::new();

    for row in 0..grids.rows() {
        for col in 0..grids.cols() {
            match mode {
                PreviewMode::Gray => {
                    let ch = palette.char_for(grids.brightness.get(col, row), quantize);
                    out.push_str(&format!("\x1b[38;2;255;255;255m{ch}"));
                }
                PreviewMode::Color => {
                    let [r, g, b] = grids.color.get(col, row);
                    let ch = palette.char_for_rgb([r, g, b], quantize);
                    out.push_str(&format!("\x1b[38;2;{r};{g};{b}m{ch}\x1b[48;2;0;0;0m"));
                }
            }
        }
        out.push_str(RESET);
        out.push('\n');
    }

    out
}

/// Print the preview to stdout
pub fn print_preview(
    grids: &SourceGrids,
    palette: &Palette,
    quantize: QuantizeMode,
    mode: PreviewMode,
) -> io::Result<()> {
    let text = render_preview(grids, palette, quantize, mode);
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
