use std::path::Path;

use image::RgbImage;

use crate::compositor::{compose, save_output};
use crate::config::TileConfig;
use crate::error::Result;
use crate::glyph::{GlyphRasterizer, TileRenderer};
use crate::source::{SourceGrids, downsample, load_grids, plan_grid};

/// What a finished run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub columns: u32,
    pub rows: u32,
    pub width: u32,
    pub height: u32,
}

/// Converts an in-memory image to ASCII tile art
///
/// This runs the pipeline without touching the filesystem:
/// 1. Validate the configuration
/// 2. Check the grid and canvas size, then downsample (Lanczos3)
/// 3. Quantize each cell to a palette character
/// 4. Render and paste one tile per cell
///
/// # Arguments
/// * `input` - The source RGB image
/// * `config` - Rendering configuration
/// * `renderer` - Tile renderer, usually a [`GlyphRasterizer`]
///
/// # Returns
/// An RGB image of `(cols * tile_size) x (rows * tile_size)` pixels
pub fn process_image<R: TileRenderer + ?Sized>(
    input: &RgbImage,
    config: &TileConfig,
    renderer: &R,
) -> Result<RgbImage> {
    config.validate()?;
    plan_grid(input.width(), input.height(), config)?;
    let grids = downsample(input, config.columns)?;
    compose(&grids.brightness, config, renderer)
}

/// Loads the configured font and renders already built grids
///
/// # Errors
/// Fails with a font load error before any tile is drawn if the font is
/// unusable.
pub fn render_grids(grids: &SourceGrids, config: &TileConfig) -> Result<RgbImage> {
    let rasterizer = GlyphRasterizer::from_file(&config.font_path, config.scale_up)?;
    compose(&grids.brightness, config, &rasterizer)
}

/// Converts an image file and writes the result as PNG
///
/// Any failure aborts the run; the output file is only written once the
/// whole image has been composed.
pub fn convert_file(input: &Path, output: &Path, config: &TileConfig) -> Result<RenderSummary> {
    config.validate()?;

    let grids = load_grids(input, config)?;
    let image = render_grids(&grids, config)?;
    save_output(&image, output)?;

    Ok(RenderSummary {
        columns: grids.cols(),
        rows: grids.rows(),
        width: image.width(),
        height: image.height(),
    })
}
