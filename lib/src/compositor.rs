use std::collections::HashMap;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage, imageops};

use crate::config::TileConfig;
use crate::error::{AsciiError, Result};
use crate::glyph::TileRenderer;
use crate::palette::Palette;
use crate::quantize::QuantizeMode;
use crate::source::BrightnessGrid;

/// Select one character per grid cell
///
/// # Arguments
/// * `grid` - Downsampled brightness grid
/// * `palette` - Palette already in lookup order (see [`Palette::oriented`])
/// * `mode` - Quantization formula
///
/// # Returns
/// Characters row by row, top to bottom, each row left to right
pub fn select_chars(grid: &BrightnessGrid, palette: &Palette, mode: QuantizeMode) -> Vec<Vec<char>> {
    (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .map(|col| palette.char_for(grid.get(col, row), mode))
                .collect()
        })
        .collect()
}

/// Largest output canvas, in bytes of RGB pixel data (2 GiB)
pub const MAX_CANVAS_BYTES: u64 = 1 << 31;

/// Output canvas dimensions for a grid
///
/// # Errors
/// Returns a validation error when a side does not fit in 32 bits or the
/// canvas exceeds [`MAX_CANVAS_BYTES`]
pub fn canvas_dimensions(cols: u32, rows: u32, tile_size: u32) -> Result<(u32, u32)> {
    let too_large = || {
        AsciiError::Validation(format!(
            "output canvas for a {cols}x{rows} grid of {tile_size}px tiles is too large"
        ))
    };
    let width = cols.checked_mul(tile_size).ok_or_else(too_large)?;
    let height = rows.checked_mul(tile_size).ok_or_else(too_large)?;
    if u64::from(width) * u64::from(height) * 3 > MAX_CANVAS_BYTES {
        return Err(too_large());
    }
    Ok((width, height))
}

/// Render a brightness grid into one image of character tiles
///
/// Allocates a black canvas of `(cols * tile_size) x (rows * tile_size)` and
/// pastes the tile of each cell at `(col * tile_size, row * tile_size)`,
/// sweeping rows top to bottom and columns left to right. Tiles are rendered
/// once per distinct character.
///
/// # Arguments
/// * `grid` - Downsampled brightness grid
/// * `config` - Palette, tile size, colors and quantization
/// * `renderer` - Tile renderer
pub fn compose<R: TileRenderer + ?Sized>(
    grid: &BrightnessGrid,
    config: &TileConfig,
    renderer: &R,
) -> Result<RgbImage> {
    let tile_size = config.tile_size;
    let (width, height) = canvas_dimensions(grid.cols(), grid.rows(), tile_size)?;
    let mut output = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));

    let chars = select_chars(grid, &config.lookup_palette(), config.quantize);
    let mut tiles: HashMap<char, RgbImage> = HashMap::new();

    for (row, row_chars) in chars.iter().enumerate() {
        for (col, &ch) in row_chars.iter().enumerate() {
            let tile: &RgbImage = tiles.entry(ch).or_insert_with(|| {
                renderer.render_tile(ch, tile_size, config.color, config.background)
            });

            let x = col as i64 * i64::from(tile_size);
            let y = row as i64 * i64::from(tile_size);
            imageops::replace(&mut output, tile, x, y);
        }
    }

    log::debug!(
        "composed {}x{} image from {} distinct tiles",
        width,
        height,
        tiles.len()
    );

    Ok(output)
}

/// Write the composed image as PNG, whatever the extension of `path`
///
/// # Errors
/// [`AsciiError::Write`] if the file cannot be created or encoded. Missing
/// parent directories are not created.
pub fn save_output(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| AsciiError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("wrote {}", path.display());
    Ok(())
}
