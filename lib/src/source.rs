//! Source image loading and downsampling
//!
//! The source is resized once to the character grid. Brightness is derived
//! from the resized RGB grid, so both grids always share dimensions.

use std::io;
use std::path::Path;

use image::{GrayImage, ImageError, Luma, RgbImage, imageops};

use crate::compositor::canvas_dimensions;
use crate::config::TileConfig;
use crate::error::{AsciiError, Result};

/// Downsampled grayscale grid, one value per character cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrightnessGrid(GrayImage);

impl BrightnessGrid {
    pub fn cols(&self) -> u32 {
        self.0.width()
    }

    pub fn rows(&self) -> u32 {
        self.0.height()
    }

    pub fn get(&self, col: u32, row: u32) -> u8 {
        self.0.get_pixel(col, row)[0]
    }
}

impl From<GrayImage> for BrightnessGrid {
    fn from(image: GrayImage) -> Self {
        Self(image)
    }
}

/// Downsampled RGB grid, same dimensions as the [`BrightnessGrid`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid(RgbImage);

impl ColorGrid {
    pub fn cols(&self) -> u32 {
        self.0.width()
    }

    pub fn rows(&self) -> u32 {
        self.0.height()
    }

    pub fn get(&self, col: u32, row: u32) -> [u8; 3] {
        self.0.get_pixel(col, row).0
    }
}

/// Both grids produced from one source image
#[derive(Debug, Clone)]
pub struct SourceGrids {
    pub brightness: BrightnessGrid,
    pub color: ColorGrid,
}

impl SourceGrids {
    /// Build both grids from an already downsampled RGB image
    pub fn from_rgb(color: RgbImage) -> Self {
        let brightness = BrightnessGrid(calculate_luminance(&color));
        Self {
            brightness,
            color: ColorGrid(color),
        }
    }

    pub fn cols(&self) -> u32 {
        self.brightness.cols()
    }

    pub fn rows(&self) -> u32 {
        self.brightness.rows()
    }
}

/// Grid dimensions for a source image
///
/// `cols` is fixed; `rows = round(cols * height / width)` with ties to even,
/// and never less than one.
pub fn grid_dimensions(width: u32, height: u32, cols: u32) -> (u32, u32) {
    let rows = (f64::from(cols) * f64::from(height) / f64::from(width)).round_ties_even();
    (cols, (rows as u32).max(1))
}

/// Grid dimensions for a source of `width` x `height`, checked against the
/// output canvas limits before anything is resized
///
/// # Errors
/// Returns a validation error for an empty source or a canvas that is too large
pub fn plan_grid(width: u32, height: u32, config: &TileConfig) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(AsciiError::Validation(format!(
            "source image has no pixels ({width}x{height})"
        )));
    }
    let (cols, rows) = grid_dimensions(width, height, config.columns);
    canvas_dimensions(cols, rows, config.tile_size)?;
    Ok((cols, rows))
}

/// Calculate luminance using the ITU-R 601 luma transform
///
/// Formula: L = R * 299/1000 + G * 587/1000 + B * 114/1000, in 16-bit fixed point
pub fn calculate_luminance(img: &RgbImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let luma = (u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000)
            >> 16;
        output.put_pixel(x, y, Luma([luma as u8]));
    }

    output
}

/// Decode the source image as RGB
///
/// # Errors
/// [`AsciiError::SourceNotFound`] if the path does not exist,
/// [`AsciiError::Decode`] if it cannot be read or decoded.
pub fn load_source(path: &Path) -> Result<RgbImage> {
    match image::open(path) {
        Ok(img) => {
            log::info!(
                "loaded {} ({}x{})",
                path.display(),
                img.width(),
                img.height()
            );
            Ok(img.to_rgb8())
        }
        Err(ImageError::IoError(err)) if err.kind() == io::ErrorKind::NotFound => {
            Err(AsciiError::SourceNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(AsciiError::Decode {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resize a source image down to the character grid
///
/// Uses the Lanczos3 filter for anti-aliased resampling.
pub fn downsample(img: &RgbImage, cols: u32) -> Result<SourceGrids> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(AsciiError::Validation(format!(
            "source image has no pixels ({width}x{height})"
        )));
    }
    if cols == 0 {
        return Err(AsciiError::Validation(
            "horizontal character count must be positive, got 0".into(),
        ));
    }

    let (cols, rows) = grid_dimensions(width, height, cols);
    log::debug!("downsampling {width}x{height} to a {cols}x{rows} grid");

    let resized = imageops::resize(img, cols, rows, imageops::FilterType::Lanczos3);
    Ok(SourceGrids::from_rgb(resized))
}

/// Load a source image and build its grids
pub fn load_grids(path: &Path, config: &TileConfig) -> Result<SourceGrids> {
    let img = load_source(path)?;
    plan_grid(img.width(), img.height(), config)?;
    downsample(&img, config.columns)
}
