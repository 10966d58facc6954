use std::path::PathBuf;

use image::Rgb;

use crate::error::{AsciiError, Result};
use crate::palette::Palette;
use crate::quantize::QuantizeMode;

/// Background mode of the rendered tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    /// Black tiles, glyphs drawn in the configured color
    #[default]
    Black,
    /// Tiles filled with the configured color, glyphs drawn in black
    White,
}

impl Background {
    pub fn from_white_flag(white: bool) -> Self {
        if white { Background::White } else { Background::Black }
    }

    /// Tile fill color
    pub fn fill(self, color: [u8; 3]) -> Rgb<u8> {
        match self {
            Background::Black => Rgb([0, 0, 0]),
            Background::White => Rgb(color),
        }
    }

    /// Glyph color, always the opposite of [`Background::fill`]
    pub fn ink(self, color: [u8; 3]) -> Rgb<u8> {
        match self {
            Background::Black => Rgb(color),
            Background::White => Rgb([0, 0, 0]),
        }
    }
}

/// Configuration for ASCII tile rendering
#[derive(Debug, Clone)]
pub struct TileConfig {
    /// Character ramp, in its configured (unoriented) order
    pub palette: Palette,

    /// Grid
    pub columns: u32,            // characters per row, default 100
    pub tile_size: u32,          // tile side in pixels, default 15

    /// Colors
    pub color: [u8; 3],          // RGB, default gold [255, 215, 0]
    pub background: Background,  // default black

    /// Glyphs
    pub font_path: PathBuf,      // default courier-boldregular.ttf
    pub scale_up: f32,           // glyph size / tile size, default 1.2

    pub quantize: QuantizeMode,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),

            // Grid
            columns: 100,
            tile_size: 15,

            // Colors
            color: [255, 215, 0],
            background: Background::Black,

            // Glyphs
            font_path: PathBuf::from("courier-boldregular.ttf"),
            scale_up: 1.2,

            quantize: QuantizeMode::Floor,
        }
    }
}

impl TileConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(AsciiError::Validation(
                "horizontal character count must be positive, got 0".into(),
            ));
        }
        if self.tile_size == 0 {
            return Err(AsciiError::Validation(
                "tile size must be positive, got 0".into(),
            ));
        }
        if self.columns.checked_mul(self.tile_size).is_none() {
            return Err(AsciiError::Validation(format!(
                "output width {} x {} does not fit in 32 bits",
                self.columns, self.tile_size
            )));
        }
        if !self.scale_up.is_finite() || self.scale_up <= 0.0 || self.scale_up > 10.0 {
            return Err(AsciiError::Validation(format!(
                "scale_up must be in (0.0, 10.0], got {}",
                self.scale_up
            )));
        }
        if self.palette.is_empty() {
            return Err(AsciiError::Validation("palette must not be empty".into()));
        }
        Ok(())
    }

    /// Palette in lookup order for the configured background
    pub fn lookup_palette(&self) -> Palette {
        self.palette.oriented(self.background)
    }
}

/// Parse an `r,g,b` triple with every channel in `0..=255`
///
/// # Errors
/// Returns a validation error for anything other than three comma-separated
/// integers in range.
pub fn parse_color(s: &str) -> Result<[u8; 3]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(AsciiError::Validation(format!(
            "color must be three comma-separated values r,g,b, got '{s}'"
        )));
    }

    let mut rgb = [0u8; 3];
    for (channel, part) in rgb.iter_mut().zip(&parts) {
        let value: i64 = part.parse().map_err(|_| {
            AsciiError::Validation(format!("color channel '{part}' is not an integer"))
        })?;
        *channel = u8::try_from(value).map_err(|_| {
            AsciiError::Validation(format!(
                "color channel must be between 0 and 255, got {value}"
            ))
        })?;
    }
    Ok(rgb)
}
