//! Glyph rasterization into square tiles

use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::RgbImage;
use imageproc::drawing::draw_text_mut;

use crate::config::Background;
use crate::error::{AsciiError, Result};

/// Renders one character into a square tile
///
/// The compositor only depends on this trait, so any deterministic renderer
/// can stand in for a real font.
pub trait TileRenderer {
    /// Render `ch` into a `tile_size` x `tile_size` RGB tile
    ///
    /// # Arguments
    /// * `ch` - Character to draw
    /// * `tile_size` - Tile side in pixels
    /// * `color` - Configured foreground color
    /// * `background` - Background mode, decides which of fill/ink gets `color`
    fn render_tile(&self, ch: char, tile_size: u32, color: [u8; 3], background: Background)
    -> RgbImage;
}

/// Font backed tile renderer
pub struct GlyphRasterizer {
    font: FontVec,
    scale_up: f32,
}

impl GlyphRasterizer {
    /// Load a TrueType/OpenType font from disk
    ///
    /// # Errors
    /// [`AsciiError::FontLoad`] if the file cannot be read or parsed. There is
    /// no fallback font.
    pub fn from_file(path: &Path, scale_up: f32) -> Result<Self> {
        let data = fs::read(path).map_err(|err| AsciiError::FontLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let rasterizer = Self::from_bytes(data, scale_up).map_err(|reason| {
            AsciiError::FontLoad {
                path: path.to_path_buf(),
                reason,
            }
        })?;
        log::info!("loaded font {}", path.display());
        Ok(rasterizer)
    }

    /// Build from raw font bytes
    pub fn from_bytes(data: Vec<u8>, scale_up: f32) -> std::result::Result<Self, String> {
        let font = FontVec::try_from_vec(data).map_err(|err| err.to_string())?;
        Ok(Self { font, scale_up })
    }

    /// Em size in pixels of the glyphs drawn into a tile of `tile_size`
    ///
    /// Truncated to whole pixels; larger than the tile for `scale_up > 1`, the
    /// overflow is clipped at the tile border.
    pub fn em_size(&self, tile_size: u32) -> f32 {
        (tile_size as f32 * self.scale_up).trunc().max(1.0)
    }

    /// [`em_size`](Self::em_size) as an ab_glyph scale
    ///
    /// `PxScale` measures ascent to descent rather than the em square, so the
    /// em size is stretched by the font's height-to-em ratio.
    pub fn glyph_scale(&self, tile_size: u32) -> PxScale {
        let height = self.font.height_unscaled();
        let units_per_em = self.font.units_per_em().unwrap_or(height);
        PxScale::from(self.em_size(tile_size) * height / units_per_em)
    }
}

impl TileRenderer for GlyphRasterizer {
    fn render_tile(
        &self,
        ch: char,
        tile_size: u32,
        color: [u8; 3],
        background: Background,
    ) -> RgbImage {
        let mut tile = RgbImage::from_pixel(tile_size, tile_size, background.fill(color));

        let scale = self.glyph_scale(tile_size);
        let scaled = self.font.as_scaled(scale);
        let advance = scaled.h_advance(self.font.glyph_id(ch));

        // Anchor at the tile center: horizontally on the advance width,
        // vertically halfway between ascender and descender.
        let center = (tile_size / 2) as f32;
        let x = (center - advance / 2.0).round() as i32;
        let y = (center - (scaled.ascent() - scaled.descent()) / 2.0).round() as i32;

        let mut buf = [0u8; 4];
        draw_text_mut(
            &mut tile,
            background.ink(color),
            x,
            y,
            scale,
            &self.font,
            ch.encode_utf8(&mut buf),
        );

        tile
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::Rgb;
    use std::path::PathBuf;

    const FONT_CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
        "/Library/Fonts/Courier New.ttf",
        "/System/Library/Fonts/Supplemental/Courier New.ttf",
        "C:\\Windows\\Fonts\\cour.ttf",
    ];

    /// First monospace font installed on this machine, if any
    pub(crate) fn system_font() -> Option<PathBuf> {
        FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.is_file())
    }

    #[test]
    fn test_missing_font_is_font_load_error() {
        let result = GlyphRasterizer::from_file(Path::new("no/such/font.ttf"), 1.2);
        assert!(matches!(result, Err(AsciiError::FontLoad { .. })));
    }

    #[test]
    fn test_garbage_font_is_font_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"definitely not a font").unwrap();

        let result = GlyphRasterizer::from_file(&path, 1.2);
        assert!(matches!(result, Err(AsciiError::FontLoad { .. })));
    }

    #[test]
    fn test_render_tile_size_and_colors() {
        let Some(font) = system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let rasterizer = GlyphRasterizer::from_file(&font, 1.2).unwrap();
        let gold = [255, 215, 0];

        let tile = rasterizer.render_tile('@', 15, gold, Background::Black);
        assert_eq!(tile.dimensions(), (15, 15));
        // Corners stay background, something gets inked near the center
        assert_eq!(*tile.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert!(tile.pixels().any(|p| *p != Rgb([0, 0, 0])));

        let tile = rasterizer.render_tile('@', 15, gold, Background::White);
        assert_eq!(*tile.get_pixel(0, 0), Rgb(gold));
        assert!(tile.pixels().any(|p| *p != Rgb(gold)));
    }

    #[test]
    fn test_space_is_blank() {
        let Some(font) = system_font() else {
            return;
        };
        let rasterizer = GlyphRasterizer::from_file(&font, 1.2).unwrap();
        let tile = rasterizer.render_tile(' ', 12, [255, 255, 255], Background::Black);
        assert!(tile.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_glyph_scale_truncates() {
        let Some(font) = system_font() else {
            return;
        };
        let rasterizer = GlyphRasterizer::from_file(&font, 1.2).unwrap();
        assert_eq!(rasterizer.em_size(15), 18.0);
        assert_eq!(rasterizer.em_size(7), 8.0);
    }

    #[test]
    fn test_glyph_scale_is_em_based() {
        let Some(font) = system_font() else {
            return;
        };
        let rasterizer = GlyphRasterizer::from_file(&font, 1.2).unwrap();
        let height = rasterizer.font.height_unscaled();
        let units_per_em = rasterizer.font.units_per_em().unwrap();

        // Back from line height to em: 15px tiles at 1.2 draw an 18px em
        let scale = rasterizer.glyph_scale(15);
        assert!((scale.y * units_per_em / height - 18.0).abs() < 1e-3);
        assert!(scale.y > 18.0);

        // One em of advance measures exactly the em size
        let scaled = rasterizer.font.as_scaled(scale);
        let em_px = scaled.h_scale_factor() * units_per_em;
        assert!((em_px - 18.0).abs() < 1e-3);
    }
}
