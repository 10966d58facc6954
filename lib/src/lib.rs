//! ASCII Tiler - image to ASCII-art image converter
//!
//! This library downsamples an image to a grid of character cells, maps the
//! brightness of each cell to a character of a palette, renders that character
//! with a monospace font into a square tile and pastes every tile into one
//! output image.
//!
//! # Example
//! ```no_run
//! use ascii_tiler::{TileConfig, convert_file};
//! use std::path::Path;
//!
//! let config = TileConfig {
//!     font_path: "DejaVuSansMono-Bold.ttf".into(),
//!     ..TileConfig::default()
//! };
//! let summary = convert_file(Path::new("photo.jpg"), Path::new("photo.png"), &config).unwrap();
//! println!("{}x{} characters", summary.columns, summary.rows);
//! ```

pub mod compositor;
pub mod config;
pub mod error;
pub mod glyph;
pub mod palette;
pub mod preview;
pub mod processor;
pub mod quantize;
pub mod source;

// Re-export main types for convenience
pub use config::{Background, TileConfig, parse_color};
pub use error::{AsciiError, Result};
pub use glyph::{GlyphRasterizer, TileRenderer};
pub use palette::{BuiltinPalette, Palette};
pub use preview::PreviewMode;
pub use processor::{RenderSummary, convert_file, process_image, render_grids};
pub use quantize::QuantizeMode;
pub use source::{SourceGrids, load_grids};
