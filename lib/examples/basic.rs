/// Basic example: Render a synthetic test image as ASCII tiles
///
/// Usage: cargo run --example basic -- <font.ttf>
use ascii_tiler::{GlyphRasterizer, TileConfig, process_image};
use image::{Rgb, RgbImage};
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("ASCII Tiler - Basic Example");
    println!("===========================\n");

    let font_path: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("courier-boldregular.ttf"));

    // Create a 320x240 test image: dark gray background with a bright disc
    let width = 320;
    let height = 240;
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 90.0;

    let img = RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist < radius {
            // Brightest in the middle of the disc
            let v = (255.0 * (1.0 - dist / radius * 0.6)) as u8;
            Rgb([v, v, v])
        } else {
            Rgb([40, 40, 40])
        }
    });

    println!("Created test image: {}x{}", width, height);

    let config = TileConfig {
        columns: 64,
        tile_size: 12,
        color: [0, 255, 0], // Green glyphs
        font_path,
        ..Default::default()
    };

    println!("Processing with config:");
    println!("  - Columns: {}", config.columns);
    println!("  - Tile size: {}px", config.tile_size);
    println!("  - Font: {}", config.font_path.display());
    println!();

    let rasterizer = GlyphRasterizer::from_file(&config.font_path, config.scale_up)?;
    let output = process_image(&img, &config, &rasterizer)?;

    img.save("basic_input.png")?;
    output.save("basic_output.png")?;

    println!("✓ Saved input to:  basic_input.png");
    println!("✓ Saved output to: basic_output.png ({}x{})", output.width(), output.height());
    Ok(())
}
