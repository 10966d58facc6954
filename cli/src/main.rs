mod cli;

use anyhow::{Context, Result};
use ascii_tiler::compositor::save_output;
use ascii_tiler::preview::print_preview;
use ascii_tiler::{load_grids, render_grids};
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    // Configure logging (RUST_LOG)
    env_logger::init();

    let cli = Cli::parse();

    // Everything is validated before the first file is touched
    let config = cli.to_config()?;
    let input = cli.input_path();
    let output = cli.output_path();

    let grids = load_grids(&input, &config)?;
    log::debug!("grid is {}x{} characters", grids.cols(), grids.rows());

    if let Some(mode) = cli.preview {
        print_preview(&grids, &config.lookup_palette(), config.quantize, mode.into())
            .context("failed to print preview")?;
    }

    let image = render_grids(&grids, &config)?;
    save_output(&image, &output)?;

    println!(
        "Saved {}x{} image ({}x{} characters) to {}",
        image.width(),
        image.height(),
        grids.cols(),
        grids.rows(),
        output.display()
    );

    Ok(())
}
