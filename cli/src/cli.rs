use std::path::PathBuf;

use ascii_tiler::{
    Background, BuiltinPalette, Palette, PreviewMode, QuantizeMode, TileConfig, parse_color,
};
use clap::{Arg, ArgAction, Parser, ValueEnum};

/// Render an image as a grid of font-drawn ASCII characters.
#[derive(Parser, Debug)]
#[command(
    name = "ascii-tiler",
    version,
    about,
    long_about = None,
    disable_version_flag = true,
    arg = Arg::new("version")
        .short('v')
        .long("version")
        .action(ArgAction::Version)
        .help("Print version")
)]
pub struct Cli {
    /// Source image (PNG, JPEG, BMP, GIF, ...).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory FILE is resolved against.
    #[arg(long, value_name = "DIR")]
    pub indir: Option<PathBuf>,

    /// Output PNG path. Defaults to <OUTDIR>/<file stem>.png.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Directory for the derived output path. It is not created.
    #[arg(long, value_name = "DIR", default_value = "output")]
    pub outdir: PathBuf,

    /// Built-in palette: index 0-4 or name (full, dense, classic, heavy, mixed).
    #[arg(long = "pal", value_name = "P", default_value = "3")]
    pub palette: BuiltinPalette,

    /// Custom palette, dense glyphs first (e.g. "█▇▆▅▄▃▂▁  ").
    #[arg(long, value_name = "STRING", conflicts_with = "palette")]
    pub chars: Option<String>,

    /// Number of characters per row.
    #[arg(
        long = "nhor",
        value_name = "N",
        default_value_t = 100,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub columns: u32,

    /// Tile size in pixels.
    #[arg(
        long = "chsize",
        value_name = "SI",
        default_value_t = 15,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub tile_size: u32,

    /// Foreground color as r,g,b.
    #[arg(long, value_name = "R,G,B", default_value = "255,215,0", value_parser = parse_color)]
    pub color: [u8; 3],

    /// Fill tiles with the color and draw glyphs in black.
    #[arg(long, default_value_t = false)]
    pub whitebg: bool,

    /// TrueType/OpenType font used to draw glyphs.
    #[arg(long, value_name = "PATH", default_value = "courier-boldregular.ttf")]
    pub font: PathBuf,

    /// Glyph size relative to the tile size.
    #[arg(long, value_name = "F", default_value_t = 1.2)]
    pub scale_up: f32,

    /// Use the float quantization formula of older renders.
    #[arg(long, default_value_t = false)]
    pub legacy_quantize: bool,

    /// Also print the grid to the terminal.
    #[arg(long, value_enum, value_name = "MODE")]
    pub preview: Option<PreviewArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewArg {
    Gray,
    Color,
}

impl From<PreviewArg> for PreviewMode {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Gray => PreviewMode::Gray,
            PreviewArg::Color => PreviewMode::Color,
        }
    }
}

impl Cli {
    /// Build and validate the rendering configuration.
    ///
    /// # Errors
    /// Returns an error for an empty custom palette or out-of-range values.
    pub fn to_config(&self) -> anyhow::Result<TileConfig> {
        let palette = match &self.chars {
            Some(chars) => Palette::new(chars)?,
            None => Palette::builtin(self.palette),
        };

        let config = TileConfig {
            palette,
            columns: self.columns,
            tile_size: self.tile_size,
            color: self.color,
            background: Background::from_white_flag(self.whitebg),
            font_path: self.font.clone(),
            scale_up: self.scale_up,
            quantize: if self.legacy_quantize {
                QuantizeMode::Legacy
            } else {
                QuantizeMode::Floor
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Source image path, joined onto `--indir` when given.
    pub fn input_path(&self) -> PathBuf {
        match &self.indir {
            Some(dir) => dir.join(&self.file),
            None => self.file.clone(),
        }
    }

    /// Explicit `--output`, or `<outdir>/<file stem>.png`.
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let stem = self
            .file
            .file_stem()
            .map_or_else(|| "ascii".into(), |s| s.to_os_string());
        let mut path = self.outdir.join(stem);
        path.set_extension("png");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("ascii-tiler").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["cat.jpg"]).unwrap();
        let config = cli.to_config().unwrap();

        assert_eq!(config.palette, Palette::builtin(BuiltinPalette::Heavy));
        assert_eq!(config.columns, 100);
        assert_eq!(config.tile_size, 15);
        assert_eq!(config.color, [255, 215, 0]);
        assert_eq!(config.background, Background::Black);
        assert_eq!(config.quantize, QuantizeMode::Floor);
        assert_eq!(cli.output_path(), PathBuf::from("output").join("cat.png"));
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&[
            "cat.jpg", "--pal", "1", "--nhor", "40", "--chsize", "9", "--color", "1,2,3",
            "--whitebg", "--font", "mono.ttf", "--legacy-quantize", "-o", "art.png",
        ])
        .unwrap();
        let config = cli.to_config().unwrap();

        assert_eq!(config.palette, Palette::builtin(BuiltinPalette::Dense));
        assert_eq!(config.columns, 40);
        assert_eq!(config.tile_size, 9);
        assert_eq!(config.color, [1, 2, 3]);
        assert_eq!(config.background, Background::White);
        assert_eq!(config.font_path, PathBuf::from("mono.ttf"));
        assert_eq!(config.quantize, QuantizeMode::Legacy);
        assert_eq!(cli.output_path(), PathBuf::from("art.png"));
    }

    #[test]
    fn test_palette_out_of_range() {
        let err = parse(&["cat.jpg", "--pal", "99"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_palette_by_name() {
        let cli = parse(&["cat.jpg", "--pal", "classic"]).unwrap();
        assert_eq!(cli.palette, BuiltinPalette::Classic);
    }

    #[test]
    fn test_non_positive_sizes_rejected() {
        assert!(parse(&["cat.jpg", "--nhor", "0"]).is_err());
        assert!(parse(&["cat.jpg", "--nhor=-3"]).is_err());
        assert!(parse(&["cat.jpg", "--chsize", "0"]).is_err());
    }

    #[test]
    fn test_color_out_of_range() {
        assert!(parse(&["cat.jpg", "--color", "0,0,300"]).is_err());
        assert!(parse(&["cat.jpg", "--color", "red"]).is_err());
    }

    #[test]
    fn test_custom_chars() {
        let cli = parse(&["cat.jpg", "--chars", "AB"]).unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.palette.chars(), &['A', 'B']);

        assert!(parse(&["cat.jpg", "--chars", "AB", "--pal", "2"]).is_err());
        assert!(parse(&["cat.jpg", "--chars", ""]).unwrap().to_config().is_err());
    }

    #[test]
    fn test_bad_scale_up_fails_validation() {
        let cli = parse(&["cat.jpg", "--scale-up", "0"]).unwrap();
        assert!(cli.to_config().is_err());
    }

    #[test]
    fn test_paths() {
        let cli = parse(&["AuN.jpg", "--indir", "input", "--outdir", "renders"]).unwrap();
        assert_eq!(cli.input_path(), PathBuf::from("input").join("AuN.jpg"));
        assert_eq!(cli.output_path(), PathBuf::from("renders").join("AuN.png"));
    }

    #[test]
    fn test_preview_mode() {
        let cli = parse(&["cat.jpg", "--preview", "color"]).unwrap();
        assert_eq!(cli.preview.map(PreviewMode::from), Some(PreviewMode::Color));
    }

    #[test]
    fn test_version_and_help_exit() {
        let err = parse(&["-v"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);

        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
