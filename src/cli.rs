// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::codec::DEFAULT_EXPORT_NAME;
use crate::color::Rgb;
use crate::frames::{FrameConfig, FrameStyle, DEFAULT_FRAME_WIDTH, MAX_FRAME_WIDTH};

#[derive(Parser, Debug, Clone)]
#[command(name = "photo-framer")]
#[command(about = "Put a decorative frame around a photo", long_about = None)]
pub struct Cli {
    /// Photo to frame (any format the image decoder understands)
    #[arg(required_unless_present = "preview")]
    pub input: Option<PathBuf>,

    /// Frame style
    #[arg(long, value_enum, default_value_t = FrameStyle::Classic)]
    pub style: FrameStyle,

    /// Frame color as #RRGGBB
    #[arg(long, default_value = "#8B4513")]
    pub color: Rgb,

    /// Border width in pixels
    #[arg(long, default_value_t = DEFAULT_FRAME_WIDTH, value_parser = clap::value_parser!(u32).range(0..=MAX_FRAME_WIDTH as i64))]
    pub width: u32,

    /// Where the framed PNG is written
    #[arg(long, short, default_value = DEFAULT_EXPORT_NAME)]
    pub output: PathBuf,

    /// Open an interactive preview window instead of exporting once
    #[arg(long)]
    pub preview: bool,
}

impl Cli {
    pub fn frame_config(&self) -> FrameConfig {
        FrameConfig { style: self.style, color: self.color, width_px: self.width }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_session() {
        let cli = Cli::try_parse_from(["photo-framer", "in.jpg"]).unwrap();
        assert_eq!(cli.frame_config(), FrameConfig::default());
        assert_eq!(cli.output, PathBuf::from("framed-photo.png"));
        assert!(!cli.preview);
    }

    #[test]
    fn parses_every_flag() {
        let cli = Cli::try_parse_from([
            "photo-framer", "in.jpg", "--style", "neon", "--color", "#00ff00", "--width", "35", "-o", "out.png",
        ])
        .unwrap();
        assert_eq!(cli.style, FrameStyle::Neon);
        assert_eq!(cli.color, Rgb::new(0, 255, 0));
        assert_eq!(cli.width, 35);
        assert_eq!(cli.output, PathBuf::from("out.png"));
    }

    #[test]
    fn rejects_out_of_range_width_and_bad_color() {
        assert!(Cli::try_parse_from(["photo-framer", "in.jpg", "--width", "101"]).is_err());
        assert!(Cli::try_parse_from(["photo-framer", "in.jpg", "--color", "brown"]).is_err());
        assert!(Cli::try_parse_from(["photo-framer", "in.jpg", "--style", "baroque"]).is_err());
    }

    #[test]
    fn input_is_optional_only_for_preview() {
        assert!(Cli::try_parse_from(["photo-framer"]).is_err());
        let cli = Cli::try_parse_from(["photo-framer", "--preview"]).unwrap();
        assert!(cli.input.is_none());
    }
}
