// Command line interface
// Flags overlay the session defaults in config.rs

use clap::Parser;
use std::path::PathBuf;

/// mantis-scroll - A fullscreen writing surface with an inspiration image
#[derive(Parser, Debug)]
#[command(name = "mantis-scroll")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Document to open (.txt, .docx or .msd)
    #[arg(value_name = "DOCUMENT")]
    pub document: Option<PathBuf>,

    /// Inspiration image shown beside the text
    #[arg(short, long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Opacity of the inspiration image (0.0 - 1.0)
    #[arg(short, long, value_parser = parse_opacity)]
    pub opacity: Option<f32>,

    /// Base font size of the text area (8 - 72)
    #[arg(short = 's', long, value_parser = parse_font_size)]
    pub font_size: Option<u32>,

    /// Width of the inspiration region in points
    #[arg(short = 'w', long, value_name = "PX", value_parser = clap::value_parser!(u32).range(10..))]
    pub region_width: Option<u32>,

    /// Start in a window instead of fullscreen
    #[arg(long, default_value = "false")]
    pub windowed: bool,
}

/// Parse opacity value and ensure it's within valid range
fn parse_opacity(s: &str) -> Result<f32, String> {
    let opacity: f32 = s.parse().map_err(|_| "Invalid opacity value")?;
    if !(0.0..=1.0).contains(&opacity) {
        return Err("Opacity must be between 0.0 and 1.0".to_string());
    }
    Ok(opacity)
}

fn parse_font_size(s: &str) -> Result<u32, String> {
    let size: u32 = s.parse().map_err(|_| "Invalid font size")?;
    if !(crate::config::MIN_FONT_SIZE..=crate::config::MAX_FONT_SIZE).contains(&size) {
        return Err(format!(
            "Font size must be between {} and {}",
            crate::config::MIN_FONT_SIZE,
            crate::config::MAX_FONT_SIZE
        ));
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("mantis-scroll").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_arguments() {
        let args = parse(&[]).unwrap();
        assert!(args.document.is_none());
        assert!(args.image.is_none());
        assert!(args.opacity.is_none());
        assert!(!args.windowed);
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "novel.msd",
            "--image",
            "mantis.png",
            "--opacity",
            "0.55",
            "--font-size",
            "18",
            "--region-width",
            "500",
            "--windowed",
        ])
        .unwrap();
        assert_eq!(args.document, Some(PathBuf::from("novel.msd")));
        assert_eq!(args.image, Some(PathBuf::from("mantis.png")));
        assert_eq!(args.opacity, Some(0.55));
        assert_eq!(args.font_size, Some(18));
        assert_eq!(args.region_width, Some(500));
        assert!(args.windowed);
    }

    #[test]
    fn test_opacity_out_of_range_rejected() {
        assert!(parse(&["--opacity", "1.5"]).is_err());
        assert!(parse(&["--opacity", "-0.1"]).is_err());
        assert!(parse(&["--opacity", "half"]).is_err());
        assert!(parse(&["--opacity", "1.0"]).is_ok());
    }

    #[test]
    fn test_font_size_range() {
        assert!(parse(&["--font-size", "7"]).is_err());
        assert!(parse(&["--font-size", "73"]).is_err());
        assert_eq!(parse(&["--font-size", "72"]).unwrap().font_size, Some(72));
    }

    #[test]
    fn test_region_width_lower_bound() {
        assert!(parse(&["--region-width", "5"]).is_err());
    }
}
