//! Session configuration: defaults overlaid by command line flags.
//! Nothing here is persisted.

use crate::cli::Args;
use crate::rich_text::FontChoice;
use std::path::PathBuf;
use std::time::Duration;

pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 72;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub opacity: f32,
    pub font_family: FontChoice,
    pub font_size: u32,
    /// Inspiration region width in points
    pub region_width: f32,
    pub timer_poll: Duration,
    pub fullscreen: bool,
    pub document: Option<PathBuf>,
    pub inspiration_image: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            opacity: 0.30,
            font_family: FontChoice::Proportional,
            font_size: 12,
            region_width: 700.0,
            timer_poll: scrollcore::repaint::DEFAULT_POLL_INTERVAL,
            fullscreen: true,
            document: None,
            inspiration_image: None,
        }
    }
}

impl From<Args> for SessionConfig {
    fn from(args: Args) -> Self {
        let defaults = SessionConfig::default();
        Self {
            opacity: args.opacity.unwrap_or(defaults.opacity),
            font_size: args
                .font_size
                .map(|s| s.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE))
                .unwrap_or(defaults.font_size),
            region_width: args.region_width.map(|w| w as f32).unwrap_or(defaults.region_width),
            fullscreen: !args.windowed,
            document: args.document,
            inspiration_image: args.image,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.opacity, 0.30);
        assert_eq!(config.font_size, 12);
        assert_eq!(config.region_width, 700.0);
        assert_eq!(config.timer_poll, Duration::from_millis(50));
        assert_eq!(config.font_family, FontChoice::Proportional);
        assert!(config.fullscreen);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["mantis-scroll", "draft.txt", "--opacity", "0.8", "--windowed"]);
        let config = SessionConfig::from(args);
        assert_eq!(config.opacity, 0.8);
        assert!(!config.fullscreen);
        assert_eq!(config.document, Some(PathBuf::from("draft.txt")));
        assert_eq!(config.font_size, 12);
        assert!(config.inspiration_image.is_none());
    }
}
