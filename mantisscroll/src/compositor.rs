//! Inspiration image compositing
//!
//! Decodes the source image, scales its alpha channel by the chosen opacity
//! and resamples it to the pixel size of the display region. The egui side
//! lives in `inspiration.rs`; nothing here touches the GUI.
//!
//! `original` is always derived from a fresh decode of the source file, so
//! repeated opacity changes never compound. `rendered` is a pure function of
//! `(original, region)` and is rebuilt whenever either changes.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Regions narrower or shorter than this are still being laid out.
pub const MIN_REGION_EDGE: u32 = 10;

#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug)]
pub struct Compositor {
    source_path: Option<PathBuf>,
    opacity: f32,
    original: Option<RgbaImage>,
    rendered: Option<RgbaImage>,
    region: Option<(u32, u32)>,
    generation: u64,
}

impl Compositor {
    pub fn new(opacity: f32) -> Self {
        Self {
            source_path: None,
            opacity: clamp_opacity(opacity),
            original: None,
            rendered: None,
            region: None,
            generation: 0,
        }
    }

    /// Load a new source image at the current opacity.
    ///
    /// On failure nothing changes: the previous source, if any, keeps
    /// rendering.
    pub fn set_source(&mut self, path: &Path) -> Result<(), ImageLoadError> {
        let decoded = decode_rgba(path)?;
        log::info!(
            "inspiration image {} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height()
        );
        self.source_path = Some(path.to_path_buf());
        self.original = Some(with_opacity(decoded, self.opacity));
        self.rerender();
        Ok(())
    }

    /// Clamp `fraction` to `[0, 1]` and, if a source is loaded, re-read it
    /// from disk and reapply the opacity from scratch.
    ///
    /// The new opacity is kept even if re-reading fails, so it applies to
    /// the next image that loads; the current rendering stays as it was.
    pub fn set_opacity(&mut self, fraction: f32) -> Result<(), ImageLoadError> {
        self.opacity = clamp_opacity(fraction);
        let Some(path) = self.source_path.clone() else {
            return Ok(());
        };
        let decoded = decode_rgba(&path)?;
        self.original = Some(with_opacity(decoded, self.opacity));
        self.rerender();
        Ok(())
    }

    /// Report the region's size in physical pixels.
    ///
    /// Degenerate sizes are ignored. Returns true when the rendered image
    /// was rebuilt.
    pub fn on_region_resize(&mut self, width: u32, height: u32) -> bool {
        if width < MIN_REGION_EDGE || height < MIN_REGION_EDGE {
            return false;
        }
        if self.region == Some((width, height)) {
            return false;
        }
        log::debug!("inspiration region {}x{}", width, height);
        self.region = Some((width, height));
        self.rerender()
    }

    /// Forget the image; opacity and region are kept.
    pub fn clear(&mut self) {
        self.source_path = None;
        self.original = None;
        if self.rendered.take().is_some() {
            self.generation += 1;
        }
    }

    fn rerender(&mut self) -> bool {
        match (&self.original, self.region) {
            (Some(original), Some((w, h))) => {
                self.rendered = Some(imageops::resize(original, w, h, FilterType::Lanczos3));
                self.generation += 1;
                true
            }
            _ => false,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn original(&self) -> Option<&RgbaImage> {
        self.original.as_ref()
    }

    /// Image to draw at the region's top-left corner; `None` means clear.
    pub fn rendered(&self) -> Option<&RgbaImage> {
        self.rendered.as_ref()
    }

    /// Bumped every time `rendered` changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn clamp_opacity(fraction: f32) -> f32 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

fn decode_rgba(path: &Path) -> Result<RgbaImage, ImageLoadError> {
    let io_err = |source| ImageLoadError::Io { path: path.to_path_buf(), source };
    let image = image::ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?
        .decode()
        .map_err(|source| ImageLoadError::Decode { path: path.to_path_buf(), source })?;
    Ok(image.to_rgba8())
}

/// Scale every pixel's alpha by `opacity`, leaving colour untouched.
pub fn with_opacity(mut image: RgbaImage, opacity: f32) -> RgbaImage {
    for pixel in image.pixels_mut() {
        pixel.0[3] = (pixel.0[3] as f32 * opacity).round() as u8;
    }
    image
}
