//! Inspiration panel: the egui view over the compositor.
//!
//! Every frame the panel reports its size in physical pixels, so the
//! compositor can resample to an exact 1:1 bitmap. The texture is only
//! re-uploaded when the compositor's generation moves.

use crate::compositor::{Compositor, ImageLoadError};
use egui::{Color32, ColorImage, Context, Rect, TextureHandle, TextureOptions, Ui, Vec2};
use scrollcore::theme::Palette;
use std::path::Path;

pub struct InspirationPanel {
    compositor: Compositor,
    texture: Option<TextureHandle>,
    uploaded_generation: u64,
}

impl InspirationPanel {
    pub fn new(opacity: f32) -> Self {
        Self {
            compositor: Compositor::new(opacity),
            texture: None,
            uploaded_generation: 0,
        }
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn set_image(&mut self, path: &Path) -> Result<(), ImageLoadError> {
        self.compositor.set_source(path)
    }

    pub fn set_opacity(&mut self, fraction: f32) -> Result<(), ImageLoadError> {
        self.compositor.set_opacity(fraction)
    }

    pub fn clear(&mut self) {
        self.compositor.clear();
    }

    /// Fill `width` points of the available height.
    pub fn show(&mut self, ui: &mut Ui, width: f32) {
        let size = Vec2::new(width, ui.available_height());
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());

        let (w, h) = physical_size(rect.size(), ui.ctx().pixels_per_point());
        self.compositor.on_region_resize(w, h);
        self.sync_texture(ui.ctx());

        if !ui.is_rect_visible(rect) {
            return;
        }
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Palette::PAPER);
        if let Some(tex) = &self.texture {
            // anchored top-left, drawn at exactly one texel per pixel
            let draw_size = tex.size_vec2() / ui.ctx().pixels_per_point();
            let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(tex.id(), Rect::from_min_size(rect.min, draw_size), uv, Color32::WHITE);
        }
    }

    fn sync_texture(&mut self, ctx: &Context) {
        let generation = self.compositor.generation();
        if generation == self.uploaded_generation {
            return;
        }
        self.uploaded_generation = generation;
        self.texture = self.compositor.rendered().map(|img| {
            let color_image = ColorImage::from_rgba_unmultiplied(
                [img.width() as usize, img.height() as usize],
                img.as_raw(),
            );
            ctx.load_texture("mantis_inspiration", color_image, TextureOptions::NEAREST)
        });
    }
}

/// Region size in points to whole physical pixels.
fn physical_size(points: Vec2, pixels_per_point: f32) -> (u32, u32) {
    let px = points * pixels_per_point;
    (px.x.round().max(0.0) as u32, px.y.round().max(0.0) as u32)
}
