//! Checkerboard dithering for highlights and window shadows.
//!
//! A dither lets the text underneath a highlight stay readable without
//! introducing a grey fill.

use egui::{Color32, Painter, Pos2, Rect};

/// Paint every other pixel of `rect` in `color`.
/// `density` is the spacing: 1 = tight checkerboard, 2 = sparse.
pub fn draw_dither_rect(painter: &Painter, rect: Rect, color: Color32, density: u32) {
    let density = density.max(1) as i32;

    // clamp inward once so every painted pixel lies inside `rect`
    let x0 = rect.min.x.ceil() as i32;
    let y0 = rect.min.y.ceil() as i32;
    let x1 = rect.max.x.floor() as i32;
    let y1 = rect.max.y.floor() as i32;
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let pixel = egui::Vec2::splat(1.0);
    let x_step = density * 2;
    for y in (y0..y1).step_by(density as usize) {
        let row_offset = if ((y - y0) / density) % 2 == 0 { 0 } else { density };
        for x in ((x0 + row_offset)..x1).step_by(x_step as usize) {
            painter.rect_filled(Rect::from_min_size(Pos2::new(x as f32, y as f32), pixel), 0.0, color);
        }
    }
}

/// Selected list rows and pressed toggles.
pub fn draw_dither_selection(painter: &Painter, rect: Rect) {
    draw_dither_rect(painter, rect, Color32::BLACK, 1);
}

/// Hovered list rows.
pub fn draw_dither_hover(painter: &Painter, rect: Rect) {
    draw_dither_rect(painter, rect, Color32::BLACK, 2);
}

/// Dithered drop shadow offset 4px down-right of a dialog window.
/// Call after `egui::Window::show()` with the window rect.
pub fn draw_window_shadow(ctx: &egui::Context, window_rect: Rect) {
    let shadow_rect = window_rect.translate(egui::vec2(4.0, 4.0));
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::PanelResizeLine,
        egui::Id::new("dither_shadows"),
    ));
    draw_dither_rect(&painter, shadow_rect, Color32::BLACK, 2);
}
