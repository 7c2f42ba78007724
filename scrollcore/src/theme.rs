//! Writing-surface theme
//!
//! Paper and ink. 1px ink outlines, square corners, no shadows. Uses egui's
//! bundled fonts; the editor picks proportional or monospace per document.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// The palette. Ink on paper, plus one muted tone for body text so that
/// strong (bold) runs stand out.
pub struct Palette;

impl Palette {
    pub const PAPER: Color32 = Color32::from_rgb(255, 255, 255);
    pub const INK: Color32 = Color32::from_rgb(0, 0, 0);
    pub const BODY: Color32 = Color32::from_rgb(48, 48, 48);
    pub const SELECTION: Color32 = Color32::from_rgb(170, 170, 170);
}

/// Theme configuration
pub struct ScrollTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for ScrollTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 20.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 4.0,
        }
    }
}

impl ScrollTheme {
    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::light();
        visuals.window_fill = Palette::PAPER;
        visuals.panel_fill = Palette::PAPER;
        visuals.faint_bg_color = Palette::PAPER;
        visuals.extreme_bg_color = Palette::PAPER;
        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, Palette::INK);

        let ink = |ws: &mut egui::style::WidgetVisuals| {
            ws.bg_fill = Palette::PAPER;
            ws.weak_bg_fill = Palette::PAPER;
            ws.bg_stroke = Stroke::new(1.0, Palette::INK);
            ws.fg_stroke = Stroke::new(1.0, Palette::INK);
            ws.rounding = Rounding::ZERO;
        };
        ink(&mut visuals.widgets.noninteractive);
        ink(&mut visuals.widgets.inactive);
        ink(&mut visuals.widgets.hovered);
        ink(&mut visuals.widgets.active);
        ink(&mut visuals.widgets.open);

        // dithered shadows are drawn by hand
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        visuals.selection.bg_fill = Palette::SELECTION;
        visuals.selection.stroke = Stroke::new(1.0, Palette::INK);

        style.visuals = visuals;
        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }

    /// Toolbar strip: paper fill, 1px ink outline
    pub fn toolbar_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(Palette::PAPER)
            .stroke(Stroke::new(1.0, Palette::INK))
            .inner_margin(egui::Margin::symmetric(6.0, 3.0))
    }
}

/// Menu bar styling helper
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::InnerResponse<R> {
    let frame_resp = ScrollTheme::toolbar_frame()
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner);
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}

/// Strip Tab and zoom key events before any widget sees them.
///
/// Tab would otherwise move focus out of the editor; a Tab press (or a
/// literal tab in text input) becomes `tab_spaces` spaces instead, and 0
/// drops it. The focused widget is re-focused because egui already applied
/// the Tab focus move before `update()` ran.
pub fn consume_special_keys_with_tab(ctx: &egui::Context, tab_spaces: usize) {
    let tab_pressed = ctx.input(|i| {
        i.events.iter().any(|e| matches!(e, egui::Event::Key { key: egui::Key::Tab, pressed: true, .. }))
    });
    let focused_before = if tab_pressed { ctx.memory(|mem| mem.focused()) } else { None };

    ctx.input_mut(|i| {
        let spaces = " ".repeat(tab_spaces);
        i.events = std::mem::take(&mut i.events)
            .into_iter()
            .filter_map(|event| match event {
                egui::Event::Key { key: egui::Key::Tab, pressed, .. } => {
                    (pressed && tab_spaces > 0).then(|| egui::Event::Text(spaces.clone()))
                }
                egui::Event::Text(text) if text.contains('\t') => {
                    (tab_spaces > 0).then(|| egui::Event::Text(text.replace('\t', &spaces)))
                }
                egui::Event::Key { key, modifiers, .. }
                    if modifiers.command
                        && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals) =>
                {
                    None
                }
                other => Some(other),
            })
            .collect();
    });

    if tab_pressed {
        match focused_before {
            Some(id) => ctx.memory_mut(|mem| mem.request_focus(id)),
            None => {
                if let Some(id) = ctx.memory(|mem| mem.focused()) {
                    ctx.memory_mut(|mem| mem.surrender_focus(id));
                }
            }
        }
    }
}
