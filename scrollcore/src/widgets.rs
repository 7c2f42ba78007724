//! Small widgets shared by the toolbars and dialogs

use crate::dither;
use crate::theme::Palette;
use egui::{Response, Ui, Widget};

/// Vertical 1px ink rule between toolbar groups
pub fn toolbar_separator(ui: &mut Ui) {
    let height = ui.spacing().interact_size.y;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, height), egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        ui.painter().vline(rect.center().x, rect.y_range(), egui::Stroke::new(1.0, Palette::INK));
    }
}

/// Status bar: paper background, 1px ink border, left and right text
pub fn status_bar(ui: &mut Ui, left: &str, right: &str) {
    egui::Frame::none()
        .fill(Palette::PAPER)
        .stroke(egui::Stroke::new(1.0, Palette::INK))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(left);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(right);
                });
            });
        });
}

/// Row in the open/save/pick dialogs.
/// Selected rows get a dithered overlay instead of a solid fill.
pub struct FileListItem<'a> {
    name: &'a str,
    is_directory: bool,
    selected: bool,
}

impl<'a> FileListItem<'a> {
    pub fn new(name: &'a str, is_directory: bool) -> Self {
        Self { name, is_directory, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for FileListItem<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 20.0;
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(ui.available_width(), height), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, Palette::PAPER);

            let text_color = if self.selected {
                dither::draw_dither_selection(painter, rect);
                Palette::PAPER
            } else {
                if response.hovered() {
                    dither::draw_dither_hover(painter, rect);
                }
                Palette::INK
            };

            let icon = if self.is_directory { "📁" } else { "📄" };
            painter.text(
                egui::pos2(rect.min.x + 12.0, rect.center().y),
                egui::Align2::CENTER_CENTER,
                icon,
                egui::FontId::proportional(12.0),
                text_color,
            );
            painter.text(
                egui::pos2(rect.min.x + 24.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.name,
                egui::FontId::proportional(12.0),
                text_color,
            );
        }

        response
    }
}
