//! Mantis Scroll application shell
//!
//! Timer toolbar and formatting toolbar on top, the inspiration image on
//! the left, the manuscript filling the rest. The text area is egui's
//! `TextEdit::multiline` with a layouter that paints the style spans; the
//! spans are shifted after every edit so they follow the text.

use crate::config::{SessionConfig, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::document::{self, DocumentFormat, Manuscript, OPENABLE_EXTENSIONS};
use crate::inspiration::InspirationPanel;
use crate::rich_text::{edit_between, layout_job, FontChoice, Inks, StyleAttr};
use crate::timer::Stopwatch;
use egui::{Align2, Context, FontId, Key, RichText};
use scrollcore::repaint::RepaintController;
use scrollcore::storage::{documents_dir, pictures_dir, FileBrowser, RecentFiles};
use scrollcore::theme::{consume_special_keys_with_tab, menu_bar, Palette, ScrollTheme};
use scrollcore::widgets::{status_bar, toolbar_separator, FileListItem};
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];
const TAB_SPACES: usize = 4;
const INKS: Inks = Inks { body: Palette::BODY, strong: Palette::INK };

#[derive(Clone, Copy, PartialEq, Debug)]
enum FileBrowserMode {
    Open,
    Save,
    PickImage,
}

/// What a dropped file should become
#[derive(Clone, Copy, PartialEq, Debug)]
enum DropTarget {
    Document,
    Inspiration,
    Ignored,
}

/// Modal message: load/save errors and the formatting-lost notice
struct Alert {
    title: &'static str,
    body: String,
}

/// Application state
pub struct MantisScrollApp {
    stopwatch: Stopwatch,
    inspiration: InspirationPanel,
    region_width: f32,
    manuscript: Manuscript,
    /// Text as of the last span update, to diff against
    synced_text: String,
    file_path: Option<PathBuf>,
    modified: bool,
    /// Char offsets, start <= end
    selection: (usize, usize),
    refocus_editor: bool,
    font: FontChoice,
    font_size: u32,
    opacity_percent: u32,
    fullscreen: bool,
    recent_files: RecentFiles,
    show_file_browser: bool,
    file_browser: FileBrowser,
    file_browser_mode: FileBrowserMode,
    save_filename: String,
    alert: Option<Alert>,
    show_about: bool,
    show_shortcuts: bool,
    show_close_confirm: bool,
    close_confirmed: bool,
    repaint: RepaintController,
}

impl MantisScrollApp {
    pub fn new(config: SessionConfig) -> Self {
        let mut repaint = RepaintController::with_interval(config.timer_poll);
        // the timer label is polled for the lifetime of the window
        repaint.set_continuous(true);

        let mut app = Self {
            stopwatch: Stopwatch::new(),
            inspiration: InspirationPanel::new(config.opacity),
            region_width: config.region_width,
            manuscript: Manuscript::default(),
            synced_text: String::new(),
            file_path: None,
            modified: false,
            selection: (0, 0),
            refocus_editor: true,
            font: config.font_family,
            font_size: config.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            opacity_percent: (config.opacity * 100.0).round() as u32,
            fullscreen: config.fullscreen,
            recent_files: RecentFiles::new(10),
            show_file_browser: false,
            file_browser: FileBrowser::new(documents_dir()).with_filter(OPENABLE_EXTENSIONS),
            file_browser_mode: FileBrowserMode::Open,
            save_filename: String::new(),
            alert: None,
            show_about: false,
            show_shortcuts: false,
            show_close_confirm: false,
            close_confirmed: false,
            repaint,
        };

        if let Some(path) = config.document {
            app.open_file(path);
        }
        if let Some(path) = config.inspiration_image {
            app.set_inspiration_image(&path);
        }
        app
    }

    fn file_title(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string())
    }

    fn display_title(&self) -> String {
        if self.modified {
            format!("{}*", self.file_title())
        } else {
            self.file_title()
        }
    }

    fn show_error(&mut self, title: &'static str, err: impl std::fmt::Display) {
        log::warn!("{}: {}", title, err);
        self.alert = Some(Alert { title, body: err.to_string() });
    }

    // ---------------------------------------------------------------
    // Documents
    // ---------------------------------------------------------------

    fn new_document(&mut self) {
        self.replace_manuscript(Manuscript::default());
        self.file_path = None;
        log::info!("new document");
    }

    fn replace_manuscript(&mut self, manuscript: Manuscript) {
        self.synced_text = manuscript.text.clone();
        self.manuscript = manuscript;
        self.selection = (0, 0);
        self.modified = false;
        self.refocus_editor = true;
    }

    /// A failed open leaves the current buffer untouched.
    pub fn open_file(&mut self, path: PathBuf) {
        match document::load(&path) {
            Ok(manuscript) => {
                self.replace_manuscript(manuscript);
                self.file_path = Some(path.clone());
                self.recent_files.add(path);
            }
            Err(e) => self.show_error("cannot open document", e),
        }
    }

    fn save_document(&mut self) {
        match self.file_path.clone() {
            Some(path) => {
                self.save_to(&path);
            }
            None => self.show_save_as_dialog(),
        }
    }

    /// Returns false, leaving the modified flag alone, when writing fails.
    fn save_to(&mut self, path: &Path) -> bool {
        match document::save(path, &self.manuscript) {
            Ok(()) => {
                self.modified = false;
                true
            }
            Err(e) => {
                self.show_error("cannot save document", e);
                false
            }
        }
    }

    fn save_document_as(&mut self, path: PathBuf) {
        if !self.save_to(&path) {
            return;
        }
        self.file_path = Some(path.clone());
        self.recent_files.add(path.clone());

        let format = DocumentFormat::from_path(&path);
        if !format.keeps_formatting() {
            self.alert = Some(Alert {
                title: "formatting lost",
                body: format!(
                    "saved as {}. bold, italic, underline and sub/superscript are not kept in this format; save as {} to keep them.",
                    format.label(),
                    DocumentFormat::Manuscript.label()
                ),
            });
        }
    }

    fn show_open_dialog(&mut self) {
        self.file_browser = FileBrowser::new(documents_dir()).with_filter(OPENABLE_EXTENSIONS);
        self.file_browser_mode = FileBrowserMode::Open;
        self.show_file_browser = true;
    }

    fn show_save_as_dialog(&mut self) {
        let start = self
            .file_path
            .as_ref()
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
            .unwrap_or_else(documents_dir);
        self.file_browser = FileBrowser::new(start).with_filter(OPENABLE_EXTENSIONS);
        self.file_browser_mode = FileBrowserMode::Save;
        self.save_filename = self.file_title();
        self.show_file_browser = true;
    }

    fn show_image_dialog(&mut self) {
        let start = self
            .inspiration
            .compositor()
            .source_path()
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
            .unwrap_or_else(pictures_dir);
        self.file_browser = FileBrowser::new(start).with_filter(IMAGE_EXTENSIONS);
        self.file_browser_mode = FileBrowserMode::PickImage;
        self.show_file_browser = true;
    }

    // ---------------------------------------------------------------
    // Inspiration image
    // ---------------------------------------------------------------

    /// On failure the previous image stays.
    fn set_inspiration_image(&mut self, path: &Path) {
        if let Err(e) = self.inspiration.set_image(path) {
            self.show_error("cannot load image", e);
        }
        self.repaint.mark_needs_repaint();
    }

    fn apply_opacity(&mut self) {
        let fraction = self.opacity_percent as f32 / 100.0;
        if let Err(e) = self.inspiration.set_opacity(fraction) {
            self.show_error("cannot reload image", e);
        }
        self.repaint.mark_needs_repaint();
    }

    // ---------------------------------------------------------------
    // Formatting
    // ---------------------------------------------------------------

    fn selected_range(&self) -> (usize, usize) {
        let len = self.manuscript.char_count();
        (self.selection.0.min(len), self.selection.1.min(len))
    }

    fn toggle_style(&mut self, attr: StyleAttr) {
        let (start, end) = self.selected_range();
        if start < end {
            self.manuscript.spans.toggle(start, end, attr);
            self.modified = true;
        }
        self.refocus_editor = true;
    }

    fn style_active(&self, attr: StyleAttr) -> bool {
        let (start, end) = self.selected_range();
        start < end && self.manuscript.spans.has_attr_at(start, attr)
    }

    /// Shift the spans to follow whatever the text area did this frame.
    /// `caret` is the cursor after the edit, in chars.
    fn sync_spans(&mut self, caret: Option<usize>) {
        if let Some((at, removed, inserted)) = edit_between(&self.synced_text, &self.manuscript.text, caret) {
            self.manuscript.spans.apply_edit(at, removed, inserted);
            self.synced_text = self.manuscript.text.clone();
            self.modified = true;
        }
    }

    fn set_fullscreen(&mut self, ctx: &Context, fullscreen: bool) {
        self.fullscreen = fullscreen;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
    }

    fn handle_dropped(&mut self, path: PathBuf) {
        match drop_target(&path) {
            DropTarget::Document => self.open_file(path),
            DropTarget::Inspiration => self.set_inspiration_image(&path),
            DropTarget::Ignored => log::debug!("ignoring dropped {}", path.display()),
        }
    }

    /// Shortcuts the text area must not see.
    fn handle_keyboard(&mut self, ctx: &Context) {
        consume_special_keys_with_tab(ctx, TAB_SPACES);

        let mut actions: Vec<Box<dyn FnOnce(&mut Self)>> = Vec::new();
        let mut fullscreen = self.fullscreen;

        ctx.input_mut(|i| {
            let cmd = i.modifiers.command;
            let shift = i.modifiers.shift;

            let events = std::mem::take(&mut i.events);
            let mut remaining = Vec::new();

            for event in events {
                let mut handled = false;
                if let egui::Event::Key { key, pressed: true, .. } = &event {
                    match key {
                        Key::N if cmd => { handled = true; actions.push(Box::new(|s| s.new_document())); }
                        Key::O if cmd => { handled = true; actions.push(Box::new(|s| s.show_open_dialog())); }
                        Key::S if cmd && shift => { handled = true; actions.push(Box::new(|s| s.show_save_as_dialog())); }
                        Key::S if cmd => { handled = true; actions.push(Box::new(|s| s.save_document())); }
                        Key::B if cmd => { handled = true; actions.push(Box::new(|s| s.toggle_style(StyleAttr::Bold))); }
                        Key::I if cmd => { handled = true; actions.push(Box::new(|s| s.toggle_style(StyleAttr::Italic))); }
                        Key::U if cmd => { handled = true; actions.push(Box::new(|s| s.toggle_style(StyleAttr::Underline))); }
                        Key::F11 => { handled = true; fullscreen = !fullscreen; }
                        Key::Escape if fullscreen => { handled = true; fullscreen = false; }
                        _ => {}
                    }
                }
                if !handled {
                    remaining.push(event);
                }
            }
            i.events = remaining;
        });

        for action in actions {
            action(self);
        }
        if fullscreen != self.fullscreen {
            self.set_fullscreen(ctx, fullscreen);
        }
    }

    // ---------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        menu_bar(ui, |ui| {
            ui.menu_button("file", |ui| {
                if ui.button("new        \u{2318}n").clicked() {
                    self.new_document();
                    ui.close_menu();
                }
                if ui.button("open...    \u{2318}o").clicked() {
                    self.show_open_dialog();
                    ui.close_menu();
                }
                ui.menu_button("open recent", |ui| {
                    if self.recent_files.is_empty() {
                        ui.label("no recent files");
                    } else {
                        for path in self.recent_files.files().to_vec() {
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().to_string())
                                .unwrap_or("unknown".to_string());
                            if ui.button(&name).clicked() {
                                self.open_file(path);
                                ui.close_menu();
                            }
                        }
                    }
                });
                ui.separator();
                if ui.button("save       \u{2318}s").clicked() {
                    self.save_document();
                    ui.close_menu();
                }
                if ui.button("save as... \u{21e7}\u{2318}s").clicked() {
                    self.show_save_as_dialog();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("exit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close_menu();
                }
            });

            ui.menu_button("edit", |ui| {
                if ui.button("cut        \u{2318}x").clicked() {
                    ui.ctx().input_mut(|i| i.events.push(egui::Event::Cut));
                    self.refocus_editor = true;
                    ui.close_menu();
                }
                if ui.button("copy       \u{2318}c").clicked() {
                    ui.ctx().input_mut(|i| i.events.push(egui::Event::Copy));
                    self.refocus_editor = true;
                    ui.close_menu();
                }
                if ui.button("paste      \u{2318}v").clicked() {
                    let text = arboard::Clipboard::new()
                        .and_then(|mut c| c.get_text())
                        .unwrap_or_else(|e| {
                            log::debug!("clipboard unavailable: {}", e);
                            String::new()
                        });
                    if !text.is_empty() {
                        ui.ctx().input_mut(|i| i.events.push(egui::Event::Paste(text)));
                    }
                    self.refocus_editor = true;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("select all \u{2318}a").clicked() {
                    ui.ctx().input_mut(|i| {
                        i.events.push(egui::Event::Key {
                            key: Key::A,
                            physical_key: Some(Key::A),
                            pressed: true,
                            repeat: false,
                            modifiers: egui::Modifiers::COMMAND,
                        });
                    });
                    self.refocus_editor = true;
                    ui.close_menu();
                }
            });

            ui.menu_button("theme", |ui| {
                if ui.button("set inspiration image...").clicked() {
                    self.show_image_dialog();
                    ui.close_menu();
                }
                let has_image = self.inspiration.compositor().source_path().is_some();
                if ui.add_enabled(has_image, egui::Button::new("clear inspiration image")).clicked() {
                    self.inspiration.clear();
                    ui.close_menu();
                }
            });

            ui.menu_button("window", |ui| {
                if ui.button("toggle fullscreen   F11").clicked() {
                    let fullscreen = !self.fullscreen;
                    self.set_fullscreen(ui.ctx(), fullscreen);
                    ui.close_menu();
                }
            });

            ui.menu_button("help", |ui| {
                if ui.button("keyboard shortcuts").clicked() {
                    self.show_shortcuts = true;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("about").clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });
        });
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ScrollTheme::toolbar_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("timer:");
                ui.label(RichText::new(self.stopwatch.display()).monospace());
                let running = self.stopwatch.is_running();
                if ui.add_enabled(!running, egui::Button::new("start")).clicked() {
                    self.stopwatch.start();
                }
                if ui.add_enabled(running, egui::Button::new("pause")).clicked() {
                    self.stopwatch.pause();
                }
                if ui.button("reset").clicked() {
                    self.stopwatch.reset();
                }

                toolbar_separator(ui);

                let styles = [
                    (StyleAttr::Bold, RichText::new("B").strong()),
                    (StyleAttr::Italic, RichText::new("I").italics()),
                    (StyleAttr::Underline, RichText::new("U").underline()),
                    (StyleAttr::Subscript, RichText::new("x\u{2082}")),
                    (StyleAttr::Superscript, RichText::new("x\u{00b2}")),
                ];
                for (attr, label) in styles {
                    if ui.selectable_label(self.style_active(attr), label).clicked() {
                        self.toggle_style(attr);
                    }
                }

                toolbar_separator(ui);

                egui::ComboBox::from_id_source("font_family")
                    .selected_text(self.font.label())
                    .show_ui(ui, |ui| {
                        for choice in [FontChoice::Proportional, FontChoice::Monospace] {
                            ui.selectable_value(&mut self.font, choice, choice.label());
                        }
                    });
                ui.add(
                    egui::DragValue::new(&mut self.font_size)
                        .clamp_range(MIN_FONT_SIZE..=MAX_FONT_SIZE)
                        .suffix("pt"),
                );

                toolbar_separator(ui);

                ui.label("inspiration image opacity");
                let source_info = match (self.inspiration.compositor().source_path(), self.inspiration.compositor().original()) {
                    (Some(path), Some(img)) => format!("{} ({}x{})", path.display(), img.width(), img.height()),
                    _ => "no inspiration image".to_string(),
                };
                let slider = ui
                    .add(egui::Slider::new(&mut self.opacity_percent, 0..=100).suffix("%"))
                    .on_hover_text(source_info);
                if slider.changed() {
                    self.apply_opacity();
                }

                toolbar_separator(ui);

                let label = if self.fullscreen { "windowed" } else { "fullscreen" };
                if ui.button(label).clicked() {
                    let fullscreen = !self.fullscreen;
                    self.set_fullscreen(ui.ctx(), fullscreen);
                }
            });
        });
    }

    fn render_editor(&mut self, ui: &mut egui::Ui) {
        let editor_id = egui::Id::new("manuscript_editor");
        if self.refocus_editor {
            ui.memory_mut(|mem| mem.request_focus(editor_id));
            self.refocus_editor = false;
        }

        let font = FontId::new(self.font_size as f32, self.font.family());
        let spans = &self.manuscript.spans;
        let mut layouter = |ui: &egui::Ui, text: &str, wrap_width: f32| {
            let mut job = layout_job(text, spans, font.clone(), &INKS);
            job.wrap.max_width = wrap_width;
            ui.fonts(|f| f.layout_job(job))
        };

        let output = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::TextEdit::multiline(&mut self.manuscript.text)
                    .id(editor_id)
                    .font(FontId::new(self.font_size as f32, self.font.family()))
                    .desired_width(f32::INFINITY)
                    .desired_rows(((ui.available_height() / self.font_size as f32) as usize).max(4))
                    .frame(false)
                    .layouter(&mut layouter)
                    .show(ui)
            })
            .inner;

        let caret = output.cursor_range.map(|range| {
            let a = range.primary.ccursor.index;
            let b = range.secondary.ccursor.index;
            self.selection = (a.min(b), a.max(b));
            a
        });
        if output.response.changed() {
            self.sync_spans(caret);
            // the galley above was laid out with the pre-edit spans
            self.repaint.mark_needs_repaint();
        }
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        let timer_state = if self.stopwatch.is_running() {
            "timer running"
        } else if self.stopwatch.is_zero() {
            "timer stopped"
        } else {
            "timer paused"
        };
        let left = format!(
            "{} words, {} chars  |  {}",
            self.manuscript.word_count(),
            self.manuscript.char_count(),
            timer_state
        );
        status_bar(ui, &left, &self.display_title());
    }

    fn render_file_browser(&mut self, ctx: &Context) {
        let title = match self.file_browser_mode {
            FileBrowserMode::Open => "open document",
            FileBrowserMode::Save => "save document",
            FileBrowserMode::PickImage => "choose inspiration image",
        };
        let resp = egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("location:");
                    ui.label(self.file_browser.current_dir.to_string_lossy().to_string());
                });
                ui.separator();
                egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    let entries = self.file_browser.entries.clone();
                    for (idx, entry) in entries.iter().enumerate() {
                        let selected = self.file_browser.selected_index == Some(idx);
                        let response = ui.add(FileListItem::new(&entry.name, entry.is_directory).selected(selected));
                        if response.clicked() {
                            self.file_browser.selected_index = Some(idx);
                            if !entry.is_directory && self.file_browser_mode == FileBrowserMode::Save {
                                self.save_filename = entry.name.clone();
                            }
                        }
                        if response.double_clicked() {
                            if entry.is_directory {
                                self.file_browser.navigate_to(entry.path.clone());
                            } else if self.file_browser_mode != FileBrowserMode::Save {
                                self.show_file_browser = false;
                                self.confirm_pick(entry.path.clone());
                            }
                        }
                    }
                });
                if self.file_browser_mode == FileBrowserMode::Save {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label("filename:");
                        ui.text_edit_singleline(&mut self.save_filename);
                    });
                    ui.label(
                        RichText::new("formats: .txt, .docx, .msd (keeps formatting)")
                            .size(ScrollTheme::default().font_size_small),
                    );
                }
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        self.show_file_browser = false;
                    }
                    let action_text = match self.file_browser_mode {
                        FileBrowserMode::Open => "open",
                        FileBrowserMode::Save => "save",
                        FileBrowserMode::PickImage => "choose",
                    };
                    if ui.button(action_text).clicked() {
                        match self.file_browser_mode {
                            FileBrowserMode::Open | FileBrowserMode::PickImage => {
                                if let Some(entry) = self.file_browser.selected_entry() {
                                    if !entry.is_directory {
                                        let p = entry.path.clone();
                                        self.show_file_browser = false;
                                        self.confirm_pick(p);
                                    }
                                }
                            }
                            FileBrowserMode::Save => {
                                let name = self.save_filename.trim();
                                if !name.is_empty() {
                                    let path = self.file_browser.save_directory().join(with_default_extension(name));
                                    self.show_file_browser = false;
                                    self.save_document_as(path);
                                }
                            }
                        }
                    }
                });
            });
        if let Some(r) = &resp {
            scrollcore::dither::draw_window_shadow(ctx, r.response.rect);
        }
    }

    fn confirm_pick(&mut self, path: PathBuf) {
        match self.file_browser_mode {
            FileBrowserMode::PickImage => self.set_inspiration_image(&path),
            _ => self.open_file(path),
        }
    }

    fn render_alert(&mut self, ctx: &Context) {
        let Some(alert) = &self.alert else {
            return;
        };
        let mut dismissed = false;
        let resp = egui::Window::new(alert.title)
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&alert.body);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        dismissed = true;
                    }
                });
            });
        if let Some(r) = &resp {
            scrollcore::dither::draw_window_shadow(ctx, r.response.rect);
        }
        if dismissed {
            self.alert = None;
            self.refocus_editor = true;
        }
    }

    fn render_about(&mut self, ctx: &Context) {
        let resp = egui::Window::new("about mantis scroll")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("mantis scroll");
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    ui.label("a fullscreen writing surface");
                });
                ui.add_space(8.0);
                ui.separator();
                ui.label("supported formats:");
                ui.label("  .txt (plain text)");
                ui.label("  .docx (paragraphs only)");
                ui.label("  .msd (manuscript, keeps formatting)");
                ui.add_space(4.0);
                ui.label("inspiration images: png, jpeg, gif, bmp");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
        if let Some(r) = &resp {
            scrollcore::dither::draw_window_shadow(ctx, r.response.rect);
        }
    }

    fn render_shortcuts(&mut self, ctx: &Context) {
        let resp = egui::Window::new("keyboard shortcuts")
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.label(RichText::new("File").strong());
                ui.separator();
                shortcut_row(ui, "\u{2318}N", "New document");
                shortcut_row(ui, "\u{2318}O", "Open file");
                shortcut_row(ui, "\u{2318}S", "Save");
                shortcut_row(ui, "\u{21e7}\u{2318}S", "Save as");
                ui.add_space(8.0);
                ui.label(RichText::new("Editing").strong());
                ui.separator();
                shortcut_row(ui, "\u{2318}X", "Cut");
                shortcut_row(ui, "\u{2318}C", "Copy");
                shortcut_row(ui, "\u{2318}V", "Paste");
                shortcut_row(ui, "\u{2318}A", "Select all");
                shortcut_row(ui, "Tab", "Insert four spaces");
                ui.add_space(8.0);
                ui.label(RichText::new("Formatting").strong());
                ui.separator();
                shortcut_row(ui, "\u{2318}B", "Bold");
                shortcut_row(ui, "\u{2318}I", "Italic");
                shortcut_row(ui, "\u{2318}U", "Underline");
                ui.add_space(8.0);
                ui.label(RichText::new("Window").strong());
                ui.separator();
                shortcut_row(ui, "F11", "Toggle fullscreen");
                shortcut_row(ui, "Esc", "Leave fullscreen");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_shortcuts = false;
                    }
                });
            });
        if let Some(r) = &resp {
            scrollcore::dither::draw_window_shadow(ctx, r.response.rect);
        }
    }

    fn render_close_confirm(&mut self, ctx: &Context) {
        let resp = egui::Window::new("unsaved changes")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("you have unsaved changes.");
                ui.label("do you want to save before closing?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("don't save").clicked() {
                        self.close_confirmed = true;
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                    if ui.button("cancel").clicked() {
                        self.show_close_confirm = false;
                    }
                    if ui.button("save").clicked() {
                        self.show_close_confirm = false;
                        self.save_document();
                        if !self.modified {
                            self.close_confirmed = true;
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    }
                });
            });
        if let Some(r) = &resp {
            scrollcore::dither::draw_window_shadow(ctx, r.response.rect);
        }
    }
}

fn shortcut_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(shortcut).monospace().strong());
        ui.add_space(20.0);
        ui.label(description);
    });
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn drop_target(path: &Path) -> DropTarget {
    let ext = extension_of(path);
    if OPENABLE_EXTENSIONS.contains(&ext.as_str()) {
        DropTarget::Document
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        DropTarget::Inspiration
    } else {
        DropTarget::Ignored
    }
}

/// Names typed into the save dialog without a known document extension
/// are saved as plain text.
fn with_default_extension(name: &str) -> String {
    if OPENABLE_EXTENSIONS.contains(&extension_of(Path::new(name)).as_str()) {
        name.to_string()
    } else {
        format!("{}.{}", name, DocumentFormat::PlainText.extension())
    }
}

impl eframe::App for MantisScrollApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.stopwatch.tick();
        self.handle_keyboard(ctx);

        let dropped: Vec<PathBuf> = ctx.input(|i| i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect());
        for path in dropped {
            self.handle_dropped(path);
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| self.render_menu_bar(ui));
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.render_toolbar(ui));
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| self.render_status_bar(ui));
        egui::SidePanel::left("inspiration")
            .exact_width(self.region_width)
            .resizable(false)
            .frame(egui::Frame::none().fill(Palette::PAPER))
            .show(ctx, |ui| {
                let width = ui.available_width();
                self.inspiration.show(ui, width);
            });
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Palette::PAPER).inner_margin(egui::Margin::same(8.0)))
            .show(ctx, |ui| self.render_editor(ui));

        if self.show_file_browser {
            self.render_file_browser(ctx);
        }
        if self.show_close_confirm {
            self.render_close_confirm(ctx);
        }
        if self.show_about {
            self.render_about(ctx);
        }
        if self.show_shortcuts {
            self.render_shortcuts(ctx);
        }
        self.render_alert(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            if self.modified && !self.close_confirmed {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                self.show_close_confirm = true;
            } else {
                log::info!("closing");
                self.repaint.set_continuous(false);
            }
        }

        self.repaint.end_frame(ctx);
    }
}
