//! Mantis Scroll - a fullscreen writing surface
//!
//! A text area beside a faded inspiration image, with a stopwatch for
//! writing sessions.

mod app;
mod cli;
mod compositor;
mod config;
mod document;
mod inspiration;
mod rich_text;
mod timer;

use app::MantisScrollApp;
use clap::Parser;
use config::SessionConfig;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SessionConfig::from(cli::Args::parse());
    log::info!(
        "starting mantis scroll (opacity {:.2}, {}pt, {})",
        config.opacity,
        config.font_size,
        if config.fullscreen { "fullscreen" } else { "windowed" }
    );

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_fullscreen(config.fullscreen)
            .with_title("Mantis Scroll")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Mantis Scroll",
        options,
        Box::new(move |cc| {
            scrollcore::ScrollTheme::default().apply(&cc.egui_ctx);
            Box::new(MantisScrollApp::new(config))
        }),
    )
}
