//! scrollcore - shared library for the Mantis Scroll writing surface

pub mod dither;
pub mod repaint;
pub mod storage;
pub mod theme;
pub mod widgets;

pub use theme::ScrollTheme;
