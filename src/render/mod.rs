//! Rendering helpers for producing print-ready card pages.

mod fonts;
mod paint;

pub use fonts::{DISPLAY_FONT_FILE, FontLoadError, FontSet, SERIF_FONT_FILE};
pub use paint::{PageOptions, RenderError, render_card_page, save_card_page};
