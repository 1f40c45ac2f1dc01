//! Core library for bingo card sampling and page rendering.

mod card;
mod pool;
mod render;
mod theme;

pub use card::{CARD_SIZE, CELL_COUNT, Card, Cell, FREE_CELL, generate_card_set};
pub use pool::{DEFAULT_ITEMS, InsufficientItems, ItemPool};
pub use render::{
    DISPLAY_FONT_FILE, FontLoadError, FontSet, PageOptions, RenderError, SERIF_FONT_FILE,
    render_card_page, save_card_page,
};
pub use theme::Theme;
