use std::path::{Path, PathBuf};

use ab_glyph::{Font, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use thiserror::Error;

use crate::card::{CARD_SIZE, Card, Cell};
use crate::pool::ItemPool;
use crate::render::fonts::FontSet;
use crate::theme::Theme;

// US letter, in points (72 per inch).
const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;

// Title band across the top of the page.
const HEADER_BAND_PT: f32 = 120.0;
const TITLE_SIZE_PT: f32 = 100.0;

// The playing grid: 72 pt square cells anchored 1 3/4" from the left and top,
// one label row above five item rows.
const GRID_OFFSET_PT: f32 = 126.0;
const CELL_PT: f32 = 72.0;
const GRID_ROWS: usize = CARD_SIZE + 1;
const LABEL_SIZE_PT: f32 = 54.0;
const FREE_SIZE_PT: f32 = 20.0;
const CELL_TEXT_SIZE_PT: f32 = 8.0;
const CELL_TEXT_LEADING_PT: f32 = 10.0;
const CELL_PADDING_PT: f32 = 4.0;

// Footer paragraphs below the grid.
const FOOTER_X_PT: f32 = 126.0;
const FOOTER_TOP_PT: f32 = 600.0;
const FOOTER_SIZE_PT: f32 = 12.0;
const FOOTER_GAP_PT: f32 = 20.0;

// Unused-item listing along the bottom edge.
const UNUSED_X_PT: f32 = 36.0;
const UNUSED_TOP_PT: f32 = 648.0;
const UNUSED_SIZE_PT: f32 = 8.0;
const UNUSED_LEADING_PT: f32 = 10.0;

const PAGE_BG: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Options controlling page rasterisation.
#[derive(Debug, Clone, Copy)]
pub struct PageOptions {
    /// Dots per inch; clamped to 72..=1200.
    pub dpi: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self { dpi: 300 }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write card page {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Render one card onto a full letter-size page.
///
/// Layout is fixed: decorative title, the labeled grid with its free center
/// cell, footer paragraphs, and the unused-item listing. Output depends only
/// on the arguments, so rendering the same card twice is byte-identical.
pub fn render_card_page(
    card: &Card,
    pool: &ItemPool,
    theme: &Theme,
    fonts: &FontSet,
    options: &PageOptions,
) -> RgbaImage {
    let dpi = options.dpi.clamp(72, 1200);
    let page_width = pt_to_px(PAGE_WIDTH_PT, dpi) as u32;
    let page_height = pt_to_px(PAGE_HEIGHT_PT, dpi) as u32;
    let mut page = RgbaImage::from_pixel(page_width, page_height, PAGE_BG);

    draw_title(&mut page, theme, fonts, dpi);
    for rect in grid_rects(dpi) {
        draw_hollow_rect_mut(&mut page, rect, INK);
    }
    draw_column_letters(&mut page, theme, fonts, dpi);
    draw_cells(&mut page, card, theme, fonts, dpi);
    draw_footers(&mut page, theme, fonts, dpi);
    draw_unused_listing(&mut page, card, pool, theme, fonts, dpi);

    page
}

/// Write a rendered page as PNG.
pub fn save_card_page(page: &RgbaImage, path: &Path) -> Result<(), RenderError> {
    page.save(path).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn pt_to_px(pt: f32, dpi: u32) -> i32 {
    (pt * dpi as f32 / 72.0).round() as i32
}

fn scale_for(pt: f32, dpi: u32) -> PxScale {
    PxScale::from(pt * dpi as f32 / 72.0)
}

/// The 6x5 array of unit rectangles outlining every cell, label row included.
fn grid_rects(dpi: u32) -> Vec<Rect> {
    let origin = pt_to_px(GRID_OFFSET_PT, dpi);
    let cell = pt_to_px(CELL_PT, dpi);
    let mut rects = Vec::with_capacity(GRID_ROWS * CARD_SIZE);
    for row in 0..GRID_ROWS {
        for col in 0..CARD_SIZE {
            rects.push(
                Rect::at(origin + col as i32 * cell, origin + row as i32 * cell)
                    .of_size(cell as u32, cell as u32),
            );
        }
    }
    rects
}

fn draw_title(page: &mut RgbaImage, theme: &Theme, fonts: &FontSet, dpi: u32) {
    let scale = scale_for(TITLE_SIZE_PT, dpi);
    let (text_w, text_h) = text_size(scale, &fonts.display, &theme.title);
    let band = pt_to_px(HEADER_BAND_PT, dpi);
    let x = (page.width() as i32 - text_w as i32) / 2;
    let y = (band - text_h as i32) / 2;
    draw_text_mut(page, INK, x, y.max(0), scale, &fonts.display, &theme.title);
}

fn draw_column_letters(page: &mut RgbaImage, theme: &Theme, fonts: &FontSet, dpi: u32) {
    let scale = scale_for(LABEL_SIZE_PT, dpi);
    let origin = pt_to_px(GRID_OFFSET_PT, dpi);
    let cell = pt_to_px(CELL_PT, dpi);
    for (col, letter) in theme.column_letters.chars().take(CARD_SIZE).enumerate() {
        let text = letter.to_string();
        let (text_w, text_h) = text_size(scale, &fonts.display, &text);
        let cell_x = origin + col as i32 * cell;
        let x = cell_x + (cell - text_w as i32) / 2;
        let y = origin + (cell - text_h as i32) / 2;
        draw_text_mut(page, INK, x, y, scale, &fonts.display, &text);
    }
}

fn draw_cells(page: &mut RgbaImage, card: &Card, theme: &Theme, fonts: &FontSet, dpi: u32) {
    let origin = pt_to_px(GRID_OFFSET_PT, dpi);
    let cell = pt_to_px(CELL_PT, dpi);
    let padding = pt_to_px(CELL_PADDING_PT, dpi);
    let body_scale = scale_for(CELL_TEXT_SIZE_PT, dpi);
    let body_leading = pt_to_px(CELL_TEXT_LEADING_PT, dpi);
    let free_scale = scale_for(FREE_SIZE_PT, dpi);
    let max_width = (cell - 2 * padding).max(1) as u32;

    for row in 0..CARD_SIZE {
        for col in 0..CARD_SIZE {
            // Grid row 0 holds the column letters; items start one row down.
            let cell_x = origin + col as i32 * cell;
            let cell_y = origin + (row as i32 + 1) * cell;
            match card.cell(row, col) {
                Cell::Free => {
                    let marker = &theme.free_marker;
                    let (text_w, text_h) = text_size(free_scale, &fonts.display, marker);
                    let x = cell_x + (cell - text_w as i32) / 2;
                    let y = cell_y + (cell - text_h as i32) / 2;
                    draw_text_mut(page, INK, x, y, free_scale, &fonts.display, marker);
                }
                Cell::Item(text) => {
                    let lines = wrap_text(&fonts.serif, body_scale, max_width, text);
                    let block_h = lines.len() as i32 * body_leading;
                    let mut y = cell_y + (cell - block_h) / 2;
                    for line in &lines {
                        let (line_w, _) = text_size(body_scale, &fonts.serif, line);
                        let x = cell_x + (cell - line_w as i32) / 2;
                        draw_text_mut(page, INK, x, y, body_scale, &fonts.serif, line);
                        y += body_leading;
                    }
                }
            }
        }
    }
}

fn draw_footers(page: &mut RgbaImage, theme: &Theme, fonts: &FontSet, dpi: u32) {
    let scale = scale_for(FOOTER_SIZE_PT, dpi);
    let x = pt_to_px(FOOTER_X_PT, dpi);
    let gap = pt_to_px(FOOTER_GAP_PT, dpi);
    let mut y = pt_to_px(FOOTER_TOP_PT, dpi);
    for line in &theme.footer_lines {
        draw_text_mut(page, INK, x, y, scale, &fonts.serif, line);
        y += gap;
    }
}

fn draw_unused_listing(
    page: &mut RgbaImage,
    card: &Card,
    pool: &ItemPool,
    theme: &Theme,
    fonts: &FontSet,
    dpi: u32,
) {
    let unused = card.unused_items(pool);
    let text = format!("{}{}", theme.unused_label, unused.join(&theme.separator));
    let scale = scale_for(UNUSED_SIZE_PT, dpi);
    let x = pt_to_px(UNUSED_X_PT, dpi);
    let leading = pt_to_px(UNUSED_LEADING_PT, dpi);
    let max_width = (page.width() as i32 - 2 * x).max(1) as u32;
    let mut y = pt_to_px(UNUSED_TOP_PT, dpi);
    for line in wrap_text(&fonts.serif, scale, max_width, &text) {
        draw_text_mut(page, INK, x, y, scale, &fonts.serif, &line);
        y += leading;
    }
}

fn wrap_text(font: &impl Font, scale: PxScale, max_width: u32, text: &str) -> Vec<String> {
    wrap_by(|s| text_size(scale, font, s).0, max_width, text)
}

/// Greedy word-aware wrapping against an arbitrary width measure.
///
/// Words never split; a single word wider than `max_width` gets a line of
/// its own rather than overflowing a neighbour.
fn wrap_by<F: Fn(&str) -> u32>(measure: F, max_width: u32, text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if measure(&candidate) <= max_width || line.is_empty() {
            line = candidate;
        } else {
            lines.push(line);
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::generate_card_set;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn char_count(s: &str) -> u32 {
        s.chars().count() as u32
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap_by(char_count, 20, "short text"), vec!["short text"]);
    }

    #[test]
    fn wrap_never_exceeds_the_measure() {
        let lines = wrap_by(char_count, 10, "one two three four five six");
        assert!(!lines.is_empty());
        for line in &lines {
            assert!(char_count(line) <= 10, "line too wide: {line:?}");
        }
        assert_eq!(lines.join(" "), "one two three four five six");
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let lines = wrap_by(char_count, 5, "a incomprehensible b");
        assert_eq!(lines, vec!["a", "incomprehensible", "b"]);
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        assert!(wrap_by(char_count, 10, "").is_empty());
        assert!(wrap_by(char_count, 10, "   ").is_empty());
    }

    #[test]
    fn grid_is_a_six_by_five_array_of_uniform_cells() {
        let rects = grid_rects(300);
        assert_eq!(rects.len(), 30);
        let origin = pt_to_px(GRID_OFFSET_PT, 300);
        let cell = pt_to_px(CELL_PT, 300) as u32;
        assert_eq!(rects[0].left(), origin);
        assert_eq!(rects[0].top(), origin);
        for rect in &rects {
            assert_eq!(rect.width(), cell);
            assert_eq!(rect.height(), cell);
        }
        // Last rectangle sits at grid column 4, row 5.
        let last = rects.last().unwrap();
        assert_eq!(last.left(), origin + 4 * cell as i32);
        assert_eq!(last.top(), origin + 5 * cell as i32);
    }

    #[test]
    fn page_dimensions_track_dpi() {
        assert_eq!(pt_to_px(PAGE_WIDTH_PT, 72), 612);
        assert_eq!(pt_to_px(PAGE_HEIGHT_PT, 72), 792);
        assert_eq!(pt_to_px(PAGE_WIDTH_PT, 300), 2550);
        assert_eq!(pt_to_px(PAGE_HEIGHT_PT, 300), 3300);
    }

    // Needs the real font files; skips when they are not present (see
    // fonts/README.md).
    #[test]
    fn rendering_the_same_card_twice_is_identical() {
        let fonts = match FontSet::load(Path::new("fonts")) {
            Ok(fonts) => fonts,
            Err(_) => return,
        };
        let pool = ItemPool::default();
        let theme = Theme::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let cards = generate_card_set(&pool, 1, &mut rng).unwrap();
        let options = PageOptions { dpi: 72 };

        let first = render_card_page(&cards[0], &pool, &theme, &fonts, &options);
        let second = render_card_page(&cards[0], &pool, &theme, &fonts, &options);
        assert_eq!(first.dimensions(), (612, 792));
        assert_eq!(first.as_raw(), second.as_raw());
    }
}
