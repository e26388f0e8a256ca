//! 5x7 bitmap captions built from solid quads.
//!
//! Only the glyphs the HUD prints are defined. Each row is five bits, bit 4 is
//! the leftmost column. Lowercase input is drawn uppercase; anything else
//! without a glyph advances like a space.

use lapvis_engine::coords::{Rect, Vec2};
use lapvis_engine::paint::Color;
use lapvis_engine::scene::{Layer, OverlayList};

const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;

/// Columns from one glyph origin to the next, including the gap.
const ADVANCE_COLS: u32 = GLYPH_COLS + 1;

type Glyph = [u8; GLYPH_ROWS as usize];

fn glyph(c: char) -> Option<Glyph> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '%' => [0b11001, 0b11010, 0b00010, 0b00100, 0b01000, 0b01011, 0b10011],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ' ' => [0; GLYPH_ROWS as usize],
        _ => return None,
    };
    Some(rows)
}

/// Lit cells of `rows` as rectangles, one per horizontal run.
fn glyph_rects(rows: Glyph, origin: Vec2, px: f32) -> impl Iterator<Item = Rect> {
    rows.into_iter().enumerate().flat_map(move |(row, bits)| {
        let y = origin.y + row as f32 * px;
        let mut runs = Vec::new();
        let mut col = 0;
        while col < GLYPH_COLS {
            let lit = |c: u32| bits & (1 << (GLYPH_COLS - 1 - c)) != 0;
            if !lit(col) {
                col += 1;
                continue;
            }
            let start = col;
            while col < GLYPH_COLS && lit(col) {
                col += 1;
            }
            let x = origin.x + start as f32 * px;
            runs.push(Rect::new(x, y, (col - start) as f32 * px, px));
        }
        runs
    })
}

/// Height of a line of text with cells of `px`.
pub fn text_height(px: f32) -> f32 {
    GLYPH_ROWS as f32 * px
}

/// Width of `text` with cells of `px`, without trailing gap.
pub fn text_width(text: &str, px: f32) -> f32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0.0;
    }
    (n * ADVANCE_COLS - 1) as f32 * px
}

/// Pushes `text` with its top-left at `origin`. Returns the rendered width.
pub fn push_text(
    list: &mut OverlayList,
    layer: Layer,
    origin: Vec2,
    px: f32,
    text: &str,
    color: Color,
) -> f32 {
    let step = ADVANCE_COLS as f32 * px;
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else { continue };
        let at = Vec2::new(origin.x + i as f32 * step, origin.y);
        for rect in glyph_rects(rows, at, px) {
            list.push(layer, rect, color);
        }
    }
    text_width(text, px)
}
