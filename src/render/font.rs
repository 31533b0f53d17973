//! 3x5 bitmap glyphs for the HUD

use super::pixels::{PixelBuf, Rgb};

const SHADOW: Rgb = Rgb(30, 30, 30);

/// One row per entry, 3 bits wide, MSB on the left.
#[rustfmt::skip]
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b011, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

#[rustfmt::skip]
fn letter(ch: char) -> Option<[u8; 5]> {
    let rows = match ch {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        _ => return None,
    };
    Some(rows)
}

fn glyph(ch: char) -> Option<[u8; 5]> {
    match ch.to_digit(10) {
        Some(d) => Some(DIGITS[d as usize]),
        None => letter(ch.to_ascii_uppercase()),
    }
}

/// Width in pixels of `text` at `zoom`: 3px per glyph + 1px spacing.
pub fn text_width(text: &str, zoom: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { (n * 4 - 1) * zoom }
}

pub fn text_height(zoom: i32) -> i32 {
    5 * zoom
}

/// Draw `text` with a drop shadow. Unknown characters render as blanks.
pub fn draw_text(buf: &mut PixelBuf, x: i32, y: i32, text: &str, zoom: i32, fg: Rgb) {
    for pass in [SHADOW, fg] {
        let offset = if pass == fg { 0 } else { zoom.max(1) };
        for (i, ch) in text.chars().enumerate() {
            let Some(rows) = glyph(ch) else {
                continue;
            };
            let gx = x + i as i32 * 4 * zoom + offset;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..3 {
                    if bits & (0b100u8 >> col) != 0 {
                        buf.fill_rect(
                            gx + col * zoom,
                            y + row as i32 * zoom + offset,
                            zoom,
                            zoom,
                            pass,
                        );
                    }
                }
            }
        }
    }
}

pub fn draw_text_centered(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, zoom: i32, fg: Rgb) {
    draw_text(buf, cx - text_width(text, zoom) / 2, y, text, zoom, fg);
}
