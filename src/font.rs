use crate::geometry::Rect;
use crate::sprite::{Rgb, Sprite};

// ── 3x5 bitmap glyphs ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
const LETTERS: [[u8; 15]; 26] = [
    [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // A
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0], // B
    [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1], // C
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0], // D
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1], // E
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,0,0], // F
    [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1], // G
    [1,0,1, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // H
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 1,1,1], // I
    [0,0,1, 0,0,1, 0,0,1, 1,0,1, 0,1,0], // J
    [1,0,1, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // K
    [1,0,0, 1,0,0, 1,0,0, 1,0,0, 1,1,1], // L
    [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1], // M
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,0,1], // N
    [0,1,0, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // O
    [1,1,0, 1,0,1, 1,1,0, 1,0,0, 1,0,0], // P
    [0,1,0, 1,0,1, 1,0,1, 1,1,0, 0,1,1], // Q
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // R
    [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0], // S
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0], // T
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // U
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // V
    [1,0,1, 1,0,1, 1,1,1, 1,1,1, 1,0,1], // W
    [1,0,1, 1,0,1, 0,1,0, 1,0,1, 1,0,1], // X
    [1,0,1, 1,0,1, 0,1,0, 0,1,0, 0,1,0], // Y
    [1,1,1, 0,0,1, 0,1,0, 1,0,0, 1,1,1], // Z
];

#[rustfmt::skip]
const COLON: [u8; 15] = [0,0,0, 0,1,0, 0,0,0, 0,1,0, 0,0,0];

pub const GLYPH_W: usize = 3;
pub const GLYPH_H: usize = 5;

/// Glyph bitmap for `ch`; characters without a glyph render blank.
fn glyph(ch: char) -> Option<&'static [u8; 15]> {
    match ch {
        '0'..='9' => Some(&DIGITS[ch as usize - '0' as usize]),
        'A'..='Z' => Some(&LETTERS[ch as usize - 'A' as usize]),
        'a'..='z' => Some(&LETTERS[ch as usize - 'a' as usize]),
        ':' => Some(&COLON),
        _ => None,
    }
}

/// Width in pixels of `text` at `scale`: 3px per glyph plus 1px spacing.
pub fn text_width(text: &str, scale: usize) -> usize {
    let n = text.chars().count();
    if n == 0 {
        return 0;
    }
    (n * (GLYPH_W + 1) - 1) * scale
}

/// Paints `text` into `dst` with its top-left corner at (x, y).
pub fn draw_text(dst: &mut Sprite, x: i32, y: i32, text: &str, scale: usize, fg: Rgb) {
    let s = scale as i32;
    for (i, ch) in text.chars().enumerate() {
        let Some(g) = glyph(ch) else { continue };
        let gx = x + i as i32 * (GLYPH_W as i32 + 1) * s;
        for row in 0..GLYPH_H {
            for col in 0..GLYPH_W {
                if g[row * GLYPH_W + col] == 1 {
                    dst.fill_rect(gx + col as i32 * s, y + row as i32 * s, s, s, fg);
                }
            }
        }
    }
}

// ── Text boxes ──────────────────────────────────────────────────────────────

/// A line of text drawn over a solid background at a fixed screen position.
#[derive(Clone, Debug)]
pub struct TextBox {
    pub x: i32,
    pub y: i32,
    pub scale: usize,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl TextBox {
    const PAD: usize = 2;

    pub fn new(x: i32, y: i32, scale: usize, fg: Rgb, bg: Rgb) -> Self {
        TextBox {
            x,
            y,
            scale,
            fg,
            bg,
        }
    }

    /// Renders `text` into a sprite and the screen box it belongs in.
    pub fn render(&self, text: &str) -> (Sprite, Rect) {
        let w = text_width(text, self.scale) + Self::PAD * 2;
        let h = GLYPH_H * self.scale + Self::PAD * 2;
        let mut s = Sprite::filled(w, h, self.bg);
        draw_text(
            &mut s,
            Self::PAD as i32,
            Self::PAD as i32,
            text,
            self.scale,
            self.fg,
        );
        (s, Rect::new(self.x, self.y, w as i32, h as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb(0, 0, 0);
    const SAND: Rgb = Rgb(222, 216, 149);

    #[test]
    fn width_accounts_for_spacing() {
        assert_eq!(text_width("", 4), 0);
        assert_eq!(text_width("1", 1), 3);
        assert_eq!(text_width("10", 2), 14);
    }

    #[test]
    fn text_box_places_glyphs_on_background() {
        let tb = TextBox::new(80, 430, 2, BLACK, SAND);
        let (s, r) = tb.render("1");
        assert_eq!(r, Rect::new(80, 430, 10, 14));
        // padding keeps the background colour
        assert_eq!(s.get(0, 0), Some(SAND));
        // top row of "1" is only the middle column
        assert_eq!(s.get(2, 2), Some(SAND));
        assert_eq!(s.get(4, 2), Some(BLACK));
    }

    #[test]
    fn unknown_characters_are_blank() {
        let mut s = Sprite::new(8, 8);
        draw_text(&mut s, 0, 0, "?", 1, BLACK);
        assert_eq!(s, Sprite::new(8, 8));
    }
}
