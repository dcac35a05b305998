//! Built-in artwork, painted procedurally at the sizes of the classic sprite
//! sheet so the game plays identically with or without an asset folder.

use crate::font::{self, GLYPH_H};
use crate::sprite::{Rgb, Sprite};

pub const SKY_TOP: Rgb = Rgb(70, 180, 200);
pub const SKY_BOT: Rgb = Rgb(190, 232, 245);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PANEL: Rgb = Rgb(220, 195, 120);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);

pub const BACKGROUND_SIZE: (usize, usize) = (288, 512);
pub const BASE_SIZE: (usize, usize) = (336, 112);
pub const PIPE_SIZE: (usize, usize) = (52, 320);
pub const BIRD_SIZE: (usize, usize) = (34, 24);
pub const MESSAGE_SIZE: (usize, usize) = (184, 152);
pub const RESTART_SIZE: (usize, usize) = (128, 48);

/// Where the horizon sits in the background; the ground strip covers the rest.
const HORIZON: usize = 400;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wing {
    Up,
    Mid,
    Down,
}

pub fn background() -> Sprite {
    let (w, h) = BACKGROUND_SIZE;
    let mut s = Sprite::filled(w, h, DIRT);
    for y in 0..HORIZON {
        let t = (y * 256 / HORIZON) as u16;
        let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
        s.fill_rect(0, y as i32, w as i32, 1, c);
    }

    let base = HORIZON as i32;
    // Far hills
    for x in 0..w as i32 {
        let fx = x as f64 * 0.04;
        let hh = fx.sin() * 18.0 + (fx * 1.7).sin() * 9.0;
        let top = base - hh as i32 - 40;
        for y in top..base {
            s.set(x, y, HILL_FAR);
        }
    }
    // Near hills
    for x in 0..w as i32 {
        let fx = x as f64 * 0.06;
        let hh = fx.sin() * 12.0 + (fx * 2.3).sin() * 6.0;
        let top = base - hh as i32 - 20;
        for y in top..base {
            s.set(x, y, HILL_NEAR);
        }
    }
    s
}

/// Ground strip. Both stripe patterns repeat with a period dividing the
/// width, so two abutting copies tile without a seam.
pub fn base() -> Sprite {
    let (w, h) = BASE_SIZE;
    let mut s = Sprite::filled(w, h, DIRT);
    for x in 0..w as i32 {
        let alt = (x / 3) % 2 == 0;
        for y in 0..4 {
            s.set(x, y, if alt { GRASS } else { GRASS_LIGHT });
        }
        s.set(x, 4, GRASS);
        s.set(x, 5, CAP_DARK);
    }
    for y in 6..h as i32 {
        for x in 0..w as i32 {
            let stripe = (x + y * 2) % 12 < 6;
            s.set(x, y, if stripe { DIRT } else { DIRT_DARK });
        }
    }
    s
}

/// Lower pipe: cap at the top, body running down.
pub fn pipe_lower() -> Sprite {
    let (w, h) = PIPE_SIZE;
    let (w, h) = (w as i32, h as i32);
    let cap_h = 24;
    let inset = 2;
    let mut s = Sprite::new(w as usize, h as usize);

    let body_w = w - inset * 2;
    for x in 0..body_w {
        let c = pipe_shade(x, body_w);
        s.fill_rect(inset + x, cap_h, 1, h - cap_h, c);
    }
    for x in 0..w {
        let c = pipe_shade(x, w);
        s.fill_rect(x, 0, 1, cap_h, c);
        // Cap edge darkening
        s.set(x, 0, CAP_DARK);
        s.set(x, cap_h - 1, CAP_DARK);
    }
    s.fill_rect(0, 0, 1, cap_h, CAP_DARK);
    s.fill_rect(w - 1, 0, 1, cap_h, CAP_DARK);
    s
}

/// Upper pipe: the lower one hanging from the ceiling.
pub fn pipe_upper() -> Sprite {
    pipe_lower().flipped_vertical()
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

pub fn bird(wing: Wing) -> Sprite {
    let (w, h) = BIRD_SIZE;
    let mut s = Sprite::new(w, h);

    // Body core, corners trimmed
    s.fill_rect(6, 2, 20, 20, BIRD_Y);
    s.fill_rect(3, 5, 26, 14, BIRD_Y);
    // Highlight (top of body)
    s.fill_rect(8, 3, 14, 2, BIRD_HI);

    // Tail
    s.fill_rect(0, 9, 4, 5, BIRD_WING);

    // Wing
    let wing_y = match wing {
        Wing::Up => 5,
        Wing::Mid => 10,
        Wing::Down => 14,
    };
    s.fill_rect(4, wing_y, 12, 6, BIRD_WING);
    s.fill_rect(5, wing_y, 10, 1, BIRD_HI);

    // Eye
    s.fill_rect(20, 3, 8, 8, BIRD_EYE);
    s.fill_rect(24, 6, 2, 3, BIRD_PUPIL);

    // Beak
    s.fill_rect(23, 13, 11, 3, BIRD_BEAK_HI);
    s.fill_rect(23, 16, 10, 3, BIRD_BEAK);
    s
}

/// Framed panel in the style of the scoreboard.
fn panel(w: usize, h: usize) -> Sprite {
    let mut s = Sprite::filled(w, h, SHADOW);
    s.fill_rect(1, 1, w as i32 - 2, h as i32 - 2, DIRT);
    s.fill_rect(2, 2, w as i32 - 4, h as i32 - 4, PANEL);
    s
}

fn centered_text(s: &mut Sprite, y: i32, text: &str, scale: usize, fg: Rgb) {
    let x = (s.width() as i32 - font::text_width(text, scale) as i32) / 2;
    // Shadow pass
    font::draw_text(s, x + 1, y + 1, text, scale, SHADOW);
    font::draw_text(s, x, y, text, scale, fg);
}

/// Pre-game banner.
pub fn message() -> Sprite {
    let (w, h) = MESSAGE_SIZE;
    let mut s = panel(w, h);
    centered_text(&mut s, 12, "GET READY", 3, BIRD_Y);
    let icon = bird(Wing::Mid).rotated(20.0);
    let ix = (w as i32 - icon.width() as i32) / 2;
    s.overlay(&icon, ix, 12 + (GLYPH_H * 3) as i32 + 14);
    centered_text(&mut s, h as i32 - 34, "SPACE TO FLAP", 2, WHITE);
    s
}

/// Game-over banner.
pub fn restart() -> Sprite {
    let (w, h) = RESTART_SIZE;
    let mut s = panel(w, h);
    let y = (h - GLYPH_H * 3) as i32 / 2;
    centered_text(&mut s, y, "RESTART", 3, WHITE);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprites_have_classic_dimensions() {
        let check = |s: Sprite, (w, h): (usize, usize)| {
            assert_eq!((s.width(), s.height()), (w, h));
        };
        check(background(), BACKGROUND_SIZE);
        check(base(), BASE_SIZE);
        check(pipe_lower(), PIPE_SIZE);
        check(pipe_upper(), PIPE_SIZE);
        check(bird(Wing::Up), BIRD_SIZE);
        check(message(), MESSAGE_SIZE);
        check(restart(), RESTART_SIZE);
    }

    #[test]
    fn base_tiles_seamlessly() {
        let s = base();
        let w = s.width();
        for y in 0..s.height() {
            // the column after the last wraps around to column 0
            let pattern_next = {
                let x = w as i32;
                let y = y as i32;
                if y < 4 {
                    if (x / 3) % 2 == 0 { GRASS } else { GRASS_LIGHT }
                } else if y < 6 {
                    s.get(0, y as usize).unwrap()
                } else if (x + y * 2) % 12 < 6 {
                    DIRT
                } else {
                    DIRT_DARK
                }
            };
            assert_eq!(s.get(0, y), Some(pattern_next), "row {y}");
        }
    }

    #[test]
    fn upper_pipe_cap_faces_the_gap() {
        let lower = pipe_lower();
        let upper = pipe_upper();
        // cap is full width, body is inset
        assert!(lower.get(0, 5).is_some());
        assert!(lower.get(0, 200).is_none());
        assert!(upper.get(0, 314).is_some());
        assert!(upper.get(0, 100).is_none());
    }

    #[test]
    fn wing_frames_differ() {
        assert_ne!(bird(Wing::Up), bird(Wing::Mid));
        assert_ne!(bird(Wing::Mid), bird(Wing::Down));
    }
}
