use std::sync::Arc;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }
}

// ── Sprites ─────────────────────────────────────────────────────────────────

/// A drawable image. Pixels are shared, so clones are cheap; painting goes
/// through copy-on-write.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    w: usize,
    h: usize,
    px: Arc<Vec<Option<Rgb>>>, // None = transparent
}

impl Sprite {
    /// Fully transparent sprite.
    pub fn new(w: usize, h: usize) -> Self {
        Sprite {
            w,
            h,
            px: Arc::new(vec![None; w * h]),
        }
    }

    pub fn filled(w: usize, h: usize, c: Rgb) -> Self {
        Sprite {
            w,
            h,
            px: Arc::new(vec![Some(c); w * h]),
        }
    }

    pub fn from_pixels(w: usize, h: usize, px: Vec<Option<Rgb>>) -> Self {
        assert_eq!(px.len(), w * h, "pixel count does not match {w}x{h}");
        Sprite {
            w,
            h,
            px: Arc::new(px),
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.px[y * self.w + x]
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            let w = self.w;
            Arc::make_mut(&mut self.px)[y as usize * w + x as usize] = Some(c);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Paints the opaque pixels of `src` with its top-left corner at (x, y).
    pub fn overlay(&mut self, src: &Sprite, x: i32, y: i32) {
        for sy in 0..src.h {
            for sx in 0..src.w {
                if let Some(c) = src.get(sx, sy) {
                    self.set(x + sx as i32, y + sy as i32, c);
                }
            }
        }
    }

    /// Mirror top to bottom.
    pub fn flipped_vertical(&self) -> Sprite {
        let mut px = Vec::with_capacity(self.w * self.h);
        for y in (0..self.h).rev() {
            px.extend_from_slice(&self.px[y * self.w..(y + 1) * self.w]);
        }
        Sprite::from_pixels(self.w, self.h, px)
    }

    /// Counter-clockwise rotation by `degrees`. The result grows to the
    /// bounding box of the rotated image; uncovered corners are transparent.
    pub fn rotated(&self, degrees: f32) -> Sprite {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        let (w, h) = (self.w as f32, self.h as f32);
        let nw = (w * cos.abs() + h * sin.abs()).round().max(1.0) as usize;
        let nh = (w * sin.abs() + h * cos.abs()).round().max(1.0) as usize;

        let mut px = vec![None; nw * nh];
        for dy in 0..nh {
            for dx in 0..nw {
                // Centre-relative destination, mapped back into the source.
                let x = dx as f32 + 0.5 - nw as f32 / 2.0;
                let y = dy as f32 + 0.5 - nh as f32 / 2.0;
                let sx = (x * cos - y * sin + w / 2.0).floor();
                let sy = (x * sin + y * cos + h / 2.0).floor();
                if sx >= 0.0 && sy >= 0.0 && (sx as usize) < self.w && (sy as usize) < self.h {
                    px[dy * nw + dx] = self.get(sx as usize, sy as usize);
                }
            }
        }
        Sprite::from_pixels(nw, nh, px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb(255, 0, 0);

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let s = Sprite::filled(34, 24, RED);
        let r = s.rotated(-90.0);
        assert_eq!((r.width(), r.height()), (24, 34));
        assert_eq!(s.rotated(0.0), s);
    }

    #[test]
    fn counter_clockwise_moves_right_edge_to_top() {
        // A sprite that is only opaque in its rightmost column.
        let mut s = Sprite::new(4, 2);
        s.set(3, 0, RED);
        s.set(3, 1, RED);
        let r = s.rotated(90.0);
        assert_eq!((r.width(), r.height()), (2, 4));
        assert_eq!(r.get(0, 0), Some(RED));
        assert_eq!(r.get(1, 0), Some(RED));
        assert_eq!(r.get(0, 3), None);
    }

    #[test]
    fn diagonal_rotation_grows_bounds() {
        let s = Sprite::filled(34, 24, RED);
        let r = s.rotated(45.0);
        assert_eq!((r.width(), r.height()), (41, 41));
        // corners of the bounding box are not covered by the image
        assert_eq!(r.get(0, 0), None);
        assert_eq!(r.get(20, 20), Some(RED));
    }

    #[test]
    fn painting_does_not_leak_into_clones() {
        let a = Sprite::new(2, 2);
        let mut b = a.clone();
        b.set(0, 0, RED);
        assert_eq!(a.get(0, 0), None);
        assert_eq!(b.get(0, 0), Some(RED));
    }

    #[test]
    fn overlay_skips_transparent_pixels() {
        let mut base = Sprite::filled(3, 1, Rgb(0, 0, 0));
        let mut top = Sprite::new(2, 1);
        top.set(1, 0, RED);
        base.overlay(&top, 1, 0);
        assert_eq!(base.get(1, 0), Some(Rgb(0, 0, 0)));
        assert_eq!(base.get(2, 0), Some(RED));
    }

    #[test]
    fn vertical_flip() {
        let mut s = Sprite::new(1, 3);
        s.set(0, 0, RED);
        let f = s.flipped_vertical();
        assert_eq!(f.get(0, 2), Some(RED));
        assert_eq!(f.get(0, 0), None);
    }
}
