use crate::geometry::Rect;
use crate::sprite::Sprite;

/// The ground: one image drawn twice, side by side, sliding left one pixel
/// per tick and wrapping after a full image width.
#[derive(Clone, Debug)]
pub struct ScrollingStrip {
    sprite: Sprite,
    first: Rect,
    second: Rect,
    /// Left edge of the second tile; counts down from the width to 1.
    offset: i32,
    stopped: bool,
}

impl ScrollingStrip {
    pub fn new(sprite: Sprite, left: i32, top: i32) -> Self {
        let w = sprite.width() as i32;
        let h = sprite.height() as i32;
        ScrollingStrip {
            sprite,
            first: Rect::new(left, top, w, h),
            second: Rect::new(left + w, top, w, h),
            offset: w,
            stopped: false,
        }
    }

    pub fn top(&self) -> i32 {
        self.first.top
    }

    pub fn width(&self) -> i32 {
        self.first.width
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }

    /// Both tiles, left to right.
    pub fn tiles(&self) -> [Rect; 2] {
        [self.first, self.second]
    }

    pub fn update(&mut self) {
        if self.stopped {
            return;
        }
        let w = self.width();
        self.first.left = self.offset - w;
        self.second.left = self.offset;
        self.offset -= 1;
        if self.offset == 0 {
            self.offset = w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strip() -> ScrollingStrip {
        ScrollingStrip::new(Sprite::new(336, 112), 0, 400)
    }

    #[test]
    fn starts_as_two_abutting_tiles() {
        let s = strip();
        let [a, b] = s.tiles();
        assert_eq!((a.left, b.left), (0, 336));
        assert_eq!(s.top(), 400);
    }

    #[test]
    fn wraps_after_a_full_width() {
        let mut s = strip();
        for _ in 0..336 {
            s.update();
        }
        // last drawn position before the wrap
        assert_eq!(s.tiles()[0].left, -335);
        s.update();
        assert_eq!(s.tiles()[0].left, 0);
    }

    #[test]
    fn stopped_strip_stays_put() {
        let mut s = strip();
        s.update();
        s.set_stopped(true);
        let before = s.tiles();
        s.update();
        assert_eq!(s.tiles(), before);
    }

    proptest! {
        #[test]
        fn tiles_stay_one_width_apart_and_cover_the_screen(ticks in 0usize..2000) {
            let mut s = strip();
            for _ in 0..ticks {
                s.update();
            }
            let [a, b] = s.tiles();
            prop_assert_eq!(b.left - a.left, 336);
            prop_assert!(a.left <= 0 && a.left > -336);
            prop_assert!(b.right() >= 288);
        }
    }
}
