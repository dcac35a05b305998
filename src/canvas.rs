use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{self, Color as CColor},
    terminal,
};
use std::io::{self, Stdout, Write, stdout};
use tracing::debug;

use crate::entity::Renderable;
use crate::geometry::Rect;
use crate::sprite::{Rgb, Sprite};

/// Composes a frame out of blits and shows it on `present`.
pub trait Canvas {
    fn blit(&mut self, sprite: &Sprite, rect: Rect);
    fn present(&mut self) -> io::Result<()>;

    fn draw(&mut self, item: &dyn Renderable) {
        self.blit(item.sprite(), item.rect());
    }
}

const LETTERBOX: Rgb = Rgb(0, 0, 0);

// ── Pixel buffer with half-block rendering ──────────────────────────────────

#[derive(Clone, Debug)]
pub struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![LETTERBOX; w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Copies the opaque pixels of `sprite` with its top-left at the rect's
    /// corner. Anything off the buffer is clipped.
    pub fn blit(&mut self, sprite: &Sprite, rect: Rect) {
        for sy in 0..sprite.height() {
            let y = rect.top + sy as i32;
            if y < 0 || y as usize >= self.h {
                continue;
            }
            for sx in 0..sprite.width() {
                if let Some(c) = sprite.get(sx, sy) {
                    self.set(rect.left + sx as i32, y, c);
                }
            }
        }
    }

    /// Average colour of the source area [x0, x1) × [y0, y1), at least one
    /// pixel wide and tall.
    fn area(&self, x0: f32, x1: f32, y0: f32, y1: f32) -> Rgb {
        let xs = (x0 as usize).min(self.w - 1);
        let xe = (x1.ceil() as usize).clamp(xs + 1, self.w);
        let ys = (y0 as usize).min(self.h - 1);
        let ye = (y1.ceil() as usize).clamp(ys + 1, self.h);
        let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
        for y in ys..ye {
            for x in xs..xe {
                let c = self.get(x, y);
                r += c.0 as u32;
                g += c.1 as u32;
                b += c.2 as u32;
            }
        }
        let n = ((xe - xs) * (ye - ys)) as u32;
        Rgb((r / n) as u8, (g / n) as u8, (b / n) as u8)
    }

    /// Scales this buffer to fit a `tw`×`th` area, keeping its aspect ratio
    /// and centring it on a black border.
    pub fn letterboxed(&self, tw: usize, th: usize) -> PixelBuf {
        let mut view = PixelBuf::new(tw, th);
        if self.w == 0 || self.h == 0 || tw == 0 || th == 0 {
            return view;
        }
        let scale = (tw as f32 / self.w as f32).min(th as f32 / self.h as f32);
        let sw = ((self.w as f32 * scale) as usize).clamp(1, tw);
        let sh = ((self.h as f32 * scale) as usize).clamp(1, th);
        let ox = (tw - sw) / 2;
        let oy = (th - sh) / 2;
        for y in 0..sh {
            let y0 = y as f32 / scale;
            let y1 = (y + 1) as f32 / scale;
            for x in 0..sw {
                let x0 = x as f32 / scale;
                let x1 = (x + 1) as f32 / scale;
                let c = self.area(x0, x1, y0, y1);
                view.set((ox + x) as i32, (oy + y) as i32, c);
            }
        }
        view
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(term_color(top)))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(term_color(top)))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(term_color(bot)))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row < rows - 1 {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

fn term_color(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Terminal presenter ──────────────────────────────────────────────────────

/// Draws into a logical pixel buffer and shows it on the terminal, scaled to
/// whatever size the terminal currently has. Owns raw mode and the
/// alternate screen for as long as it lives.
pub struct TerminalCanvas {
    frame: PixelBuf,
    out: Stdout,
    last_size: (u16, u16),
    active: bool,
}

impl TerminalCanvas {
    pub fn new(width: usize, height: usize) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )?;
        Ok(TerminalCanvas {
            frame: PixelBuf::new(width, height),
            out,
            last_size: (0, 0),
            active: true,
        })
    }

    /// Gives the terminal back. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    }
}

impl Canvas for TerminalCanvas {
    fn blit(&mut self, sprite: &Sprite, rect: Rect) {
        self.frame.blit(sprite, rect);
    }

    fn present(&mut self) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        if (cols, rows) != self.last_size {
            debug!("terminal is {cols}x{rows}");
            queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
            self.last_size = (cols, rows);
        }
        let view = self
            .frame
            .letterboxed(cols as usize, rows as usize * 2);
        view.render(&mut self.out)
    }
}

impl Drop for TerminalCanvas {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb(200, 0, 0);

    #[test]
    fn blit_clips_and_respects_transparency() {
        let mut buf = PixelBuf::new(4, 4);
        let mut s = Sprite::new(3, 3);
        s.set(0, 0, RED);
        s.set(2, 2, RED);
        buf.blit(&s, Rect::new(-2, -2, 3, 3));
        assert_eq!(buf.get(0, 0), RED);
        assert_eq!(buf.get(1, 1), LETTERBOX);
        buf.blit(&s, Rect::new(3, 3, 3, 3));
        assert_eq!(buf.get(3, 3), RED);
    }

    #[test]
    fn letterbox_averages_and_centres() {
        let mut buf = PixelBuf::new(4, 8);
        for y in 0..8 {
            for x in 0..4 {
                buf.set(x, y, if x < 2 { RED } else { Rgb(0, 0, 200) });
            }
        }
        // half size, centred horizontally in a 6-wide view
        let view = buf.letterboxed(6, 4);
        assert_eq!(view.get(0, 0), LETTERBOX);
        assert_eq!(view.get(2, 0), RED);
        assert_eq!(view.get(3, 0), Rgb(0, 0, 200));
        assert_eq!(view.get(5, 3), LETTERBOX);
    }

    #[test]
    fn render_emits_half_blocks() {
        let mut buf = PixelBuf::new(2, 2);
        buf.set(0, 0, RED);
        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('\u{2580}'));
    }
}
