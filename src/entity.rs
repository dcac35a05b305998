use crate::geometry::Rect;
use crate::sprite::Sprite;

/// Anything the render pass can place on screen.
pub trait Renderable {
    fn sprite(&self) -> &Sprite;
    fn rect(&self) -> Rect;
}

/// A static picture: background and banners.
#[derive(Clone, Debug)]
pub struct Image {
    sprite: Sprite,
    rect: Rect,
}

impl Image {
    pub fn new(sprite: Sprite, left: i32, top: i32) -> Self {
        let rect = Rect::new(left, top, sprite.width() as i32, sprite.height() as i32);
        Image { sprite, rect }
    }
}

impl Renderable for Image {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn rect(&self) -> Rect {
        self.rect
    }
}
