//! Borrowed, bounds-checked drawing target.

use crate::color::Color;
use crate::error::{Error, Result};

use super::framebuffer::{FrameBuffer, Rect};

/// A rectangular window into a [`FrameBuffer`].
///
/// Coordinates are local: `(0, 0)` is the viewport's top-left pixel and writes are
/// translated into the parent's coordinates. This is a borrowed view, not an owning
/// type; it lives only as long as the drawing that needs it.
#[derive(Debug)]
pub struct Viewport<'a> {
    fb: &'a mut FrameBuffer,
    rect: Rect,
    background: Color,
}

impl<'a> Viewport<'a> {
    pub(crate) fn new(fb: &'a mut FrameBuffer, rect: Rect, background: Color) -> Self {
        Self {
            fb,
            rect,
            background,
        }
    }

    pub fn x(&self) -> u32 {
        self.rect.x
    }

    pub fn y(&self) -> u32 {
        self.rect.y
    }

    pub fn width(&self) -> u32 {
        self.rect.width
    }

    pub fn height(&self) -> u32 {
        self.rect.height
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Fills the viewport, and nothing outside it, with its background.
    pub fn clear(&mut self) {
        self.fb.fill_region(self.rect, self.background);
    }

    #[inline]
    fn check(&self, x: i32, y: i32) -> Result<(u32, u32)> {
        let (lx, ly) = (i64::from(x), i64::from(y));
        if !self.rect.contains_local(lx, ly) {
            return Err(Error::PixelOutOfBounds {
                x: lx,
                y: ly,
                width: self.rect.width,
                height: self.rect.height,
            });
        }
        // In range, so both are non-negative and fit the parent.
        Ok((self.rect.x + x as u32, self.rect.y + y as u32))
    }

    /// Writes one pixel in viewport coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<()> {
        let (px, py) = self.check(x, y)?;
        self.fb.set_pixel(px, py, color)
    }

    /// Blends `color` over the current pixel with coverage `weight` in `[0, 1]`.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, weight: f32) -> Result<()> {
        let (px, py) = self.check(x, y)?;
        let dst = self.fb.get_pixel(px, py).unwrap_or(self.background);
        self.fb.set_pixel(px, py, dst.lerp(color, weight.clamp(0.0, 1.0)))
    }

    /// Reads one pixel in viewport coordinates.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        let (px, py) = self.check(x, y).ok()?;
        self.fb.get_pixel(px, py)
    }

    /// Copies the viewport's pixels out into a new framebuffer whose background is
    /// this viewport's background.
    pub fn to_framebuffer(&self) -> FrameBuffer {
        self.fb.copy_region(self.rect, self.background)
    }

    /// Puts back pixels taken with [`Viewport::to_framebuffer`].
    pub(crate) fn restore(&mut self, snapshot: &FrameBuffer) {
        self.fb.paste_region(self.rect, snapshot);
    }
}
