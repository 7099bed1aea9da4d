//! Owned pixel storage.
//!
//! A [`FrameBuffer`] is the sole owner of a row-major, top-to-bottom RGBA8 buffer.
//! Drawing never touches it directly: the pipeline writes through a borrowed
//! [`Viewport`], which addresses a sub-rectangle of the buffer.

use crate::color::{Channel, Color};
use crate::error::{Error, Result};

use super::viewport::Viewport;

const BYTES_PER_PIXEL: usize = 4;

/// An axis-aligned pixel rectangle, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True if `(x, y)` lies inside the rectangle, in its own coordinates.
    #[inline]
    pub fn contains_local(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }
}

/// An RGBA framebuffer with a background color and a default viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    background: Color,
    pixels: Vec<u8>,
    default_viewport: Rect,
}

impl FrameBuffer {
    /// Black framebuffer. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_background(width, height, Color::BLACK)
    }

    /// Framebuffer cleared to `background`.
    pub fn with_background(width: u32, height: u32, background: Color) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let len = buffer_len(width, height, BYTES_PER_PIXEL)
            .ok_or(Error::InvalidDimensions { width, height })?;
        let mut fb = Self {
            width,
            height,
            background,
            pixels: vec![0; len],
            default_viewport: Rect::new(0, 0, width, height),
        };
        fb.clear();
        Ok(fb)
    }

    /// Wraps an existing RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if buffer_len(width, height, BYTES_PER_PIXEL) != Some(pixels.len()) {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            background: Color::BLACK,
            pixels,
            default_viewport: Rect::new(0, 0, width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Row-major, top-to-bottom RGBA8 bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Fills the whole buffer with the background color.
    pub fn clear(&mut self) {
        let rgba = self.background.to_rgba8();
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgba);
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Writes one pixel in framebuffer coordinates.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::PixelOutOfBounds {
                x: i64::from(x),
                y: i64::from(y),
                width: self.width,
                height: self.height,
            });
        }
        let i = self.offset(x, y);
        self.pixels[i..i + BYTES_PER_PIXEL].copy_from_slice(&color.to_rgba8());
        Ok(())
    }

    /// Reads one pixel in framebuffer coordinates.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        let mut rgba = [0u8; BYTES_PER_PIXEL];
        rgba.copy_from_slice(&self.pixels[i..i + BYTES_PER_PIXEL]);
        Some(Color::from_rgba8(rgba))
    }

    // ============ Viewports ============

    /// Rectangle used by [`FrameBuffer::viewport`].
    pub fn default_viewport_rect(&self) -> Rect {
        self.default_viewport
    }

    /// Moves or resizes the default viewport.
    pub fn set_default_viewport(&mut self, rect: Rect) -> Result<()> {
        self.check_rect(rect)?;
        self.default_viewport = rect;
        Ok(())
    }

    /// Borrow the default viewport.
    pub fn viewport(&mut self) -> Viewport<'_> {
        let rect = self.default_viewport;
        let background = self.background;
        Viewport::new(self, rect, background)
    }

    /// Borrow an arbitrary sub-rectangle.
    pub fn sub_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<Viewport<'_>> {
        let rect = Rect::new(x, y, width, height);
        self.check_rect(rect)?;
        let background = self.background;
        Ok(Viewport::new(self, rect, background))
    }

    fn check_rect(&self, rect: Rect) -> Result<()> {
        if rect.width == 0 || rect.height == 0 {
            return Err(Error::InvalidDimensions {
                width: rect.width,
                height: rect.height,
            });
        }
        let fits_x = rect.x.checked_add(rect.width).is_some_and(|r| r <= self.width);
        let fits_y = rect.y.checked_add(rect.height).is_some_and(|b| b <= self.height);
        if fits_x && fits_y {
            Ok(())
        } else {
            Err(Error::InvalidViewport {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                fb_width: self.width,
                fb_height: self.height,
            })
        }
    }

    // ============ Region copies ============

    /// Copies `rect` into a new framebuffer with the given background.
    pub(crate) fn copy_region(&self, rect: Rect, background: Color) -> FrameBuffer {
        let row_bytes = rect.width as usize * BYTES_PER_PIXEL;
        let mut pixels = Vec::with_capacity(row_bytes * rect.height as usize);
        for row in rect.y..rect.y + rect.height {
            let start = self.offset(rect.x, row);
            pixels.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        FrameBuffer {
            width: rect.width,
            height: rect.height,
            background,
            pixels,
            default_viewport: Rect::new(0, 0, rect.width, rect.height),
        }
    }

    /// Writes `src` back over the region at `(rect.x, rect.y)`.
    pub(crate) fn paste_region(&mut self, rect: Rect, src: &FrameBuffer) {
        debug_assert_eq!((src.width, src.height), (rect.width, rect.height));
        let row_bytes = rect.width as usize * BYTES_PER_PIXEL;
        for (i, row) in (rect.y..rect.y + rect.height).enumerate() {
            let dst = self.offset(rect.x, row);
            let from = i * row_bytes;
            self.pixels[dst..dst + row_bytes].copy_from_slice(&src.pixels[from..from + row_bytes]);
        }
    }

    /// Fills `rect` with one color.
    pub(crate) fn fill_region(&mut self, rect: Rect, color: Color) {
        let rgba = color.to_rgba8();
        let row_bytes = rect.width as usize * BYTES_PER_PIXEL;
        for row in rect.y..rect.y + rect.height {
            let start = self.offset(rect.x, row);
            for px in self.pixels[start..start + row_bytes].chunks_exact_mut(BYTES_PER_PIXEL) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    /// A copy keeping only one color channel of every pixel.
    pub fn channel(&self, channel: Channel) -> FrameBuffer {
        let mut out = self.clone();
        for px in out.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            let keep = match channel {
                Channel::Red => 0,
                Channel::Green => 1,
                Channel::Blue => 2,
            };
            for (i, c) in px.iter_mut().take(3).enumerate() {
                if i != keep {
                    *c = 0;
                }
            }
        }
        out.background = self.background.isolate(channel);
        out
    }
}

/// Byte length of a `width` x `height` image, or `None` if it does not fit `usize`.
pub(crate) fn buffer_len(width: u32, height: u32, bytes_per_pixel: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(bytes_per_pixel)
}
