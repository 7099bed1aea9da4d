//! Line and point rasterization.
//!
//! NDC coordinates are mapped onto the viewport with
//!
//! ```text
//! px = (x + 1) / 2 * width
//! py = (1 - y) / 2 * height      (row 0 = top)
//! ```
//!
//! and lines are drawn by one of two interchangeable algorithms:
//! - [`AliasedRasterizer`]: Bresenham, one fully covered pixel per step
//! - [`AntiAliasedRasterizer`]: major-axis stepping with coverage split over the two
//!   nearest minor-axis pixels
//!
//! Every write goes through the viewport's bounds-checked setters.

mod aliased;
mod antialiased;

pub use aliased::AliasedRasterizer;
pub use antialiased::AntiAliasedRasterizer;

use crate::color::Color;
use crate::error::Result;
use crate::math::vec2::Vec2;
use crate::options::RenderOptions;

use super::viewport::Viewport;

/// A line segment in NDC, ready for rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub p0: Vec2,
    pub p1: Vec2,
    pub c0: Color,
    pub c1: Color,
}

impl Line {
    pub fn new(p0: Vec2, p1: Vec2, c0: Color, c1: Color) -> Self {
        Self { p0, p1, c0, c1 }
    }
}

/// Continuous pixel coordinates of an NDC point.
#[inline]
pub fn ndc_to_screen(ndc: Vec2, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * width as f32,
        (1.0 - ndc.y) * 0.5 * height as f32,
    )
}

/// Pixel containing an NDC point.
///
/// The right and bottom edges of the canonical square land on the last column and
/// row. Points outside the square map outside the viewport, where the write fails.
#[inline]
pub fn ndc_to_pixel(ndc: Vec2, width: u32, height: u32) -> (i32, i32) {
    let s = ndc_to_screen(ndc, width, height);
    (pixel_index(s.x, width), pixel_index(s.y, height))
}

/// Index of the pixel containing screen coordinate `v` on an axis of `len` pixels.
///
/// Only the far edge `v == len` is folded onto the last pixel. Anything else outside
/// `[0, len)`, NaN included, becomes `-1` or `len`.
#[inline]
pub(crate) fn pixel_index(v: f32, len: u32) -> i32 {
    let last = i32::try_from(len).unwrap_or(i32::MAX);
    let extent = len as f32;
    if v == extent {
        return last - 1;
    }
    if v >= 0.0 && v < extent {
        v.floor() as i32
    } else if v >= extent {
        last
    } else {
        -1
    }
}

/// Writes a single point. Returns the number of pixels written.
pub fn draw_point(
    viewport: &mut Viewport,
    ndc: Vec2,
    color: Color,
    options: &RenderOptions,
) -> Result<usize> {
    let (x, y) = ndc_to_pixel(ndc, viewport.width(), viewport.height());
    viewport.set_pixel(x, y, options.output_color(color))?;
    Ok(1)
}

/// Trait for line rasterization algorithms.
///
/// Implementors define how a segment becomes pixels and return how many pixel writes
/// they made. A segment leaving the canonical square fails with
/// [`Error::PixelOutOfBounds`](crate::Error::PixelOutOfBounds).
pub trait LineRasterizer {
    fn draw_line(&self, line: &Line, viewport: &mut Viewport, options: &RenderOptions) -> Result<usize>;
}

/// Available line algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterizerType {
    /// One pixel per major-axis step.
    #[default]
    Aliased,
    /// Coverage-weighted pair of pixels per major-axis step.
    AntiAliased,
}

impl RasterizerType {
    pub fn from_options(options: &RenderOptions) -> Self {
        if options.anti_aliasing {
            Self::AntiAliased
        } else {
            Self::Aliased
        }
    }
}

impl std::fmt::Display for RasterizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterizerType::Aliased => write!(f, "Aliased"),
            RasterizerType::AntiAliased => write!(f, "AntiAliased"),
        }
    }
}

/// Holds both implementations and forwards to the active one.
#[derive(Debug, Default)]
pub struct RasterizerDispatcher {
    aliased: AliasedRasterizer,
    anti_aliased: AntiAliasedRasterizer,
    active: RasterizerType,
}

impl RasterizerDispatcher {
    pub fn new(rasterizer_type: RasterizerType) -> Self {
        Self {
            aliased: AliasedRasterizer::new(),
            anti_aliased: AntiAliasedRasterizer::new(),
            active: rasterizer_type,
        }
    }

    pub fn set_type(&mut self, rasterizer_type: RasterizerType) {
        self.active = rasterizer_type;
    }

    pub fn active_type(&self) -> RasterizerType {
        self.active
    }
}

impl LineRasterizer for RasterizerDispatcher {
    #[inline]
    fn draw_line(&self, line: &Line, viewport: &mut Viewport, options: &RenderOptions) -> Result<usize> {
        match self.active {
            RasterizerType::Aliased => self.aliased.draw_line(line, viewport, options),
            RasterizerType::AntiAliased => self.anti_aliased.draw_line(line, viewport, options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_edge_pixels() {
        for (w, h) in [(1, 1), (2, 3), (640, 480), (7, 1)] {
            assert_eq!(ndc_to_pixel(Vec2::new(-1.0, -1.0), w, h), (0, h as i32 - 1));
            assert_eq!(ndc_to_pixel(Vec2::new(1.0, 1.0), w, h), (w as i32 - 1, 0));
        }
    }

    #[test]
    fn outside_square_maps_outside_viewport() {
        assert_eq!(ndc_to_pixel(Vec2::new(3.0, -7.0), 8, 8), (8, 8));
        assert_eq!(ndc_to_pixel(Vec2::new(-1.5, 1.5), 8, 8), (-1, -1));
        assert_eq!(ndc_to_pixel(Vec2::new(f32::NAN, 0.0), 8, 8).0, -1);
        // Just past the right edge is not folded back.
        assert_eq!(pixel_index(8.25, 8), 8);
        assert_eq!(pixel_index(8.0, 8), 7);
    }

    #[test]
    fn point_outside_square_is_rejected() {
        let mut fb = crate::render::framebuffer::FrameBuffer::new(8, 8).unwrap();
        let before = fb.pixels().to_vec();
        let err = draw_point(
            &mut fb.viewport(),
            Vec2::new(3.0, -7.0),
            Color::RED,
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::PixelOutOfBounds { x: 8, y: 8, .. }));
        assert_eq!(fb.pixels(), before.as_slice());
    }

    #[test]
    fn center_maps_to_middle() {
        assert_eq!(ndc_to_pixel(Vec2::ZERO, 10, 10), (5, 5));
    }

    #[test]
    fn dispatcher_follows_options() {
        let options = RenderOptions::default().with_anti_aliasing(true);
        let mut dispatcher = RasterizerDispatcher::new(RasterizerType::from_options(&options));
        assert_eq!(dispatcher.active_type(), RasterizerType::AntiAliased);
        dispatcher.set_type(RasterizerType::Aliased);
        assert_eq!(dispatcher.active_type().to_string(), "Aliased");
    }
}
