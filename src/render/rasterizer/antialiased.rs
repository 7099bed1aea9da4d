//! Coverage-weighted line rasterizer.
//!
//! Walks the major axis one pixel center at a time. At each step the exact minor
//! coordinate falls between two pixel centers; the nearer pixel receives `1 - frac`
//! of the color and the farther one `frac`, each blended over what is already there.

use super::{ndc_to_screen, pixel_index, Line, LineRasterizer};
use crate::color::Color;
use crate::error::Result;
use crate::options::RenderOptions;
use crate::render::viewport::Viewport;

#[derive(Debug, Default, Clone, Copy)]
pub struct AntiAliasedRasterizer;

impl AntiAliasedRasterizer {
    pub fn new() -> Self {
        Self
    }
}

/// Splits a continuous minor-axis coordinate into `(index, frac)` between the two
/// nearest pixel centers. Coordinates within `[0, len]` stay inside the viewport;
/// the half pixel at either edge goes wholly to the edge pixel.
#[inline]
fn split_minor(v: f32, len: u32) -> (i32, f32) {
    if !(0.0..=len as f32).contains(&v) {
        return (pixel_index(v, len), 0.0);
    }
    let centered = v.clamp(0.5, len as f32 - 0.5) - 0.5;
    let index = centered.floor();
    (index as i32, centered - index)
}

impl LineRasterizer for AntiAliasedRasterizer {
    fn draw_line(&self, line: &Line, viewport: &mut Viewport, options: &RenderOptions) -> Result<usize> {
        let (w, h) = (viewport.width(), viewport.height());
        let s0 = ndc_to_screen(line.p0, w, h);
        let s1 = ndc_to_screen(line.p1, w, h);

        let x_major = (s1.x - s0.x).abs() >= (s1.y - s0.y).abs();
        // Work in (major, minor) space so both orientations share one loop.
        let (a0, b0, a1, b1, major_len, minor_len) = if x_major {
            (s0.x, s0.y, s1.x, s1.y, w, h)
        } else {
            (s0.y, s0.x, s1.y, s1.x, h, w)
        };
        let ((a0, b0, c0), (a1, b1, c1)) = if a0 <= a1 {
            ((a0, b0, line.c0), (a1, b1, line.c1))
        } else {
            ((a1, b1, line.c1), (a0, b0, line.c0))
        };

        let start = pixel_index(a0, major_len);
        let end = pixel_index(a1, major_len);
        let span = a1 - a0;

        let mut written = 0;
        for major in start..=end {
            let t = if span > 0.0 {
                ((major as f32 + 0.5 - a0) / span).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let color = options.output_color(c0.lerp(c1, t));
            let (minor, frac) = split_minor(b0 + (b1 - b0) * t, minor_len);

            written += self.plot(viewport, x_major, major, minor, color, 1.0 - frac)?;
            if minor + 1 < minor_len as i32 {
                written += self.plot(viewport, x_major, major, minor + 1, color, frac)?;
            }
        }
        Ok(written)
    }
}

impl AntiAliasedRasterizer {
    #[inline]
    fn plot(
        &self,
        viewport: &mut Viewport,
        x_major: bool,
        major: i32,
        minor: i32,
        color: Color,
        weight: f32,
    ) -> Result<usize> {
        if weight <= 0.0 {
            return Ok(0);
        }
        let (x, y) = if x_major { (major, minor) } else { (minor, major) };
        viewport.blend_pixel(x, y, color, weight)?;
        Ok(1)
    }
}
