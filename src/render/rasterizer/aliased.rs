//! Bresenham line rasterizer.
//!
//! Steps from one endpoint pixel to the other using an integer error term, writing
//! exactly one pixel per step. Color is interpolated by step count.

use super::{ndc_to_pixel, Line, LineRasterizer};
use crate::error::Result;
use crate::options::RenderOptions;
use crate::render::viewport::Viewport;

#[derive(Debug, Default, Clone, Copy)]
pub struct AliasedRasterizer;

impl AliasedRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl LineRasterizer for AliasedRasterizer {
    fn draw_line(&self, line: &Line, viewport: &mut Viewport, options: &RenderOptions) -> Result<usize> {
        let (w, h) = (viewport.width(), viewport.height());
        let (x0, y0) = ndc_to_pixel(line.p0, w, h);
        let (x1, y1) = ndc_to_pixel(line.p1, w, h);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        let steps = dx.max(dy);
        if steps == 0 {
            viewport.set_pixel(x0, y0, options.output_color(line.c0))?;
            return Ok(1);
        }

        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        // Positive error favors x movement, negative favors y.
        let mut err = dx - dy;

        let mut x = x0;
        let mut y = y0;
        let mut step = 0;

        loop {
            let t = step as f32 / steps as f32;
            let color = line.c0.lerp(line.c1, t);
            viewport.set_pixel(x, y, options.output_color(color))?;

            if x == x1 && y == y1 {
                break;
            }

            step += 1;

            let e2 = 2 * err;

            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }

            // Both branches may fire: a diagonal step.
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }

        Ok(step as usize + 1)
    }
}
