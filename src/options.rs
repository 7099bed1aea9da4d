//! Per-render configuration.

use crate::color::Color;

/// Exponent applied to channel values when gamma correction is on.
pub const DEFAULT_GAMMA: f32 = 1.0 / 2.2;

/// Deepest position/model nesting the traversal follows.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options threaded through every pipeline stage.
///
/// ```
/// use wirepipe::RenderOptions;
///
/// let options = RenderOptions::default().with_anti_aliasing(true).with_debug(true);
/// assert!(options.anti_aliasing);
/// assert!(options.near_clipping);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Blend lines over two pixels along the minor axis by fractional coverage.
    pub anti_aliasing: bool,
    /// Apply `gamma` to channel values before they are written.
    pub gamma_correction: bool,
    /// Split segments at the near plane. When off, primitives touching the region
    /// behind it are dropped whole.
    pub near_clipping: bool,
    /// Log per-model stage counts at debug level.
    pub debug: bool,
    /// Gamma exponent, `1/2.2` by default.
    pub gamma: f32,
    /// Nesting limit for positions plus nested models.
    pub max_depth: usize,
    /// Color given to every vertex of a model that has none.
    pub default_color: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            anti_aliasing: false,
            gamma_correction: false,
            near_clipping: true,
            debug: false,
            gamma: DEFAULT_GAMMA,
            max_depth: DEFAULT_MAX_DEPTH,
            default_color: Color::WHITE,
        }
    }
}

impl RenderOptions {
    pub fn with_anti_aliasing(mut self, on: bool) -> Self {
        self.anti_aliasing = on;
        self
    }

    pub fn with_gamma_correction(mut self, on: bool) -> Self {
        self.gamma_correction = on;
        self
    }

    pub fn with_near_clipping(mut self, on: bool) -> Self {
        self.near_clipping = on;
        self
    }

    pub fn with_debug(mut self, on: bool) -> Self {
        self.debug = on;
        self
    }

    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    /// The color actually written for `color` under these options.
    #[inline]
    pub fn output_color(&self, color: Color) -> Color {
        if self.gamma_correction {
            color.gamma(self.gamma)
        } else {
            color
        }
    }
}
