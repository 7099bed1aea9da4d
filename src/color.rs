//! RGBA colors with floating-point channels.

/// An RGBA color, each channel nominally in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);
    pub const DARK_GRAY: Self = Self::rgb(0.12, 0.12, 0.12);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Quantizes to 8 bits per channel, clamping out-of-range values.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Linearly interpolate all four channels, `t = 0` yields `self`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Power-law correction of the color channels: `c^exponent`. Alpha is untouched.
    pub fn gamma(self, exponent: f32) -> Self {
        let g = |c: f32| c.clamp(0.0, 1.0).powf(exponent);
        Self::new(g(self.r), g(self.g), g(self.b), self.a)
    }

    /// Keep one channel, zeroing the other two. Alpha is kept.
    pub fn isolate(self, channel: Channel) -> Self {
        match channel {
            Channel::Red => Self::new(self.r, 0.0, 0.0, self.a),
            Channel::Green => Self::new(0.0, self.g, 0.0, self.a),
            Channel::Blue => Self::new(0.0, 0.0, self.b, self.a),
        }
    }
}

/// A single color channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rgba8_round_trip_is_exact() {
        for bytes in [[0, 0, 0, 255], [255, 128, 7, 255], [12, 34, 56, 78]] {
            assert_eq!(Color::from_rgba8(bytes).to_rgba8(), bytes);
        }
    }

    #[test]
    fn to_rgba8_clamps() {
        assert_eq!(Color::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn lerp_midpoint() {
        let c = Color::RED.lerp(Color::BLUE, 0.5);
        assert_relative_eq!(c.r, 0.5);
        assert_relative_eq!(c.g, 0.0);
        assert_relative_eq!(c.b, 0.5);
    }

    #[test]
    fn gamma_brightens_midtones_and_keeps_extremes() {
        let c = Color::rgb(0.0, 0.5, 1.0).gamma(1.0 / 2.2);
        assert_relative_eq!(c.r, 0.0);
        assert!(c.g > 0.7 && c.g < 0.74);
        assert_relative_eq!(c.b, 1.0);
    }
}
