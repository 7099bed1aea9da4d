//! View-volume parameters.
//!
//! The [`ViewVolume`] struct is the single source of truth for the bounds of what a
//! camera sees: the `[left, right] x [bottom, top]` rectangle on the near plane
//! `z = -near`, plus a far distance. Together with a [`ProjectionKind`] it produces
//! the normalization matrix that maps the volume onto the canonical cube `[-1, 1]^3`.
//!
//! # Coordinate System
//!
//! Camera space is right-handed with the eye at the origin looking down **-z**.
//! "In front of the camera" always means `z < 0`.

use crate::error::{Error, Result};
use crate::math::mat4::Mat4;

/// Far distance used when a camera is built without one.
pub const DEFAULT_FAR: f32 = 1000.0;

/// How camera space is flattened onto the image plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionKind {
    /// Divide by distance; the volume is a frustum with its apex at the eye.
    #[default]
    Perspective,
    /// Parallel projection; the volume is a box.
    Orthographic,
}

impl std::fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionKind::Perspective => write!(f, "perspective"),
            ProjectionKind::Orthographic => write!(f, "orthographic"),
        }
    }
}

/// Bounds of the visible region in camera space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewVolume {
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
}

impl Default for ViewVolume {
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: 1.0,
            far: DEFAULT_FAR,
        }
    }
}

impl ViewVolume {
    /// Creates a view volume from its near-plane rectangle and depth range.
    ///
    /// # Arguments
    /// * `left`, `right`, `bottom`, `top` - Rectangle on the plane `z = -near`
    /// * `near` - Near distance (must be > 0)
    /// * `far` - Far distance (must be > near)
    pub fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Result<Self> {
        if [left, right, bottom, top, near, far].iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidCamera("view volume bounds must be finite".into()));
        }
        if left >= right {
            return Err(Error::InvalidCamera(format!("left {left} must be < right {right}")));
        }
        if bottom >= top {
            return Err(Error::InvalidCamera(format!("bottom {bottom} must be < top {top}")));
        }
        if near <= 0.0 {
            return Err(Error::InvalidCamera(format!("near {near} must be > 0")));
        }
        if far <= near {
            return Err(Error::InvalidCamera(format!("far {far} must be > near {near}")));
        }
        Ok(Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        })
    }

    /// Creates a symmetric view volume from a vertical field of view in radians.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians, in `(0, PI)`
    /// * `aspect_ratio` - Width divided by height
    pub fn from_fov(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Result<Self> {
        if !(fov_y > 0.0 && fov_y < std::f32::consts::PI) {
            return Err(Error::InvalidCamera(format!(
                "field of view {fov_y} rad must be in (0, PI)"
            )));
        }
        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            return Err(Error::InvalidCamera(format!(
                "aspect ratio {aspect_ratio} must be positive"
            )));
        }
        let top = near * (fov_y / 2.0).tan();
        let right = top * aspect_ratio;
        Self::new(-right, right, -top, top, near, far)
    }

    /// Creates a view volume from degrees instead of radians.
    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Result<Self> {
        Self::from_fov(fov_y_degrees.to_radians(), aspect_ratio, near, far)
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Returns the vertical field of view in radians, as seen from the eye.
    pub fn fov_y(&self) -> f32 {
        (self.top / self.near).atan() - (self.bottom / self.near).atan()
    }

    /// Returns the horizontal field of view in radians, as seen from the eye.
    pub fn fov_x(&self) -> f32 {
        (self.right / self.near).atan() - (self.left / self.near).atan()
    }

    /// Returns the aspect ratio (width / height) of the near rectangle.
    pub fn aspect_ratio(&self) -> f32 {
        (self.right - self.left) / (self.top - self.bottom)
    }

    /// Moves the near plane.
    ///
    /// For a perspective volume the near rectangle is rescaled by `near / old_near`
    /// so the field of view is unchanged. An orthographic volume keeps its bounds.
    pub fn with_near(&self, near: f32, kind: ProjectionKind) -> Result<Self> {
        let (l, r, b, t) = match kind {
            ProjectionKind::Perspective => {
                let s = near / self.near;
                (self.left * s, self.right * s, self.bottom * s, self.top * s)
            }
            ProjectionKind::Orthographic => (self.left, self.right, self.bottom, self.top),
        };
        Self::new(l, r, b, t, near, self.far)
    }

    /// Moves the far plane.
    pub fn with_far(&self, far: f32) -> Result<Self> {
        Self::new(self.left, self.right, self.bottom, self.top, self.near, far)
    }

    /// Matrix mapping this volume onto the canonical cube (after the divide by w).
    pub fn normalization_matrix(&self, kind: ProjectionKind) -> Mat4 {
        match kind {
            ProjectionKind::Perspective => Mat4::frustum(
                self.left,
                self.right,
                self.bottom,
                self.top,
                self.near,
                self.far,
            ),
            ProjectionKind::Orthographic => Mat4::orthographic(
                self.left,
                self.right,
                self.bottom,
                self.top,
                self.near,
                self.far,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn fov_x_matches_aspect_ratio() {
        // With aspect ratio 1:1, fov_x should equal fov_y
        let volume = ViewVolume::from_fov(FRAC_PI_2, 1.0, 0.1, 100.0).unwrap();
        assert_relative_eq!(volume.fov_x(), volume.fov_y(), epsilon = 1e-6);
        assert_relative_eq!(volume.fov_y(), FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn fov_x_wider_with_higher_aspect() {
        let volume = ViewVolume::from_degrees(45.0, 16.0 / 9.0, 0.1, 100.0).unwrap();
        assert!(volume.fov_x() > volume.fov_y());
        assert_relative_eq!(volume.aspect_ratio(), 16.0 / 9.0, epsilon = 1e-5);
    }

    #[test]
    fn with_near_preserves_perspective_fov() {
        let volume = ViewVolume::new(-2.0, 1.0, -1.0, 3.0, 1.0, 50.0).unwrap();
        let moved = volume.with_near(0.25, ProjectionKind::Perspective).unwrap();
        assert_relative_eq!(moved.fov_x(), volume.fov_x(), epsilon = 1e-6);
        assert_relative_eq!(moved.fov_y(), volume.fov_y(), epsilon = 1e-6);
        assert_relative_eq!(moved.left(), -0.5);
        assert_relative_eq!(moved.top(), 0.75);
    }

    #[test]
    fn with_near_keeps_orthographic_bounds() {
        let volume = ViewVolume::default();
        let moved = volume.with_near(3.0, ProjectionKind::Orthographic).unwrap();
        assert_eq!(moved.left(), -1.0);
        assert_eq!(moved.near(), 3.0);
    }

    #[test]
    fn rejects_degenerate_volumes() {
        assert!(ViewVolume::new(1.0, -1.0, -1.0, 1.0, 1.0, 10.0).is_err());
        assert!(ViewVolume::new(-1.0, 1.0, 1.0, 1.0, 1.0, 10.0).is_err());
        assert!(ViewVolume::new(-1.0, 1.0, -1.0, 1.0, 0.0, 10.0).is_err());
        assert!(ViewVolume::new(-1.0, 1.0, -1.0, 1.0, 2.0, 1.0).is_err());
        assert!(ViewVolume::from_degrees(180.0, 1.0, 1.0, 10.0).is_err());
        assert!(ViewVolume::from_degrees(60.0, 0.0, 1.0, 10.0).is_err());
    }
}
