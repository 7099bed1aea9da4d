//! Scene camera.
//!
//! # Coordinate System
//!
//! Camera space is **right-handed**:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer, so the camera looks down -Z
//!
//! A point is in front of the camera exactly when its camera-space `z < 0`, and the
//! near plane is `z = -near`. Both projection kinds derive from this convention.
//!
//! # Placement
//!
//! The camera keeps its view matrix (world -> camera). Euler-style placement calls
//! such as [`Camera::view_translate`] move the camera within its own frame, the same
//! way a `Position` composes local transforms; the view matrix is updated with the
//! inverse of each step. [`Camera::look_at`] replaces the placement outright.

use crate::error::Result;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::projection::{ProjectionKind, ViewVolume, DEFAULT_FAR};

/// A camera: projection kind, view volume, and view matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    kind: ProjectionKind,
    volume: ViewVolume,
    view: Mat4,
}

impl Default for Camera {
    /// Perspective camera at the origin looking down -z, with a 90 degree
    /// field of view (`[-1, 1]^2` at `near = 1`).
    fn default() -> Self {
        Self::with_volume(ProjectionKind::Perspective, ViewVolume::default())
    }
}

impl Camera {
    pub fn with_volume(kind: ProjectionKind, volume: ViewVolume) -> Self {
        Self {
            kind,
            volume,
            view: Mat4::identity(),
        }
    }

    /// Perspective camera whose near rectangle is `[left, right] x [bottom, top]`.
    ///
    /// The far plane sits at [`DEFAULT_FAR`]; anything farther from the eye is
    /// clipped away. Use [`Camera::with_far`] to see farther.
    pub fn perspective(left: f32, right: f32, bottom: f32, top: f32, near: f32) -> Result<Self> {
        let volume = ViewVolume::new(left, right, bottom, top, near, DEFAULT_FAR)?;
        Ok(Self::with_volume(ProjectionKind::Perspective, volume))
    }

    /// Orthographic camera viewing the box `[left, right] x [bottom, top]`.
    ///
    /// The far plane sits at [`DEFAULT_FAR`]; anything farther from the eye is
    /// clipped away. Use [`Camera::with_far`] to see farther.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32) -> Result<Self> {
        let volume = ViewVolume::new(left, right, bottom, top, near, DEFAULT_FAR)?;
        Ok(Self::with_volume(ProjectionKind::Orthographic, volume))
    }

    /// Symmetric perspective camera from a vertical field of view in degrees.
    ///
    /// The far plane sits at [`DEFAULT_FAR`]; anything farther from the eye is
    /// clipped away. Use [`Camera::with_far`] to see farther.
    pub fn perspective_fov(fov_y_degrees: f32, aspect_ratio: f32, near: f32) -> Result<Self> {
        let volume = ViewVolume::from_degrees(fov_y_degrees, aspect_ratio, near, DEFAULT_FAR)?;
        Ok(Self::with_volume(ProjectionKind::Perspective, volume))
    }

    /// Orthographic camera sized to what a perspective camera with the same
    /// field of view sees at the near plane.
    ///
    /// The far plane sits at [`DEFAULT_FAR`]; anything farther from the eye is
    /// clipped away. Use [`Camera::with_far`] to see farther.
    pub fn orthographic_fov(fov_y_degrees: f32, aspect_ratio: f32, near: f32) -> Result<Self> {
        let volume = ViewVolume::from_degrees(fov_y_degrees, aspect_ratio, near, DEFAULT_FAR)?;
        Ok(Self::with_volume(ProjectionKind::Orthographic, volume))
    }

    // =========================================================================
    // Projection
    // =========================================================================

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    pub fn set_projection_kind(&mut self, kind: ProjectionKind) {
        self.kind = kind;
    }

    pub fn volume(&self) -> &ViewVolume {
        &self.volume
    }

    pub fn near(&self) -> f32 {
        self.volume.near()
    }

    pub fn far(&self) -> f32 {
        self.volume.far()
    }

    /// Moves the near plane, keeping the field of view of a perspective camera.
    pub fn set_near(&mut self, near: f32) -> Result<()> {
        self.volume = self.volume.with_near(near, self.kind)?;
        Ok(())
    }

    /// The camera with its far plane at `far`, which must exceed `near`.
    ///
    /// ```
    /// use wirepipe::Camera;
    ///
    /// let camera = Camera::perspective_fov(60.0, 1.5, 0.5)?.with_far(1.0e5)?;
    /// assert_eq!(camera.far(), 1.0e5);
    /// # Ok::<(), wirepipe::Error>(())
    /// ```
    pub fn with_far(mut self, far: f32) -> Result<Self> {
        self.set_far(far)?;
        Ok(self)
    }

    pub fn set_far(&mut self, far: f32) -> Result<()> {
        self.volume = self.volume.with_far(far)?;
        Ok(())
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Moves the camera by `(x, y, z)` in its own frame.
    pub fn view_translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.view = Mat4::translation(-x, -y, -z) * self.view;
        self
    }

    /// Turns the camera about its own X axis (positive looks up).
    pub fn view_rotate_x(&mut self, angle: f32) -> &mut Self {
        self.view = Mat4::rotation_x(-angle) * self.view;
        self
    }

    /// Turns the camera about its own Y axis (positive looks left).
    pub fn view_rotate_y(&mut self, angle: f32) -> &mut Self {
        self.view = Mat4::rotation_y(-angle) * self.view;
        self
    }

    /// Rolls the camera about its own Z axis (positive tilts left).
    pub fn view_rotate_z(&mut self, angle: f32) -> &mut Self {
        self.view = Mat4::rotation_z(-angle) * self.view;
        self
    }

    /// Turns the camera about an arbitrary axis of its own frame.
    pub fn view_rotate(&mut self, angle: f32, axis: Vec3) -> &mut Self {
        self.view = Mat4::rotation(-angle, axis) * self.view;
        self
    }

    /// Places the camera at `eye` looking toward `target`.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) -> &mut Self {
        self.view = Mat4::look_at(eye, target, up);
        self
    }

    /// Replaces the view matrix. It should be rigid (rotation + translation)
    /// for [`Camera::eye`] to be meaningful.
    pub fn set_view_matrix(&mut self, view: Mat4) -> &mut Self {
        self.view = view;
        self
    }

    /// Puts the camera back at the origin looking down -z.
    pub fn reset_view(&mut self) -> &mut Self {
        self.view = Mat4::identity();
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the camera's world position.
    ///
    /// For a rigid view `[R | t]` the eye sits at `-R^T t`.
    pub fn eye(&self) -> Vec3 {
        let v = &self.view;
        let t = Vec3::new(v.get(0, 3), v.get(1, 3), v.get(2, 3));
        let column = |c: usize| Vec3::new(v.get(0, c), v.get(1, c), v.get(2, c));
        -Vec3::new(column(0).dot(t), column(1).dot(t), column(2).dot(t))
    }

    /// Returns the camera's viewing direction in world space.
    pub fn forward(&self) -> Vec3 {
        let v = &self.view;
        // Third row of the view rotation is the camera's +z (backward) axis.
        -Vec3::new(v.get(2, 0), v.get(2, 1), v.get(2, 2)).normalize()
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// World (view) space to camera space.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Camera space to the canonical cube, before the divide by w.
    pub fn normalization_matrix(&self) -> Mat4 {
        self.volume.normalization_matrix(self.kind)
    }
}

// =============================================================================
// Tests
// =============================================================================
