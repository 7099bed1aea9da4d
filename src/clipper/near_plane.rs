//! Camera-space near-plane clipping.
//!
//! The eye looks down -z, so a vertex is in front of the near plane exactly when
//! `z < -near`. The test is strict: a vertex on the plane is rejected, and vertices
//! synthesized on the plane are nudged one ulp toward the scene so that they pass
//! the same test after rounding.

use super::{ClipVertex, ClippedSegment, Endpoint};
use crate::math::vec3::Vec3;

/// The plane `z = -near` in camera space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearPlane {
    near: f32,
}

impl NearPlane {
    /// `near` must be positive; cameras guarantee this.
    pub fn new(near: f32) -> Self {
        debug_assert!(near > 0.0);
        Self { near }
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    /// Positive in front of the plane, negative behind it.
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        -self.near - p.z
    }

    #[inline]
    pub fn in_front(&self, p: Vec3) -> bool {
        p.z < -self.near
    }

    /// Largest float strictly less than `-near`.
    #[inline]
    pub fn boundary_z(&self) -> f32 {
        // -near is negative: one more unit in the last place moves it away from zero.
        f32::from_bits((-self.near).to_bits() + 1)
    }

    /// Keeps the part of `a -> b` in front of the plane.
    ///
    /// Returns `None` when both endpoints are on or behind it.
    pub fn clip_segment(&self, a: &ClipVertex, b: &ClipVertex) -> Option<ClippedSegment> {
        let a_in = self.in_front(a.position);
        let b_in = self.in_front(b.position);

        match (a_in, b_in) {
            (true, true) => Some([Endpoint::Kept, Endpoint::Kept]),
            (false, false) => None,
            _ => {
                let z0 = a.position.z;
                let z1 = b.position.z;
                let t = (-self.near - z0) / (z1 - z0);
                let mut crossing = a.lerp(b, t);
                crossing.position.z = self.boundary_z();

                if a_in {
                    Some([Endpoint::Kept, Endpoint::Moved(crossing)])
                } else {
                    Some([Endpoint::Moved(crossing), Endpoint::Kept])
                }
            }
        }
    }
}
