//! Clipping against the canonical cube in normalized device coordinates.
//!
//! The clip volume is:
//!
//! ```text
//! -1 <= x <= 1
//! -1 <= y <= 1
//! -1 <= z <= 1
//! ```
//!
//! Segments are clipped parametrically (Liang-Barsky): each face narrows the
//! `[t_enter, t_exit]` interval of the segment that lies inside it, and an empty
//! interval means nothing survives. Synthesized endpoints are clamped to the cube to
//! absorb rounding.

use super::{ClipVertex, ClippedSegment, Endpoint};
use crate::math::vec3::Vec3;

/// The 6 faces of the canonical cube.
///
/// The signed distance is positive when inside the clip volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// x >= -1
    Left,
    /// x <= 1
    Right,
    /// y >= -1
    Bottom,
    /// y <= 1
    Top,
    /// z >= -1
    Near,
    /// z <= 1
    Far,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        match self {
            Self::Left => 1.0 + p.x,
            Self::Right => 1.0 - p.x,
            Self::Bottom => 1.0 + p.y,
            Self::Top => 1.0 - p.y,
            Self::Near => 1.0 + p.z,
            Self::Far => 1.0 - p.z,
        }
    }
}

/// Clips segments and points against the canonical cube.
#[derive(Clone, Copy, Debug)]
pub struct ClipVolume {
    planes: [ClipPlane; 6],
}

impl Default for ClipVolume {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipVolume {
    pub fn new() -> Self {
        Self {
            planes: ClipPlane::ALL,
        }
    }

    /// True if `p` is inside the cube, boundary included.
    pub fn contains(&self, p: Vec3) -> bool {
        p.within(1.0)
    }

    /// Keeps the part of `a -> b` inside the cube.
    ///
    /// Returns `None` when nothing survives, including for non-finite input.
    pub fn clip_segment(&self, a: &ClipVertex, b: &ClipVertex) -> Option<ClippedSegment> {
        if !is_finite(a.position) || !is_finite(b.position) {
            return None;
        }

        let mut t_enter = 0.0f32;
        let mut t_exit = 1.0f32;

        for plane in &self.planes {
            let d0 = plane.signed_distance(a.position);
            let d1 = plane.signed_distance(b.position);

            if d0 < 0.0 && d1 < 0.0 {
                return None;
            }
            if d0 < 0.0 {
                // Entering through this face.
                t_enter = t_enter.max(d0 / (d0 - d1));
            } else if d1 < 0.0 {
                // Leaving through this face.
                t_exit = t_exit.min(d0 / (d0 - d1));
            }
            if t_enter > t_exit {
                return None;
            }
        }

        let start = if t_enter > 0.0 {
            Endpoint::Moved(clamp_to_cube(a.lerp(b, t_enter)))
        } else {
            Endpoint::Kept
        };
        let end = if t_exit < 1.0 {
            Endpoint::Moved(clamp_to_cube(a.lerp(b, t_exit)))
        } else {
            Endpoint::Kept
        };
        Some([start, end])
    }
}

fn is_finite(p: Vec3) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
}

fn clamp_to_cube(mut v: ClipVertex) -> ClipVertex {
    v.position = Vec3::new(
        v.position.x.clamp(-1.0, 1.0),
        v.position.y.clamp(-1.0, 1.0),
        v.position.z.clamp(-1.0, 1.0),
    );
    v
}
