//! Line-segment clipping.
//!
//! Two clippers run at different points of the pipeline:
//!
//! - [`near_plane`]: camera space, before projection. Keeps only the part of a
//!   segment strictly in front of `z = -near`, so the divide by `-z` is always safe.
//! - [`clip_volume`]: NDC, after projection. Parametric (Liang-Barsky) clipping
//!   against the six faces of the canonical cube `[-1, 1]^3`.
//!
//! Both report each endpoint as either kept or moved, so callers can reuse the
//! original vertex and only allocate for synthesized ones.

pub mod clip_volume;
pub mod near_plane;

pub use clip_volume::{ClipPlane, ClipVolume};
pub use near_plane::NearPlane;

use crate::color::Color;
use crate::math::vec3::Vec3;

/// A vertex with the attributes interpolated during clipping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipVertex {
    pub position: Vec3,
    pub color: Color,
}

impl ClipVertex {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }

    /// Linearly interpolate position and color; `t = 0` yields `self`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            color: self.color.lerp(other.color, t),
        }
    }
}

/// What clipping did to one endpoint of a segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Endpoint {
    /// The original vertex survives unchanged.
    Kept,
    /// The endpoint was replaced by a synthesized vertex on a clip boundary.
    Moved(ClipVertex),
}

impl Endpoint {
    pub fn is_kept(&self) -> bool {
        matches!(self, Endpoint::Kept)
    }

    /// The surviving vertex, given the original.
    pub fn resolve(self, original: ClipVertex) -> ClipVertex {
        match self {
            Endpoint::Kept => original,
            Endpoint::Moved(v) => v,
        }
    }
}

/// The surviving part of a segment.
pub type ClippedSegment = [Endpoint; 2];
