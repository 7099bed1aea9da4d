//! A CPU wireframe 3D rendering pipeline.
//!
//! A [`Scene`] holds a camera and a forest of positioned models. [`render`] walks
//! it, pushes every visible model through model -> view -> camera space, clips at
//! the near plane, projects, clips to the canonical cube, and rasterizes lines and
//! points into a [`Viewport`] of a [`FrameBuffer`]. Overlap is resolved purely by
//! primitive order; there is no depth buffer.
//!
//! # Quick Start
//!
//! ```
//! use wirepipe::prelude::*;
//!
//! let mut model = Model::new("segment");
//! model.add_vertex((-1.0, 0.0, 0.0));
//! model.add_vertex((1.0, 0.0, 0.0));
//! model.add_primitive(Primitive::line(0, 1))?;
//! model.set_color(Color::GREEN);
//!
//! let mut scene = Scene::new(Camera::default());
//! let id = scene.add_model(model);
//! let root = scene.add_root(Position::with_model("segment", id))?;
//! scene.position_mut(root).unwrap().set_matrix(Mat4::translation(0.0, 0.0, -3.0));
//!
//! let mut fb = FrameBuffer::new(64, 64)?;
//! let stats = render(&scene, &mut fb.viewport(), &RenderOptions::default())?;
//! assert!(stats.pixels_written > 0);
//! # Ok::<(), wirepipe::Error>(())
//! ```

pub mod camera;
pub mod clipper;
pub mod color;
pub mod demo;
pub mod error;
pub mod math;
pub mod model;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod scene;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use color::{Channel, Color};
pub use error::{Error, Result};
pub use model::{Model, ModelId, Primitive, Vertex};
pub use options::RenderOptions;
pub use pipeline::{render, render_with_camera, RenderStats};
pub use projection::{ProjectionKind, ViewVolume};
pub use render::{FrameBuffer, Rect, Viewport};
pub use scene::{Position, PositionId, Scene};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use wirepipe::prelude::*;
/// ```
pub mod prelude {
    // Scene graph
    pub use crate::camera::Camera;
    pub use crate::model::{Model, ModelId, Primitive};
    pub use crate::scene::{Position, PositionId, Scene};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::color::Color;
    pub use crate::options::RenderOptions;
    pub use crate::pipeline::{render, render_with_camera, RenderStats};
    pub use crate::projection::ProjectionKind;
    pub use crate::render::{FrameBuffer, Viewport};

    pub use crate::error::{Error, Result};
}
