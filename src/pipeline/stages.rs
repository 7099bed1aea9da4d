//! The six per-model stages.
//!
//! Each geometry stage takes a model and returns a new one; nothing is mutated in
//! place. Stages that drop primitives rebuild the vertex and color lists so the
//! output holds only what surviving primitives reference.

use std::borrow::Cow;

use tracing::trace;

use crate::camera::Camera;
use crate::clipper::{ClipVertex, ClipVolume, Endpoint, NearPlane};
use crate::color::Color;
use crate::error::Result;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::model::{Model, Primitive};
use crate::options::RenderOptions;
use crate::render::rasterizer::{self, Line, LineRasterizer, RasterizerDispatcher, RasterizerType};
use crate::render::viewport::Viewport;

// =============================================================================
// Transforms
// =============================================================================

/// Local coordinates to view (world) space: every vertex becomes `ctm * vertex`.
pub fn model_to_view(model: &Model, ctm: &Mat4) -> Model {
    model.map_vertices(|v| ctm.transform_point(v))
}

/// View space to camera space, eye at the origin looking down -z.
pub fn view_to_camera(model: &Model, camera: &Camera) -> Model {
    let view = camera.view_matrix();
    model.map_vertices(|v| view.transform_point(v))
}

/// Camera space to NDC: the camera's normalization matrix followed by the divide
/// by w.
///
/// Expects near-clipped input. A vertex whose w comes out zero becomes NaN and is
/// removed by [`clip`].
pub fn project(model: &Model, camera: &Camera) -> Model {
    let m = camera.normalization_matrix();
    model.map_vertices(|v| {
        (m * Vec4::from(v))
            .divide_by_w()
            .unwrap_or(Vec3::new(f32::NAN, f32::NAN, f32::NAN))
    })
}

// =============================================================================
// Clipping
// =============================================================================

/// Keeps only geometry strictly in front of the camera's near plane.
///
/// Segments crossing the plane are cut there, with the color interpolated at the
/// cut. Points on or behind the plane are dropped.
pub fn near_clip(model: &Model, camera: &Camera) -> Model {
    let plane = NearPlane::new(camera.near());
    clip_with(model, |a, b| plane.clip_segment(a, b), |p| plane.in_front(p))
}

/// Like [`near_clip`] but never cuts: any primitive touching a vertex on or behind
/// the near plane is dropped whole.
pub fn near_cull(model: &Model, camera: &Camera) -> Model {
    let plane = NearPlane::new(camera.near());
    clip_with(
        model,
        |a, b| {
            (plane.in_front(a.position) && plane.in_front(b.position))
                .then_some([Endpoint::Kept, Endpoint::Kept])
        },
        |p| plane.in_front(p),
    )
}

/// Clips NDC geometry to the canonical cube `[-1, 1]^3`.
pub fn clip(model: &Model) -> Model {
    let volume = ClipVolume::new();
    clip_with(model, |a, b| volume.clip_segment(a, b), |p| volume.contains(p))
}

fn clip_with(
    model: &Model,
    segment: impl Fn(&ClipVertex, &ClipVertex) -> Option<[Endpoint; 2]>,
    point: impl Fn(Vec3) -> bool,
) -> Model {
    let model = colored(model);
    let mut out = Rebuild::new(&model);

    for primitive in model.primitives() {
        match *primitive {
            Primitive::Point { v, c } => {
                let Some(p) = endpoint(&model, v, c) else { continue };
                if point(p.position) {
                    let (v, c) = out.endpoint(Endpoint::Kept, v, c);
                    out.push(Primitive::point_with_color(v, c));
                }
            }
            Primitive::LineSegment { v0, v1, c0, c1 } => {
                let (Some(a), Some(b)) = (endpoint(&model, v0, c0), endpoint(&model, v1, c1)) else {
                    continue;
                };
                if let Some([e0, e1]) = segment(&a, &b) {
                    let (v0, c0) = out.endpoint(e0, v0, c0);
                    let (v1, c1) = out.endpoint(e1, v1, c1);
                    out.push(Primitive::line_with_colors(v0, v1, c0, c1));
                }
            }
        }
    }
    out.finish()
}

fn colored(model: &Model) -> Cow<'_, Model> {
    model.with_default_colors(Color::default())
}

fn endpoint(model: &Model, v: usize, c: usize) -> Option<ClipVertex> {
    let position = *model.vertices().get(v)?;
    let color = *model.colors().get(c)?;
    Some(ClipVertex::new(position, color))
}

/// Builds a stage output, copying each referenced source vertex and color once.
struct Rebuild<'a> {
    src: &'a Model,
    out: Model,
    vertex_map: Vec<Option<usize>>,
    color_map: Vec<Option<usize>>,
}

impl<'a> Rebuild<'a> {
    fn new(src: &'a Model) -> Self {
        Self {
            src,
            out: src.derived(),
            vertex_map: vec![None; src.vertices().len()],
            color_map: vec![None; src.colors().len()],
        }
    }

    /// Output indices for one endpoint. Callers have checked `v` and `c` exist.
    fn endpoint(&mut self, endpoint: Endpoint, v: usize, c: usize) -> (usize, usize) {
        match endpoint {
            Endpoint::Kept => {
                let v = match self.vertex_map[v] {
                    Some(i) => i,
                    None => {
                        let i = self.out.add_vertex(self.src.vertices()[v]);
                        self.vertex_map[v] = Some(i);
                        i
                    }
                };
                let c = match self.color_map[c] {
                    Some(i) => i,
                    None => {
                        let i = self.out.add_color(self.src.colors()[c]);
                        self.color_map[c] = Some(i);
                        i
                    }
                };
                (v, c)
            }
            Endpoint::Moved(vertex) => (
                self.out.add_vertex(vertex.position),
                self.out.add_color(vertex.color),
            ),
        }
    }

    fn push(&mut self, primitive: Primitive) {
        self.out.push_primitive_unchecked(primitive);
    }

    fn finish(self) -> Model {
        self.out
    }
}

// =============================================================================
// Rasterization
// =============================================================================

/// Draws an NDC model into `viewport` in primitive order. Returns the number of
/// pixel writes.
pub fn rasterize(model: &Model, viewport: &mut Viewport, options: &RenderOptions) -> Result<usize> {
    let rasterizer = RasterizerDispatcher::new(RasterizerType::from_options(options));
    let model = colored(model);
    let mut written = 0;

    for primitive in model.primitives() {
        match *primitive {
            Primitive::Point { v, c } => {
                let Some(p) = endpoint(&model, v, c) else { continue };
                written += rasterizer::draw_point(viewport, xy(p.position), p.color, options)?;
            }
            Primitive::LineSegment { v0, v1, c0, c1 } => {
                let (Some(a), Some(b)) = (endpoint(&model, v0, c0), endpoint(&model, v1, c1)) else {
                    continue;
                };
                let line = Line::new(xy(a.position), xy(b.position), a.color, b.color);
                trace!(?line, "line");
                written += rasterizer.draw_line(&line, viewport, options)?;
            }
        }
    }
    Ok(written)
}

#[inline]
fn xy(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.y)
}
