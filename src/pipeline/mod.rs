//! Scene rendering.
//!
//! [`render`] walks the scene graph pre-order from each root position, composing
//! `ctm' = ctm * local` at every position and nested model, and runs each visible
//! model through the stages in [`stages`]:
//!
//! ```text
//! model -> view -> camera -> near clip -> project -> clip -> rasterize
//! ```
//!
//! A frame is rendered in two phases. All geometry stages run first without
//! touching pixels; the clipped models are then rasterized in traversal order. If a
//! pixel write fails, the viewport is restored to its contents before the frame and
//! the error is returned.
//!
//! Problems local to one subtree (a dangling handle, a cycle, nesting deeper than
//! [`RenderOptions::max_depth`], a model whose indices no longer validate) are
//! logged, counted in [`RenderStats`], and skipped; siblings still render.

pub mod stages;

use std::borrow::Cow;

use tracing::{debug, debug_span, warn};

use crate::camera::Camera;
use crate::error::Result;
use crate::math::mat4::Mat4;
use crate::model::{Model, ModelId};
use crate::options::RenderOptions;
use crate::render::viewport::Viewport;
use crate::scene::{PositionId, Scene};

pub use stages::{clip, model_to_view, near_clip, near_cull, project, rasterize, view_to_camera};

/// Per-frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Visible positions entered.
    pub positions_visited: usize,
    /// Models (including nested ones) run through the geometry stages.
    pub models_rendered: usize,
    /// Invisible positions and models whose subtrees were not walked.
    pub skipped_invisible: usize,
    /// Subtrees dropped for a dangling handle, a cycle, excess depth, or an
    /// invalid model.
    pub isolated_failures: usize,
    /// Primitives entering the pipeline.
    pub primitives_in: usize,
    /// Primitives surviving the near plane.
    pub primitives_after_near_clip: usize,
    /// Primitives surviving the clip volume.
    pub primitives_after_clip: usize,
    /// Pixel writes, counting each blended write of an anti-aliased line.
    pub pixels_written: usize,
}

/// Renders `scene` through its own camera.
pub fn render(scene: &Scene, viewport: &mut Viewport, options: &RenderOptions) -> Result<RenderStats> {
    render_with_camera(scene, scene.camera(), viewport, options)
}

/// Renders `scene` through `camera`.
///
/// The viewport is not cleared first. Either every primitive is drawn, or the
/// viewport is left as it was and the pixel error is returned.
pub fn render_with_camera(
    scene: &Scene,
    camera: &Camera,
    viewport: &mut Viewport,
    options: &RenderOptions,
) -> Result<RenderStats> {
    let _span = debug_span!(
        "render",
        scene = scene.name(),
        width = viewport.width(),
        height = viewport.height()
    )
    .entered();

    let mut walker = Walker {
        scene,
        camera,
        options,
        debug: options.debug || scene.debug(),
        stats: RenderStats::default(),
        frame: Vec::new(),
        position_path: Vec::new(),
        model_path: Vec::new(),
    };
    for &root in scene.roots() {
        walker.visit_position(root, &Mat4::identity(), 0);
    }
    let Walker {
        mut stats, frame, ..
    } = walker;

    stats.pixels_written = rasterize_frame(&frame, viewport, options)?;

    debug!(?stats, "frame complete");
    Ok(stats)
}

/// Rasterizes clipped models in order. On a failed write the viewport is put back
/// as it was and the error returned.
fn rasterize_frame(frame: &[Model], viewport: &mut Viewport, options: &RenderOptions) -> Result<usize> {
    let snapshot = viewport.to_framebuffer();
    let mut written = 0;
    for model in frame {
        match rasterize(model, viewport, options) {
            Ok(n) => written += n,
            Err(err) => {
                warn!(model = model.name(), %err, "pixel write failed; frame discarded");
                viewport.restore(&snapshot);
                return Err(err);
            }
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::error::Error;
    use crate::model::Primitive;
    use crate::render::framebuffer::FrameBuffer;

    fn ndc_line(name: &str, a: (f32, f32, f32), b: (f32, f32, f32), color: Color) -> Model {
        Model::from_parts(
            name,
            vec![a.into(), b.into()],
            vec![color],
            vec![Primitive::line_with_colors(0, 1, 0, 0)],
        )
        .unwrap()
    }

    #[test]
    fn failed_frame_leaves_viewport_untouched() {
        let mut fb = FrameBuffer::with_background(8, 8, Color::DARK_GRAY).unwrap();
        fb.set_pixel(2, 2, Color::BLUE).unwrap();
        let before = fb.pixels().to_vec();

        let frame = vec![
            ndc_line("inside", (-1.0, 0.0, 0.0), (1.0, 0.0, 0.0), Color::GREEN),
            ndc_line("outside", (0.0, 0.0, 0.0), (0.0, 3.0, 0.0), Color::RED),
        ];
        for options in [
            RenderOptions::default(),
            RenderOptions::default().with_anti_aliasing(true),
        ] {
            let result = rasterize_frame(&frame, &mut fb.viewport(), &options);
            assert!(matches!(result, Err(Error::PixelOutOfBounds { .. })));
            assert_eq!(fb.pixels(), before.as_slice());
        }
    }

    #[test]
    fn failed_frame_in_sub_viewport_restores_only_that_region() {
        let mut fb = FrameBuffer::new(8, 8).unwrap();
        let before = fb.pixels().to_vec();
        let frame = vec![
            ndc_line("inside", (-1.0, -1.0, 0.0), (1.0, 1.0, 0.0), Color::WHITE),
            ndc_line("outside", (-2.0, 0.0, 0.0), (-2.0, 0.5, 0.0), Color::WHITE),
        ];

        let mut viewport = fb.sub_viewport(2, 2, 4, 4).unwrap();
        assert!(rasterize_frame(&frame, &mut viewport, &RenderOptions::default()).is_err());
        assert_eq!(fb.pixels(), before.as_slice());
    }

    #[test]
    fn successful_frame_counts_all_writes() {
        let mut fb = FrameBuffer::new(8, 8).unwrap();
        let frame = vec![
            ndc_line("a", (-1.0, 0.0, 0.0), (1.0, 0.0, 0.0), Color::GREEN),
            ndc_line("b", (0.0, -1.0, 0.0), (0.0, 1.0, 0.0), Color::RED),
        ];
        let written = rasterize_frame(&frame, &mut fb.viewport(), &RenderOptions::default()).unwrap();
        assert_eq!(written, 16);
        assert_eq!(fb.get_pixel(4, 0), Some(Color::RED));
    }
}

/// Traversal state for one frame.
struct Walker<'a> {
    scene: &'a Scene,
    camera: &'a Camera,
    options: &'a RenderOptions,
    debug: bool,
    stats: RenderStats,
    /// Clipped NDC models, in paint order.
    frame: Vec<Model>,
    position_path: Vec<PositionId>,
    model_path: Vec<ModelId>,
}

impl<'a> Walker<'a> {
    fn visit_position(&mut self, id: PositionId, ctm: &Mat4, depth: usize) {
        let scene = self.scene;
        let Some(position) = scene.position(id) else {
            warn!(position = id.index(), "dangling position handle; subtree skipped");
            self.stats.isolated_failures += 1;
            return;
        };
        if !self.enter(depth, || format!("position '{}'", position.name())) {
            return;
        }
        if self.position_path.contains(&id) {
            warn!(position = position.name(), "position cycle; subtree skipped");
            self.stats.isolated_failures += 1;
            return;
        }
        if !position.is_visible() {
            debug!(position = position.name(), "invisible position skipped");
            self.stats.skipped_invisible += 1;
            return;
        }

        self.stats.positions_visited += 1;
        let ctm = Mat4::compose(ctm, &position.matrix());

        self.position_path.push(id);
        if let Some(model) = position.model() {
            self.visit_model(model, &ctm, depth + 1);
        }
        for &child in position.children() {
            self.visit_position(child, &ctm, depth + 1);
        }
        self.position_path.pop();
    }

    fn visit_model(&mut self, id: ModelId, ctm: &Mat4, depth: usize) {
        let scene = self.scene;
        let Some(model) = scene.model(id) else {
            warn!(model = id.index(), "dangling model handle; subtree skipped");
            self.stats.isolated_failures += 1;
            return;
        };
        if !self.enter(depth, || format!("model '{}'", model.name())) {
            return;
        }
        if self.model_path.contains(&id) {
            warn!(model = model.name(), "nested model cycle; subtree skipped");
            self.stats.isolated_failures += 1;
            return;
        }
        if !model.is_visible() {
            debug!(model = model.name(), "invisible model skipped");
            self.stats.skipped_invisible += 1;
            return;
        }

        self.run_stages(model, ctm);

        self.model_path.push(id);
        for nested in model.nested() {
            let child_ctm = Mat4::compose(ctm, &nested.matrix);
            self.visit_model(nested.model, &child_ctm, depth + 1);
        }
        self.model_path.pop();
    }

    /// False, after logging, when `depth` exceeds the configured limit.
    fn enter(&mut self, depth: usize, node: impl FnOnce() -> String) -> bool {
        if depth < self.options.max_depth {
            return true;
        }
        warn!(
            node = %node(),
            max_depth = self.options.max_depth,
            "nesting too deep; subtree skipped"
        );
        self.stats.isolated_failures += 1;
        false
    }

    fn run_stages(&mut self, model: &Model, ctm: &Mat4) {
        let model = model.with_default_colors(self.options.default_color);
        if let Cow::Owned(repaired) = &model {
            warn!(
                model = repaired.name(),
                vertices = repaired.vertices().len(),
                "model has no colors; using the default color"
            );
        }
        if let Err(err) = model.validate() {
            warn!(%err, "invalid model skipped");
            self.stats.isolated_failures += 1;
            return;
        }

        let view = model_to_view(&model, ctm);
        let camera_space = view_to_camera(&view, self.camera);
        let in_front = if self.options.near_clipping {
            near_clip(&camera_space, self.camera)
        } else {
            near_cull(&camera_space, self.camera)
        };
        let ndc = project(&in_front, self.camera);
        let clipped = clip(&ndc);

        self.stats.models_rendered += 1;
        self.stats.primitives_in += model.primitives().len();
        self.stats.primitives_after_near_clip += in_front.primitives().len();
        self.stats.primitives_after_clip += clipped.primitives().len();

        if self.debug {
            debug!(
                model = model.name(),
                primitives = model.primitives().len(),
                after_near_clip = in_front.primitives().len(),
                after_clip = clipped.primitives().len(),
                "model stages"
            );
        }

        if !clipped.primitives().is_empty() {
            self.frame.push(clipped);
        }
    }
}
