//! Scene graph.
//!
//! A [`Scene`] is an arena: it owns every [`Model`] and [`Position`], and the graph
//! edges are copyable [`ModelId`] / [`PositionId`] handles. A position places an
//! optional model with a local matrix and nests further positions; the renderer
//! composes those matrices on the way down without touching the nodes themselves.
//!
//! ```
//! use wirepipe::prelude::*;
//!
//! let mut scene = Scene::new(Camera::default());
//! let mut square = Model::new("square");
//! for (x, y) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
//!     square.add_vertex((x, y, 0.0));
//! }
//! for i in 0..4 {
//!     square.add_primitive(Primitive::line(i, (i + 1) % 4)).unwrap();
//! }
//! let square = scene.add_model(square);
//!
//! let root = scene.add_root(Position::with_model("square", square)).unwrap();
//! scene.position_mut(root).unwrap().set_matrix(Mat4::translation(0.0, 0.0, -4.0));
//! assert_eq!(scene.roots().len(), 1);
//! ```

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::math::mat4::Mat4;
use crate::model::{Model, ModelId};

/// Handle to a position stored in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionId(pub(crate) usize);

impl PositionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A scene-graph node: local matrix, optional model, nested positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    name: String,
    matrix: Mat4,
    model: Option<ModelId>,
    children: Vec<PositionId>,
    visible: bool,
}

impl Position {
    /// Empty, visible position with an identity matrix.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matrix: Mat4::identity(),
            model: None,
            children: Vec::new(),
            visible: true,
        }
    }

    pub fn with_model(name: impl Into<String>, model: ModelId) -> Self {
        Self {
            model: Some(model),
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn set_matrix(&mut self, matrix: Mat4) -> &mut Self {
        self.matrix = matrix;
        self
    }

    /// Composes `m` onto the local matrix: `matrix = matrix * m`, so `m` acts first
    /// on this node's geometry.
    pub fn transform(&mut self, m: Mat4) -> &mut Self {
        self.matrix = Mat4::compose(&self.matrix, &m);
        self
    }

    pub fn model(&self) -> Option<ModelId> {
        self.model
    }

    pub fn set_model(&mut self, model: Option<ModelId>) -> &mut Self {
        self.model = model;
        self
    }

    pub fn children(&self) -> &[PositionId] {
        &self.children
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) -> &mut Self {
        self.visible = visible;
        self
    }
}

/// A camera plus a forest of positions, and the arena backing them.
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    camera: Camera,
    models: Vec<Model>,
    positions: Vec<Position>,
    roots: Vec<PositionId>,
    debug: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            name: String::from("scene"),
            camera,
            models: Vec::new(),
            positions: Vec::new(),
            roots: Vec::new(),
            debug: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Per-scene debug logging; OR-ed with `RenderOptions::debug`.
    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    // ============ Models ============

    pub fn add_model(&mut self, model: Model) -> ModelId {
        self.models.push(model);
        ModelId(self.models.len() - 1)
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.0)
    }

    pub fn model_mut(&mut self, id: ModelId) -> Option<&mut Model> {
        self.models.get_mut(id.0)
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Nests `child` under `parent`, placed by `matrix` relative to the parent.
    pub fn nest_model(&mut self, parent: ModelId, child: ModelId, matrix: Mat4) -> Result<()> {
        if child.0 >= self.models.len() {
            return Err(Error::UnknownModel(child.0));
        }
        let parent = self
            .models
            .get_mut(parent.0)
            .ok_or(Error::UnknownModel(parent.0))?;
        parent.push_nested(child, matrix);
        Ok(())
    }

    // ============ Positions ============

    /// Stores a position without attaching it anywhere.
    pub fn add_position(&mut self, position: Position) -> Result<PositionId> {
        if let Some(model) = position.model {
            if model.0 >= self.models.len() {
                return Err(Error::UnknownModel(model.0));
            }
        }
        self.positions.push(position);
        Ok(PositionId(self.positions.len() - 1))
    }

    /// Stores a position and appends it to the root list.
    pub fn add_root(&mut self, position: Position) -> Result<PositionId> {
        let id = self.add_position(position)?;
        self.roots.push(id);
        Ok(id)
    }

    /// Appends an existing position to the root list.
    pub fn attach_root(&mut self, id: PositionId) -> Result<()> {
        self.check_position(id)?;
        self.roots.push(id);
        Ok(())
    }

    /// Stores `child` and nests it under `parent`.
    pub fn add_child(&mut self, parent: PositionId, child: Position) -> Result<PositionId> {
        self.check_position(parent)?;
        let id = self.add_position(child)?;
        self.positions[parent.0].children.push(id);
        Ok(id)
    }

    /// Nests an already stored position under `parent`.
    ///
    /// Cycles are not rejected here; the renderer detects and skips them.
    pub fn attach_child(&mut self, parent: PositionId, child: PositionId) -> Result<()> {
        self.check_position(parent)?;
        self.check_position(child)?;
        self.positions[parent.0].children.push(child);
        Ok(())
    }

    pub fn position(&self, id: PositionId) -> Option<&Position> {
        self.positions.get(id.0)
    }

    pub fn position_mut(&mut self, id: PositionId) -> Option<&mut Position> {
        self.positions.get_mut(id.0)
    }

    /// First position with the given name, in insertion order.
    pub fn position_by_name(&self, name: &str) -> Option<PositionId> {
        self.positions
            .iter()
            .position(|p| p.name == name)
            .map(PositionId)
    }

    pub fn roots(&self) -> &[PositionId] {
        &self.roots
    }

    fn check_position(&self, id: PositionId) -> Result<()> {
        if id.0 < self.positions.len() {
            Ok(())
        } else {
            Err(Error::UnknownPosition(id.0))
        }
    }
}
