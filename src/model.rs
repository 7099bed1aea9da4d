//! Wireframe geometry.
//!
//! A [`Model`] is an ordered list of vertices, an ordered list of colors, and an
//! ordered list of [`Primitive`]s that index into both. Primitives are painted in
//! list order, which is the only overlap rule the renderer has.
//!
//! Models may nest other models, each nested entry carrying its own local matrix.
//! Nested models are referenced by [`ModelId`] handles into the owning
//! [`Scene`](crate::scene::Scene) arena, so one model can appear in many places.

use std::borrow::Cow;

use crate::color::Color;
use crate::error::{Error, IndexKind, Result};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// A vertex position in whatever space its model currently lives in.
pub type Vertex = Vec3;

/// Handle to a model stored in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub(crate) usize);

impl ModelId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A renderable primitive: indices into the owning model's vertex and color lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    LineSegment {
        v0: usize,
        v1: usize,
        c0: usize,
        c1: usize,
    },
    Point {
        v: usize,
        c: usize,
    },
}

impl Primitive {
    /// Line whose endpoint colors share the vertex indices.
    pub fn line(v0: usize, v1: usize) -> Self {
        Self::LineSegment {
            v0,
            v1,
            c0: v0,
            c1: v1,
        }
    }

    pub fn line_with_colors(v0: usize, v1: usize, c0: usize, c1: usize) -> Self {
        Self::LineSegment { v0, v1, c0, c1 }
    }

    /// Point whose color shares the vertex index.
    pub fn point(v: usize) -> Self {
        Self::Point { v, c: v }
    }

    pub fn point_with_color(v: usize, c: usize) -> Self {
        Self::Point { v, c }
    }

    fn vertex_indices(&self) -> impl Iterator<Item = usize> {
        let (a, b) = match *self {
            Self::LineSegment { v0, v1, .. } => (v0, Some(v1)),
            Self::Point { v, .. } => (v, None),
        };
        std::iter::once(a).chain(b)
    }

    fn color_indices(&self) -> impl Iterator<Item = usize> {
        let (a, b) = match *self {
            Self::LineSegment { c0, c1, .. } => (c0, Some(c1)),
            Self::Point { c, .. } => (c, None),
        };
        std::iter::once(a).chain(b)
    }
}

/// A nested model placed by its own local matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NestedModel {
    pub model: ModelId,
    pub matrix: Mat4,
}

/// Ordered wireframe geometry plus nested models.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    vertices: Vec<Vertex>,
    colors: Vec<Color>,
    primitives: Vec<Primitive>,
    nested: Vec<NestedModel>,
    visible: bool,
}

impl Model {
    /// Create a new empty, visible model with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            colors: Vec::new(),
            primitives: Vec::new(),
            nested: Vec::new(),
            visible: true,
        }
    }

    /// Builds a model from complete lists, validating every primitive index.
    pub fn from_parts(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        colors: Vec<Color>,
        primitives: Vec<Primitive>,
    ) -> Result<Self> {
        let model = Self {
            name: name.into(),
            vertices,
            colors,
            primitives,
            nested: Vec::new(),
            visible: true,
        };
        model.validate()?;
        Ok(model)
    }

    /// Get the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // ============ Geometry ============

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, vertex: impl Into<Vertex>) -> usize {
        self.vertices.push(vertex.into());
        self.vertices.len() - 1
    }

    /// Appends a color and returns its index.
    pub fn add_color(&mut self, color: Color) -> usize {
        self.colors.push(color);
        self.colors.len() - 1
    }

    /// Appends a primitive after checking its indices.
    ///
    /// While the color list is empty, color indices are checked against the vertex
    /// list instead: the pipeline gives such models one default color per vertex.
    pub fn add_primitive(&mut self, primitive: Primitive) -> Result<()> {
        self.check_primitive(&primitive)?;
        self.primitives.push(primitive);
        Ok(())
    }

    /// Replaces every color with `color`, or gives each vertex that color if the
    /// color list is empty.
    pub fn set_color(&mut self, color: Color) {
        if self.colors.is_empty() {
            self.colors = vec![color; self.vertices.len()];
        } else {
            self.colors.fill(color);
        }
    }

    /// Returns the model with a color for every vertex, borrowing when no repair is
    /// needed.
    pub fn with_default_colors(&self, color: Color) -> Cow<'_, Model> {
        if self.needs_default_colors() {
            let mut repaired = self.clone();
            repaired.colors = vec![color; self.vertices.len()];
            Cow::Owned(repaired)
        } else {
            Cow::Borrowed(self)
        }
    }

    pub fn needs_default_colors(&self) -> bool {
        self.colors.is_empty() && !self.vertices.is_empty()
    }

    // ============ Nested models ============

    pub fn nested(&self) -> &[NestedModel] {
        &self.nested
    }

    pub fn nested_mut(&mut self) -> &mut [NestedModel] {
        &mut self.nested
    }

    /// Nests `model` under this one. Handles are checked by the scene; prefer
    /// [`Scene::nest_model`](crate::scene::Scene::nest_model).
    pub(crate) fn push_nested(&mut self, model: ModelId, matrix: Mat4) {
        self.nested.push(NestedModel { model, matrix });
    }

    // ============ Validation ============

    /// Checks that every primitive index is in range.
    pub fn validate(&self) -> Result<()> {
        self.primitives
            .iter()
            .try_for_each(|primitive| self.check_primitive(primitive))
    }

    fn check_primitive(&self, primitive: &Primitive) -> Result<()> {
        let vertex_len = self.vertices.len();
        let color_len = if self.colors.is_empty() {
            vertex_len
        } else {
            self.colors.len()
        };

        let bad_vertex = primitive
            .vertex_indices()
            .find(|&i| i >= vertex_len)
            .map(|i| (IndexKind::Vertex, i, vertex_len));
        let bad_color = primitive
            .color_indices()
            .find(|&i| i >= color_len)
            .map(|i| (IndexKind::Color, i, color_len));

        match bad_vertex.or(bad_color) {
            Some((kind, index, len)) => Err(Error::IndexOutOfRange {
                model: self.name.clone(),
                kind,
                index,
                len,
            }),
            None => Ok(()),
        }
    }

    // ============ Pipeline construction ============

    /// An empty model carrying this model's name, for stage outputs.
    pub(crate) fn derived(&self) -> Model {
        Model::new(self.name.clone())
    }

    /// Same lists with every vertex passed through `f`; nested models dropped.
    pub(crate) fn map_vertices(&self, f: impl Fn(Vertex) -> Vertex) -> Model {
        Model {
            name: self.name.clone(),
            vertices: self.vertices.iter().map(|&v| f(v)).collect(),
            colors: self.colors.clone(),
            primitives: self.primitives.clone(),
            nested: Vec::new(),
            visible: self.visible,
        }
    }

    /// Pushes a primitive whose indices the caller guarantees are valid.
    pub(crate) fn push_primitive_unchecked(&mut self, primitive: Primitive) {
        debug_assert!(self.check_primitive(&primitive).is_ok());
        self.primitives.push(primitive);
    }
}
