//! Built-in geometry and a small demo scene.
//!
//! Used by the `wirepipe` binary and the benchmarks; handy as a smoke test for any
//! camera or option combination.

use crate::camera::Camera;
use crate::color::Color;
use crate::error::Result;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::model::{Model, Primitive};
use crate::scene::{Position, Scene};

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

/// Vertex indices of the 12 cube edges.
pub const CUBE_EDGES: [(usize, usize); 12] = [
    // Back face
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    // Front face
    (7, 6),
    (6, 4),
    (4, 5),
    (5, 7),
    // Connecting edges
    (0, 7),
    (1, 6),
    (2, 4),
    (3, 5),
];

/// Cube of the given half-size, each vertex colored by its octant.
pub fn cube(name: &str, half_size: f32) -> Result<Model> {
    let vertices = CUBE_VERTICES.iter().map(|&v| v * half_size).collect();
    let colors = CUBE_VERTICES
        .iter()
        .map(|v| Color::rgb((v.x + 1.0) * 0.5, (v.y + 1.0) * 0.5, (v.z + 1.0) * 0.5))
        .collect();
    let edges = CUBE_EDGES.iter().map(|&(a, b)| Primitive::line(a, b)).collect();
    Model::from_parts(name, vertices, colors, edges)
}

/// Red, green and blue unit axes from the origin.
pub fn axes(length: f32) -> Result<Model> {
    let mut model = Model::new("axes");
    let origin = model.add_vertex(Vec3::ZERO);
    for (axis, color) in [(Vec3::X, Color::RED), (Vec3::Y, Color::GREEN), (Vec3::Z, Color::BLUE)] {
        let tip = model.add_vertex(axis * length);
        let base_color = model.add_color(color);
        let tip_color = model.add_color(color);
        model.add_primitive(Primitive::line_with_colors(origin, tip, base_color, tip_color))?;
    }
    Ok(model)
}

/// A square grid of points on the `y = 0` plane, uncolored.
pub fn grid(half_extent: i32, spacing: f32) -> Result<Model> {
    let mut model = Model::new("grid");
    for i in -half_extent..=half_extent {
        for j in -half_extent..=half_extent {
            let v = model.add_vertex((i as f32 * spacing, 0.0, j as f32 * spacing));
            model.add_primitive(Primitive::point(v))?;
        }
    }
    Ok(model)
}

/// A spinning cube with a nested satellite, axes, and a point grid, five units in
/// front of `camera`.
pub fn demo_scene(camera: Camera, angle: f32) -> Result<Scene> {
    let mut scene = Scene::new(camera);
    scene.set_name("demo");

    let body = scene.add_model(cube("cube", 1.0)?);
    let satellite = scene.add_model(cube("satellite", 0.25)?);
    scene.nest_model(
        body,
        satellite,
        Mat4::compose(&Mat4::rotation_y(angle * 2.0), &Mat4::translation(2.0, 0.0, 0.0)),
    )?;
    let axis_lines = scene.add_model(axes(1.5)?);
    let floor_points = scene.add_model(grid(4, 0.5)?);

    let world = scene.add_root(Position::new("world"))?;
    if let Some(world) = scene.position_mut(world) {
        world.set_matrix(Mat4::translation(0.0, 0.0, -5.0));
    }

    let mut spinning = Position::with_model("cube", body);
    spinning.set_matrix(Mat4::rotation_y(angle).rotate(angle * 0.5, Vec3::X));
    scene.add_child(world, spinning)?;

    scene.add_child(world, Position::with_model("axes", axis_lines))?;

    let mut floor = Position::with_model("grid", floor_points);
    floor.set_matrix(Mat4::translation(0.0, -1.5, 0.0));
    scene.add_child(world, floor)?;

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_is_valid_wireframe() {
        let model = cube("c", 2.0).unwrap();
        assert_eq!(model.vertices().len(), 8);
        assert_eq!(model.primitives().len(), 12);
        assert!(model.validate().is_ok());
        assert_eq!(model.vertices()[4], Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn grid_needs_default_colors() {
        let model = grid(1, 1.0).unwrap();
        assert_eq!(model.primitives().len(), 9);
        assert!(model.needs_default_colors());
    }

    #[test]
    fn demo_scene_builds() {
        let scene = demo_scene(Camera::default(), 0.3).unwrap();
        assert_eq!(scene.roots().len(), 1);
        assert_eq!(scene.models().len(), 4);
        let world = scene.position(scene.roots()[0]).unwrap();
        assert_eq!(world.children().len(), 3);
    }
}
