//! End-to-end rendering scenarios.

use wirepipe::demo::demo_scene;
use wirepipe::prelude::*;

fn lit_pixels(fb: &FrameBuffer) -> Vec<(u32, u32)> {
    let background = fb.background().to_rgba8();
    let mut lit = Vec::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let i = ((y * fb.width() + x) * 4) as usize;
            if fb.pixels()[i..i + 4] != background {
                lit.push((x, y));
            }
        }
    }
    lit
}

fn segment(a: (f32, f32, f32), b: (f32, f32, f32), c0: Color, c1: Color) -> Model {
    Model::from_parts(
        "segment",
        vec![a.into(), b.into()],
        vec![c0, c1],
        vec![Primitive::line(0, 1)],
    )
    .unwrap()
}

fn single_model_scene(camera: Camera, model: Model) -> Scene {
    let mut scene = Scene::new(camera);
    let id = scene.add_model(model);
    scene.add_root(Position::with_model("root", id)).unwrap();
    scene
}

fn ortho_camera() -> Camera {
    Camera::orthographic(-1.0, 1.0, -1.0, 1.0, 1.0).unwrap()
}

#[test]
fn orthographic_horizontal_line_spans_middle_row() {
    const N: u32 = 32;
    let scene = single_model_scene(
        ortho_camera(),
        segment((-1.0, 0.0, -3.0), (1.0, 0.0, -3.0), Color::RED, Color::BLUE),
    );
    let mut fb = FrameBuffer::new(N, N).unwrap();
    let stats = render(&scene, &mut fb.viewport(), &RenderOptions::default()).unwrap();

    let lit = lit_pixels(&fb);
    assert_eq!(lit.len(), N as usize);
    assert!(lit.iter().all(|&(_, y)| y.abs_diff(N / 2) <= 1));
    assert_eq!(stats.pixels_written, N as usize);

    // Colors run from red at the left edge to blue at the right.
    let row = lit[0].1;
    let left = fb.get_pixel(0, row).unwrap();
    let right = fb.get_pixel(N - 1, row).unwrap();
    assert_eq!(left, Color::RED);
    assert_eq!(right, Color::BLUE);
    let reds: Vec<f32> = (0..N).map(|x| fb.get_pixel(x, row).unwrap().r).collect();
    assert!(reds.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn segment_behind_near_plane_draws_nothing() {
    for camera in [Camera::default(), ortho_camera()] {
        let scene = single_model_scene(
            camera,
            segment((-1.0, 0.0, -0.5), (1.0, 0.5, 2.0), Color::WHITE, Color::WHITE),
        );
        let mut fb = FrameBuffer::new(16, 16).unwrap();
        let stats = render(&scene, &mut fb.viewport(), &RenderOptions::default()).unwrap();

        assert!(lit_pixels(&fb).is_empty());
        assert_eq!(stats.primitives_in, 1);
        assert_eq!(stats.primitives_after_near_clip, 0);
        assert_eq!(stats.pixels_written, 0);
    }
}

#[test]
fn model_without_colors_renders_in_default_color() {
    let mut model = Model::new("plain");
    model.add_vertex((-0.5, -0.5, -2.0));
    model.add_vertex((0.5, 0.5, -2.0));
    model.add_primitive(Primitive::line(0, 1)).unwrap();
    assert!(model.colors().is_empty());

    let scene = single_model_scene(Camera::default(), model);
    let mut fb = FrameBuffer::new(20, 20).unwrap();
    render(&scene, &mut fb.viewport(), &RenderOptions::default()).unwrap();

    let lit = lit_pixels(&fb);
    assert!(!lit.is_empty());
    for (x, y) in lit {
        assert_eq!(fb.get_pixel(x, y), Some(Color::WHITE));
    }
    // The scene itself is not modified by the repair.
    assert!(scene.models()[0].colors().is_empty());
}

#[test]
fn rendering_is_idempotent() {
    let scene = demo_scene(Camera::perspective_fov(60.0, 4.0 / 3.0, 1.0).unwrap(), 0.7).unwrap();
    for options in [
        RenderOptions::default(),
        RenderOptions::default().with_anti_aliasing(true).with_gamma_correction(true),
    ] {
        let mut first = FrameBuffer::new(120, 90).unwrap();
        let mut second = FrameBuffer::new(120, 90).unwrap();
        let a = render(&scene, &mut first.viewport(), &options).unwrap();
        let b = render(&scene, &mut second.viewport(), &options).unwrap();

        assert_eq!(a, b);
        assert_eq!(first.pixels(), second.pixels());
        assert!(a.pixels_written > 0);
    }
}

#[test]
fn nested_positions_match_flattened_matrix() {
    let t = Mat4::translation(0.2, -0.1, -5.0).rotate(0.4, Vec3::Y);
    let t2 = Mat4::rotation_x(0.3).scale(1.5, 1.5, 1.5);
    let cube = wirepipe::demo::cube("cube", 1.0).unwrap();

    let mut nested = Scene::new(Camera::default());
    let id = nested.add_model(cube.clone());
    let mut parent = Position::new("parent");
    parent.set_matrix(t);
    let parent = nested.add_root(parent).unwrap();
    let mut child = Position::with_model("child", id);
    child.set_matrix(t2);
    nested.add_child(parent, child).unwrap();

    let mut flat = Scene::new(Camera::default());
    let id = flat.add_model(cube);
    let mut only = Position::with_model("flat", id);
    only.set_matrix(Mat4::compose(&t, &t2));
    flat.add_root(only).unwrap();

    let mut a = FrameBuffer::new(64, 64).unwrap();
    let mut b = FrameBuffer::new(64, 64).unwrap();
    render(&nested, &mut a.viewport(), &RenderOptions::default()).unwrap();
    render(&flat, &mut b.viewport(), &RenderOptions::default()).unwrap();

    assert!(!lit_pixels(&a).is_empty());
    assert_eq!(a.pixels(), b.pixels());
}

#[test]
fn nested_models_inherit_parent_transform() {
    let mut scene = Scene::new(ortho_camera());
    let parent = scene.add_model(Model::new("empty parent"));
    let dot = {
        let mut m = Model::new("dot");
        m.add_vertex((0.0, 0.0, 0.0));
        m.add_primitive(Primitive::point(0)).unwrap();
        m.set_color(Color::YELLOW);
        scene.add_model(m)
    };
    scene
        .nest_model(parent, dot, Mat4::translation(0.5, 0.0, 0.0))
        .unwrap();
    let mut root = Position::with_model("root", parent);
    root.set_matrix(Mat4::translation(0.0, 0.5, -2.0));
    scene.add_root(root).unwrap();

    let mut fb = FrameBuffer::new(8, 8).unwrap();
    let stats = render(&scene, &mut fb.viewport(), &RenderOptions::default()).unwrap();

    assert_eq!(stats.models_rendered, 2);
    // NDC (0.5, 0.5) -> pixel (6, 2).
    assert_eq!(lit_pixels(&fb), vec![(6, 2)]);
    assert_eq!(fb.get_pixel(6, 2), Some(Color::YELLOW));
}

#[test]
fn position_cycle_is_isolated() {
    let mut scene = Scene::new(Camera::default());
    let model = scene.add_model(segment(
        (-0.5, 0.0, -3.0),
        (0.5, 0.0, -3.0),
        Color::GREEN,
        Color::GREEN,
    ));
    let a = scene.add_root(Position::with_model("a", model)).unwrap();
    let b = scene.add_child(a, Position::with_model("b", model)).unwrap();
    scene.attach_child(b, a).unwrap();

    let mut fb = FrameBuffer::new(16, 16).unwrap();
    let stats = render(&scene, &mut fb.viewport(), &RenderOptions::default()).unwrap();

    assert_eq!(stats.isolated_failures, 1);
    assert_eq!(stats.positions_visited, 2);
    assert_eq!(stats.models_rendered, 2);
    assert!(!lit_pixels(&fb).is_empty());
}

#[test]
fn nested_model_cycle_is_isolated() {
    let mut scene = Scene::new(Camera::default());
    let model = scene.add_model(segment(
        (-0.5, 0.0, -3.0),
        (0.5, 0.0, -3.0),
        Color::GREEN,
        Color::GREEN,
    ));
    scene.nest_model(model, model, Mat4::identity()).unwrap();
    scene.add_root(Position::with_model("root", model)).unwrap();

    let mut fb = FrameBuffer::new(16, 16).unwrap();
    let stats = render(&scene, &mut fb.viewport(), &RenderOptions::default()).unwrap();

    assert_eq!(stats.models_rendered, 1);
    assert_eq!(stats.isolated_failures, 1);
}

#[test]
fn depth_limit_stops_deep_chains() {
    let mut scene = Scene::new(Camera::default());
    let mut parent = scene.add_root(Position::new("p0")).unwrap();
    for i in 1..10 {
        parent = scene.add_child(parent, Position::new(format!("p{i}"))).unwrap();
    }

    let mut fb = FrameBuffer::new(4, 4).unwrap();
    let options = RenderOptions::default().with_max_depth(4);
    let stats = render(&scene, &mut fb.viewport(), &options).unwrap();

    assert_eq!(stats.positions_visited, 4);
    assert_eq!(stats.isolated_failures, 1);
}

#[test]
fn invisible_subtrees_are_skipped() {
    let mut scene = Scene::new(Camera::default());
    let model = scene.add_model(segment(
        (-0.5, 0.0, -3.0),
        (0.5, 0.0, -3.0),
        Color::GREEN,
        Color::GREEN,
    ));
    let root = scene.add_root(Position::new("root")).unwrap();
    let hidden = scene.add_child(root, Position::with_model("hidden", model)).unwrap();
    scene.add_child(hidden, Position::with_model("grandchild", model)).unwrap();
    scene.position_mut(hidden).unwrap().set_visible(false);

    let mut fb = FrameBuffer::new(16, 16).unwrap();
    let stats = render(&scene, &mut fb.viewport(), &RenderOptions::default()).unwrap();
    assert_eq!(stats.skipped_invisible, 1);
    assert_eq!(stats.models_rendered, 0);
    assert!(lit_pixels(&fb).is_empty());

    scene.position_mut(hidden).unwrap().set_visible(true);
    scene.model_mut(model).unwrap().set_visible(false);
    let stats = render(&scene, &mut fb.viewport(), &RenderOptions::default()).unwrap();
    assert_eq!(stats.skipped_invisible, 2);
    assert_eq!(stats.positions_visited, 3);
}

#[test]
fn invalid_model_is_skipped_and_siblings_render() {
    let mut scene = Scene::new(Camera::default());
    let mut broken = Model::new("broken");
    broken.add_vertex((0.0, 0.0, -2.0));
    broken.add_vertex((0.5, 0.0, -2.0));
    broken.add_primitive(Primitive::line(0, 1)).unwrap();
    // One color for two color indices.
    broken.add_color(Color::RED);
    let broken = scene.add_model(broken);
    let good = scene.add_model(segment(
        (-0.5, 0.5, -2.0),
        (0.5, 0.5, -2.0),
        Color::GREEN,
        Color::GREEN,
    ));

    scene.add_root(Position::with_model("broken", broken)).unwrap();
    scene.add_root(Position::with_model("good", good)).unwrap();

    let mut fb = FrameBuffer::new(16, 16).unwrap();
    let stats = render(&scene, &mut fb.viewport(), &RenderOptions::default()).unwrap();

    assert_eq!(stats.isolated_failures, 1);
    assert_eq!(stats.models_rendered, 1);
    let lit = lit_pixels(&fb);
    assert!(!lit.is_empty());
    assert!(lit.iter().all(|&(x, y)| fb.get_pixel(x, y) == Some(Color::GREEN)));
}

#[test]
fn near_clipping_toggle_changes_straddling_segments() {
    let scene = single_model_scene(
        Camera::default(),
        segment((0.0, -0.5, 1.0), (0.0, -0.5, -4.0), Color::WHITE, Color::WHITE),
    );

    let mut clipped = FrameBuffer::new(32, 32).unwrap();
    let stats = render(&scene, &mut clipped.viewport(), &RenderOptions::default()).unwrap();
    assert_eq!(stats.primitives_after_near_clip, 1);
    assert!(!lit_pixels(&clipped).is_empty());

    let mut culled = FrameBuffer::new(32, 32).unwrap();
    let options = RenderOptions::default().with_near_clipping(false);
    let stats = render(&scene, &mut culled.viewport(), &options).unwrap();
    assert_eq!(stats.primitives_after_near_clip, 0);
    assert!(lit_pixels(&culled).is_empty());
}

#[test]
fn anti_aliasing_spreads_coverage() {
    let scene = single_model_scene(
        ortho_camera(),
        segment((-1.0, 0.0, -3.0), (1.0, 0.0, -3.0), Color::WHITE, Color::WHITE),
    );

    let mut aliased = FrameBuffer::new(16, 16).unwrap();
    render(&scene, &mut aliased.viewport(), &RenderOptions::default()).unwrap();
    let mut smooth = FrameBuffer::new(16, 16).unwrap();
    let options = RenderOptions::default().with_anti_aliasing(true);
    render(&scene, &mut smooth.viewport(), &options).unwrap();

    assert_eq!(lit_pixels(&aliased).len(), 16);
    assert_eq!(lit_pixels(&smooth).len(), 32);
    // Half coverage on each of the two rows.
    assert_eq!(smooth.get_pixel(3, 7).unwrap().to_rgba8(), [128, 128, 128, 255]);
}

#[test]
fn gamma_correction_brightens_midtones() {
    let gray = Color::rgb(0.25, 0.25, 0.25);
    let scene = single_model_scene(
        ortho_camera(),
        segment((-1.0, 0.0, -3.0), (1.0, 0.0, -3.0), gray, gray),
    );

    let mut linear = FrameBuffer::new(8, 8).unwrap();
    render(&scene, &mut linear.viewport(), &RenderOptions::default()).unwrap();
    let mut corrected = FrameBuffer::new(8, 8).unwrap();
    let options = RenderOptions::default().with_gamma_correction(true);
    render(&scene, &mut corrected.viewport(), &options).unwrap();

    let before = linear.get_pixel(2, 4).unwrap();
    let after = corrected.get_pixel(2, 4).unwrap();
    assert!(after.r > before.r + 0.2);
    assert_eq!(after.to_rgba8(), gray.gamma(1.0 / 2.2).to_rgba8());
}

#[test]
fn sub_viewport_confines_drawing() {
    let scene = demo_scene(Camera::default(), 0.2).unwrap();
    let mut fb = FrameBuffer::new(40, 40).unwrap();
    {
        let mut vp = fb.sub_viewport(10, 5, 20, 25).unwrap();
        render(&scene, &mut vp, &RenderOptions::default()).unwrap();
    }

    let lit = lit_pixels(&fb);
    assert!(!lit.is_empty());
    assert!(lit
        .iter()
        .all(|&(x, y)| (10..30).contains(&x) && (5..30).contains(&y)));
}

#[test]
fn render_with_camera_overrides_scene_camera() {
    let scene = single_model_scene(
        Camera::default(),
        segment((-0.5, 0.0, -3.0), (0.5, 0.0, -3.0), Color::WHITE, Color::WHITE),
    );
    let mut away = Camera::default();
    away.view_rotate_y(std::f32::consts::PI);

    let mut fb = FrameBuffer::new(16, 16).unwrap();
    let stats = render_with_camera(&scene, &away, &mut fb.viewport(), &RenderOptions::default())
        .unwrap();
    assert_eq!(stats.primitives_after_near_clip, 0);
    assert!(lit_pixels(&fb).is_empty());
}

#[test]
fn far_plane_bounds_what_is_drawn() {
    let mut model = Model::new("distant point");
    model.add_vertex((0.0, 0.0, -5000.0));
    model.add_primitive(Primitive::point(0)).unwrap();

    let mut scene = single_model_scene(Camera::default(), model);
    let mut fb = FrameBuffer::new(8, 8).unwrap();
    let stats = render(&scene, &mut fb.viewport(), &RenderOptions::default()).unwrap();
    assert_eq!(stats.primitives_after_near_clip, 1);
    assert_eq!(stats.primitives_after_clip, 0);
    assert!(lit_pixels(&fb).is_empty());

    let camera = Camera::default().with_far(1.0e4).unwrap();
    scene.set_camera(camera);
    let stats = render(&scene, &mut fb.viewport(), &RenderOptions::default()).unwrap();
    assert_eq!(stats.primitives_after_clip, 1);
    assert_eq!(lit_pixels(&fb), vec![(4, 4)]);
}
