use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wirepipe::demo::demo_scene;
use wirepipe::math::vec2::Vec2;
use wirepipe::render::{AliasedRasterizer, AntiAliasedRasterizer, Line, LineRasterizer};
use wirepipe::{render, Camera, Color, FrameBuffer, RenderOptions};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffer() -> FrameBuffer {
    FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT).expect("non-zero buffer")
}

fn short_line() -> Line {
    Line::new(
        Vec2::new(-0.1, -0.1),
        Vec2::new(0.05, 0.1),
        Color::RED,
        Color::BLUE,
    )
}

fn shallow_line() -> Line {
    Line::new(
        Vec2::new(-0.9, -0.2),
        Vec2::new(0.9, 0.3),
        Color::RED,
        Color::BLUE,
    )
}

fn full_diagonal() -> Line {
    Line::new(
        Vec2::new(-1.0, -1.0),
        Vec2::new(1.0, 1.0),
        Color::RED,
        Color::BLUE,
    )
}

fn benchmark_single_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_line");

    let aliased = AliasedRasterizer::new();
    let anti_aliased = AntiAliasedRasterizer::new();
    let options = RenderOptions::default();

    for (name, line) in [
        ("short", short_line()),
        ("shallow", shallow_line()),
        ("diagonal", full_diagonal()),
    ] {
        group.bench_with_input(BenchmarkId::new("aliased", name), &line, |b, line| {
            let mut fb = create_buffer();
            b.iter(|| {
                let mut vp = fb.viewport();
                aliased.draw_line(black_box(line), &mut vp, &options).expect("line inside viewport")
            });
        });

        group.bench_with_input(BenchmarkId::new("anti_aliased", name), &line, |b, line| {
            let mut fb = create_buffer();
            b.iter(|| {
                let mut vp = fb.viewport();
                anti_aliased
                    .draw_line(black_box(line), &mut vp, &options)
                    .expect("line inside viewport")
            });
        });
    }

    group.finish();
}

fn benchmark_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("demo_scene");

    let aspect = BUFFER_WIDTH as f32 / BUFFER_HEIGHT as f32;
    let camera = Camera::perspective_fov(60.0, aspect, 1.0).expect("valid camera");
    let scene = demo_scene(camera, 0.5).expect("demo scene");

    for (name, options) in [
        ("aliased", RenderOptions::default()),
        ("anti_aliased", RenderOptions::default().with_anti_aliasing(true)),
        (
            "anti_aliased_gamma",
            RenderOptions::default()
                .with_anti_aliasing(true)
                .with_gamma_correction(true),
        ),
    ] {
        group.bench_function(name, |b| {
            let mut fb = create_buffer();
            b.iter(|| {
                fb.clear();
                render(black_box(&scene), &mut fb.viewport(), &options).expect("render")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_line, benchmark_scene);
criterion_main!(benches);
