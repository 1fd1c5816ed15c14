use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mdl_render::bench::{draw_line, draw_polygons, scan_convert, Color, FrameBuffer, Shading};
use mdl_render::geometry::add_sphere;
use mdl_render::light::{Light, Reflectivity};
use mdl_render::math::point_matrix::PointMatrix;
use mdl_render::math::vec3::Vec3;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;
const RED: Color = Color::new(255, 0, 0);

fn create_buffer() -> FrameBuffer {
    FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, Color::default())
}

fn small_triangle() -> [Vec3; 3] {
    [
        Vec3::new(100.0, 100.0, 0.0),
        Vec3::new(120.0, 100.0, 0.0),
        Vec3::new(110.0, 120.0, 0.0),
    ]
}

fn medium_triangle() -> [Vec3; 3] {
    [
        Vec3::new(100.0, 100.0, 0.0),
        Vec3::new(300.0, 100.0, 0.0),
        Vec3::new(200.0, 300.0, 0.0),
    ]
}

fn large_triangle() -> [Vec3; 3] {
    [
        Vec3::new(50.0, 50.0, 0.0),
        Vec3::new(750.0, 100.0, 0.0),
        Vec3::new(400.0, 550.0, 0.0),
    ]
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &triangle, |b, tri| {
            let mut fb = create_buffer();
            b.iter(|| {
                fb.clear_depth();
                scan_convert(black_box(tri), &mut fb, RED);
            });
        });
    }

    group.finish();
}

fn benchmark_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("lines");

    group.bench_function("fan_of_360_lines", |b| {
        let mut fb = create_buffer();
        let (cx, cy) = (BUFFER_WIDTH as i32 / 2, BUFFER_HEIGHT as i32 / 2);
        let ends: Vec<(i32, i32)> = (0..360)
            .map(|deg| {
                let t = (deg as f64).to_radians();
                (cx + (t.cos() * 280.0) as i32, cy + (t.sin() * 280.0) as i32)
            })
            .collect();

        b.iter(|| {
            fb.clear_depth();
            for &(x, y) in &ends {
                draw_line(cx, cy, 0.0, black_box(x), black_box(y), 10.0, &mut fb, RED);
            }
        });
    });

    group.finish();
}

fn benchmark_lit_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("lit_sphere");

    let lights = [Light::new(Vec3::new(0.5, 0.75, 1.0), [255.0, 255.0, 255.0])];
    let reflect = Reflectivity::WHITE;
    let shading = Shading {
        view: Vec3::FORWARD,
        ambient: Color::new(50, 50, 50),
        lights: &lights,
        reflect: &reflect,
    };

    for step in [20usize, 100] {
        let mut polygons = PointMatrix::new();
        add_sphere(&mut polygons, Vec3::new(400.0, 300.0, 0.0), 250.0, step);

        group.bench_with_input(BenchmarkId::new("step", step), &polygons, |b, polygons| {
            let mut fb = create_buffer();
            b.iter(|| {
                fb.clear(Color::default());
                draw_polygons(black_box(polygons), &mut fb, &shading)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_lines,
    benchmark_lit_sphere
);
criterion_main!(benches);
