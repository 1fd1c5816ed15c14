//! Primitive tessellation into polygon and edge buffers.
//!
//! Generators append points in object-local coordinates; they neither apply
//! the transform stack nor rasterize. Solids append triangles (3 points
//! each, counter-clockwise seen from outside) and 2D shapes append segments
//! (2 points each).
//!
//! # Surface parameterization
//!
//! Spheres and tori are sampled on a grid of `rotation × circle` steps:
//!
//! ```text
//! sphere: x = r·cos(π·c)                    + cx
//!         y = r·sin(π·c)·cos(2π·ρ)          + cy
//!         z = r·sin(π·c)·sin(2π·ρ)          + cz      c ∈ [0, 1], ρ ∈ [0, 1)
//!
//! torus:  x =  cos(2π·ρ)·(r1·cos(2π·c) + r2) + cx
//!         y =  r1·sin(2π·c)                  + cy
//!         z = −sin(2π·ρ)·(r1·cos(2π·c) + r2) + cz     c ∈ [0, 1), ρ ∈ [0, 1)
//! ```
//!
//! A sphere semicircle includes both poles, so each rotation contributes
//! `step + 1` points and every pole is repeated once per rotation. The
//! torus tube is a full circle and its seam is closed explicitly.

use std::f64::consts::PI;

use crate::math::mat4::Mat4;
use crate::math::point_matrix::PointMatrix;
use crate::math::vec3::Vec3;

/// Basis used to turn four control values into cubic coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveType {
    /// Control points are `[p0, p1, r0, r1]`: endpoints then tangents.
    Hermite,
    /// Control points are `[p0, p1, p2, p3]`; the curve passes p0 and p3.
    Bezier,
}

impl CurveType {
    pub fn basis(&self) -> Mat4 {
        match self {
            CurveType::Hermite => Mat4::hermite(),
            CurveType::Bezier => Mat4::bezier(),
        }
    }
}

impl std::fmt::Display for CurveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveType::Hermite => write!(f, "hermite"),
            CurveType::Bezier => write!(f, "bezier"),
        }
    }
}

/// Add a rectangular prism whose upper-left-front corner is `corner`.
///
/// The box spans `+x` by `width`, `−y` by `height` and `−z` by `depth`,
/// emitted as 12 triangles.
pub fn add_box(polygons: &mut PointMatrix, corner: Vec3, width: f64, height: f64, depth: f64) {
    let Vec3 { x, y, z } = corner;
    let x1 = x + width;
    let y1 = y - height;
    let z1 = z - depth;
    let p = Vec3::new;

    // front
    polygons.add_polygon(p(x, y, z), p(x1, y1, z), p(x1, y, z));
    polygons.add_polygon(p(x, y, z), p(x, y1, z), p(x1, y1, z));
    // back
    polygons.add_polygon(p(x1, y, z1), p(x, y1, z1), p(x, y, z1));
    polygons.add_polygon(p(x1, y, z1), p(x1, y1, z1), p(x, y1, z1));
    // right
    polygons.add_polygon(p(x1, y, z), p(x1, y1, z1), p(x1, y, z1));
    polygons.add_polygon(p(x1, y, z), p(x1, y1, z), p(x1, y1, z1));
    // left
    polygons.add_polygon(p(x, y, z1), p(x, y1, z), p(x, y, z));
    polygons.add_polygon(p(x, y, z1), p(x, y1, z1), p(x, y1, z));
    // top
    polygons.add_polygon(p(x, y, z1), p(x1, y, z), p(x1, y, z1));
    polygons.add_polygon(p(x, y, z1), p(x, y, z), p(x1, y, z));
    // bottom
    polygons.add_polygon(p(x, y1, z), p(x1, y1, z1), p(x1, y1, z));
    polygons.add_polygon(p(x, y1, z), p(x, y1, z1), p(x1, y1, z1));
}

/// Sample the surface of a sphere: `step` rotations of a `step + 1` point
/// semicircle.
pub fn generate_sphere(center: Vec3, r: f64, step: usize) -> PointMatrix {
    let mut points = PointMatrix::with_capacity(step * (step + 1));

    for rotation in 0..step {
        let rot = rotation as f64 / step as f64;
        for circle in 0..=step {
            let circ = circle as f64 / step as f64;
            points.add_point(
                r * (PI * circ).cos() + center.x,
                r * (PI * circ).sin() * (2.0 * PI * rot).cos() + center.y,
                r * (PI * circ).sin() * (2.0 * PI * rot).sin() + center.z,
            );
        }
    }

    points
}

/// Add the triangles of a sphere. A `step` of zero adds nothing.
pub fn add_sphere(polygons: &mut PointMatrix, center: Vec3, r: f64, step: usize) {
    if step == 0 {
        return;
    }
    let points = generate_sphere(center, r, step);
    let total = step * (step + 1);

    for lat in 0..step {
        for longt in 1..step {
            let p0 = lat * (step + 1) + longt;
            let p1 = p0 + 1;
            let p2 = (p1 + step) % total;
            let p3 = (p0 + step) % total;

            polygons.add_polygon(points.point(p0), points.point(p1), points.point(p2));
            polygons.add_polygon(points.point(p0), points.point(p2), points.point(p3));
        }
    }
}

/// Sample the surface of a torus with tube radius `r1` and ring radius `r2`.
pub fn generate_torus(center: Vec3, r1: f64, r2: f64, step: usize) -> PointMatrix {
    let mut points = PointMatrix::with_capacity(step * step);

    for rotation in 0..step {
        let rot = rotation as f64 / step as f64;
        for circle in 0..step {
            let circ = circle as f64 / step as f64;
            let ring = r1 * (2.0 * PI * circ).cos() + r2;
            points.add_point(
                (2.0 * PI * rot).cos() * ring + center.x,
                r1 * (2.0 * PI * circ).sin() + center.y,
                -(2.0 * PI * rot).sin() * ring + center.z,
            );
        }
    }

    points
}

/// Add the triangles of a torus. A `step` of zero adds nothing.
pub fn add_torus(polygons: &mut PointMatrix, center: Vec3, r1: f64, r2: f64, step: usize) {
    if step == 0 {
        return;
    }
    let points = generate_torus(center, r1, r2, step);
    let total = step * step;

    for lat in 0..step {
        for longt in 0..step {
            let p0 = lat * step + longt;
            // The last sample of each tube circle closes back to its first
            let p1 = if longt == step - 1 { p0 - longt } else { p0 + 1 };
            let p2 = (p1 + step) % total;
            let p3 = (p0 + step) % total;

            polygons.add_polygon(points.point(p0), points.point(p3), points.point(p2));
            polygons.add_polygon(points.point(p0), points.point(p2), points.point(p1));
        }
    }
}

/// Add a circle in the plane `z = center.z` as `step` connected segments.
pub fn add_circle(edges: &mut PointMatrix, center: Vec3, r: f64, step: usize) {
    let mut previous = Vec3::new(r + center.x, center.y, center.z);

    for i in 1..=step {
        let t = i as f64 / step as f64;
        let next = Vec3::new(
            r * (2.0 * PI * t).cos() + center.x,
            r * (2.0 * PI * t).sin() + center.y,
            center.z,
        );
        edges.add_edge(previous, next);
        previous = next;
    }
}

/// Coefficients `[a, b, c, d]` of `a·t³ + b·t² + c·t + d` for one axis.
pub fn curve_coefficients(p0: f64, p1: f64, p2: f64, p3: f64, kind: CurveType) -> [f64; 4] {
    kind.basis().apply([p0, p1, p2, p3])
}

#[inline]
fn eval_cubic(coefs: &[f64; 4], t: f64) -> f64 {
    coefs[0] * t * t * t + coefs[1] * t * t + coefs[2] * t + coefs[3]
}

/// Add a cubic curve sampled at `step` uniform parameters in `(0, 1]`,
/// joined to the first control point by connected segments.
pub fn add_curve(edges: &mut PointMatrix, controls: [Vec3; 4], step: usize, kind: CurveType) {
    let [c0, c1, c2, c3] = controls;
    let xs = curve_coefficients(c0.x, c1.x, c2.x, c3.x, kind);
    let ys = curve_coefficients(c0.y, c1.y, c2.y, c3.y, kind);
    let zs = curve_coefficients(c0.z, c1.z, c2.z, c3.z, kind);

    let mut previous = c0;
    for i in 1..=step {
        let t = i as f64 / step as f64;
        let next = Vec3::new(eval_cubic(&xs, t), eval_cubic(&ys, t), eval_cubic(&zs, t));
        edges.add_edge(previous, next);
        previous = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::surface_normal;
    use approx::assert_relative_eq;

    #[test]
    fn box_has_twelve_triangles_on_expected_corners() {
        let mut polygons = PointMatrix::new();
        add_box(&mut polygons, Vec3::ZERO, 2.0, 2.0, 2.0);

        assert_eq!(polygons.len(), 36);
        assert_eq!(polygons.triangles().count(), 12);

        let corners = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, -2.0, 0.0),
            Vec3::new(2.0, -2.0, 0.0),
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(2.0, 0.0, -2.0),
            Vec3::new(0.0, -2.0, -2.0),
            Vec3::new(2.0, -2.0, -2.0),
        ];
        for p in polygons.points() {
            assert!(corners.contains(&p), "unexpected vertex {p:?}");
        }
        for corner in corners {
            assert!(polygons.points().any(|p| p == corner));
        }
    }

    #[test]
    fn box_front_faces_viewer_and_back_faces_away() {
        let mut polygons = PointMatrix::new();
        add_box(&mut polygons, Vec3::ZERO, 2.0, 2.0, 2.0);
        let triangles: Vec<_> = polygons.triangles().collect();

        assert!(surface_normal(&triangles[0]).z > 0.0);
        assert!(surface_normal(&triangles[1]).z > 0.0);
        assert!(surface_normal(&triangles[2]).z < 0.0);
        assert!(surface_normal(&triangles[3]).z < 0.0);
        // Exactly the two front triangles survive culling
        let visible = triangles.iter().filter(|t| surface_normal(t).z > 0.0).count();
        assert_eq!(visible, 2);
    }

    #[test]
    fn sphere_points_lie_on_surface() {
        let center = Vec3::new(10.0, -5.0, 3.0);
        let points = generate_sphere(center, 4.0, 12);
        assert_eq!(points.len(), 12 * 13);
        for p in points.points() {
            assert_relative_eq!((p - center).magnitude(), 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn sphere_triangle_count() {
        let mut polygons = PointMatrix::new();
        add_sphere(&mut polygons, Vec3::ZERO, 50.0, 10);
        assert_eq!(polygons.triangles().count(), 2 * 10 * 9);
    }

    #[test]
    fn sphere_is_mostly_outward_facing() {
        let mut polygons = PointMatrix::new();
        add_sphere(&mut polygons, Vec3::ZERO, 50.0, 20);
        let outward = polygons
            .triangles()
            .filter(|t| {
                let n = surface_normal(t);
                let centroid = (t[0] + t[1] + t[2]) / 3.0;
                n.dot(centroid) > 0.0
            })
            .count();
        let degenerate = polygons
            .triangles()
            .filter(|t| surface_normal(t).magnitude() < 1e-9)
            .count();
        assert_eq!(outward + degenerate, polygons.triangles().count());
    }

    #[test]
    fn torus_points_lie_on_tube() {
        let (r1, r2) = (5.0, 20.0);
        let points = generate_torus(Vec3::ZERO, r1, r2, 16);
        assert_eq!(points.len(), 16 * 16);
        for p in points.points() {
            let ring = (p.x * p.x + p.z * p.z).sqrt() - r2;
            assert_relative_eq!((ring * ring + p.y * p.y).sqrt(), r1, epsilon = 1e-9);
        }
    }

    #[test]
    fn torus_closes_its_seam() {
        let mut polygons = PointMatrix::new();
        add_torus(&mut polygons, Vec3::ZERO, 5.0, 20.0, 8);
        assert_eq!(polygons.triangles().count(), 2 * 8 * 8);

        let outward = polygons
            .triangles()
            .filter(|t| {
                let n = surface_normal(t);
                let centroid = (t[0] + t[1] + t[2]) / 3.0;
                let len = (centroid.x * centroid.x + centroid.z * centroid.z).sqrt();
                let tube_center = Vec3::new(centroid.x / len * 20.0, 0.0, centroid.z / len * 20.0);
                n.dot(centroid - tube_center) > 0.0
            })
            .count();
        assert_eq!(outward, polygons.triangles().count());
    }

    #[test]
    fn zero_step_adds_nothing() {
        let mut polygons = PointMatrix::new();
        add_sphere(&mut polygons, Vec3::ZERO, 1.0, 0);
        add_torus(&mut polygons, Vec3::ZERO, 1.0, 2.0, 0);
        assert!(polygons.is_empty());
    }

    #[test]
    fn circle_is_closed() {
        let mut edges = PointMatrix::new();
        add_circle(&mut edges, Vec3::new(5.0, 5.0, 1.0), 3.0, 20);
        assert_eq!(edges.edges().count(), 20);

        let first = edges.point(0);
        let last = edges.point(edges.len() - 1);
        assert_relative_eq!(first.x, last.x, epsilon = 1e-9);
        assert_relative_eq!(first.y, last.y, epsilon = 1e-9);
        assert!(edges.points().all(|p| p.z == 1.0));
    }

    #[test]
    fn bezier_curve_hits_end_control_point() {
        let mut edges = PointMatrix::new();
        let controls = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 40.0, 0.0),
            Vec3::new(30.0, 40.0, 0.0),
            Vec3::new(40.0, 0.0, 0.0),
        ];
        add_curve(&mut edges, controls, 10, CurveType::Bezier);

        assert_eq!(edges.edges().count(), 10);
        assert_eq!(edges.point(0), controls[0]);
        let end = edges.point(edges.len() - 1);
        assert_relative_eq!(end.x, 40.0, epsilon = 1e-9);
        assert_relative_eq!(end.y, 0.0, epsilon = 1e-9);
        // Segments are connected
        for pair in edges.edges().collect::<Vec<_>>().windows(2) {
            assert_eq!(pair[0][1], pair[1][0]);
        }
    }

    #[test]
    fn hermite_coefficients_match_tangents() {
        // p0 = 0, p1 = 1, r0 = 0, r1 = 0 gives 3t² − 2t³
        let coefs = curve_coefficients(0.0, 1.0, 0.0, 0.0, CurveType::Hermite);
        assert_eq!(coefs, [-2.0, 3.0, 0.0, 0.0]);
    }
}
