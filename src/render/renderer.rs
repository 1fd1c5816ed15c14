//! Draws whole point buffers into a [`FrameBuffer`].
//!
//! Polygon buffers are culled, lit and scan-converted one triangle at a time.
//! Edge buffers are drawn segment by segment with a single color.

use log::warn;

use super::framebuffer::FrameBuffer;
use super::line::draw_line;
use super::scanline::scan_convert;
use crate::colors::Color;
use crate::light::{self, Light, Reflectivity};
use crate::math::point_matrix::PointMatrix;
use crate::math::vec3::Vec3;

/// Lighting inputs shared by every triangle of one shape.
#[derive(Clone, Copy, Debug)]
pub struct Shading<'a> {
    /// Unit vector toward the viewer.
    pub view: Vec3,
    pub ambient: Color,
    pub lights: &'a [Light],
    pub reflect: &'a Reflectivity,
}

/// Whether a triangle faces the viewer looking down −Z.
#[inline]
fn is_front_facing(normal: Vec3) -> bool {
    normal.z > 0.0
}

/// Shade and fill every front-facing triangle. Returns the number drawn.
pub fn draw_polygons(polygons: &PointMatrix, buffer: &mut FrameBuffer, shading: &Shading) -> usize {
    if polygons.len() < 3 {
        warn!("need at least 3 points to draw a polygon, got {}", polygons.len());
        return 0;
    }

    let mut drawn = 0;
    for triangle in polygons.triangles() {
        let normal = light::surface_normal(&triangle);
        if !is_front_facing(normal) {
            continue;
        }

        let color = light::shade(
            normal,
            shading.view,
            shading.ambient,
            shading.lights,
            shading.reflect,
        );
        scan_convert(&triangle, buffer, color);
        drawn += 1;
    }
    drawn
}

/// Draw every segment of an edge buffer. Returns the number drawn.
pub fn draw_lines(edges: &PointMatrix, buffer: &mut FrameBuffer, color: Color) -> usize {
    if edges.len() < 2 {
        warn!("need at least 2 points to draw a line, got {}", edges.len());
        return 0;
    }

    let mut drawn = 0;
    for [p0, p1] in edges.edges() {
        draw_line(
            p0.x as i32,
            p0.y as i32,
            p0.z,
            p1.x as i32,
            p1.y as i32,
            p1.z,
            buffer,
            color,
        );
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};

    fn unlit<'a>(reflect: &'a Reflectivity) -> Shading<'a> {
        Shading {
            view: Vec3::FORWARD,
            ambient: Color::new(255, 255, 255),
            lights: &[],
            reflect,
        }
    }

    #[test]
    fn counter_clockwise_triangle_is_drawn() {
        let reflect = Reflectivity::WHITE;
        let mut polygons = PointMatrix::new();
        polygons.add_polygon(
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(18.0, 2.0, 0.0),
            Vec3::new(10.0, 18.0, 0.0),
        );
        let mut fb = FrameBuffer::new(20, 20, BLACK);

        assert_eq!(draw_polygons(&polygons, &mut fb, &unlit(&reflect)), 1);
        // 255 ambient through a 0.1 coefficient
        assert_eq!(fb.get_pixel(10, 6), Some(Color::new(25, 25, 25)));
    }

    #[test]
    fn back_facing_triangle_is_culled() {
        let reflect = Reflectivity::WHITE;
        let mut polygons = PointMatrix::new();
        polygons.add_polygon(
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(10.0, 18.0, 0.0),
            Vec3::new(18.0, 2.0, 0.0),
        );
        let mut fb = FrameBuffer::new(20, 20, BLACK);

        assert_eq!(draw_polygons(&polygons, &mut fb, &unlit(&reflect)), 0);
        assert!(fb.pixels().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn too_few_points_draw_nothing() {
        let reflect = Reflectivity::WHITE;
        let mut polygons = PointMatrix::new();
        polygons.add_point(0.0, 0.0, 0.0);
        polygons.add_point(5.0, 0.0, 0.0);
        let mut fb = FrameBuffer::new(8, 8, BLACK);
        assert_eq!(draw_polygons(&polygons, &mut fb, &unlit(&reflect)), 0);

        let mut edges = PointMatrix::new();
        edges.add_point(1.0, 1.0, 0.0);
        assert_eq!(draw_lines(&edges, &mut fb, WHITE), 0);
        assert!(fb.pixels().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn edges_are_independent_segments() {
        let mut edges = PointMatrix::new();
        edges.add_edge(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0));
        edges.add_edge(Vec3::new(0.0, 4.0, 0.0), Vec3::new(4.0, 4.0, 0.0));
        let mut fb = FrameBuffer::new(5, 5, BLACK);

        assert_eq!(draw_lines(&edges, &mut fb, WHITE), 2);
        assert_eq!(fb.get_pixel(2, 0), Some(WHITE));
        assert_eq!(fb.get_pixel(2, 4), Some(WHITE));
        // No segment joins the two pairs
        assert_eq!(fb.get_pixel(4, 2), Some(BLACK));
    }

    #[test]
    fn box_far_wider_than_the_raster_fills_its_rows() {
        let reflect = Reflectivity::WHITE;
        let mut polygons = PointMatrix::new();
        let corner = Vec3::new(-1.5e9, 10.0, 0.0);
        crate::geometry::add_box(&mut polygons, corner, 3e9, 10.0, 10.0);
        let mut fb = FrameBuffer::new(20, 20, BLACK);

        assert!(draw_polygons(&polygons, &mut fb, &unlit(&reflect)) > 0);
        assert_eq!(fb.get_pixel(10, 5), Some(Color::new(25, 25, 25)));
        assert_eq!(fb.get_pixel(10, 15), Some(BLACK));
    }
}
